use crate::infra::{build_orchestrator, parse_date};
use chrono::NaiveDate;
use clap::Args;
use jobmatch::config::AppConfig;
use jobmatch::error::AppError;
use jobmatch::matching::{BatchReport, CandidateRecord, JobRow, MatchResult, MatchService};
use jobmatch::telemetry;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding an array of job rows
    #[arg(long)]
    pub(crate) jobs: PathBuf,
    /// JSON file holding one candidate record
    #[arg(long)]
    pub(crate) candidate: PathBuf,
    /// Skip the semantic tier even when an inference API key is configured
    #[arg(long)]
    pub(crate) no_semantic: bool,
    /// Only print results whose final score is at least this value
    #[arg(long)]
    pub(crate) min_score: Option<u8>,
    /// Reference date for tenure of current positions (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct RankedOutput<'a> {
    total: usize,
    escalated: usize,
    failed: usize,
    results: Vec<&'a MatchResult>,
}

pub(crate) async fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    init_logging(&config)?;
    if args.no_semantic {
        config.matching.ai_enabled = false;
    }

    let jobs: Vec<JobRow> = read_json(&args.jobs)?;
    let candidate: CandidateRecord = read_json(&args.candidate)?;

    let mut orchestrator = build_orchestrator(&config)?;
    if let Some(as_of) = args.as_of {
        orchestrator = orchestrator.with_reference_date(as_of);
    }
    let service = MatchService::new(orchestrator);
    let report = service.score_batch(jobs, candidate).await?;

    let output = ranked_output(&report, args.min_score);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Stdout carries the ranked JSON, so log lines go to stderr.
fn init_logging(config: &AppConfig) -> Result<(), AppError> {
    telemetry::init_stderr(&config.telemetry)?;
    Ok(())
}

fn ranked_output(report: &BatchReport, min_score: Option<u8>) -> RankedOutput<'_> {
    let results = report
        .ranked()
        .into_iter()
        .filter(|result| match min_score {
            Some(min) => !result.is_failed() && result.final_score >= min,
            None => true,
        })
        .collect();

    RankedOutput {
        total: report.len(),
        escalated: report.escalated,
        failed: report.failed,
        results,
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
