use super::common::*;
use std::sync::Arc;
use std::time::Duration;

use crate::matching::domain::{Job, JobId};
use crate::matching::{BatchEvaluator, MatchResult, MatchingConfig};

fn evaluator(orchestrator: crate::matching::ScoreOrchestrator) -> BatchEvaluator {
    BatchEvaluator::new(Arc::new(orchestrator))
}

fn mixed_jobs() -> Vec<Job> {
    vec![
        job("job-1"),
        low_match_job("job-2"),
        job("job-3"),
        low_match_job("job-4"),
    ]
}

#[tokio::test]
async fn deterministic_batches_are_idempotent() {
    let batch = evaluator(orchestrator(MatchingConfig::algorithmic_only()));
    let jobs = mixed_jobs();

    let first = batch.evaluate(&jobs, &candidate()).await;
    let second = batch.evaluate(&jobs, &candidate()).await;

    assert_eq!(first, second);
    assert_eq!(first.escalated, 0);
}

#[tokio::test]
async fn results_preserve_input_order() {
    let config = MatchingConfig {
        concurrency_limit: 2,
        ..MatchingConfig::default()
    };
    let batch = evaluator(orchestrator_with(
        config,
        Arc::new(StaticEvaluator::scoring(80.0)),
    ));

    let report = batch.evaluate(&mixed_jobs(), &candidate()).await;

    let ids: Vec<&str> = report
        .results
        .iter()
        .map(|result| result.job_id.as_str())
        .collect();
    assert_eq!(ids, vec!["job-1", "job-2", "job-3", "job-4"]);
}

#[tokio::test]
async fn only_jobs_at_or_above_threshold_are_escalated() {
    let static_evaluator = Arc::new(StaticEvaluator::scoring(80.0));
    let batch = evaluator(orchestrator_with(
        MatchingConfig::default(),
        static_evaluator.clone(),
    ));

    let report = batch.evaluate(&mixed_jobs(), &candidate()).await;

    assert_eq!(report.escalated, 2);
    assert_eq!(static_evaluator.calls(), 2);
    // 0.6 * 78 + 0.4 * 80 = 78.8
    assert_eq!(report.results[0].semantic_score, Some(80));
    assert_eq!(report.results[0].final_score, 79);
    assert_eq!(report.results[1].semantic_score, None);
    assert_eq!(report.results[1].semantic_insight, None);
    assert_eq!(report.results[1].final_score, 38);
}

#[tokio::test]
async fn threshold_equal_to_score_escalates() {
    let config = MatchingConfig {
        ai_threshold: 78,
        ..MatchingConfig::default()
    };
    let static_evaluator = Arc::new(StaticEvaluator::scoring(80.0));
    let batch = evaluator(orchestrator_with(config, static_evaluator.clone()));

    let report = batch.evaluate(&[job("job-1")], &candidate()).await;

    assert_eq!(report.escalated, 1);
    assert_eq!(static_evaluator.calls(), 1);
}

#[tokio::test]
async fn contract_failure_is_isolated_to_its_item() {
    let mut jobs: Vec<Job> = (1..=6).map(|n| job(&format!("job-{n}"))).collect();
    jobs[2].id = JobId(String::new());
    let batch = evaluator(orchestrator(MatchingConfig::algorithmic_only()));

    let report = batch.evaluate(&jobs, &candidate()).await;

    assert_eq!(report.len(), 6);
    assert_eq!(report.failed, 1);
    let failed = &report.results[2];
    assert!(failed.is_failed());
    assert_eq!(failed.final_score, 0);
    for (index, result) in report.results.iter().enumerate() {
        if index != 2 {
            assert!(!result.is_failed());
            assert_eq!(result.final_score, 78);
        }
    }
}

#[tokio::test]
async fn panicking_evaluation_becomes_a_placeholder() {
    let mut jobs: Vec<Job> = (1..=6).map(|n| job(&format!("job-{n}"))).collect();
    jobs[2].title = "Volatile Role".to_string();
    let config = MatchingConfig {
        concurrency_limit: 3,
        ..MatchingConfig::default()
    };
    let batch = evaluator(orchestrator_with(
        config,
        Arc::new(PanickingEvaluator {
            trigger: "Volatile Role".to_string(),
        }),
    ));

    let report = batch.evaluate(&jobs, &candidate()).await;

    assert_eq!(report.len(), 6);
    assert_eq!(report.failed, 1);
    assert_eq!(report.results[2].job_id.as_str(), "job-3");
    assert!(report.results[2].is_failed());
    assert_eq!(report.results[2].final_score, 0);
    let healthy: Vec<&MatchResult> = report
        .results
        .iter()
        .filter(|result| !result.is_failed())
        .collect();
    assert_eq!(healthy.len(), 5);
    assert!(healthy
        .iter()
        .all(|result| result.semantic_score == Some(80)));
}

#[tokio::test]
async fn in_flight_semantic_calls_never_exceed_group_size() {
    let tracker = Arc::new(ConcurrencyTracker::default());
    let config = MatchingConfig {
        concurrency_limit: 3,
        ..MatchingConfig::default()
    };
    let batch = evaluator(orchestrator_with(config, tracker.clone()));
    let jobs: Vec<Job> = (1..=10).map(|n| job(&format!("job-{n}"))).collect();

    let report = batch.evaluate(&jobs, &candidate()).await;

    assert_eq!(report.len(), 10);
    assert_eq!(tracker.calls(), 10);
    assert!(tracker.peak() <= 3, "peak {} exceeded group size", tracker.peak());
    assert!(tracker.peak() >= 1);
}

#[tokio::test]
async fn dropping_a_batch_cancels_in_flight_evaluations() {
    let slow = Arc::new(SlowEvaluator::new(Duration::from_millis(300)));
    let batch = evaluator(orchestrator_with(MatchingConfig::default(), slow.clone()));
    let jobs: Vec<Job> = (1..=4).map(|n| job(&format!("job-{n}"))).collect();
    let seeker = candidate();

    let outcome =
        tokio::time::timeout(Duration::from_millis(50), batch.evaluate(&jobs, &seeker)).await;
    assert!(outcome.is_err(), "batch should still be waiting on the evaluator");
    assert!(slow.started() >= 1);

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(slow.finished(), 0, "spawned evaluations outlived the batch");
}

#[tokio::test]
async fn empty_batch_yields_empty_report() {
    let batch = evaluator(orchestrator(MatchingConfig::default()));

    let report = batch.evaluate(&[], &candidate()).await;

    assert!(report.is_empty());
    assert_eq!(report.failed, 0);
}

#[tokio::test]
async fn ranking_orders_by_score_and_sinks_failures() {
    let mut jobs = mixed_jobs();
    jobs[0].id = JobId(" ".to_string());
    let batch = evaluator(orchestrator(MatchingConfig::algorithmic_only()));

    let report = batch.evaluate(&jobs, &candidate()).await;
    let ranked: Vec<&str> = report
        .ranked()
        .into_iter()
        .map(|result| result.job_id.as_str())
        .collect();

    assert_eq!(ranked, vec!["job-3", "job-2", "job-4", " "]);

    let strong: Vec<&str> = report
        .at_least(70)
        .into_iter()
        .map(|result| result.job_id.as_str())
        .collect();
    assert_eq!(strong, vec!["job-3"]);
}
