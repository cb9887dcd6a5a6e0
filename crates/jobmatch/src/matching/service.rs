use std::sync::Arc;

use super::batch::{BatchEvaluator, BatchReport};
use super::domain::{Candidate, Job, JobId};
use super::mapping::{CandidateRecord, JobRow, MappingError};
use super::orchestrator::{MatchError, MatchResult, ScoreOrchestrator};

/// Service mapping provider rows into engine inputs and running single or batch matches.
pub struct MatchService {
    orchestrator: Arc<ScoreOrchestrator>,
    batch: BatchEvaluator,
}

impl MatchService {
    pub fn new(orchestrator: ScoreOrchestrator) -> Self {
        let orchestrator = Arc::new(orchestrator);
        let batch = BatchEvaluator::new(Arc::clone(&orchestrator));
        Self {
            orchestrator,
            batch,
        }
    }

    pub fn orchestrator(&self) -> &ScoreOrchestrator {
        &self.orchestrator
    }

    /// Score one job row against one candidate record.
    pub async fn score(
        &self,
        job: JobRow,
        candidate: CandidateRecord,
        include_semantic: bool,
    ) -> Result<MatchResult, MatchServiceError> {
        let job = Job::try_from(job)?;
        let candidate = Candidate::try_from(candidate)?;
        let result = self
            .orchestrator
            .score(&job, &candidate, include_semantic)
            .await?;
        Ok(result)
    }

    /// Score a list of job rows. Rows that fail to map become failed placeholders
    /// at their input position; only an unusable candidate fails the call.
    pub async fn score_batch(
        &self,
        jobs: Vec<JobRow>,
        candidate: CandidateRecord,
    ) -> Result<BatchReport, MatchServiceError> {
        let candidate = Candidate::try_from(candidate)?;

        let mapped: Vec<Result<Job, MatchResult>> = jobs
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                Job::try_from(row).map_err(|err| {
                    MatchResult::failed(JobId(format!("row-{index}")), err.to_string())
                })
            })
            .collect();

        let valid: Vec<Job> = mapped
            .iter()
            .filter_map(|entry| entry.as_ref().ok().cloned())
            .collect();
        let report = self.batch.evaluate(&valid, &candidate).await;

        let mut scored = report.results.into_iter();
        let mut results = Vec::with_capacity(mapped.len());
        for entry in mapped {
            match entry {
                Ok(_) => results.extend(scored.next()),
                Err(placeholder) => results.push(placeholder),
            }
        }

        let failed = results.iter().filter(|result| result.is_failed()).count();
        Ok(BatchReport {
            results,
            escalated: report.escalated,
            failed,
        })
    }
}

/// Error raised by the match service.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error(transparent)]
    Match(#[from] MatchError),
}
