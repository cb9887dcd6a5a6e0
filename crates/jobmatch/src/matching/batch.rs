use std::cmp::Reverse;
use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::domain::{Candidate, Job};
use super::orchestrator::{MatchResult, ScoreOrchestrator};
use super::scoring::AlgorithmicScore;

/// Ordered results of one batch plus the counters callers log or display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<MatchResult>,
    pub escalated: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Best matches first. Ties keep input order; failed items sink to the end.
    pub fn ranked(&self) -> Vec<&MatchResult> {
        let mut ranked: Vec<&MatchResult> = self.results.iter().collect();
        ranked.sort_by_key(|result| (result.is_failed(), Reverse(result.final_score)));
        ranked
    }

    /// Successful results scoring at least `min`, in input order.
    pub fn at_least(&self, min: u8) -> Vec<&MatchResult> {
        self.results
            .iter()
            .filter(|result| !result.is_failed() && result.final_score >= min)
            .collect()
    }
}

/// Aborts the spawned evaluation when its owner is dropped, so cancelling a batch
/// also cancels the inference calls it started.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

enum Planned {
    Failed(String),
    AlgorithmicOnly(AlgorithmicScore),
    Escalate(AlgorithmicScore),
}

/// Applies the orchestrator to many jobs for one candidate under bounded concurrency.
#[derive(Clone)]
pub struct BatchEvaluator {
    orchestrator: Arc<ScoreOrchestrator>,
}

impl BatchEvaluator {
    pub fn new(orchestrator: Arc<ScoreOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub fn orchestrator(&self) -> &Arc<ScoreOrchestrator> {
        &self.orchestrator
    }

    /// Score every job, escalating only those at or above the threshold.
    ///
    /// The report always holds one result per input job, in input order.
    pub async fn evaluate(&self, jobs: &[Job], candidate: &Candidate) -> BatchReport {
        let config = *self.orchestrator.config();
        let semantic = self.orchestrator.semantic_available();
        info!(
            jobs = jobs.len(),
            threshold = config.ai_threshold,
            group_size = config.group_size(),
            semantic,
            "starting batch evaluation"
        );

        let plans: Vec<Planned> = jobs
            .iter()
            .map(|job| match self.orchestrator.algorithmic(job, candidate) {
                Err(err) => Planned::Failed(err.to_string()),
                Ok(algorithmic) if semantic && algorithmic.score >= config.ai_threshold => {
                    debug!(job_id = %job.id.as_str(), score = algorithmic.score, "escalating job");
                    Planned::Escalate(algorithmic)
                }
                Ok(algorithmic) => Planned::AlgorithmicOnly(algorithmic),
            })
            .collect();

        let escalated = plans
            .iter()
            .filter(|plan| matches!(plan, Planned::Escalate(_)))
            .count();

        let candidate = Arc::new(candidate.clone());
        let mut results = Vec::with_capacity(jobs.len());
        let mut plans = plans.into_iter();

        for group in jobs.chunks(config.group_size()) {
            let pending = group.iter().zip(plans.by_ref()).map(|(job, plan)| {
                let orchestrator = Arc::clone(&self.orchestrator);
                let candidate = Arc::clone(&candidate);
                let job = job.clone();
                async move {
                    match plan {
                        Planned::Failed(reason) => MatchResult::failed(job.id, reason),
                        Planned::AlgorithmicOnly(algorithmic) => {
                            ScoreOrchestrator::algorithmic_only(&job, algorithmic)
                        }
                        Planned::Escalate(algorithmic) => {
                            let job_id = job.id.clone();
                            let mut task = AbortOnDrop(tokio::spawn(async move {
                                orchestrator
                                    .complete(&job, &candidate, algorithmic, true)
                                    .await
                            }));
                            match (&mut task.0).await {
                                Ok(result) => result,
                                Err(err) => {
                                    let reason = format!("evaluation aborted: {err}");
                                    MatchResult::failed(job_id, reason)
                                }
                            }
                        }
                    }
                }
            });
            results.extend(join_all(pending).await);
        }

        let failed = results.iter().filter(|result| result.is_failed()).count();
        for result in results.iter().filter(|result| result.is_failed()) {
            error!(
                job_id = %result.job_id.as_str(),
                error = result.error.as_deref().unwrap_or_default(),
                "job evaluation failed"
            );
        }

        info!(
            jobs = results.len(),
            escalated,
            failed,
            "batch evaluation finished"
        );

        BatchReport {
            results,
            escalated,
            failed,
        }
    }
}
