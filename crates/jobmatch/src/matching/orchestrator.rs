use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::MatchingConfig;
use super::domain::{Candidate, Job, JobId};
use super::recommendations::build_recommendations;
use super::scoring::{
    to_score, AlgorithmicScore, AlgorithmicScorer, ScoreBreakdown, ALGORITHMIC_BLEND,
    SEMANTIC_BLEND,
};
use super::semantic::{
    candidate_context, job_context, FallbackEvaluator, SemanticEvaluator, SemanticInsight,
    SemanticVerdict,
};

/// Engine output for one (job, candidate) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub job_id: JobId,
    pub final_score: u8,
    pub algorithmic_score: u8,
    pub semantic_score: Option<u8>,
    pub breakdown: ScoreBreakdown,
    pub semantic_insight: Option<SemanticInsight>,
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MatchResult {
    /// Placeholder standing in for an item whose evaluation failed.
    pub fn failed(job_id: JobId, error: impl Into<String>) -> Self {
        Self {
            job_id,
            final_score: 0,
            algorithmic_score: 0,
            semantic_score: None,
            breakdown: ScoreBreakdown::unavailable("evaluation failed"),
            semantic_insight: None,
            missing_skills: Vec::new(),
            recommendations: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Contract violations by the caller; the only errors the engine propagates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("job is missing an identifier")]
    MissingJobId,
}

/// Computes the algorithmic score, gates the semantic tier, and blends the two.
pub struct ScoreOrchestrator {
    config: MatchingConfig,
    semantic: Option<FallbackEvaluator>,
    as_of: Option<NaiveDate>,
}

impl ScoreOrchestrator {
    pub fn new(config: MatchingConfig) -> Self {
        Self {
            config,
            semantic: None,
            as_of: None,
        }
    }

    /// Attach a semantic evaluator; it is wrapped in the neutral fallback.
    pub fn with_evaluator(mut self, evaluator: Arc<dyn SemanticEvaluator>) -> Self {
        self.semantic = Some(FallbackEvaluator::new(evaluator));
        self
    }

    /// Pin "today" for tenure of current positions instead of the wall clock.
    pub fn with_reference_date(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// True when a semantic call could happen for an escalated item.
    pub fn semantic_available(&self) -> bool {
        self.config.ai_enabled && self.semantic.is_some()
    }

    pub fn algorithmic(
        &self,
        job: &Job,
        candidate: &Candidate,
    ) -> Result<AlgorithmicScore, MatchError> {
        if job.id.as_str().trim().is_empty() {
            return Err(MatchError::MissingJobId);
        }
        let as_of = self.as_of.unwrap_or_else(|| Utc::now().date_naive());
        Ok(AlgorithmicScorer::new(as_of).score(job, candidate))
    }

    /// Full evaluation of one pair; `use_semantic` requests the semantic tier.
    pub async fn score(
        &self,
        job: &Job,
        candidate: &Candidate,
        use_semantic: bool,
    ) -> Result<MatchResult, MatchError> {
        let algorithmic = self.algorithmic(job, candidate)?;
        Ok(self.complete(job, candidate, algorithmic, use_semantic).await)
    }

    /// Finish an evaluation from an already computed algorithmic score.
    pub async fn complete(
        &self,
        job: &Job,
        candidate: &Candidate,
        algorithmic: AlgorithmicScore,
        use_semantic: bool,
    ) -> MatchResult {
        let evaluator = match &self.semantic {
            Some(evaluator) if use_semantic && self.config.ai_enabled => evaluator,
            _ => return Self::algorithmic_only(job, algorithmic),
        };

        debug!(
            job_id = %job.id.as_str(),
            algorithmic = algorithmic.score,
            "escalating to semantic evaluation"
        );
        let verdict = evaluator
            .assess(&candidate_context(candidate), &job_context(job))
            .await;

        match verdict {
            SemanticVerdict::Assessed(insight) => {
                let blended = ALGORITHMIC_BLEND * f64::from(algorithmic.score)
                    + SEMANTIC_BLEND * f64::from(insight.score);
                let recommendations = build_recommendations(&algorithmic.breakdown, Some(&insight));
                MatchResult {
                    job_id: job.id.clone(),
                    final_score: to_score(blended),
                    algorithmic_score: algorithmic.score,
                    semantic_score: Some(insight.score),
                    missing_skills: algorithmic.breakdown.skills.missing.clone(),
                    breakdown: algorithmic.breakdown,
                    semantic_insight: Some(insight),
                    recommendations,
                    error: None,
                }
            }
            SemanticVerdict::Unavailable(insight) => {
                let mut result = Self::algorithmic_only(job, algorithmic);
                result.semantic_insight = Some(insight);
                result
            }
        }
    }

    /// Result carrying only the algorithmic tier; semantic fields stay empty.
    pub fn algorithmic_only(job: &Job, algorithmic: AlgorithmicScore) -> MatchResult {
        let recommendations = build_recommendations(&algorithmic.breakdown, None);
        MatchResult {
            job_id: job.id.clone(),
            final_score: algorithmic.score,
            algorithmic_score: algorithmic.score,
            semantic_score: None,
            missing_skills: algorithmic.breakdown.skills.missing.clone(),
            breakdown: algorithmic.breakdown,
            semantic_insight: None,
            recommendations,
            error: None,
        }
    }
}
