use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::{SemanticAssessment, SemanticError, SemanticEvaluator, SemanticInsight};
use crate::matching::scoring::to_score;

pub const NEUTRAL_SCORE: u8 = 50;
pub const FALLBACK_EXPLANATION: &str = "AI analysis unavailable";
pub const FALLBACK_CONCERN: &str = "AI analysis could not be completed";

const MAX_EXPLANATION_WORDS: usize = 200;

/// Outcome of a guarded semantic evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticVerdict {
    /// The evaluator answered within contract.
    Assessed(SemanticInsight),
    /// The evaluator failed; the neutral insight stands in for it.
    Unavailable(SemanticInsight),
}

impl SemanticVerdict {
    pub fn insight(&self) -> &SemanticInsight {
        match self {
            SemanticVerdict::Assessed(insight) | SemanticVerdict::Unavailable(insight) => insight,
        }
    }

    pub fn into_insight(self) -> SemanticInsight {
        match self {
            SemanticVerdict::Assessed(insight) | SemanticVerdict::Unavailable(insight) => insight,
        }
    }

    pub fn is_assessed(&self) -> bool {
        matches!(self, SemanticVerdict::Assessed(_))
    }
}

/// Decorator that turns any evaluator failure into the neutral insight.
#[derive(Clone)]
pub struct FallbackEvaluator {
    inner: Arc<dyn SemanticEvaluator>,
}

impl FallbackEvaluator {
    pub fn new(inner: Arc<dyn SemanticEvaluator>) -> Self {
        Self { inner }
    }

    /// Evaluate without ever failing. Scores are clamped into 0-100.
    pub async fn assess(&self, candidate_context: &str, job_context: &str) -> SemanticVerdict {
        match self.inner.evaluate(candidate_context, job_context).await {
            Ok(assessment) if assessment.score.is_finite() => {
                SemanticVerdict::Assessed(into_insight(assessment))
            }
            Ok(_) => {
                warn!(
                    error = %SemanticError::InvalidScore,
                    "semantic evaluation rejected; using neutral fallback"
                );
                SemanticVerdict::Unavailable(SemanticInsight::neutral())
            }
            Err(error) => {
                warn!(%error, "semantic evaluation failed; using neutral fallback");
                SemanticVerdict::Unavailable(SemanticInsight::neutral())
            }
        }
    }
}

#[async_trait]
impl SemanticEvaluator for FallbackEvaluator {
    async fn evaluate(
        &self,
        candidate_context: &str,
        job_context: &str,
    ) -> Result<SemanticAssessment, SemanticError> {
        let insight = self.assess(candidate_context, job_context).await.into_insight();
        Ok(SemanticAssessment {
            score: f64::from(insight.score),
            explanation: insight.explanation,
            strengths: insight.strengths,
            concerns: insight.concerns,
        })
    }
}

fn into_insight(assessment: SemanticAssessment) -> SemanticInsight {
    SemanticInsight {
        score: to_score(assessment.score),
        explanation: limit_words(assessment.explanation.trim(), MAX_EXPLANATION_WORDS),
        strengths: non_blank(assessment.strengths),
        concerns: non_blank(assessment.concerns),
    }
}

fn limit_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        text.to_string()
    } else {
        words[..max_words].join(" ")
    }
}

fn non_blank(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::tests::common::{FailingEvaluator, StaticEvaluator};

    #[tokio::test]
    async fn failure_yields_neutral_insight() {
        let evaluator = FallbackEvaluator::new(Arc::new(FailingEvaluator));

        let verdict = evaluator.assess("candidate", "job").await;

        assert!(!verdict.is_assessed());
        let insight = verdict.insight();
        assert_eq!(insight.score, 50);
        assert_eq!(insight.explanation, "AI analysis unavailable");
        assert!(insight.strengths.is_empty());
        assert_eq!(
            insight.concerns,
            vec!["AI analysis could not be completed".to_string()]
        );
    }

    #[tokio::test]
    async fn decorator_never_returns_an_error() {
        let evaluator = FallbackEvaluator::new(Arc::new(FailingEvaluator));

        let assessment = evaluator
            .evaluate("candidate", "job")
            .await
            .expect("fallback never fails");

        assert_eq!(assessment.score, 50.0);
    }

    #[tokio::test]
    async fn scores_are_clamped_on_success() {
        let high = FallbackEvaluator::new(Arc::new(StaticEvaluator::scoring(140.0)));
        assert_eq!(high.assess("c", "j").await.insight().score, 100);

        let low = FallbackEvaluator::new(Arc::new(StaticEvaluator::scoring(-12.0)));
        let verdict = low.assess("c", "j").await;
        assert!(verdict.is_assessed());
        assert_eq!(verdict.insight().score, 0);
    }

    #[tokio::test]
    async fn non_finite_scores_take_the_fallback_path() {
        let evaluator = FallbackEvaluator::new(Arc::new(StaticEvaluator::scoring(f64::NAN)));
        let verdict = evaluator.assess("c", "j").await;
        assert_eq!(verdict, SemanticVerdict::Unavailable(SemanticInsight::neutral()));
    }

    #[test]
    fn explanation_is_capped_at_two_hundred_words() {
        let long = vec!["word"; 250].join(" ");
        assert_eq!(limit_words(&long, 200).split_whitespace().count(), 200);
        assert_eq!(limit_words("short answer", 200), "short answer");
    }
}
