//! Semantic tier: context building, the inference-service client, and the
//! neutral fallback that keeps the engine independent of that service.

mod client;
mod context;
mod fallback;

pub use client::{InferenceClient, InferenceConfig};
pub use context::{candidate_context, job_context, user_prompt, SYSTEM_PROMPT};
pub use fallback::{
    FallbackEvaluator, SemanticVerdict, FALLBACK_CONCERN, FALLBACK_EXPLANATION, NEUTRAL_SCORE,
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Capability that judges qualitative fit from two free-text context blocks.
#[async_trait]
pub trait SemanticEvaluator: Send + Sync {
    async fn evaluate(
        &self,
        candidate_context: &str,
        job_context: &str,
    ) -> Result<SemanticAssessment, SemanticError>;
}

/// Raw assessment as returned by an evaluator, before clamping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticAssessment {
    pub score: f64,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub concerns: Vec<String>,
}

/// Narrative attached to a match result once the semantic tier has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticInsight {
    pub score: u8,
    pub explanation: String,
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
}

impl SemanticInsight {
    pub fn neutral() -> Self {
        Self {
            score: NEUTRAL_SCORE,
            explanation: FALLBACK_EXPLANATION.to_string(),
            strengths: Vec::new(),
            concerns: vec![FALLBACK_CONCERN.to_string()],
        }
    }
}

/// Failure modes of a semantic evaluation. Never surfaced past the fallback decorator.
#[derive(Debug, thiserror::Error)]
pub enum SemanticError {
    #[error("inference transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("inference service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("inference response is not a valid assessment: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("inference response carried no assessment content")]
    MissingContent,
    #[error("assessment score is not a finite number")]
    InvalidScore,
}
