//! Hybrid job matching: deterministic sub-scorers, an optional semantic tier, and
//! the batch evaluator that ranks many postings for one candidate.
//!
//! The algorithmic tier is pure and always runs. The semantic tier is a pluggable
//! `SemanticEvaluator` wrapped in a neutral fallback, so a failing inference service
//! degrades a result to its algorithmic score instead of failing it.

pub mod batch;
pub mod config;
pub mod domain;
pub mod mapping;
pub mod orchestrator;
pub mod recommendations;
pub mod router;
pub mod scoring;
pub mod semantic;
pub mod service;

#[cfg(test)]
mod tests;

pub use batch::{BatchEvaluator, BatchReport};
pub use config::MatchingConfig;
pub use domain::{
    Candidate, CandidateProfile, EducationEntry, ExperienceLevel, Job, JobId, JobPreferences,
    RemotePreference, SalaryRange, SkillRecord, WorkArrangement, WorkExperienceEntry,
};
pub use mapping::{CandidateRecord, JobRow, MappingError};
pub use orchestrator::{MatchError, MatchResult, ScoreOrchestrator};
pub use router::match_router;
pub use scoring::{AlgorithmicScore, AlgorithmicScorer, ScoreBreakdown};
pub use semantic::{
    FallbackEvaluator, InferenceClient, InferenceConfig, SemanticError, SemanticEvaluator,
    SemanticInsight,
};
pub use service::{MatchService, MatchServiceError};
