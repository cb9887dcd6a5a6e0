use serde::{Deserialize, Serialize};

pub const DEFAULT_AI_THRESHOLD: u8 = 70;
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 5;

/// Engine dials passed to the orchestrator and batch evaluator at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Allow the semantic tier to run at all.
    pub ai_enabled: bool,
    /// Minimum algorithmic score before a batch item is escalated to the semantic tier.
    pub ai_threshold: u8,
    /// Items evaluated concurrently per batch group.
    pub concurrency_limit: usize,
}

impl MatchingConfig {
    pub fn algorithmic_only() -> Self {
        Self {
            ai_enabled: false,
            ..Self::default()
        }
    }

    pub fn group_size(&self) -> usize {
        self.concurrency_limit.max(1)
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            ai_enabled: true,
            ai_threshold: DEFAULT_AI_THRESHOLD,
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
        }
    }
}
