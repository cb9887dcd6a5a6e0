use serde::{Deserialize, Serialize};

/// Fixed rubric weights applied by the algorithmic combiner.
pub const MATCH_WEIGHTS: ScoreWeights = ScoreWeights {
    skills: 0.40,
    experience: 0.25,
    location: 0.20,
    salary: 0.15,
};

/// Share of the blended score contributed by the algorithmic tier.
pub const ALGORITHMIC_BLEND: f64 = 0.6;
/// Share of the blended score contributed by the semantic tier.
pub const SEMANTIC_BLEND: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skills: f64,
    pub experience: f64,
    pub location: f64,
    pub salary: f64,
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.location + self.salary
    }
}
