mod experience;
mod location;
mod salary;
mod skills;
mod weights;

pub use experience::{score_experience, total_years};
pub use location::{locations_match, score_location};
pub use salary::score_salary;
pub use skills::{score_skills, SkillsOutcome};
pub use weights::{ScoreWeights, ALGORITHMIC_BLEND, MATCH_WEIGHTS, SEMANTIC_BLEND};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Candidate, Job};

/// Unrounded sub-score with the explanation shown to the candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct SubScore {
    pub value: f64,
    pub explanation: String,
}

impl SubScore {
    pub fn new(value: f64, explanation: impl Into<String>) -> Self {
        Self {
            value,
            explanation: explanation.into(),
        }
    }

    fn report(&self) -> CriterionBreakdown {
        CriterionBreakdown {
            score: to_score(self.value),
            explanation: self.explanation.clone(),
        }
    }
}

/// Round and clamp a raw value into the reported 0-100 range.
pub(crate) fn to_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillsBreakdown {
    pub score: u8,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionBreakdown {
    pub score: u8,
    pub explanation: String,
}

/// Per-criterion audit trail behind the algorithmic score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: SkillsBreakdown,
    pub experience: CriterionBreakdown,
    pub location: CriterionBreakdown,
    pub salary: CriterionBreakdown,
}

impl ScoreBreakdown {
    /// Zeroed breakdown carrying the same note on every criterion.
    pub fn unavailable(note: &str) -> Self {
        let criterion = CriterionBreakdown {
            score: 0,
            explanation: note.to_string(),
        };
        Self {
            skills: SkillsBreakdown {
                score: 0,
                matched: Vec::new(),
                missing: Vec::new(),
            },
            experience: criterion.clone(),
            location: criterion.clone(),
            salary: criterion,
        }
    }
}

/// Combiner output: weighted total plus the breakdown it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmicScore {
    pub score: u8,
    pub breakdown: ScoreBreakdown,
}

/// Stateless combiner applying the fixed weights to the four sub-scorers.
#[derive(Debug, Clone)]
pub struct AlgorithmicScorer {
    weights: ScoreWeights,
    as_of: NaiveDate,
}

impl AlgorithmicScorer {
    /// `as_of` anchors tenure for positions that have no end date.
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            weights: MATCH_WEIGHTS,
            as_of,
        }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn score(&self, job: &Job, candidate: &Candidate) -> AlgorithmicScore {
        let skills = score_skills(&job.required_skills, &candidate.skills);
        let experience = score_experience(
            job.experience_level
                .or(candidate.preferences.experience_level),
            &candidate.experience,
            self.as_of,
        );
        let location = score_location(
            job.work_arrangement,
            &job.location,
            &candidate.profile.location,
            candidate.preferences.remote_preference,
        );
        let salary = score_salary(&job.salary, &candidate.preferences);

        let weighted = skills.value * self.weights.skills
            + experience.value * self.weights.experience
            + location.value * self.weights.location
            + salary.value * self.weights.salary;

        AlgorithmicScore {
            score: to_score(weighted),
            breakdown: ScoreBreakdown {
                skills: SkillsBreakdown {
                    score: to_score(skills.value),
                    matched: skills.matched,
                    missing: skills.missing,
                },
                experience: experience.report(),
                location: location.report(),
                salary: salary.report(),
            },
        }
    }
}
