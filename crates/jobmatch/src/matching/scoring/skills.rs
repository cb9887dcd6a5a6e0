use super::super::domain::SkillRecord;

const NO_REQUIREMENTS_SCORE: f64 = 50.0;

/// Result of comparing required skills against the candidate's skill records.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillsOutcome {
    pub value: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Fraction of required skills the candidate covers, scaled to 0-100.
///
/// Matching is case-insensitive and accepts containment in either direction so
/// abbreviated or qualified names ("react" vs "react native") still count.
pub fn score_skills(required: &[String], candidate_skills: &[SkillRecord]) -> SkillsOutcome {
    let required: Vec<String> = required
        .iter()
        .map(|skill| skill.trim().to_lowercase())
        .filter(|skill| !skill.is_empty())
        .collect();

    if required.is_empty() {
        return SkillsOutcome {
            value: NO_REQUIREMENTS_SCORE,
            matched: Vec::new(),
            missing: Vec::new(),
        };
    }

    let owned: Vec<String> = candidate_skills
        .iter()
        .map(|skill| skill.name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    let (matched, missing): (Vec<String>, Vec<String>) = required
        .into_iter()
        .partition(|skill| owned.iter().any(|name| skills_overlap(name, skill)));

    let total = matched.len() + missing.len();
    let value = 100.0 * matched.len() as f64 / total as f64;

    SkillsOutcome {
        value,
        matched,
        missing,
    }
}

fn skills_overlap(candidate: &str, required: &str) -> bool {
    candidate.contains(required) || required.contains(candidate)
}
