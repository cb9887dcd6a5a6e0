use super::scoring::ScoreBreakdown;
use super::semantic::SemanticInsight;

pub const MAX_RECOMMENDATIONS: usize = 5;

const HIGHLIGHTED_SKILLS: usize = 3;
const SEMANTIC_CONCERNS: usize = 2;
const LOCATION_CONCERN_BELOW: u8 = 70;

/// Actionable suggestions, most important first.
///
/// `insight` is only supplied when the semantic tier actually assessed the match.
pub fn build_recommendations(
    breakdown: &ScoreBreakdown,
    insight: Option<&SemanticInsight>,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    let missing = &breakdown.skills.missing;
    if !missing.is_empty() {
        let highlighted: Vec<&str> = missing
            .iter()
            .take(HIGHLIGHTED_SKILLS)
            .map(String::as_str)
            .collect();
        recommendations.push(format!(
            "Highlight any experience with {} in your application",
            highlighted.join(", ")
        ));
    }

    if breakdown.location.score < LOCATION_CONCERN_BELOW {
        recommendations.push(
            "Mention your willingness to relocate or your flexibility to work remotely".to_string(),
        );
    }

    if let Some(insight) = insight {
        recommendations.extend(insight.concerns.iter().take(SEMANTIC_CONCERNS).cloned());
    }

    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}
