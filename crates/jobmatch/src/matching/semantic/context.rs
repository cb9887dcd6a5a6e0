use super::super::domain::{Candidate, Job};

const RECENT_POSITIONS: usize = 3;
const EDUCATION_ENTRIES: usize = 2;
const POSITION_DESCRIPTION_CHARS: usize = 300;
const JOB_DESCRIPTION_CHARS: usize = 2000;

pub const SYSTEM_PROMPT: &str = "You are a professional recruiter and career advisor. \
You assess how well a candidate fits a job posting and always answer with a single JSON object.";

/// Free-text summary of the candidate handed to the inference service.
pub fn candidate_context(candidate: &Candidate) -> String {
    let profile = &candidate.profile;
    let mut lines = vec![
        format!("Headline: {}", or_unspecified(&profile.headline)),
        format!("Summary: {}", or_unspecified(&profile.summary)),
        format!("Location: {}", or_unspecified(&profile.location)),
    ];

    let skills: Vec<&str> = candidate
        .skills
        .iter()
        .map(|skill| skill.name.as_str())
        .collect();
    if !skills.is_empty() {
        lines.push(format!("Skills: {}", skills.join(", ")));
    }

    let recent = candidate.experience_by_recency();
    if !recent.is_empty() {
        lines.push("Recent experience:".to_string());
        for entry in recent.into_iter().take(RECENT_POSITIONS) {
            let end = entry
                .end_date
                .map(|date| date.format("%Y-%m").to_string())
                .unwrap_or_else(|| "present".to_string());
            let mut line = format!(
                "- {} at {} ({} to {})",
                entry.position,
                entry.company,
                entry.start_date.format("%Y-%m"),
                end
            );
            if !entry.description.trim().is_empty() {
                line.push_str(": ");
                line.push_str(&truncate(entry.description.trim(), POSITION_DESCRIPTION_CHARS));
            }
            lines.push(line);
        }
    }

    if !candidate.education.is_empty() {
        lines.push("Education:".to_string());
        for entry in candidate.education.iter().take(EDUCATION_ENTRIES) {
            lines.push(format!(
                "- {} in {}, {}",
                entry.degree, entry.field, entry.school
            ));
        }
    }

    lines.join("\n")
}

/// Free-text summary of the posting handed to the inference service.
pub fn job_context(job: &Job) -> String {
    let mut lines = vec![
        format!("Title: {}", or_unspecified(&job.title)),
        format!("Company: {}", or_unspecified(&job.company)),
        format!(
            "Location: {} ({})",
            or_unspecified(&job.location),
            job.work_arrangement.label()
        ),
        format!("Salary: {}", job.salary.describe()),
    ];
    if let Some(level) = job.experience_level {
        lines.push(format!("Experience level: {}", level.label()));
    }
    if !job.required_skills.is_empty() {
        lines.push(format!("Required skills: {}", job.required_skills.join(", ")));
    }
    if !job.description.trim().is_empty() {
        lines.push(format!(
            "Description: {}",
            truncate(job.description.trim(), JOB_DESCRIPTION_CHARS)
        ));
    }
    lines.join("\n")
}

/// User message wrapping both context blocks and the required output contract.
pub fn user_prompt(candidate_context: &str, job_context: &str) -> String {
    format!(
        r#"Evaluate how well this candidate fits the job.

CANDIDATE:
{candidate_context}

JOB:
{job_context}

Respond with a JSON object containing exactly these keys:
- "score": integer from 0 to 100 rating overall fit
- "explanation": plain-text rationale of at most 200 words
- "strengths": array of short strings naming what makes the candidate a good fit
- "concerns": array of short strings naming gaps or risks"#
    )
}

fn or_unspecified(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "not specified"
    } else {
        trimmed
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}
