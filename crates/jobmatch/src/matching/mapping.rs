//! Typed boundary between persistence-shaped rows and the engine's canonical structures.
//!
//! Rows mirror the snake_case records a data provider hands over. Conversion is the
//! only place where loosely typed tags and numbers are interpreted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{
    Candidate, CandidateProfile, EducationEntry, ExperienceLevel, Job, JobId, JobPreferences,
    RemotePreference, SalaryRange, SkillRecord, WorkArrangement, WorkExperienceEntry,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRow {
    pub id: Option<String>,
    pub title: String,
    pub company: String,
    pub location: String,
    pub remote_type: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub posted_date: Option<NaiveDate>,
    pub description: String,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub experience_level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRow {
    pub id: Option<String>,
    pub location: Option<String>,
    pub headline: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperienceRow {
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub company: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationRow {
    pub degree: String,
    pub field_of_study: String,
    pub school: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillRow {
    pub name: String,
    pub endorsements: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesRow {
    pub experience_level: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub remote_preference: Option<String>,
}

/// Everything the provider returns for one candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateRecord {
    pub profile: ProfileRow,
    pub work_experience: Vec<WorkExperienceRow>,
    pub education: Vec<EducationRow>,
    pub skills: Vec<SkillRow>,
    pub preferences: Option<PreferencesRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("job row is missing an id")]
    MissingJobId,
    #[error("candidate profile is missing an id")]
    MissingCandidateId,
}

impl TryFrom<JobRow> for Job {
    type Error = MappingError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let id = non_blank(row.id).ok_or(MappingError::MissingJobId)?;
        Ok(Job {
            id: JobId(id),
            title: row.title.trim().to_string(),
            company: row.company.trim().to_string(),
            location: row.location.trim().to_string(),
            work_arrangement: row
                .remote_type
                .as_deref()
                .map(parse_arrangement)
                .unwrap_or_default(),
            salary: SalaryRange::new(salary(row.salary_min), salary(row.salary_max)),
            posted_on: row.posted_date,
            description: row.description,
            required_skills: clean_list(row.required_skills),
            preferred_skills: clean_list(row.preferred_skills),
            experience_level: row.experience_level.as_deref().and_then(parse_level),
        })
    }
}

impl TryFrom<CandidateRecord> for Candidate {
    type Error = MappingError;

    fn try_from(record: CandidateRecord) -> Result<Self, Self::Error> {
        let id = non_blank(record.profile.id).ok_or(MappingError::MissingCandidateId)?;
        let profile = CandidateProfile {
            id,
            location: text(record.profile.location),
            headline: text(record.profile.headline),
            summary: text(record.profile.summary),
        };

        let experience = record
            .work_experience
            .into_iter()
            .map(|row| WorkExperienceEntry {
                position: row.position,
                company: row.company,
                start_date: row.start_date,
                end_date: row.end_date,
                description: text(row.description),
            })
            .collect();

        let education = record
            .education
            .into_iter()
            .map(|row| EducationEntry {
                degree: row.degree,
                field: row.field_of_study,
                school: row.school,
            })
            .collect();

        let skills = record
            .skills
            .into_iter()
            .filter(|row| !row.name.trim().is_empty())
            .map(|row| SkillRecord {
                name: row.name.trim().to_string(),
                endorsements: row
                    .endorsements
                    .map(|count| u32::try_from(count.max(0)).unwrap_or(u32::MAX))
                    .unwrap_or(0),
            })
            .collect();

        let preferences = record
            .preferences
            .map(JobPreferences::from)
            .unwrap_or_default();

        Ok(Candidate {
            profile,
            experience,
            education,
            skills,
            preferences,
        })
    }
}

impl From<PreferencesRow> for JobPreferences {
    fn from(row: PreferencesRow) -> Self {
        JobPreferences {
            experience_level: row.experience_level.as_deref().and_then(parse_level),
            salary_min: salary(row.salary_min),
            salary_max: salary(row.salary_max),
            remote_preference: row
                .remote_preference
                .as_deref()
                .map(parse_remote_preference)
                .unwrap_or_default(),
        }
    }
}

pub fn parse_arrangement(tag: &str) -> WorkArrangement {
    match normalize_tag(tag).as_str() {
        "remote" => WorkArrangement::Remote,
        "hybrid" => WorkArrangement::Hybrid,
        "onsite" | "office" | "inoffice" => WorkArrangement::OnSite,
        _ => WorkArrangement::Unknown,
    }
}

pub fn parse_level(tag: &str) -> Option<ExperienceLevel> {
    match normalize_tag(tag).as_str() {
        "entry" | "entrylevel" | "junior" | "intern" => Some(ExperienceLevel::Entry),
        "mid" | "midlevel" | "intermediate" => Some(ExperienceLevel::Mid),
        "senior" | "lead" => Some(ExperienceLevel::Senior),
        "executive" | "director" => Some(ExperienceLevel::Executive),
        _ => None,
    }
}

pub fn parse_remote_preference(tag: &str) -> RemotePreference {
    match normalize_tag(tag).as_str() {
        "remote" => RemotePreference::Remote,
        "hybrid" => RemotePreference::Hybrid,
        "onsite" | "office" | "inoffice" => RemotePreference::OnSite,
        _ => RemotePreference::Any,
    }
}

// "On-site", "on_site" and "ON SITE" all collapse to "onsite".
fn normalize_tag(tag: &str) -> String {
    tag.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

fn salary(value: Option<i64>) -> Option<u32> {
    value
        .filter(|amount| *amount > 0)
        .map(|amount| u32::try_from(amount).unwrap_or(u32::MAX))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn text(value: Option<String>) -> String {
    value.map(|value| value.trim().to_string()).unwrap_or_default()
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}
