use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for scored job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Where the work happens, as advertised by the posting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkArrangement {
    Remote,
    Hybrid,
    OnSite,
    #[default]
    Unknown,
}

impl WorkArrangement {
    pub const fn label(self) -> &'static str {
        match self {
            WorkArrangement::Remote => "remote",
            WorkArrangement::Hybrid => "hybrid",
            WorkArrangement::OnSite => "on-site",
            WorkArrangement::Unknown => "unspecified",
        }
    }
}

/// Advertised compensation bounds; either side may be undisclosed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl SalaryRange {
    pub fn new(min: Option<u32>, max: Option<u32>) -> Self {
        Self {
            min: min.filter(|value| *value > 0),
            max: max.filter(|value| *value > 0),
        }
    }

    /// True when the posting discloses no usable figure.
    pub fn is_undisclosed(&self) -> bool {
        self.min.unwrap_or(0) == 0 && self.max.unwrap_or(0) == 0
    }

    pub fn describe(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("${min} - ${max}"),
            (Some(min), None) => format!("from ${min}"),
            (None, Some(max)) => format!("up to ${max}"),
            (None, None) => "not disclosed".to_string(),
        }
    }
}

/// Canonical seniority bands shared by postings and candidate preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Executive,
}

impl ExperienceLevel {
    /// Inclusive year range a candidate should fall into for this level.
    pub const fn year_range(self) -> (f64, f64) {
        match self {
            ExperienceLevel::Entry => (0.0, 2.0),
            ExperienceLevel::Mid => (2.0, 5.0),
            ExperienceLevel::Senior => (5.0, 10.0),
            ExperienceLevel::Executive => (10.0, 100.0),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Executive => "executive",
        }
    }
}

/// Job posting as seen by the engine. Owned upstream and never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub work_arrangement: WorkArrangement,
    pub salary: SalaryRange,
    pub posted_on: Option<NaiveDate>,
    pub description: String,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub experience_level: Option<ExperienceLevel>,
}

/// Read-only identity and narrative of the candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: String,
    pub location: String,
    pub headline: String,
    pub summary: String,
}

/// Single position in the candidate's work history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperienceEntry {
    pub position: String,
    pub company: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub field: String,
    pub school: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub name: String,
    pub endorsements: u32,
}

/// Candidate's stance on remote work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemotePreference {
    Remote,
    Hybrid,
    OnSite,
    #[default]
    Any,
}

impl RemotePreference {
    pub const fn accepts_remote(self) -> bool {
        matches!(self, RemotePreference::Remote | RemotePreference::Any)
    }

    pub const fn accepts_hybrid(self) -> bool {
        matches!(self, RemotePreference::Hybrid | RemotePreference::Any)
    }

    pub const fn accepts_on_site(self) -> bool {
        matches!(self, RemotePreference::OnSite | RemotePreference::Any)
    }
}

/// Candidate supplied search preferences. Absent fields score neutrally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPreferences {
    pub experience_level: Option<ExperienceLevel>,
    pub salary_min: Option<u32>,
    pub salary_max: Option<u32>,
    pub remote_preference: RemotePreference,
}

/// Everything the engine reads about one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub profile: CandidateProfile,
    pub experience: Vec<WorkExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillRecord>,
    pub preferences: JobPreferences,
}

impl Candidate {
    /// Work history ordered most recent first.
    pub fn experience_by_recency(&self) -> Vec<&WorkExperienceEntry> {
        let mut entries: Vec<_> = self.experience.iter().collect();
        entries.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        entries
    }
}
