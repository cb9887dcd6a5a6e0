use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::matching::domain::{
    Candidate, CandidateProfile, EducationEntry, ExperienceLevel, Job, JobId, JobPreferences,
    RemotePreference, SalaryRange, SkillRecord, WorkArrangement, WorkExperienceEntry,
};
use crate::matching::mapping::{
    CandidateRecord, EducationRow, JobRow, PreferencesRow, ProfileRow, SkillRow,
    WorkExperienceRow,
};
use crate::matching::semantic::{SemanticAssessment, SemanticError, SemanticEvaluator};
use crate::matching::{MatchService, MatchingConfig, ScoreOrchestrator};

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Reference "today" for every fixture: the candidate then has roughly 9.6 years of experience.
pub(crate) fn as_of() -> NaiveDate {
    date(2025, 1, 1)
}

fn position(
    position: &str,
    company: &str,
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> WorkExperienceEntry {
    WorkExperienceEntry {
        position: position.to_string(),
        company: company.to_string(),
        start_date: start,
        end_date: end,
        description: format!("Shipped product work at {company}."),
    }
}

/// Austin-based senior engineer with React and Node.js, open to any arrangement.
pub(crate) fn candidate() -> Candidate {
    Candidate {
        profile: CandidateProfile {
            id: "cand-1".to_string(),
            location: "Austin, TX".to_string(),
            headline: "Full-stack engineer".to_string(),
            summary: "Builds customer-facing web applications.".to_string(),
        },
        experience: vec![
            position("Intern", "Initech", date(2015, 6, 1), Some(date(2015, 12, 31))),
            position("Engineer", "Fabrikam", date(2016, 1, 1), Some(date(2018, 5, 31))),
            position("Senior Engineer", "Contoso", date(2018, 6, 1), Some(date(2021, 2, 28))),
            position("Staff Engineer", "Northwind", date(2021, 3, 1), None),
        ],
        education: vec![EducationEntry {
            degree: "BSc".to_string(),
            field: "Computer Science".to_string(),
            school: "State University".to_string(),
        }],
        skills: vec![
            SkillRecord {
                name: "React".to_string(),
                endorsements: 12,
            },
            SkillRecord {
                name: "Node.js".to_string(),
                endorsements: 4,
            },
        ],
        preferences: JobPreferences {
            experience_level: None,
            salary_min: Some(110_000),
            salary_max: Some(160_000),
            remote_preference: RemotePreference::Any,
        },
    }
}

/// Remote senior posting: skills 50, experience 100, location 100, salary 88, total 78.
pub(crate) fn job(id: &str) -> Job {
    Job {
        id: JobId(id.to_string()),
        title: "Senior Frontend Engineer".to_string(),
        company: "Acme".to_string(),
        location: "San Francisco, CA".to_string(),
        work_arrangement: WorkArrangement::Remote,
        salary: SalaryRange::new(Some(120_000), Some(150_000)),
        posted_on: Some(date(2024, 12, 1)),
        description: "Own the design system and customer dashboard.".to_string(),
        required_skills: vec!["React".to_string(), "TypeScript".to_string()],
        preferred_skills: vec!["GraphQL".to_string()],
        experience_level: Some(ExperienceLevel::Senior),
    }
}

/// On-site executive posting in Berlin with no overlapping skills; scores 38.
pub(crate) fn low_match_job(id: &str) -> Job {
    Job {
        id: JobId(id.to_string()),
        title: "Director of Platform".to_string(),
        company: "Globex".to_string(),
        location: "Berlin".to_string(),
        work_arrangement: WorkArrangement::OnSite,
        salary: SalaryRange::new(None, None),
        posted_on: None,
        description: "Lead the platform organisation.".to_string(),
        required_skills: vec!["Go".to_string(), "Kubernetes".to_string()],
        preferred_skills: Vec::new(),
        experience_level: Some(ExperienceLevel::Executive),
    }
}

pub(crate) fn orchestrator(config: MatchingConfig) -> ScoreOrchestrator {
    ScoreOrchestrator::new(config).with_reference_date(as_of())
}

pub(crate) fn orchestrator_with(
    config: MatchingConfig,
    evaluator: Arc<dyn SemanticEvaluator>,
) -> ScoreOrchestrator {
    orchestrator(config).with_evaluator(evaluator)
}

pub(crate) fn job_row(id: Option<&str>) -> JobRow {
    JobRow {
        id: id.map(str::to_string),
        title: "Senior Frontend Engineer".to_string(),
        company: "Acme".to_string(),
        location: "San Francisco, CA".to_string(),
        remote_type: Some("remote".to_string()),
        salary_min: Some(120_000),
        salary_max: Some(150_000),
        posted_date: Some(date(2024, 12, 1)),
        description: "Own the design system and customer dashboard.".to_string(),
        required_skills: vec!["React".to_string(), "TypeScript".to_string()],
        preferred_skills: vec!["GraphQL".to_string()],
        experience_level: Some("Senior".to_string()),
    }
}

pub(crate) fn candidate_record() -> CandidateRecord {
    let experience = |position: &str, company: &str, start, end| WorkExperienceRow {
        position: position.to_string(),
        company: company.to_string(),
        start_date: start,
        end_date: end,
        description: None,
    };
    CandidateRecord {
        profile: ProfileRow {
            id: Some("cand-1".to_string()),
            location: Some("Austin, TX".to_string()),
            headline: Some("Full-stack engineer".to_string()),
            summary: None,
        },
        work_experience: vec![
            experience("Staff Engineer", "Northwind", date(2021, 3, 1), None),
            experience("Senior Engineer", "Contoso", date(2018, 6, 1), Some(date(2021, 2, 28))),
            experience("Engineer", "Fabrikam", date(2016, 1, 1), Some(date(2018, 5, 31))),
            experience("Intern", "Initech", date(2015, 6, 1), Some(date(2015, 12, 31))),
        ],
        education: vec![EducationRow {
            degree: "BSc".to_string(),
            field_of_study: "Computer Science".to_string(),
            school: "State University".to_string(),
        }],
        skills: vec![
            SkillRow {
                name: "React".to_string(),
                endorsements: Some(12),
            },
            SkillRow {
                name: "Node.js".to_string(),
                endorsements: None,
            },
        ],
        preferences: Some(PreferencesRow {
            experience_level: None,
            salary_min: Some(110_000),
            salary_max: Some(160_000),
            remote_preference: Some("any".to_string()),
        }),
    }
}

pub(crate) fn match_service(config: MatchingConfig) -> MatchService {
    MatchService::new(orchestrator(config))
}

pub(crate) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Evaluator whose service is always down.
pub(crate) struct FailingEvaluator;

#[async_trait]
impl SemanticEvaluator for FailingEvaluator {
    async fn evaluate(&self, _: &str, _: &str) -> Result<SemanticAssessment, SemanticError> {
        Err(SemanticError::Status {
            status: 503,
            body: "inference service offline".to_string(),
        })
    }
}

/// Evaluator answering every request with the same assessment.
pub(crate) struct StaticEvaluator {
    assessment: SemanticAssessment,
    calls: AtomicUsize,
}

impl StaticEvaluator {
    pub(crate) fn scoring(score: f64) -> Self {
        Self {
            assessment: SemanticAssessment {
                score,
                explanation: "Strong frontend alignment.".to_string(),
                strengths: vec!["React depth".to_string()],
                concerns: vec![
                    "Limited TypeScript exposure".to_string(),
                    "No design-system ownership".to_string(),
                    "Unlisted third concern".to_string(),
                ],
            },
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SemanticEvaluator for StaticEvaluator {
    async fn evaluate(&self, _: &str, _: &str) -> Result<SemanticAssessment, SemanticError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.assessment.clone())
    }
}

/// Evaluator that panics for postings whose title contains `trigger`.
pub(crate) struct PanickingEvaluator {
    pub(crate) trigger: String,
}

#[async_trait]
impl SemanticEvaluator for PanickingEvaluator {
    async fn evaluate(
        &self,
        _candidate_context: &str,
        job_context: &str,
    ) -> Result<SemanticAssessment, SemanticError> {
        if job_context.contains(&self.trigger) {
            panic!("evaluator crashed on {}", self.trigger);
        }
        Ok(SemanticAssessment {
            score: 80.0,
            explanation: "Good fit.".to_string(),
            strengths: Vec::new(),
            concerns: Vec::new(),
        })
    }
}

/// Evaluator recording the peak number of overlapping calls.
#[derive(Default)]
pub(crate) struct ConcurrencyTracker {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl ConcurrencyTracker {
    pub(crate) fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SemanticEvaluator for ConcurrencyTracker {
    async fn evaluate(&self, _: &str, _: &str) -> Result<SemanticAssessment, SemanticError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(current, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(SemanticAssessment {
            score: 90.0,
            explanation: "Fits.".to_string(),
            strengths: Vec::new(),
            concerns: Vec::new(),
        })
    }
}

/// Evaluator that takes `delay` per call and counts calls that ran to completion.
pub(crate) struct SlowEvaluator {
    delay: Duration,
    started: AtomicUsize,
    finished: AtomicUsize,
}

impl SlowEvaluator {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            started: AtomicUsize::new(0),
            finished: AtomicUsize::new(0),
        }
    }

    pub(crate) fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub(crate) fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SemanticEvaluator for SlowEvaluator {
    async fn evaluate(&self, _: &str, _: &str) -> Result<SemanticAssessment, SemanticError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.finished.fetch_add(1, Ordering::SeqCst);
        Ok(SemanticAssessment {
            score: 90.0,
            explanation: "Fits.".to_string(),
            strengths: Vec::new(),
            concerns: Vec::new(),
        })
    }
}
