use chrono::NaiveDate;

use super::super::domain::{ExperienceLevel, WorkExperienceEntry};
use super::SubScore;

const DAYS_PER_YEAR: f64 = 365.25;
const NO_LEVEL_SCORE: f64 = 75.0;
const DEFICIT_PENALTY_PER_YEAR: f64 = 20.0;
const EXCESS_PENALTY_PER_YEAR: f64 = 10.0;
const OVERQUALIFIED_FLOOR: f64 = 70.0;

/// Sum of every entry's tenure in fractional years, open entries running to `as_of`.
pub fn total_years(entries: &[WorkExperienceEntry], as_of: NaiveDate) -> f64 {
    entries
        .iter()
        .map(|entry| {
            let end = entry.end_date.unwrap_or(as_of);
            let days = (end - entry.start_date).num_days().max(0);
            days as f64 / DAYS_PER_YEAR
        })
        .sum()
}

/// Compare accumulated years against the canonical range for the requested level.
pub fn score_experience(
    level: Option<ExperienceLevel>,
    entries: &[WorkExperienceEntry],
    as_of: NaiveDate,
) -> SubScore {
    let Some(level) = level else {
        return SubScore::new(NO_LEVEL_SCORE, "No experience level specified");
    };

    let years = total_years(entries, as_of);
    let (min, max) = level.year_range();
    let explain = |relation: &str| {
        format!(
            "{years:.1} years of experience {relation} the \
             {min:.0}-{max:.0} years expected for {} roles",
            level.label()
        )
    };

    if years < min {
        let deficit = min - years;
        SubScore::new(
            (100.0 - DEFICIT_PENALTY_PER_YEAR * deficit).max(0.0),
            explain("is below"),
        )
    } else if years > max {
        let excess = years - max;
        SubScore::new(
            (100.0 - EXCESS_PENALTY_PER_YEAR * excess).max(OVERQUALIFIED_FLOOR),
            explain("exceeds"),
        )
    } else {
        SubScore::new(100.0, explain("fits"))
    }
}
