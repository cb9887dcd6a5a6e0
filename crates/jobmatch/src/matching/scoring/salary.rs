use super::super::domain::{JobPreferences, SalaryRange};
use super::SubScore;

const NO_PREFERENCE_SCORE: f64 = 75.0;
const UNDISCLOSED_SCORE: f64 = 50.0;
const OVERLAP_BASE: f64 = 70.0;
const OVERLAP_WEIGHT: f64 = 0.3;
const ABOVE_EXPECTATIONS_SCORE: f64 = 85.0;

/// Compare the advertised salary band against the candidate's floor and ceiling.
pub fn score_salary(salary: &SalaryRange, preferences: &JobPreferences) -> SubScore {
    let preferred_min = preferences.salary_min.filter(|value| *value > 0);
    let preferred_max = preferences.salary_max.filter(|value| *value > 0);

    if preferred_min.is_none() && preferred_max.is_none() {
        return SubScore::new(NO_PREFERENCE_SCORE, "No salary preference specified");
    }

    if salary.is_undisclosed() {
        return SubScore::new(UNDISCLOSED_SCORE, "Salary not disclosed");
    }

    let (job_min, job_max) = match (salary.min, salary.max) {
        (Some(min), Some(max)) => (f64::from(min.min(max)), f64::from(min.max(max))),
        (Some(only), None) | (None, Some(only)) => (f64::from(only), f64::from(only)),
        (None, None) => return SubScore::new(UNDISCLOSED_SCORE, "Salary not disclosed"),
    };
    let pref_min = preferred_min.map(f64::from).unwrap_or(0.0);
    let pref_max = preferred_max.map(f64::from).unwrap_or(f64::INFINITY);

    if job_max < pref_min {
        let deficit_percent = (pref_min - job_max) / pref_min * 100.0;
        return SubScore::new(
            (OVERLAP_BASE - deficit_percent).max(0.0),
            format!(
                "Salary {} is {deficit_percent:.0}% below your minimum of ${pref_min:.0}",
                salary.describe()
            ),
        );
    }

    if job_min > pref_max {
        return SubScore::new(
            ABOVE_EXPECTATIONS_SCORE,
            format!(
                "Salary {} exceeds your expected maximum of ${pref_max:.0}",
                salary.describe()
            ),
        );
    }

    let overlap = job_max.min(pref_max) - job_min.max(pref_min);
    let preferred_width = pref_max - pref_min;
    let overlap_percent = if preferred_width.is_infinite() {
        0.0
    } else if preferred_width <= 0.0 {
        100.0
    } else {
        (overlap.max(0.0) / preferred_width * 100.0).min(100.0)
    };

    SubScore::new(
        (OVERLAP_BASE + OVERLAP_WEIGHT * overlap_percent).min(100.0),
        format!(
            "Salary {} overlaps {overlap_percent:.0}% of your preferred range",
            salary.describe()
        ),
    )
}
