use super::super::domain::{RemotePreference, WorkArrangement};
use super::SubScore;

/// Loose, case-insensitive containment check between two free-text locations.
///
/// "Austin" matches "Austin, TX" and vice versa. Short names can over-match
/// ("Ohio" inside "Ohio City"); blank locations never match.
pub fn locations_match(job_location: &str, candidate_location: &str) -> bool {
    let job = job_location.trim().to_lowercase();
    let candidate = candidate_location.trim().to_lowercase();
    if job.is_empty() || candidate.is_empty() {
        return false;
    }
    job.contains(&candidate) || candidate.contains(&job)
}

/// Wording for the posting's location inside an explanation.
fn describe_place(job_location: &str) -> &str {
    match job_location.trim() {
        "" => "an unspecified location",
        trimmed => trimmed,
    }
}

/// Score how well the work arrangement and location suit the candidate.
pub fn score_location(
    arrangement: WorkArrangement,
    job_location: &str,
    candidate_location: &str,
    preference: RemotePreference,
) -> SubScore {
    let place = describe_place(job_location);
    match arrangement {
        WorkArrangement::Remote => {
            if preference.accepts_remote() {
                SubScore::new(100.0, "Remote position matches your preference")
            } else {
                SubScore::new(70.0, "Remote position, though you prefer working on location")
            }
        }
        WorkArrangement::Hybrid => match preference {
            RemotePreference::Hybrid | RemotePreference::Any => {
                if locations_match(job_location, candidate_location) {
                    SubScore::new(100.0, format!("Hybrid role in {place}, near you"))
                } else {
                    SubScore::new(
                        60.0,
                        format!("Hybrid role in {place}; relocation may be required"),
                    )
                }
            }
            RemotePreference::Remote => SubScore::new(
                60.0,
                "Hybrid role requires some office presence but you prefer remote",
            ),
            RemotePreference::OnSite => SubScore::new(
                50.0,
                "Hybrid role only partially matches your on-site preference",
            ),
        },
        WorkArrangement::OnSite | WorkArrangement::Unknown => {
            let local = locations_match(job_location, candidate_location);
            match (local, preference.accepts_on_site()) {
                (true, true) => {
                    SubScore::new(100.0, format!("On-site role in {place}, near you"))
                }
                (true, false) => SubScore::new(
                    70.0,
                    format!(
                        "Local on-site role in {place}, but you prefer remote or hybrid work"
                    ),
                ),
                (false, true) => SubScore::new(
                    40.0,
                    format!("On-site role in {place}; relocation required"),
                ),
                (false, false) => SubScore::new(
                    20.0,
                    format!(
                        "On-site role in {place} requires relocation \
                         and conflicts with your remote preference"
                    ),
                ),
            }
        }
    }
}
