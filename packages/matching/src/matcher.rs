//! Preference matching rule engine.
//!
//! One job against every registered profile, independently. The three
//! signals (location, job type, keyword/category) are OR-ed: satisfying
//! any single one is enough to match. That broadcast-leaning policy is a
//! product decision - over-delivery is preferred to under-delivery - and
//! must not be tightened into an AND.

use tracing::debug;

use crate::types::config::MatchWeights;
use crate::types::job::JobRecord;
use crate::types::profile::UserPreferenceProfile;
use crate::types::verdict::MatchResult;

/// Job-location phrases the "remote" preference matches.
const REMOTE_JOB_PHRASES: &[&str] = &["remote", "work from home"];

/// Match one job against all registered profiles.
///
/// Returns only matched users, ordered by descending score. The sort is
/// stable, so ties keep arrival order.
pub fn match_job(
    job: &JobRecord,
    profiles: &[UserPreferenceProfile],
    weights: &MatchWeights,
) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = profiles
        .iter()
        .map(|profile| score_profile(job, profile, weights))
        .filter(|result| result.matched)
        .collect();

    results.sort_by(|a, b| b.score.cmp(&a.score));
    debug!(
        job = %job.title,
        matched = results.len(),
        of = profiles.len(),
        "matching pass complete"
    );
    results
}

/// Score one profile against one job.
pub fn score_profile(
    job: &JobRecord,
    profile: &UserPreferenceProfile,
    weights: &MatchWeights,
) -> MatchResult {
    // No stored preferences at all: the universal wildcard matches
    // everything at the baseline score.
    if profile.is_universal_wildcard() {
        return MatchResult {
            user_id: profile.user_id,
            external_message_id: job.external_message_id,
            score: weights.wildcard,
            matched: true,
        };
    }

    let mut score = 0;
    let mut matched = false;

    if location_matches(job, profile) {
        score += weights.location;
        matched = true;
    }
    if job_type_matches(job, profile) {
        score += weights.job_type;
        matched = true;
    }
    if keyword_matches(job, profile) {
        score += weights.keyword;
        matched = true;
    }

    MatchResult {
        user_id: profile.user_id,
        external_message_id: job.external_message_id,
        score,
        matched,
    }
}

/// Location signal: wildcard token, remote special case, or
/// bidirectional substring against the job's location text.
fn location_matches(job: &JobRecord, profile: &UserPreferenceProfile) -> bool {
    if profile.wants_any_location() {
        return true;
    }

    let job_location = job.location.as_deref().unwrap_or("").to_lowercase();

    for preferred in &profile.preferred_locations {
        if preferred == "remote" {
            if REMOTE_JOB_PHRASES.iter().any(|p| job_location.contains(p)) {
                return true;
            }
            if job.job_type.map(|jt| jt.as_str()) == Some("remote") {
                return true;
            }
            continue;
        }

        if job_location.is_empty() {
            continue;
        }
        if job_location.contains(preferred.as_str()) || preferred.contains(&job_location) {
            return true;
        }
    }
    false
}

/// Job-type signal: wildcard token or bidirectional substring. Stored
/// preference tokens may use spaces where records use underscores.
fn job_type_matches(job: &JobRecord, profile: &UserPreferenceProfile) -> bool {
    if profile.wants_any_job_type() {
        return true;
    }

    let Some(job_type) = job.job_type else {
        return false;
    };
    let job_type = job_type.as_str();

    profile.preferred_job_types.iter().any(|preferred| {
        let preferred = preferred.replace(' ', "_");
        preferred.contains(job_type) || job_type.contains(preferred.as_str())
    })
}

/// Keyword/category signal: lenient when the user configured neither
/// categories nor keywords; otherwise any token appearing in the title
/// or description, case-insensitive.
fn keyword_matches(job: &JobRecord, profile: &UserPreferenceProfile) -> bool {
    if profile.preferred_categories.is_empty() && profile.keywords.is_empty() {
        return true;
    }

    let haystack = format!("{} {}", job.title, job.description).to_lowercase();
    profile
        .preferred_categories
        .iter()
        .chain(profile.keywords.iter())
        .any(|token| haystack.contains(token.as_str()))
}
