//! User preference profiles and boundary normalization.
//!
//! Stored preferences arrive in weakly-typed shapes: native JSON arrays,
//! bracketed strings (`"[Addis Ababa, Adama]"`), or plain comma-separated
//! strings. Everything is normalized into lowercase token sets right here
//! at the boundary so the matcher never sees a raw representation.

use serde::{Deserialize, Serialize};

/// Location tokens that short-circuit the location dimension to always-true.
pub const LOCATION_WILDCARDS: &[&str] = &["any", "any location"];

/// Job-type tokens that short-circuit the type dimension to always-true.
pub const JOB_TYPE_WILDCARDS: &[&str] = &["all", "all job types"];

/// One registered user's stored matching preferences.
///
/// An empty profile (all sets empty) is a universal wildcard and matches
/// every job. That default-open policy is deliberate: users who never
/// finished preference collection still receive postings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferenceProfile {
    pub user_id: i64,

    /// Job categories, matched against title/description text
    #[serde(default)]
    pub preferred_categories: Vec<String>,

    /// Locations; see [`LOCATION_WILDCARDS`], and "remote" matches
    /// remote/work-from-home jobs specifically
    #[serde(default)]
    pub preferred_locations: Vec<String>,

    /// Job types; see [`JOB_TYPE_WILDCARDS`]
    #[serde(default)]
    pub preferred_job_types: Vec<String>,

    /// Free-text keywords, matched against title/description
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl UserPreferenceProfile {
    /// Create an empty (universal wildcard) profile.
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }

    /// Set categories from any stored representation.
    pub fn with_categories(mut self, raw: &serde_json::Value) -> Self {
        self.preferred_categories = normalize_token_set(raw);
        self
    }

    /// Set locations from any stored representation.
    pub fn with_locations(mut self, raw: &serde_json::Value) -> Self {
        self.preferred_locations = normalize_token_set(raw);
        self
    }

    /// Set job types from any stored representation.
    pub fn with_job_types(mut self, raw: &serde_json::Value) -> Self {
        self.preferred_job_types = normalize_token_set(raw);
        self
    }

    /// Set keywords from any stored representation.
    pub fn with_keywords(mut self, raw: &serde_json::Value) -> Self {
        self.keywords = normalize_token_set(raw);
        self
    }

    /// True when every preference set is empty - the universal wildcard.
    pub fn is_universal_wildcard(&self) -> bool {
        self.preferred_categories.is_empty()
            && self.preferred_locations.is_empty()
            && self.preferred_job_types.is_empty()
            && self.keywords.is_empty()
    }

    /// True when the location set contains a wildcard token.
    ///
    /// Case-insensitive: profiles deserialized straight from storage
    /// bypass [`normalize_token_set`] and may carry stored casing.
    pub fn wants_any_location(&self) -> bool {
        self.preferred_locations
            .iter()
            .any(|loc| LOCATION_WILDCARDS.iter().any(|w| loc.eq_ignore_ascii_case(w)))
    }

    /// True when the job-type set contains a wildcard token.
    /// Case-insensitive, like [`Self::wants_any_location`].
    pub fn wants_any_job_type(&self) -> bool {
        self.preferred_job_types
            .iter()
            .any(|jt| JOB_TYPE_WILDCARDS.iter().any(|w| jt.eq_ignore_ascii_case(w)))
    }
}

/// Normalize any stored preference representation into a token list.
///
/// Accepts a JSON array of strings, a bracketed string, or a plain
/// comma-separated string. Tokens are trimmed and lowercased; empty
/// tokens are dropped. Anything unparsable degrades to the empty set -
/// a malformed stored value must lean toward the wildcard branches,
/// never reject the user.
pub fn normalize_token_set(raw: &serde_json::Value) -> Vec<String> {
    match raw {
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str())
            .flat_map(split_tokens)
            .collect(),
        serde_json::Value::String(s) => split_tokens(s),
        _ => Vec::new(),
    }
}

/// Split one delimited string into normalized tokens.
fn split_tokens(raw: &str) -> Vec<String> {
    raw.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|token| token.trim().trim_matches(|c| c == '"' || c == '\'').to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}
