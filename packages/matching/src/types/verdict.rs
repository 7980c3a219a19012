//! Match outputs - rule-engine results and AI verdicts.
//!
//! Both types are ephemeral: produced fresh per job per matching pass and
//! discarded after delivery, never persisted.

use serde::{Deserialize, Serialize};

/// One user's result from a rule-engine matching pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub user_id: i64,

    /// Source message identity of the job that was matched
    pub external_message_id: i64,

    /// Additive score - sum of the weights of the signals that fired,
    /// not normalized to [0, 1]
    pub score: u32,

    /// Whether any signal fired; callers only care about `true` entries
    pub matched: bool,
}

/// The AI rescorer's structured output for one (job, user) pair.
///
/// Errors and timeouts never escape the rescorer; they collapse into the
/// [`AiMatchVerdict::failure`] shape so callers are never blocked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiMatchVerdict {
    /// Relevance in [0.0, 1.0]
    pub match_score: f32,

    /// Why the job does or does not match
    pub match_reason: String,

    /// User-facing personalized message
    pub recommendation: String,

    pub is_match: bool,
}

impl AiMatchVerdict {
    /// The zero-score failure shape. Timeouts and API errors are
    /// indistinguishable to callers; only the reason string differs.
    pub fn failure(reason: impl Into<String>, recommendation: impl Into<String>) -> Self {
        Self {
            match_score: 0.0,
            match_reason: reason.into(),
            recommendation: recommendation.into(),
            is_match: false,
        }
    }
}
