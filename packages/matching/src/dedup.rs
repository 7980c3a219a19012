//! Duplicate suppression for the inbound message stream.
//!
//! Two independent membership sets: composite source identity
//! (chat id + message id) and a SHA-256 hash of the body. A message is
//! rejected if either set already holds its key; on acceptance both keys
//! are inserted. Check and insert happen under one lock so two concurrent
//! handlers can never both admit the same duplicate.

use std::collections::HashSet;
use std::sync::Mutex;

use sha2::{Digest, Sha256};
use tracing::debug;

/// Cardinality threshold at which a set is cleared wholesale.
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Minimum body length worth hashing; anything shorter is UI noise.
const MIN_BODY_LEN: usize = 50;

/// Maximum "/"-prefixed command tokens before a body reads as a bot menu.
const MAX_COMMAND_TOKENS: usize = 2;

/// Bot/UI phrases that mark a body as not worth processing.
const DENYLIST: &[&str] = &[
    "database error",
    "error adding",
    "failed to add",
    "error:",
    "contact support",
    "main menu",
    "back to",
    "update preferences",
    "select job categories",
    "forwarded job",
    "ai-matched",
    "matched job",
];

#[derive(Default)]
struct Seen {
    messages: HashSet<(i64, i64)>,
    content: HashSet<String>,
}

/// Bounded-memory duplicate filter.
///
/// Eviction is clear-on-overflow, not LRU: when either set crosses
/// `max_entries` the whole set is dropped. That trades perfect duplicate
/// suppression across the clearing boundary for O(1) memory, matching
/// the behavior the product shipped with.
pub struct DuplicateFilter {
    seen: Mutex<Seen>,
    max_entries: usize,
}

impl Default for DuplicateFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl DuplicateFilter {
    /// Create a filter with the default cardinality threshold.
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }

    /// Create a filter with a custom cardinality threshold.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            seen: Mutex::new(Seen::default()),
            max_entries,
        }
    }

    /// Admit or reject one message.
    ///
    /// Returns `true` exactly once per identity and once per body content
    /// (until the bounded sets are cleared); marks both keys as seen on
    /// admission. Pre-filtered bodies are rejected without being marked.
    pub fn should_process(&self, chat_id: i64, message_id: i64, body: &str) -> bool {
        if !passes_prefilters(body) {
            return false;
        }

        let identity = (chat_id, message_id);
        let content_hash = hash_body(body);

        let mut seen = self.seen.lock().unwrap_or_else(|e| e.into_inner());

        if seen.messages.contains(&identity) {
            debug!(chat_id, message_id, "already processed message");
            return false;
        }
        if seen.content.contains(&content_hash) {
            debug!(hash = %&content_hash[..8], "already processed content");
            return false;
        }

        // Clear-on-overflow keeps both sets bounded.
        if seen.messages.len() >= self.max_entries {
            seen.messages.clear();
            debug!("cleared processed message set");
        }
        if seen.content.len() >= self.max_entries {
            seen.content.clear();
            debug!("cleared processed content set");
        }

        seen.messages.insert(identity);
        seen.content.insert(content_hash);
        true
    }

    /// Number of identities currently marked as seen.
    pub fn message_entries(&self) -> usize {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).messages.len()
    }

    /// Number of content hashes currently marked as seen.
    pub fn content_entries(&self) -> usize {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).content.len()
    }
}

/// Cheap rejections that run before hashing and never mark state.
pub fn passes_prefilters(body: &str) -> bool {
    let trimmed = body.trim();
    if trimmed.len() < MIN_BODY_LEN {
        return false;
    }

    let lower = trimmed.to_lowercase();
    if DENYLIST.iter().any(|phrase| lower.contains(phrase)) {
        return false;
    }

    if command_token_count(body) > MAX_COMMAND_TOKENS {
        return false;
    }

    true
}

/// Count whitespace-delimited tokens that look like bot commands
/// (`/start`, `/apply`, ...). Slashes inside URLs do not count.
fn command_token_count(body: &str) -> usize {
    body.split_whitespace()
        .filter(|token| token.starts_with('/'))
        .count()
}

/// SHA-256 of the trimmed body, hex-encoded.
fn hash_body(body: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body.trim().as_bytes());
    format!("{:x}", hasher.finalize())
}
