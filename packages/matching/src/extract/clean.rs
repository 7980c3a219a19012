//! Description cleaning.
//!
//! Scraped bodies carry share/forward boilerplate and channel mentions
//! that must not end up in stored descriptions. Cleaning is lossy by
//! design and runs before any display truncation.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Boilerplate patterns stripped from descriptions.
    static ref BOILERPLATE_PATTERNS: Vec<Regex> = [
        r"(?i)share this post",
        r"(?i)forward this message",
        r"(?i)join this channel",
        r"(?i)click here",
        r"(?i)link:\s*https?://\S+",
        r"@\w+",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Strip boilerplate and collapse whitespace.
pub fn clean_description(text: &str) -> String {
    let mut cleaned = text.to_string();
    for re in BOILERPLATE_PATTERNS.iter() {
        cleaned = re.replace_all(&cleaned, "").into_owned();
    }

    WHITESPACE_REGEX.replace_all(&cleaned, " ").trim().to_string()
}
