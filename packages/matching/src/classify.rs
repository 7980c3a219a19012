//! Job-likeliness classification for scraped messages.
//!
//! Cheap keyword and structural heuristics that decide whether a body is
//! worth running through the field extractor. A negative here is an
//! expected outcome, not an error.

use tracing::debug;

use crate::dedup::passes_prefilters;

/// Job keywords, English and Amharic. One hit is necessary (but not
/// sufficient) unless the structured label set is present.
const JOB_KEYWORDS: &[&str] = &[
    // English
    "job",
    "vacancy",
    "hiring",
    "recruitment",
    "position",
    "career",
    "employment",
    "opportunity",
    "opening",
    "role",
    "work",
    "apply",
    // Amharic
    "ሥራ",
    "ስራ",
    "ቅጥር",
    "ክፍት የስራ ቦታ",
    "የስራ ማስታወቂያ",
    "ደመወዝ",
];

/// Labeled-field indicators that mark a structured posting.
const JOB_INDICATORS: &[&str] = &[
    "job title:",
    "position:",
    "vacancy:",
    "hiring:",
    "recruitment:",
    "salary:",
    "compensation:",
    "deadline:",
    "work location:",
    "job type:",
    "experience:",
    "qualification:",
    "requirements:",
    "ሥራ:",
    "የስራ:",
    "ደመወዝ:",
    "ክፍያ:",
];

/// The structured label set used by aggregator channels. Any of these is
/// a strong positive signal that overrides keyword absence.
const STRUCTURED_LABELS: &[&str] = &[
    "job title:",
    "job type:",
    "work location:",
    "salary/compensation:",
    "deadline:",
];

/// Decide whether a message body advertises a position.
pub fn is_job_posting(text: &str) -> bool {
    if !passes_prefilters(text) {
        return false;
    }

    let lower = text.to_lowercase();

    // Structured postings are job-like even when the prose around the
    // labels carries no generic job keyword.
    if STRUCTURED_LABELS.iter().any(|label| lower.contains(label)) {
        return true;
    }

    if !JOB_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        debug!("no job keywords found");
        return false;
    }

    let has_indicator = JOB_INDICATORS.iter().any(|ind| lower.contains(ind));
    if !has_indicator {
        debug!("job keywords without labeled indicators");
    }
    has_indicator
}
