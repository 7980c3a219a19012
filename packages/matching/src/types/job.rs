//! Job posting types - extracted fields and persisted records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display truncation limit for descriptions, in characters.
pub const DESCRIPTION_DISPLAY_LIMIT: usize = 500;

/// Normalized job type.
///
/// Scraped posts carry these as free text; the extractor normalizes to
/// this enum and everything downstream works with the snake_case form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    FullTime,
    PartTime,
    Remote,
    Hybrid,
    Contract,
    Internship,
    Onsite,
}

impl JobType {
    /// The snake_case form used in stored records and matching.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "full_time",
            Self::PartTime => "part_time",
            Self::Remote => "remote",
            Self::Hybrid => "hybrid",
            Self::Contract => "contract",
            Self::Internship => "internship",
            Self::Onsite => "onsite",
        }
    }

    /// Parse a stored snake_case value back into the enum.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "full_time" => Some(Self::FullTime),
            "part_time" => Some(Self::PartTime),
            "remote" => Some(Self::Remote),
            "hybrid" => Some(Self::Hybrid),
            "contract" => Some(Self::Contract),
            "internship" => Some(Self::Internship),
            "onsite" => Some(Self::Onsite),
            _ => None,
        }
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields extracted from one raw message body.
///
/// Produced by the extractor chain; pure data, no source identity yet.
/// `title` and `description` are the only required fields - the chain
/// returns `None` instead of a fieldless husk.
#[derive(Debug, Clone, PartialEq)]
pub struct JobFields {
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub salary_text: Option<String>,
    pub deadline_text: Option<String>,
    pub application_link: Option<String>,
    /// Set when the post defers details to the original channel
    /// ("[view details below]" marker).
    pub view_details: Option<String>,
    pub description: String,
}

/// One scraped job posting, as persisted.
///
/// Records are append-only: created exactly once per unique source
/// message (and once per unique content), never mutated afterward.
/// Deactivation happens through admin tooling outside this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    /// Message identifier in the source chat
    pub external_message_id: i64,

    /// Channel or group the post was scraped from
    pub source_channel: String,

    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,

    /// Free-form salary text, preserved as scraped (not numeric)
    pub salary_text: Option<String>,

    /// Free-form deadline text, preserved as scraped
    pub deadline_text: Option<String>,

    pub application_link: Option<String>,
    pub view_details: Option<String>,
    pub description: String,

    /// Set at ingestion time
    pub posted_at: DateTime<Utc>,

    pub is_active: bool,
}

impl JobRecord {
    /// Build a record from extracted fields and the source identity.
    pub fn from_fields(fields: JobFields, external_message_id: i64, source_channel: impl Into<String>) -> Self {
        Self {
            external_message_id,
            source_channel: source_channel.into(),
            title: fields.title,
            company: fields.company,
            location: fields.location,
            job_type: fields.job_type,
            salary_text: fields.salary_text,
            deadline_text: fields.deadline_text,
            application_link: fields.application_link,
            view_details: fields.view_details,
            description: fields.description,
            posted_at: Utc::now(),
            is_active: true,
        }
    }

    /// Description truncated for display.
    pub fn display_description(&self) -> String {
        truncate_for_display(&self.description, DESCRIPTION_DISPLAY_LIMIT)
    }
}

/// Truncate text on a character boundary, appending an ellipsis when cut.
pub fn truncate_for_display(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{}...", cut)
}
