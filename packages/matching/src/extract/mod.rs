//! Text field extraction - one raw message body in, structured job
//! fields out.
//!
//! Extraction is a chain of responsibility per field: the most specific
//! structured pattern first ("Key: value" labels), then looser regex
//! patterns, then layout heuristics. Each rung is an ordered list of
//! plain functions so individual patterns stay testable. The whole thing
//! is a pure function over text; `None` means "not a usable posting" and
//! is an expected outcome, not an error.

mod clean;
mod fields;

pub use clean::clean_description;

use crate::types::job::JobFields;

/// Extract structured job fields from one message body.
///
/// Returns `None` when no usable title or no description can be derived;
/// the pipeline drops such messages silently.
pub fn extract(text: &str) -> Option<JobFields> {
    let title = fields::extract_title(text)?;

    // Cleaning is lossy by design and must run before any truncation.
    let description = clean_description(text);
    if description.is_empty() {
        return None;
    }

    Some(JobFields {
        title,
        company: fields::extract_company(text),
        location: fields::extract_location(text),
        job_type: fields::extract_job_type(text),
        salary_text: fields::extract_salary(text),
        deadline_text: fields::extract_deadline(text),
        application_link: fields::extract_application_link(text),
        view_details: fields::extract_view_details(text),
        description,
    })
}
