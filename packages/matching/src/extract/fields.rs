//! Per-field extractor chains.
//!
//! Each field is resolved by an ordered slice of plain functions; the
//! first one to produce a value wins. Labels observed in aggregator
//! channels come first, looser regex patterns second, layout heuristics
//! last.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::job::JobType;

lazy_static! {
    static ref TITLE_PATTERNS: Vec<Regex> = [
        r"(?i)position:\s*(.+)",
        r"(?i)job title:\s*(.+)",
        r"(?i)role:\s*(.+)",
        r"(?i)vacancy:\s*(.+)",
        r"ሥራ:\s*(.+)",
        r"የስራ ስም:\s*(.+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    static ref COMPANY_PATTERNS: Vec<Regex> = [
        r"(?i)company:\s*(.+)",
        r"(?i)organization:\s*(.+)",
        r"(?i)employer:\s*(.+)",
        r"ድርጅት:\s*(.+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    static ref SALARY_PATTERNS: Vec<Regex> = [
        r"(?i)salary:\s*([0-9][0-9,]*(?:\s*-\s*[0-9][0-9,]*)?)",
        r"(?i)([0-9][0-9,]*(?:\s*-\s*[0-9][0-9,]*)?)\s*(?:birr|etb|br)\b",
        r"ደመወዝ:\s*([0-9][0-9,]*(?:\s*-\s*[0-9][0-9,]*)?)",
        r"ክፍያ:\s*([0-9][0-9,]*(?:\s*-\s*[0-9][0-9,]*)?)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    static ref FORMS_LINK_REGEX: Regex = Regex::new(r"https://forms\.gle/\S+").unwrap();

    static ref LINK_PATTERNS: Vec<Regex> = [
        r"(?i)apply using this link:\s*(https://\S+)",
        r"(?i)link:\s*(https://\S+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();
}

type Extractor = fn(&str) -> Option<String>;

const TITLE_CHAIN: &[Extractor] = &[title_from_label, title_from_patterns, title_from_first_line];
const COMPANY_CHAIN: &[Extractor] = &[company_before_separator, company_from_patterns];
const LOCATION_CHAIN: &[Extractor] = &[location_from_label, location_from_city_table];
const SALARY_CHAIN: &[Extractor] = &[salary_from_label, salary_from_patterns];
const LINK_CHAIN: &[Extractor] = &[link_from_forms, link_from_patterns];

/// Run a chain, returning the first extractor's value.
fn first_match(text: &str, chain: &[Extractor]) -> Option<String> {
    chain.iter().find_map(|extract| extract(text))
}

/// The value of the first line starting with `label`, case-insensitive.
fn labeled_value(text: &str, label: &str) -> Option<String> {
    let label_lower = label.to_lowercase();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.to_lowercase().starts_with(&label_lower) {
            let value = trimmed[label.len()..].trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

pub fn extract_title(text: &str) -> Option<String> {
    first_match(text, TITLE_CHAIN)
}

fn title_from_label(text: &str) -> Option<String> {
    labeled_value(text, "Job Title:")
}

fn title_from_patterns(text: &str) -> Option<String> {
    for line in text.lines() {
        for re in TITLE_PATTERNS.iter() {
            if let Some(caps) = re.captures(line) {
                let title = caps[1].trim().to_string();
                if !title.is_empty() {
                    return Some(title);
                }
            }
        }
    }
    None
}

/// Layout heuristic: a short first line reads as a headline title.
fn title_from_first_line(text: &str) -> Option<String> {
    let first = text.lines().find(|line| !line.trim().is_empty())?;
    let trimmed = first.trim();
    if trimmed.chars().count() < 100 {
        Some(trimmed.to_string())
    } else {
        None
    }
}

pub fn extract_company(text: &str) -> Option<String> {
    first_match(text, COMPANY_CHAIN)
}

/// Aggregator layout heuristic: the company name sits on the line
/// immediately preceding a long underscore separator.
fn company_before_separator(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 && line.contains("__________") {
            let company = lines[i - 1].trim();
            if !company.is_empty()
                && !company.starts_with("From:")
                && !company.starts_with("Verified Company")
            {
                return Some(company.to_string());
            }
        }
    }
    None
}

fn company_from_patterns(text: &str) -> Option<String> {
    for re in COMPANY_PATTERNS.iter() {
        if let Some(caps) = re.captures(text) {
            return Some(caps[1].trim().to_string());
        }
    }
    None
}

pub fn extract_location(text: &str) -> Option<String> {
    first_match(text, LOCATION_CHAIN)
}

fn location_from_label(text: &str) -> Option<String> {
    labeled_value(text, "Work Location:")
}

/// Ethiopian cities, most specific first so "addis ababa" wins over "addis".
const CITY_TABLE: &[&str] = &[
    "addis ababa",
    "dire dawa",
    "bahir dar",
    "addis",
    "adama",
    "mekelle",
    "gondar",
    "hawassa",
    "jimma",
    "dessie",
    "አዲስ አበባ",
    "ድሬዳዋ",
    "ባህር ዳር",
    "አዳማ",
    "መቀሌ",
    "ጎንደር",
];

fn location_from_city_table(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    CITY_TABLE
        .iter()
        .find(|city| lower.contains(*city))
        .map(|city| title_case(city))
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn extract_salary(text: &str) -> Option<String> {
    first_match(text, SALARY_CHAIN)
}

/// Placeholder values the aggregator emits when no amount was given.
const SALARY_PLACEHOLDERS: &[&str] = &["Monthly", "Fixed (One-time)"];

fn salary_from_label(text: &str) -> Option<String> {
    let salary = labeled_value(text, "Salary/Compensation:")?;
    if SALARY_PLACEHOLDERS.contains(&salary.as_str()) {
        return None;
    }
    Some(salary)
}

fn salary_from_patterns(text: &str) -> Option<String> {
    for re in SALARY_PATTERNS.iter() {
        if let Some(caps) = re.captures(text) {
            return Some(format!("{} Birr", caps[1].trim()));
        }
    }
    None
}

pub fn extract_deadline(text: &str) -> Option<String> {
    labeled_value(text, "Deadline:")
}

pub fn extract_application_link(text: &str) -> Option<String> {
    first_match(text, LINK_CHAIN)
}

fn link_from_forms(text: &str) -> Option<String> {
    FORMS_LINK_REGEX.find(text).map(|m| m.as_str().to_string())
}

fn link_from_patterns(text: &str) -> Option<String> {
    for re in LINK_PATTERNS.iter() {
        if let Some(caps) = re.captures(text) {
            return Some(caps[1].trim().to_string());
        }
    }
    None
}

pub fn extract_view_details(text: &str) -> Option<String> {
    if text.contains("[view details below]") {
        Some("View details available in original post".to_string())
    } else {
        None
    }
}

pub fn extract_job_type(text: &str) -> Option<JobType> {
    job_type_from_label(text).or_else(|| job_type_from_keywords(text))
}

fn job_type_from_label(text: &str) -> Option<JobType> {
    let value = labeled_value(text, "Job Type:")?;
    let lower = value.to_lowercase();
    if lower.contains("on-site") || lower.contains("onsite") {
        return Some(JobType::Onsite);
    }
    if lower.contains("remote") {
        return Some(JobType::Remote);
    }
    if lower.contains("hybrid") {
        return Some(JobType::Hybrid);
    }
    classify_type_text(&lower)
}

/// Keyword tables, checked in a fixed priority order.
const TYPE_KEYWORDS: &[(JobType, &[&str])] = &[
    (JobType::FullTime, &["full time", "full-time", "permanent"]),
    (JobType::PartTime, &["part time", "part-time", "temporary"]),
    (JobType::Contract, &["contract", "consultant", "freelance"]),
    (JobType::Remote, &["remote", "work from home", "wfh", "online"]),
    (JobType::Internship, &["internship", "intern", "trainee"]),
];

fn job_type_from_keywords(text: &str) -> Option<JobType> {
    classify_type_text(&text.to_lowercase())
}

fn classify_type_text(lower: &str) -> Option<JobType> {
    for (job_type, keywords) in TYPE_KEYWORDS {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return Some(*job_type);
        }
    }
    None
}
