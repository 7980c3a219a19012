//! Notification formatting for matched users.

use serde_json::json;

use crate::types::job::JobRecord;

/// Format one job notification.
///
/// Human-readable field lines first, then a fenced JSON copy of the
/// record so companion apps can parse the posting without scraping the
/// prose back apart.
pub fn format_notification(record: &JobRecord, post_id: i64) -> String {
    let mut message = String::from("*🔔 NEW JOB ALERT*\n\n");
    message.push_str(&format!("*{}*\n", record.title));

    if let Some(company) = &record.company {
        message.push_str(&format!("🏢 *Company:* {}\n", company));
    }
    if let Some(location) = &record.location {
        message.push_str(&format!("📍 *Location:* {}\n", location));
    }
    if let Some(job_type) = record.job_type {
        message.push_str(&format!("💼 *Type:* {}\n", job_type));
    }
    if let Some(salary) = &record.salary_text {
        message.push_str(&format!("💰 *Salary:* {}\n", salary));
    }
    if let Some(deadline) = &record.deadline_text {
        message.push_str(&format!("⏰ *Deadline:* {}\n", deadline));
    }

    message.push_str(&format!("\n📋 *Description:*\n{}\n", record.display_description()));

    if let Some(link) = &record.application_link {
        message.push_str(&format!("\n🔗 *Apply Here:* {}\n", link));
    } else if let Some(details) = &record.view_details {
        message.push_str(&format!("\n📄 *Details:* {}\n", details));
    }

    message.push_str(&format!("\n🆔 *Post ID:* {}\n", post_id));
    message.push_str(&format!("📅 *Posted:* {}\n", record.posted_at.date_naive()));
    message.push_str(&format!("🔗 *Source:* {}\n\n", record.source_channel));

    message.push_str(&format!(
        "```json\n{}\n```\n\n",
        payload_json(record, post_id)
    ));

    if record.application_link.is_some() {
        message.push_str("💡 *Interested?* Click the link above to apply");
    } else {
        message.push_str(&format!("💡 *Interested?* Use `/apply {}` to apply", post_id));
    }

    message
}

/// Machine-readable copy of the record, pretty-printed.
fn payload_json(record: &JobRecord, post_id: i64) -> String {
    let payload = json!({
        "post_id": post_id,
        "title": record.title,
        "company": record.company,
        "location": record.location,
        "job_type": record.job_type,
        "salary": record.salary_text,
        "deadline": record.deadline_text,
        "application_link": record.application_link,
        "view_details": record.view_details,
        "description": record.display_description(),
        "posted_date": record.posted_at.date_naive().to_string(),
        "source": record.source_channel,
    });

    serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string())
}
