//! AI-assisted rescoring of (job, user) pairs.
//!
//! A best-effort enrichment layer on top of the rule engine: it produces
//! a personalized verdict for display, never gates the broadcast, and
//! never surfaces a failure to its caller - timeouts and API errors both
//! collapse into the zero-score verdict shape.

pub mod gemini;

pub use gemini::Gemini;

use tracing::{debug, warn};

use crate::traits::llm::LanguageModel;
use crate::traits::store::JobStore;
use crate::types::config::RescoreConfig;
use crate::types::job::JobRecord;
use crate::types::profile::UserPreferenceProfile;
use crate::types::verdict::AiMatchVerdict;

/// One accepted pairing from a batch rescoring pass.
#[derive(Debug, Clone)]
pub struct BatchMatch {
    pub user_id: i64,
    pub external_message_id: i64,
    pub verdict: AiMatchVerdict,
}

/// Reply phrases that raise the fallback score.
const POSITIVE_PHRASES: &[&str] = &[
    "match",
    "suitable",
    "good fit",
    "excellent",
    "perfect",
    "highly recommended",
];

/// Reply phrases that cap the fallback score.
const NEGATIVE_PHRASES: &[&str] = &[
    "not match",
    "unsuitable",
    "poor fit",
    "not recommended",
    "inappropriate",
];

/// AI rescorer over any [`LanguageModel`] implementation.
pub struct AiRescorer<L> {
    model: L,
    config: RescoreConfig,
}

impl<L: LanguageModel> AiRescorer<L> {
    /// Create a rescorer with default budgets.
    pub fn new(model: L) -> Self {
        Self {
            model,
            config: RescoreConfig::default(),
        }
    }

    /// Override the rescoring budgets.
    pub fn with_config(mut self, config: RescoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Score one (job, user) pair. Always returns a verdict.
    pub async fn score(&self, job: &JobRecord, profile: &UserPreferenceProfile) -> AiMatchVerdict {
        let prompt = build_prompt(job, profile);

        let reply = tokio::time::timeout(
            self.config.call_timeout,
            self.model
                .complete(&prompt, self.config.max_tokens, self.config.temperature),
        )
        .await;

        match reply {
            Ok(Ok(text)) => parse_verdict(&text),
            Ok(Err(e)) => {
                warn!(error = %e, "model error during rescoring");
                AiMatchVerdict::failure(
                    "Error in AI matching process",
                    "Unable to process job match",
                )
            }
            Err(_) => {
                warn!("model timeout during rescoring");
                AiMatchVerdict::failure(
                    "AI matching timeout",
                    "Unable to process job match due to timeout",
                )
            }
        }
    }

    /// Score every (job, user) pair, returning only accepted matches.
    ///
    /// Profile lookups and individual pairs run under their own budgets;
    /// a timed-out pair is skipped, never aborts the batch.
    pub async fn score_batch<S: JobStore>(
        &self,
        jobs: &[JobRecord],
        user_ids: &[i64],
        store: &S,
    ) -> Vec<BatchMatch> {
        let mut matches = Vec::new();

        for job in jobs {
            for &user_id in user_ids {
                let profile = match tokio::time::timeout(
                    self.config.profile_timeout,
                    store.get_profile(user_id),
                )
                .await
                {
                    Ok(Ok(Some(profile))) => profile,
                    Ok(Ok(None)) => UserPreferenceProfile::new(user_id),
                    Ok(Err(e)) => {
                        warn!(user_id, error = %e, "profile lookup failed");
                        UserPreferenceProfile::new(user_id)
                    }
                    Err(_) => {
                        warn!(user_id, "profile lookup timed out, skipping pair");
                        continue;
                    }
                };

                let verdict =
                    match tokio::time::timeout(self.config.pair_timeout, self.score(job, &profile))
                        .await
                    {
                        Ok(verdict) => verdict,
                        Err(_) => {
                            warn!(user_id, job = %job.title, "pair timed out, skipping");
                            continue;
                        }
                    };

                if verdict.is_match {
                    matches.push(BatchMatch {
                        user_id,
                        external_message_id: job.external_message_id,
                        verdict,
                    });
                }
            }
        }

        matches
    }
}

/// Natural-language prompt embedding job fields and user preferences.
fn build_prompt(job: &JobRecord, profile: &UserPreferenceProfile) -> String {
    let job_type = job
        .job_type
        .map(|jt| jt.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "You are an expert job matching AI for the Ethiopian job market. \
Analyze the job and user preferences below and provide a detailed matching analysis.\n\
\n\
Job Details:\n\
- Title: {title}\n\
- Company: {company}\n\
- Location: {location}\n\
- Job Type: {job_type}\n\
- Salary: {salary}\n\
- Description: {description}\n\
\n\
User Preferences:\n\
- Preferred Job Types: {pref_types}\n\
- Preferred Locations: {pref_locations}\n\
- Preferred Categories: {pref_categories}\n\
- Keywords: {keywords}\n\
\n\
Consider Ethiopian job market context, cultural factors, and realistic \
expectations. Be fair and encouraging.\n\
\n\
Respond in JSON format:\n\
{{\n\
    \"match_score\": 0.0,\n\
    \"match_reason\": \"Brief explanation\",\n\
    \"recommendation\": \"Personalized message\",\n\
    \"is_match\": false\n\
}}",
        title = job.title,
        company = job.company.as_deref().unwrap_or("N/A"),
        location = job.location.as_deref().unwrap_or("N/A"),
        job_type = job_type,
        salary = job.salary_text.as_deref().unwrap_or("N/A"),
        description = job.display_description(),
        pref_types = profile.preferred_job_types.join(", "),
        pref_locations = profile.preferred_locations.join(", "),
        pref_categories = profile.preferred_categories.join(", "),
        keywords = profile.keywords.join(", "),
    )
}

/// Parse a verdict out of the model's free-text reply.
///
/// Looks for an embedded JSON object first; when none parses, falls back
/// to keyword spotting over the raw reply. The fallback is a deliberate
/// resilience behavior, not dead code.
fn parse_verdict(reply: &str) -> AiMatchVerdict {
    if let Some(verdict) = parse_embedded_json(reply) {
        return clamp(verdict);
    }
    fallback_verdict(reply)
}

/// Try the widest brace span, then the tightest, as JSON.
fn parse_embedded_json(reply: &str) -> Option<AiMatchVerdict> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end <= start {
        return None;
    }

    if let Ok(verdict) = serde_json::from_str::<AiMatchVerdict>(&reply[start..=end]) {
        return Some(verdict);
    }

    // Models sometimes wrap the object in commentary containing stray
    // braces; retry on the innermost object.
    let inner_end = reply[start..].find('}')? + start;
    serde_json::from_str::<AiMatchVerdict>(&reply[start..=inner_end]).ok()
}

fn clamp(mut verdict: AiMatchVerdict) -> AiMatchVerdict {
    verdict.match_score = verdict.match_score.clamp(0.0, 1.0);
    verdict
}

/// Keyword-spotting fallback over the raw reply text.
fn fallback_verdict(reply: &str) -> AiMatchVerdict {
    let lower = reply.to_lowercase();
    let mut score: f32 = 0.0;
    let mut is_match = false;

    if POSITIVE_PHRASES.iter().any(|p| lower.contains(p)) {
        score = score.max(0.7);
        is_match = true;
    }
    if NEGATIVE_PHRASES.iter().any(|p| lower.contains(p)) {
        score = score.min(0.3);
        is_match = false;
    }

    let recommendation = reply
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("Job opportunity available")
        .to_string();

    let reason = reply
        .lines()
        .find(|line| {
            let l = line.to_lowercase();
            ["because", "due to", "since", "based on"]
                .iter()
                .any(|kw| l.contains(kw))
        })
        .map(|line| line.trim().to_string())
        .unwrap_or_else(|| "AI analysis completed".to_string());

    debug!(score, is_match, "fallback verdict from keyword spotting");
    AiMatchVerdict {
        match_score: score,
        match_reason: reason,
        recommendation,
        is_match,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockLanguageModel;
    use crate::types::job::JobFields;
    use std::time::Duration;

    fn sample_job() -> JobRecord {
        JobRecord::from_fields(
            JobFields {
                title: "Data Analyst".to_string(),
                company: Some("Tech PLC".to_string()),
                location: Some("Addis Ababa".to_string()),
                job_type: None,
                salary_text: None,
                deadline_text: None,
                application_link: None,
                view_details: None,
                description: "sql heavy analyst role".to_string(),
            },
            5,
            "jobs",
        )
    }

    #[test]
    fn test_parse_embedded_json() {
        let reply = "Here is my analysis:\n{\"match_score\": 0.9, \"match_reason\": \"skills align\", \"recommendation\": \"Apply!\", \"is_match\": true}\nGood luck.";
        let verdict = parse_verdict(reply);
        assert!(verdict.is_match);
        assert!((verdict.match_score - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_clamps_out_of_range_score() {
        let reply = "{\"match_score\": 7.5, \"match_reason\": \"r\", \"recommendation\": \"x\", \"is_match\": true}";
        let verdict = parse_verdict(reply);
        assert!((verdict.match_score - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fallback_positive_phrases() {
        let verdict = parse_verdict("This looks like an excellent opportunity for the candidate.");
        assert!(verdict.is_match);
        assert!((verdict.match_score - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fallback_negative_overrides_positive() {
        let verdict = parse_verdict("A good fit on paper, but ultimately not recommended because the location differs.");
        assert!(!verdict.is_match);
        assert!(verdict.match_score <= 0.3);
        assert!(verdict.match_reason.contains("because"));
    }

    #[tokio::test]
    async fn test_model_error_becomes_zero_verdict() {
        let rescorer = AiRescorer::new(MockLanguageModel::new().failing());
        let verdict = rescorer
            .score(&sample_job(), &UserPreferenceProfile::new(1))
            .await;
        assert_eq!(verdict.match_score, 0.0);
        assert!(!verdict.is_match);
    }

    #[tokio::test(start_paused = true)]
    async fn test_model_timeout_becomes_zero_verdict() {
        let model = MockLanguageModel::new()
            .with_reply("{\"match_score\": 1.0, \"match_reason\": \"r\", \"recommendation\": \"x\", \"is_match\": true}")
            .with_delay(Duration::from_secs(60));
        let rescorer = AiRescorer::new(model);

        let verdict = rescorer
            .score(&sample_job(), &UserPreferenceProfile::new(1))
            .await;
        assert_eq!(verdict.match_score, 0.0);
        assert!(!verdict.is_match);
        assert_eq!(verdict.match_reason, "AI matching timeout");
    }

    #[test]
    fn test_prompt_embeds_fields() {
        let profile = UserPreferenceProfile::new(1)
            .with_locations(&serde_json::json!(["addis ababa"]))
            .with_keywords(&serde_json::json!(["sql"]));
        let prompt = build_prompt(&sample_job(), &profile);
        assert!(prompt.contains("Data Analyst"));
        assert!(prompt.contains("addis ababa"));
        assert!(prompt.contains("Respond in JSON format"));
    }
}
