//! Integration tests for the full ingestion pipeline.
//!
//! These tests verify the end-to-end workflow:
//! 1. Filter noise and duplicates
//! 2. Classify and extract fields
//! 3. Persist the job record
//! 4. Match against every profile
//! 5. Fan out notifications, then optionally rescore with the model

use serde_json::json;

use matching::testing::{MockLanguageModel, MockMessenger};
use matching::{
    ingest, AiRescorer, DropReason, DuplicateFilter, IngestConfig, IngestOutcome, JobType,
    MemoryStore, RawMessage, UserPreferenceProfile,
};

const AFRIWORK_POST: &str = "\
Job Title: Data Analyst
Job Type: Full-time
Work Location: Addis Ababa
Salary/Compensation: 25,000 Birr
Deadline: January 15, 2025

We are hiring a data analyst with strong SQL and Excel skills to join \
our growing analytics team. Apply here: https://forms.gle/xyz123";

const FREEFORM_POST: &str = "\
Vacancy: Site Engineer

Tech Construction PLC
__________________

We are looking for a site engineer for our Adama project. Candidates \
with 3+ years experience should apply before the deadline.";

/// Helper to set up a store seeded with a mixed population of profiles.
fn seeded_store() -> MemoryStore {
    MemoryStore::new()
        // never finished onboarding: universal wildcard
        .with_profile(UserPreferenceProfile::new(1))
        // wants Addis Ababa postings
        .with_profile(UserPreferenceProfile::new(2).with_locations(&json!(["Addis Ababa"])))
        // wants nursing jobs in Hawassa only
        .with_profile(
            UserPreferenceProfile::new(3)
                .with_locations(&json!(["hawassa"]))
                .with_job_types(&json!(["internship"]))
                .with_keywords(&json!(["nursing"])),
        )
}

#[tokio::test]
async fn test_structured_post_flows_to_matched_users_only() {
    let filter = DuplicateFilter::new();
    let store = seeded_store();
    let messenger = MockMessenger::new();
    let config = IngestConfig::new();

    let msg = RawMessage::new(-100123, 501, "ethio_jobs", AFRIWORK_POST);
    let outcome = ingest(&msg, &filter, &store, &messenger, &config).await;

    let IngestOutcome::Delivered {
        post_id,
        matched,
        delivered,
        failed,
    } = outcome
    else {
        panic!("expected delivery, got {:?}", outcome);
    };
    assert_eq!(post_id, 1);
    assert_eq!(matched, 2);
    assert_eq!(delivered, 2);
    assert_eq!(failed, 0);

    // User 3's preferences share no signal with this posting.
    assert!(!messenger.recipients().contains(&3));
    // The location match outscores the wildcard baseline.
    assert_eq!(messenger.recipients(), vec![2, 1]);

    let jobs = store.jobs();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title, "Data Analyst");
    assert_eq!(jobs[0].job_type, Some(JobType::FullTime));
    assert_eq!(jobs[0].location.as_deref(), Some("Addis Ababa"));
    assert_eq!(
        jobs[0].application_link.as_deref(),
        Some("https://forms.gle/xyz123")
    );
}

#[tokio::test]
async fn test_notification_carries_prose_and_json_payload() {
    let filter = DuplicateFilter::new();
    let store = seeded_store();
    let messenger = MockMessenger::new();
    let config = IngestConfig::new();

    let msg = RawMessage::new(-100123, 502, "ethio_jobs", AFRIWORK_POST);
    ingest(&msg, &filter, &store, &messenger, &config).await;

    let sent = messenger.sent();
    let text = &sent[0].1;
    assert!(text.contains("NEW JOB ALERT"));
    assert!(text.contains("*Data Analyst*"));
    assert!(text.contains("📍 *Location:* Addis Ababa"));

    let start = text.find("```json\n").unwrap() + "```json\n".len();
    let end = text[start..].find("\n```").unwrap() + start;
    let payload: serde_json::Value = serde_json::from_str(&text[start..end]).unwrap();
    assert_eq!(payload["title"], "Data Analyst");
    assert_eq!(payload["source"], "ethio_jobs");
}

#[tokio::test]
async fn test_freeform_post_extracts_via_pattern_rungs() {
    let filter = DuplicateFilter::new();
    let store = seeded_store();
    let messenger = MockMessenger::new();
    let config = IngestConfig::new();

    let msg = RawMessage::new(-100456, 1, "jobs_adama", FREEFORM_POST);
    let outcome = ingest(&msg, &filter, &store, &messenger, &config).await;
    assert!(matches!(outcome, IngestOutcome::Delivered { .. }));

    let jobs = store.jobs();
    assert_eq!(jobs[0].title, "Site Engineer");
    assert_eq!(jobs[0].company.as_deref(), Some("Tech Construction PLC"));
}

#[tokio::test]
async fn test_repeat_and_repost_suppressed_but_state_survives() {
    let filter = DuplicateFilter::new();
    let store = seeded_store();
    let messenger = MockMessenger::new();
    let config = IngestConfig::new();

    let original = RawMessage::new(-100123, 501, "ethio_jobs", AFRIWORK_POST);
    let same_id = RawMessage::new(-100123, 501, "ethio_jobs", AFRIWORK_POST);
    // Same content forwarded into another channel under a new id.
    let forward = RawMessage::new(-100999, 77, "jobs_mirror", AFRIWORK_POST);

    assert!(matches!(
        ingest(&original, &filter, &store, &messenger, &config).await,
        IngestOutcome::Delivered { .. }
    ));
    assert_eq!(
        ingest(&same_id, &filter, &store, &messenger, &config).await,
        IngestOutcome::Dropped(DropReason::Duplicate)
    );
    assert_eq!(
        ingest(&forward, &filter, &store, &messenger, &config).await,
        IngestOutcome::Dropped(DropReason::Duplicate)
    );

    // Exactly one record, one round of notifications.
    assert_eq!(store.job_count(), 1);
    assert_eq!(messenger.sent().len(), 2);
}

#[tokio::test]
async fn test_noise_and_chatter_never_reach_the_store() {
    let filter = DuplicateFilter::new();
    let store = seeded_store();
    let messenger = MockMessenger::new();
    let config = IngestConfig::new();

    let noise = RawMessage::new(-1, 1, "chan", "ok");
    let chatter = RawMessage::new(
        -1,
        2,
        "chan",
        "Happy new year to all our subscribers! Wishing you a wonderful holiday season ahead.",
    );

    assert_eq!(
        ingest(&noise, &filter, &store, &messenger, &config).await,
        IngestOutcome::Dropped(DropReason::Noise)
    );
    assert_eq!(
        ingest(&chatter, &filter, &store, &messenger, &config).await,
        IngestOutcome::Dropped(DropReason::NotJobLike)
    );
    assert_eq!(store.job_count(), 0);
    assert!(messenger.sent().is_empty());
}

#[tokio::test]
async fn test_blocked_user_does_not_stall_broadcast() {
    let filter = DuplicateFilter::new();
    let store = seeded_store();
    // User 2 has blocked the bot.
    let messenger = MockMessenger::new().fail_user(2);
    let config = IngestConfig::new();

    let msg = RawMessage::new(-100123, 501, "ethio_jobs", AFRIWORK_POST);
    let outcome = ingest(&msg, &filter, &store, &messenger, &config).await;

    let IngestOutcome::Delivered {
        delivered, failed, ..
    } = outcome
    else {
        panic!("expected delivery, got {:?}", outcome);
    };
    assert_eq!(delivered, 1);
    assert_eq!(failed, 1);
    assert_eq!(messenger.recipients(), vec![1]);
}

#[tokio::test]
async fn test_rescoring_batch_over_ingested_job() {
    let filter = DuplicateFilter::new();
    let store = seeded_store();
    let messenger = MockMessenger::new();
    let config = IngestConfig::new();

    let msg = RawMessage::new(-100123, 501, "ethio_jobs", AFRIWORK_POST);
    ingest(&msg, &filter, &store, &messenger, &config).await;

    let model = MockLanguageModel::new().with_reply(
        r#"{"match_score": 0.85, "match_reason": "Skills align", "recommendation": "Apply soon", "is_match": true}"#,
    );
    let rescorer = AiRescorer::new(model);

    let jobs = store.jobs();
    let matches = rescorer.score_batch(&jobs, &[1, 2], &store).await;

    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|m| m.verdict.is_match));
    assert!((matches[0].verdict.match_score - 0.85).abs() < f32::EPSILON);
}

#[tokio::test]
async fn test_rescoring_failure_yields_verdict_not_error() {
    let store = seeded_store();
    let rescorer = AiRescorer::new(MockLanguageModel::new().failing());

    let filter = DuplicateFilter::new();
    let messenger = MockMessenger::new();
    let config = IngestConfig::new();
    let msg = RawMessage::new(-100123, 501, "ethio_jobs", AFRIWORK_POST);
    ingest(&msg, &filter, &store, &messenger, &config).await;

    let jobs = store.jobs();
    let profile = UserPreferenceProfile::new(1);
    let verdict = rescorer.score(&jobs[0], &profile).await;

    assert!(!verdict.is_match);
    assert_eq!(verdict.match_score, 0.0);
    assert_eq!(verdict.match_reason, "Error in AI matching process");

    // Rejected verdicts never make it into a batch result.
    let matches = rescorer.score_batch(&jobs, &[1], &store).await;
    assert!(matches.is_empty());
}
