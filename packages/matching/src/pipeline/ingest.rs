//! Ingestion pipeline - one raw message through dedup, classification,
//! extraction, persistence, matching, and delivery fan-out.

use tracing::{debug, info, warn};

use crate::classify::is_job_posting;
use crate::dedup::DuplicateFilter;
use crate::extract;
use crate::matcher::match_job;
use crate::pipeline::notify::format_notification;
use crate::traits::{JobStore, Messenger};
use crate::types::config::{DeliveryConfig, MatchWeights};
use crate::types::job::JobRecord;
use crate::types::message::RawMessage;

/// Why a message was dropped without delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Pre-filtered noise: too short, denylisted phrases, command-heavy
    Noise,

    /// Already seen, by identity or by content hash
    Duplicate,

    /// Passed the filters but does not read as a job posting
    NotJobLike,

    /// Job-like, but no usable title/description could be extracted
    NoUsableFields,

    /// The store rejected the record; matching never ran
    PersistenceFailed,
}

/// Outcome of one ingest pass, for logs and tests.
///
/// Callers treat ingestion as fire-and-forget; nothing here feeds back
/// into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Message was dropped before fan-out
    Dropped(DropReason),

    /// Message became a job record and fan-out ran
    Delivered {
        post_id: i64,
        matched: usize,
        delivered: usize,
        failed: usize,
    },
}

/// Configuration for ingest operations.
#[derive(Debug, Clone, Default)]
pub struct IngestConfig {
    /// Rule-engine scoring weights
    pub weights: MatchWeights,

    /// Fan-out budgets
    pub delivery: DeliveryConfig,
}

impl IngestConfig {
    /// Create a config with default weights and budgets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scoring weights.
    pub fn with_weights(mut self, weights: MatchWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set the delivery budgets.
    pub fn with_delivery(mut self, delivery: DeliveryConfig) -> Self {
        self.delivery = delivery;
        self
    }
}

/// Ingest one raw message: dedup → classify → extract → persist →
/// match → fan out.
///
/// Every failure mode short-circuits for this message only; nothing
/// propagates to the caller as an error. Steps run strictly in sequence:
/// extraction never runs before the filter admits the message, matching
/// never runs before persistence succeeds.
pub async fn ingest<S, M>(
    msg: &RawMessage,
    filter: &DuplicateFilter,
    store: &S,
    messenger: &M,
    config: &IngestConfig,
) -> IngestOutcome
where
    S: JobStore,
    M: Messenger,
{
    if !crate::dedup::passes_prefilters(&msg.text) {
        debug!(chat_id = msg.chat_id, message_id = msg.message_id, "dropped as noise");
        return IngestOutcome::Dropped(DropReason::Noise);
    }

    if !filter.should_process(msg.chat_id, msg.message_id, &msg.text) {
        debug!(chat_id = msg.chat_id, message_id = msg.message_id, "dropped as duplicate");
        return IngestOutcome::Dropped(DropReason::Duplicate);
    }

    if !is_job_posting(&msg.text) {
        debug!(source = %msg.source_channel, "not a job posting");
        return IngestOutcome::Dropped(DropReason::NotJobLike);
    }

    // Extraction returning nothing is an expected negative, not an error.
    let Some(fields) = extract::extract(&msg.text) else {
        debug!(source = %msg.source_channel, "no usable fields extracted");
        return IngestOutcome::Dropped(DropReason::NoUsableFields);
    };

    let record = JobRecord::from_fields(fields, msg.message_id, msg.source_channel.clone());
    info!(title = %record.title, source = %record.source_channel, "job extracted");

    let post_id = match store.insert_job(&record).await {
        Ok(post_id) => post_id,
        Err(e) => {
            warn!(error = %e, title = %record.title, "failed to persist job record");
            return IngestOutcome::Dropped(DropReason::PersistenceFailed);
        }
    };

    let profiles = match store.list_profiles().await {
        Ok(profiles) => profiles,
        Err(e) => {
            warn!(error = %e, "failed to list preference profiles");
            return IngestOutcome::Dropped(DropReason::PersistenceFailed);
        }
    };

    let matches = match_job(&record, &profiles, &config.weights);
    info!(
        title = %record.title,
        post_id,
        matched = matches.len(),
        "fanning out to matched users"
    );

    let text = format_notification(&record, post_id);
    let mut delivered = 0;
    let mut failed = 0;

    // Best-effort broadcast: one user's failure never aborts the rest.
    for m in &matches {
        match tokio::time::timeout(config.delivery.send_timeout, messenger.send(m.user_id, &text))
            .await
        {
            Ok(Ok(())) => delivered += 1,
            Ok(Err(e)) => {
                warn!(user_id = m.user_id, error = %e, "delivery failed");
                failed += 1;
            }
            Err(_) => {
                warn!(user_id = m.user_id, "delivery timed out");
                failed += 1;
            }
        }
    }

    IngestOutcome::Delivered {
        post_id,
        matched: matches.len(),
        delivered,
        failed,
    }
}
