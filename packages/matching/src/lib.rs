//! Job Matching and Notification Library
//!
//! The core of a Telegram job-alert service: raw channel messages go in,
//! formatted notifications to matched users come out.
//!
//! # Design Philosophy
//!
//! **"Over-deliver, never under-deliver"**
//!
//! - Heuristic extraction over rigid schemas: real postings are messy
//! - OR-based preference matching: any one signal is enough
//! - Empty preferences mean "send me everything", not "send me nothing"
//! - AI rescoring refines, it never blocks: model failures degrade to a
//!   zero-score verdict instead of an error
//! - Delivery is best-effort: one blocked user never stalls a broadcast
//!
//! # Usage
//!
//! ```rust,ignore
//! use matching::{ingest, DuplicateFilter, IngestConfig, MemoryStore, RawMessage};
//! use matching::testing::MockMessenger;
//!
//! let filter = DuplicateFilter::new();
//! let store = MemoryStore::new();
//! let messenger = MockMessenger::new();
//! let config = IngestConfig::new();
//!
//! let msg = RawMessage::new(chat_id, message_id, "ethio_jobs", text);
//! let outcome = ingest(&msg, &filter, &store, &messenger, &config).await;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (JobStore, Messenger, LanguageModel)
//! - [`types`] - Domain data types (jobs, profiles, verdicts, config)
//! - [`extract`] - Heuristic field extraction from posting text
//! - [`classify`] - Job-vs-noise classification
//! - [`dedup`] - Duplicate suppression by identity and content hash
//! - [`matcher`] - Rule-based preference matching
//! - [`ai`] - LLM rescoring with timeout and fallback parsing
//! - [`pipeline`] - End-to-end ingestion and delivery fan-out
//! - [`stores`] - Storage implementations (MemoryStore)
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod classify;
pub mod dedup;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod pipeline;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{MatchingError, Result};
pub use traits::{llm::LanguageModel, messenger::Messenger, store::JobStore};
pub use types::{
    config::{DeliveryConfig, MatchWeights, RescoreConfig},
    job::{JobFields, JobRecord, JobType},
    message::RawMessage,
    profile::UserPreferenceProfile,
    verdict::{AiMatchVerdict, MatchResult},
};

// Re-export pipeline components
pub use pipeline::{format_notification, ingest, DropReason, IngestConfig, IngestOutcome};

// Re-export the matching entry points
pub use dedup::DuplicateFilter;
pub use matcher::{match_job, score_profile};

// Re-export AI rescoring
pub use ai::{AiRescorer, BatchMatch, Gemini};

// Re-export stores
pub use stores::MemoryStore;
