//! Ingestion pipeline - dedup, classify, extract, persist, match, fan out.

pub mod ingest;
pub mod notify;

pub use ingest::{ingest, DropReason, IngestConfig, IngestOutcome};
pub use notify::format_notification;
