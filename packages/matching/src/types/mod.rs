//! Domain types for the ingestion and matching pipeline.

pub mod config;
pub mod job;
pub mod message;
pub mod profile;
pub mod verdict;
