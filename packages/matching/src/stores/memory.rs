//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{MatchingError, Result};
use crate::traits::store::JobStore;
use crate::types::job::JobRecord;
use crate::types::profile::UserPreferenceProfile;

/// In-memory store for job records and preference profiles.
///
/// Useful for testing and development. Not suitable for production as
/// data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    jobs: RwLock<Vec<JobRecord>>,
    profiles: RwLock<HashMap<i64, UserPreferenceProfile>>,
    fail_inserts: RwLock<bool>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a preference profile.
    pub fn with_profile(self, profile: UserPreferenceProfile) -> Self {
        self.profiles
            .write()
            .unwrap()
            .insert(profile.user_id, profile);
        self
    }

    /// Make every insert fail, for failure-path tests.
    pub fn failing_inserts(self) -> Self {
        *self.fail_inserts.write().unwrap() = true;
        self
    }

    /// Number of stored job records.
    pub fn job_count(&self) -> usize {
        self.jobs.read().unwrap().len()
    }

    /// Snapshot of stored jobs.
    pub fn jobs(&self) -> Vec<JobRecord> {
        self.jobs.read().unwrap().clone()
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn insert_job(&self, record: &JobRecord) -> Result<i64> {
        if *self.fail_inserts.read().unwrap() {
            return Err(MatchingError::Storage("insert disabled".into()));
        }

        let mut jobs = self.jobs.write().unwrap();
        jobs.push(record.clone());
        Ok(jobs.len() as i64)
    }

    async fn list_profiles(&self) -> Result<Vec<UserPreferenceProfile>> {
        let mut profiles: Vec<_> = self.profiles.read().unwrap().values().cloned().collect();
        profiles.sort_by_key(|p| p.user_id);
        Ok(profiles)
    }

    async fn get_profile(&self, user_id: i64) -> Result<Option<UserPreferenceProfile>> {
        Ok(self.profiles.read().unwrap().get(&user_id).cloned())
    }
}
