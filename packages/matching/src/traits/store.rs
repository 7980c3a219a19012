//! Persistence seam for job records and preference profiles.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::job::JobRecord;
use crate::types::profile::UserPreferenceProfile;

/// Persistence collaborator.
///
/// The pipeline needs exactly two shapes from storage: append one job
/// record, and read the registered preference profiles. Profiles are
/// read-only from this subsystem's perspective; the preference-collection
/// flow that mutates them lives elsewhere.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Persist one job record, returning the assigned post id.
    ///
    /// Records are append-only; implementations must not update in place.
    async fn insert_job(&self, record: &JobRecord) -> Result<i64>;

    /// All registered users' preference profiles.
    ///
    /// Users without stored preferences may be absent here or present
    /// with an empty profile - both are treated as universal wildcards
    /// by the matcher.
    async fn list_profiles(&self) -> Result<Vec<UserPreferenceProfile>>;

    /// One user's profile, if stored.
    async fn get_profile(&self, user_id: i64) -> Result<Option<UserPreferenceProfile>>;
}
