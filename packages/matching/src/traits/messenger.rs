//! Messaging seam for notification delivery.

use async_trait::async_trait;

use crate::error::Result;

/// Bot-messaging collaborator.
///
/// Fire-and-forget: the pipeline consumes no delivery receipts and keeps
/// no per-user retry state. A failed send is logged and the broadcast
/// moves on.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send one formatted notification to one user.
    async fn send(&self, user_id: i64, text: &str) -> Result<()>;
}
