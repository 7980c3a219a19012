//! Testing utilities including mock collaborators.
//!
//! These are useful for testing applications that use the matching
//! library without a real bot transport or model API.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{MatchingError, Result};
use crate::traits::llm::LanguageModel;
use crate::traits::messenger::Messenger;

/// A mock messenger that records every send.
#[derive(Default, Clone)]
pub struct MockMessenger {
    sent: Arc<RwLock<Vec<(i64, String)>>>,
    fail_users: Arc<RwLock<Vec<i64>>>,
}

impl MockMessenger {
    /// Create a new mock messenger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sends to one user fail.
    pub fn fail_user(self, user_id: i64) -> Self {
        self.fail_users.write().unwrap().push(user_id);
        self
    }

    /// Every (user, text) pair sent so far.
    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.read().unwrap().clone()
    }

    /// User ids that received a message, in send order.
    pub fn recipients(&self) -> Vec<i64> {
        self.sent.read().unwrap().iter().map(|(id, _)| *id).collect()
    }
}

#[async_trait]
impl Messenger for MockMessenger {
    async fn send(&self, user_id: i64, text: &str) -> Result<()> {
        if self.fail_users.read().unwrap().contains(&user_id) {
            return Err(MatchingError::Delivery {
                user_id,
                source: "mock send refused".into(),
            });
        }
        self.sent
            .write()
            .unwrap()
            .push((user_id, text.to_string()));
        Ok(())
    }
}

/// A mock language model with a configurable reply, delay, and failure.
#[derive(Default, Clone)]
pub struct MockLanguageModel {
    reply: Arc<RwLock<String>>,
    delay: Arc<RwLock<Option<Duration>>>,
    fail: Arc<RwLock<bool>>,
    calls: Arc<RwLock<usize>>,
}

impl MockLanguageModel {
    /// Create a mock that replies with an empty string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canned reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        *self.reply.write().unwrap() = reply.into();
        self
    }

    /// Delay every completion, for timeout tests.
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.write().unwrap() = Some(delay);
        self
    }

    /// Make every completion fail.
    pub fn failing(self) -> Self {
        *self.fail.write().unwrap() = true;
        self
    }

    /// Number of completions requested so far.
    pub fn call_count(&self) -> usize {
        *self.calls.read().unwrap()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn complete(&self, _prompt: &str, _max_tokens: u32, _temperature: f32) -> Result<String> {
        *self.calls.write().unwrap() += 1;

        let delay = *self.delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if *self.fail.read().unwrap() {
            return Err(MatchingError::Model("mock model refused".into()));
        }

        Ok(self.reply.read().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_messenger_records_sends() {
        let messenger = MockMessenger::new();
        messenger.send(1, "hello").await.unwrap();
        messenger.send(2, "world").await.unwrap();

        assert_eq!(messenger.recipients(), vec![1, 2]);
        assert_eq!(messenger.sent()[0].1, "hello");
    }

    #[tokio::test]
    async fn test_mock_messenger_fail_user() {
        let messenger = MockMessenger::new().fail_user(2);
        assert!(messenger.send(1, "ok").await.is_ok());
        assert!(messenger.send(2, "nope").await.is_err());
        assert_eq!(messenger.recipients(), vec![1]);
    }

    #[tokio::test]
    async fn test_mock_model_reply_and_count() {
        let model = MockLanguageModel::new().with_reply("fine");
        assert_eq!(model.complete("p", 10, 0.1).await.unwrap(), "fine");
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_model_failure() {
        let model = MockLanguageModel::new().failing();
        assert!(model.complete("p", 10, 0.1).await.is_err());
    }
}
