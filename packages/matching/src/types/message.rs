//! Raw inbound messages as handed over by the channel listener.

/// One raw message from a monitored channel or group.
///
/// The listener that produces these is out of scope; the pipeline only
/// needs the source identity pair and the text body.
#[derive(Debug, Clone)]
pub struct RawMessage {
    /// Chat (channel/group) identifier the message arrived from
    pub chat_id: i64,

    /// Message identifier within that chat
    pub message_id: i64,

    /// Human-readable channel title, falls back to the chat id upstream
    pub source_channel: String,

    /// Message body
    pub text: String,
}

impl RawMessage {
    /// Create a new raw message.
    pub fn new(
        chat_id: i64,
        message_id: i64,
        source_channel: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            chat_id,
            message_id,
            source_channel: source_channel.into(),
            text: text.into(),
        }
    }

    /// Composite identity used for duplicate suppression.
    pub fn identity(&self) -> (i64, i64) {
        (self.chat_id, self.message_id)
    }
}
