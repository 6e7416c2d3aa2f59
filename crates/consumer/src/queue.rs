use std::time::Duration;

use async_trait::async_trait;

/// One received queue message.
#[derive(Debug, Clone)]
pub struct QueueMessage {
    /// Provider-assigned message id, for logs.
    pub message_id: String,
    /// Handle identifying this delivery for deletion.
    pub receipt_handle: String,
    /// Raw body bytes as relayed from the webhook.
    pub body: Vec<u8>,
}

/// Receive parameters for one poll cycle.
#[derive(Debug, Clone, Copy)]
pub struct ReceiveOptions {
    pub max_messages: u32,
    /// Long-poll wait before an empty receive returns.
    pub wait: Duration,
    /// Window during which received messages are invisible to other
    /// consumers. The provider redelivers after it elapses undeleted; this
    /// is the retry mechanism, not something the consumer implements.
    pub visibility_timeout: Duration,
}

/// Queue with receive/delete verbs and visibility-timeout semantics.
#[async_trait]
pub trait MessageQueue: Send + Sync {
    async fn receive(&self, options: ReceiveOptions) -> anyhow::Result<Vec<QueueMessage>>;

    /// Acknowledge a delivery so it is not redelivered.
    async fn delete(&self, receipt_handle: &str) -> anyhow::Result<()>;
}
