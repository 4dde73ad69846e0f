//! Outbound queue seam.

use crate::command::OutboundMessage;
use async_trait::async_trait;
use log::info;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Mutex;

/// Error handing a command to the outbound transport.
#[derive(Debug)]
pub struct QueueError {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub detail: String,
}

impl QueueError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            source: None,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Queue Error: {}", self.detail)
    }
}

impl StdError for QueueError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

/// Seam between the orchestration core and the outbound message transport.
/// Production deployments back this with a broker client; tests collect
/// commands in memory.
#[async_trait]
pub trait MessageQueue: Send + Sync {
    async fn enqueue(&self, message: &OutboundMessage) -> Result<(), QueueError>;
}

/// Collects enqueued commands in memory.
#[derive(Debug, Default)]
pub struct InMemoryQueue {
    messages: Mutex<Vec<OutboundMessage>>,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything enqueued so far, in order.
    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    /// Removes and returns everything enqueued so far.
    pub fn drain(&self) -> Vec<OutboundMessage> {
        self.messages
            .lock()
            .map(|mut messages| std::mem::take(&mut *messages))
            .unwrap_or_default()
    }
}

#[async_trait]
impl MessageQueue for InMemoryQueue {
    async fn enqueue(&self, message: &OutboundMessage) -> Result<(), QueueError> {
        let mut messages = self
            .messages
            .lock()
            .map_err(|_| QueueError::new("in-memory queue mutex poisoned"))?;
        messages.push(message.clone());
        Ok(())
    }
}

/// Serializes each command and emits it on the log stream. Stands in for the
/// broker sender binding in deployments that have not wired one up.
#[derive(Debug, Default)]
pub struct LoggingQueue;

impl LoggingQueue {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MessageQueue for LoggingQueue {
    async fn enqueue(&self, message: &OutboundMessage) -> Result<(), QueueError> {
        let payload = serde_json::to_string(message).map_err(|err| QueueError {
            source: Some(Box::new(err)),
            detail: "failed to serialize outbound command".to_owned(),
        })?;

        info!(
            "Outbound {} command queued for customer {}: {payload}",
            message.message_type(),
            message.customer_id()
        );

        Ok(())
    }
}
