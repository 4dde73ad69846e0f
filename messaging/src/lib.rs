//! Message transport types for the conversation orchestrator.
//!
//! This crate defines the two shapes that cross the process boundary: inbound
//! lifecycle events received from the platform's event topics, and outbound
//! message commands handed to the send queue for the downstream SMS sender.
//!
//! # Architecture
//!
//! - **Inbound events**: `CustomerRegistered` and `SubscriptionActivated`
//!   payloads, deserialized from the transport's JSON envelope.
//! - **Outbound commands**: the four command variants the orchestrator emits,
//!   unified under `OutboundMessage`.
//! - **MessageQueue**: trait seam between the orchestration core and the
//!   outbound transport, so tests can collect commands in memory.
//!
//! This crate has no dependencies on internal crates (entity, domain, etc.),
//! avoiding circular dependencies. Customer and plan ids are carried as the
//! opaque strings assigned by the upstream services.

pub mod command;
pub mod event;
pub mod queue;

pub use command::{
    message_type, CheckInMetadata, MessagePriority, OutboundMessage, PlanDayMessage,
    PlanDayMetadata, ScheduledMessageRequest, WeeklyCheckInRequest, WelcomeMessage,
    WelcomeMetadata,
};
pub use event::{
    CustomerRegistered, CustomerRegisteredData, SubscriptionActivated, SubscriptionActivatedData,
};
pub use queue::{InMemoryQueue, LoggingQueue, MessageQueue, QueueError};
