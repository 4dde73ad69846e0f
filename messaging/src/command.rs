//! Outbound message command model.
//!
//! Each command is a write-once instruction to the downstream message sender.
//! The four variants carry different field layouts on the wire, so they are
//! modeled as separate structs unified under [`OutboundMessage`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire values for the `messageType` field.
pub mod message_type {
    pub const ONBOARDING_WELCOME: &str = "onboarding_welcome";
    pub const DAILY_DEVOTIONAL: &str = "daily_devotional";
    pub const SEASON_CHECK_IN: &str = "season_check_in";
    pub const DAILY_PLAN_DEVOTION: &str = "daily_plan_devotion";
    pub const WEEKLY_CHECK_IN: &str = "weekly_check_in";
}

/// Delivery-ordering hint for the downstream sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessagePriority {
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "NORMAL")]
    Normal,
}

/// Welcome message queued in response to a lifecycle event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeMessage {
    pub message_id: Uuid,
    pub customer_id: String,
    pub conversation_id: String,
    pub to: String,
    pub message_type: String,
    pub priority: MessagePriority,
    pub body: String,
    pub metadata: WelcomeMetadata,
}

/// Retry bookkeeping and event correlation carried on a welcome command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeMetadata {
    pub registration_event_id: Option<String>,
    pub registration_stage: Option<String>,
    pub attempt: u32,
    pub max_retries: u32,
}

impl WelcomeMetadata {
    /// Metadata for the first delivery attempt of a welcome message.
    pub fn first_attempt(event_id: Option<String>, stage: Option<String>) -> Self {
        Self {
            registration_event_id: event_id,
            registration_stage: stage,
            attempt: 1,
            max_retries: 3,
        }
    }
}

impl WelcomeMessage {
    /// Builds a welcome command addressed to `to`, with the conversation id
    /// derived from the customer id.
    pub fn new(customer_id: &str, to: &str, body: String, metadata: WelcomeMetadata) -> Self {
        Self {
            message_id: welcome_message_id(&metadata),
            customer_id: customer_id.to_owned(),
            conversation_id: format!("conv-{customer_id}"),
            to: to.to_owned(),
            message_type: message_type::ONBOARDING_WELCOME.to_owned(),
            priority: MessagePriority::High,
            body,
            metadata,
        }
    }
}

/// Derives a stable command id from the triggering event, so a redelivered
/// event produces the same outbound id and the sender can deduplicate.
fn welcome_message_id(metadata: &WelcomeMetadata) -> Uuid {
    match &metadata.registration_event_id {
        Some(event_id) => {
            let stage = metadata.registration_stage.as_deref().unwrap_or_default();
            Uuid::new_v5(
                &Uuid::NAMESPACE_OID,
                format!("{event_id}:{stage}").as_bytes(),
            )
        }
        // Nothing stable to derive from.
        None => Uuid::new_v4(),
    }
}

/// Timer-driven request for a recurring message (daily devotional or season
/// check-in).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledMessageRequest {
    pub message_id: Uuid,
    pub customer_id: String,
    pub phone_number: Option<String>,
    pub message_type: String,
    pub priority: MessagePriority,
    /// Pre-authored body for check-ins; `None` tells the downstream sender to
    /// generate devotional content itself.
    pub message: Option<String>,
    pub themes: Vec<String>,
    pub life_season: Option<String>,
}

impl ScheduledMessageRequest {
    /// Devotional request: no body, the sender generates content from the
    /// customer's themes and life season.
    pub fn daily_devotional(
        customer_id: &str,
        phone_number: Option<String>,
        themes: Vec<String>,
        life_season: Option<String>,
    ) -> Self {
        Self {
            message_id: Uuid::new_v4(),
            customer_id: customer_id.to_owned(),
            phone_number,
            message_type: message_type::DAILY_DEVOTIONAL.to_owned(),
            priority: MessagePriority::Normal,
            message: None,
            themes,
            life_season,
        }
    }

    /// Season check-in with a fixed pre-authored body.
    pub fn season_check_in(customer_id: &str, phone_number: Option<String>, body: String) -> Self {
        Self {
            message_id: Uuid::new_v4(),
            customer_id: customer_id.to_owned(),
            phone_number,
            message_type: message_type::SEASON_CHECK_IN.to_owned(),
            priority: MessagePriority::Normal,
            message: Some(body),
            themes: Vec::new(),
            life_season: None,
        }
    }
}

/// One day of a devotional plan, already formatted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDayMessage {
    pub message_id: Uuid,
    pub customer_id: String,
    pub phone_number: Option<String>,
    pub message_type: String,
    pub priority: MessagePriority,
    pub message: String,
    pub metadata: PlanDayMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDayMetadata {
    pub plan_id: String,
    pub day_number: i32,
    pub message_type: String,
}

impl PlanDayMessage {
    /// Day 1 opens the plan and is delivered ahead of routine traffic; later
    /// days ride at normal priority.
    pub fn for_day(
        customer_id: &str,
        phone_number: Option<String>,
        plan_id: &str,
        day_number: i32,
        body: String,
    ) -> Self {
        let priority = if day_number == 1 {
            MessagePriority::High
        } else {
            MessagePriority::Normal
        };

        Self {
            message_id: Uuid::new_v4(),
            customer_id: customer_id.to_owned(),
            phone_number,
            message_type: message_type::DAILY_PLAN_DEVOTION.to_owned(),
            priority,
            message: body,
            metadata: PlanDayMetadata {
                plan_id: plan_id.to_owned(),
                day_number,
                message_type: message_type::DAILY_PLAN_DEVOTION.to_owned(),
            },
        }
    }
}

/// Request for a check-in after a plan completes. Addressed by customer id
/// only: the downstream sender resolves the current phone number, formats the
/// content, and marks the plan's check-in sent after confirmed delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyCheckInRequest {
    pub message_id: Uuid,
    pub customer_id: String,
    pub message_type: String,
    pub priority: MessagePriority,
    pub metadata: CheckInMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInMetadata {
    pub completed_plan_id: String,
    pub expects_response: bool,
}

impl WeeklyCheckInRequest {
    pub fn new(customer_id: &str, completed_plan_id: &str) -> Self {
        Self {
            message_id: Uuid::new_v4(),
            customer_id: customer_id.to_owned(),
            message_type: message_type::WEEKLY_CHECK_IN.to_owned(),
            priority: MessagePriority::Normal,
            metadata: CheckInMetadata {
                completed_plan_id: completed_plan_id.to_owned(),
                expects_response: true,
            },
        }
    }
}

/// Tagged union over the four outbound command shapes. The variant determines
/// the serialized field layout; there is no outer discriminator on the wire
/// beyond each payload's own `messageType` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutboundMessage {
    Welcome(WelcomeMessage),
    Scheduled(ScheduledMessageRequest),
    PlanDay(PlanDayMessage),
    CheckIn(WeeklyCheckInRequest),
}

impl OutboundMessage {
    pub fn message_id(&self) -> Uuid {
        match self {
            OutboundMessage::Welcome(m) => m.message_id,
            OutboundMessage::Scheduled(m) => m.message_id,
            OutboundMessage::PlanDay(m) => m.message_id,
            OutboundMessage::CheckIn(m) => m.message_id,
        }
    }

    pub fn customer_id(&self) -> &str {
        match self {
            OutboundMessage::Welcome(m) => &m.customer_id,
            OutboundMessage::Scheduled(m) => &m.customer_id,
            OutboundMessage::PlanDay(m) => &m.customer_id,
            OutboundMessage::CheckIn(m) => &m.customer_id,
        }
    }

    pub fn message_type(&self) -> &str {
        match self {
            OutboundMessage::Welcome(m) => &m.message_type,
            OutboundMessage::Scheduled(m) => &m.message_type,
            OutboundMessage::PlanDay(m) => &m.message_type,
            OutboundMessage::CheckIn(m) => &m.message_type,
        }
    }

    pub fn priority(&self) -> MessagePriority {
        match self {
            OutboundMessage::Welcome(m) => m.priority,
            OutboundMessage::Scheduled(m) => m.priority,
            OutboundMessage::PlanDay(m) => m.priority,
            OutboundMessage::CheckIn(m) => m.priority,
        }
    }
}

impl From<WelcomeMessage> for OutboundMessage {
    fn from(message: WelcomeMessage) -> Self {
        OutboundMessage::Welcome(message)
    }
}

impl From<ScheduledMessageRequest> for OutboundMessage {
    fn from(message: ScheduledMessageRequest) -> Self {
        OutboundMessage::Scheduled(message)
    }
}

impl From<PlanDayMessage> for OutboundMessage {
    fn from(message: PlanDayMessage) -> Self {
        OutboundMessage::PlanDay(message)
    }
}

impl From<WeeklyCheckInRequest> for OutboundMessage {
    fn from(message: WeeklyCheckInRequest) -> Self {
        OutboundMessage::CheckIn(message)
    }
}
