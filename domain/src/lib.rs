//! Conversation and plan scheduling logic for the devotional messaging
//! product: which message is due for which customer, what it contains, and
//! how the scheduling state advances once it is queued.
//!
//! This module re-exports various items from the `entity_api` crate so that
//! consumers of the `domain` crate do not need to depend on `entity_api`
//! directly; the storage implementation details stay behind this layer.
pub use entity_api::{
    conversation_state, customer_status, customers, daily_devotion, devotional_plans,
    onboarding_step, plan_status, themes, Id,
};

pub mod error;
pub mod onboarding;
pub mod plan_completion;
pub mod plan_schedule;
pub mod recurring_schedule;
pub mod templates;
