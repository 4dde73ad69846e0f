use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// State of a customer's SMS conversation. Recurring message evaluation only
/// applies while the conversation is active.
#[derive(
    Debug, Clone, Eq, PartialEq, EnumIter, Deserialize, Default, Serialize, DeriveActiveEnum,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "conversation_state")]
pub enum ConversationState {
    #[sea_orm(string_value = "active")]
    #[default]
    Active,
    /// Temporarily suspended (e.g. delivery failures)
    #[sea_orm(string_value = "paused")]
    Paused,
    /// Customer replied STOP
    #[sea_orm(string_value = "opted_out")]
    OptedOut,
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversationState::Active => write!(fmt, "active"),
            ConversationState::Paused => write!(fmt, "paused"),
            ConversationState::OptedOut => write!(fmt, "opted_out"),
        }
    }
}
