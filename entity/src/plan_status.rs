use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Status of a devotional plan through its delivery lifecycle.
#[derive(
    Debug, Clone, Eq, PartialEq, EnumIter, Deserialize, Default, Serialize, DeriveActiveEnum,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "plan_status")]
pub enum PlanStatus {
    /// Days are still being delivered
    #[sea_orm(string_value = "active")]
    #[default]
    Active,
    /// Final day delivered; candidate for the completion check-in
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Abandoned before the final day
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl std::fmt::Display for PlanStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanStatus::Active => write!(fmt, "active"),
            PlanStatus::Completed => write!(fmt, "completed"),
            PlanStatus::Cancelled => write!(fmt, "cancelled"),
        }
    }
}
