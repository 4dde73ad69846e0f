use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account-level status of a customer record.
#[derive(
    Debug, Clone, Eq, PartialEq, EnumIter, Deserialize, Default, Serialize, DeriveActiveEnum,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "customer_status")]
pub enum CustomerStatus {
    /// Registered but not yet activated
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    /// Subscription active, eligible for scheduled messages
    #[sea_orm(string_value = "active")]
    Active,
    /// Lapsed or cancelled
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

impl std::fmt::Display for CustomerStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CustomerStatus::Pending => write!(fmt, "pending"),
            CustomerStatus::Active => write!(fmt, "active"),
            CustomerStatus::Inactive => write!(fmt, "inactive"),
        }
    }
}
