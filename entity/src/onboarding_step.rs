use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Two-step onboarding flow: the customer shares their background first, then
/// their current season of life.
#[derive(Debug, Clone, Eq, PartialEq, EnumIter, Deserialize, Serialize, DeriveActiveEnum)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "onboarding_step")]
pub enum OnboardingStep {
    #[sea_orm(string_value = "awaiting_background")]
    AwaitingBackground,
    #[sea_orm(string_value = "awaiting_life_season")]
    AwaitingLifeSeason,
}

impl std::fmt::Display for OnboardingStep {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OnboardingStep::AwaitingBackground => write!(fmt, "awaiting_background"),
            OnboardingStep::AwaitingLifeSeason => write!(fmt, "awaiting_life_season"),
        }
    }
}
