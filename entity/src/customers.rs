//! SeaORM Entity for the customers table.
//!
//! The upstream registration service owns customer creation; the orchestrator
//! reads candidates and advances the flattened messaging-state columns. The
//! three `next_*` timestamps drive the scheduler's due-predicates, so they
//! live as real columns rather than inside a JSON blob.

use crate::conversation_state::ConversationState;
use crate::customer_status::CustomerStatus;
use crate::onboarding_step::OnboardingStep;
use crate::themes::Themes;
use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(schema_name = "wis_platform", table_name = "customers")]
pub struct Model {
    /// Key assigned by the registration service
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Id,

    /// Current phone number (E.164)
    pub phone: String,

    pub status: CustomerStatus,

    /// The plan currently being delivered, if any; cleared upstream when a
    /// plan finishes
    pub active_plan_id: Option<Id>,

    /// For greeting personalization
    pub first_name: Option<String>,

    /// When the next day of the active plan is due
    #[serde(skip_deserializing)]
    pub next_plan_message_scheduled_for: Option<DateTimeWithTimeZone>,

    /// When the next AI-generated devotional is due
    #[serde(skip_deserializing)]
    pub next_devotional_scheduled_for: Option<DateTimeWithTimeZone>,

    /// When the next season check-in is due
    #[serde(skip_deserializing)]
    pub next_check_in_scheduled_for: Option<DateTimeWithTimeZone>,

    /// IANA timezone name, for future delivery-time refinement
    pub timezone: Option<String>,

    /// Customer's preferred delivery window (e.g. "morning")
    pub preferred_time_of_day: Option<String>,

    pub current_life_season: Option<String>,

    #[sea_orm(column_type = "JsonBinary")]
    pub extracted_themes: Themes,

    pub conversation_state: ConversationState,

    pub last_devotional_sent_at: Option<DateTimeWithTimeZone>,

    pub onboarding_step: Option<OnboardingStep>,

    pub onboarding_step_updated_at: Option<DateTimeWithTimeZone>,

    /// Beta program enrollment timestamps, managed upstream and carried
    /// through untouched
    pub beta_program: Option<Json>,

    #[serde(skip_deserializing)]
    pub created_at: DateTimeWithTimeZone,

    #[serde(skip_deserializing)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::devotional_plans::Entity")]
    DevotionalPlans,
}

impl Related<super::devotional_plans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DevotionalPlans.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
