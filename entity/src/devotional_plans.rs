//! SeaORM Entity for the devotional_plans table.
//!
//! Plans are authored upstream when a customer starts one. Every read here is
//! scoped by `customer_id`, mirroring the source store's partition key.

use crate::daily_devotion::PlanDays;
use crate::plan_status::PlanStatus;
use crate::themes::Themes;
use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(schema_name = "wis_platform", table_name = "devotional_plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Id,

    pub customer_id: Id,

    /// Ordinal of this plan within the customer's history
    pub plan_number: Option<i32>,

    pub status: PlanStatus,

    pub started_at: Option<DateTimeWithTimeZone>,

    pub completed_at: Option<DateTimeWithTimeZone>,

    /// Season of life the plan was authored for
    pub life_season: Option<String>,

    #[sea_orm(column_type = "JsonBinary")]
    pub themes: Themes,

    /// 1-based index of the next day to deliver; must stay within
    /// `[1, days.len()]` while the plan is active
    pub current_day: Option<i32>,

    #[sea_orm(column_type = "JsonBinary")]
    pub days: PlanDays,

    /// Set by the downstream sender after the completion check-in is
    /// confirmed delivered; NULL means a check-in is still owed
    pub check_in_sent: Option<bool>,

    #[serde(skip_deserializing)]
    pub created_at: DateTimeWithTimeZone,

    #[serde(skip_deserializing)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Customers,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
