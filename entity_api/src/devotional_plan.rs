use super::error::{EntityApiErrorKind, Error};
use entity::devotional_plans::{ActiveModel, Column, Entity, Model};
use entity::plan_status::PlanStatus;
use entity::Id;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    DatabaseConnection, TryIntoModel,
};

use log::*;

/// Loads a plan by its id, scoped to the owning customer. The scoping mirrors
/// the source store's partition key: a plan id is only meaningful together
/// with its customer id.
pub async fn find_by_id_and_customer_id(
    db: &DatabaseConnection,
    id: &Id,
    customer_id: &Id,
) -> Result<Model, Error> {
    Entity::find_by_id(id.clone())
        .filter(Column::CustomerId.eq(customer_id.clone()))
        .one(db)
        .await?
        .ok_or_else(|| Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound,
        })
}

/// Completed plans still owed a check-in: the downstream sender sets
/// `check_in_sent` only after confirmed delivery, so NULL means owed.
pub async fn find_needing_check_in(db: &DatabaseConnection) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::Status.eq(PlanStatus::Completed))
        .filter(Column::CheckInSent.is_null())
        .all(db)
        .await?)
}

/// Moves the plan to its next day.
pub async fn advance_current_day(db: &DatabaseConnection, plan: &Model) -> Result<Model, Error> {
    let current_day = plan.current_day.ok_or_else(|| {
        error!("Plan {} has no current day to advance", plan.id);
        Error {
            source: None,
            error_kind: EntityApiErrorKind::ValidationError,
        }
    })?;

    let active_model = ActiveModel {
        id: Unchanged(plan.id.clone()),
        current_day: Set(Some(current_day + 1)),
        updated_at: Set(chrono::Utc::now().into()),
        ..Default::default()
    };

    Ok(active_model.update(db).await?.try_into_model()?)
}
