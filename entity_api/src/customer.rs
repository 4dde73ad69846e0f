use super::error::{EntityApiErrorKind, Error};
use entity::conversation_state::ConversationState;
use entity::customer_status::CustomerStatus;
use entity::customers::{ActiveModel, Column, Entity, Model};
use entity::onboarding_step::OnboardingStep;
use entity::themes::Themes;
use entity::Id;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    Condition, DatabaseConnection, TryIntoModel,
};

use log::*;

pub async fn find_by_id(db: &DatabaseConnection, id: &Id) -> Result<Model, Error> {
    Entity::find_by_id(id.clone())
        .one(db)
        .await?
        .ok_or_else(|| Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound,
        })
}

/// Customers whose active plan's next day is due: an active plan is assigned,
/// the plan-message schedule has elapsed, and the account itself is active.
pub async fn find_due_for_plan_message(
    db: &DatabaseConnection,
    now: DateTimeWithTimeZone,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::ActivePlanId.is_not_null())
        .filter(Column::NextPlanMessageScheduledFor.lte(now))
        .filter(Column::Status.eq(CustomerStatus::Active))
        .all(db)
        .await?)
}

/// Customers with at least one recurring message due (devotional or season
/// check-in) and a conversation that is still active. The caller re-checks
/// each timestamp individually since this predicate is an OR.
pub async fn find_due_for_recurring_message(
    db: &DatabaseConnection,
    now: DateTimeWithTimeZone,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(
            Condition::any()
                .add(Column::NextDevotionalScheduledFor.lte(now))
                .add(Column::NextCheckInScheduledFor.lte(now)),
        )
        .filter(Column::ConversationState.eq(ConversationState::Active))
        .all(db)
        .await?)
}

/// Moves the customer's plan-message schedule to `next`.
pub async fn reschedule_plan_message(
    db: &DatabaseConnection,
    customer: &Model,
    next: DateTimeWithTimeZone,
) -> Result<Model, Error> {
    debug!(
        "Rescheduling next plan message for customer {} to {next}",
        customer.id
    );

    let active_model = ActiveModel {
        id: Unchanged(customer.id.clone()),
        next_plan_message_scheduled_for: Set(Some(next)),
        updated_at: Set(chrono::Utc::now().into()),
        ..Default::default()
    };

    Ok(active_model.update(db).await?.try_into_model()?)
}

/// Records which onboarding reply the conversation is waiting on.
pub async fn set_onboarding_step(
    db: &DatabaseConnection,
    id: &Id,
    step: OnboardingStep,
) -> Result<Model, Error> {
    let customer = find_by_id(db, id).await?;
    let now = chrono::Utc::now();

    let active_model = ActiveModel {
        id: Unchanged(customer.id),
        onboarding_step: Set(Some(step)),
        onboarding_step_updated_at: Set(Some(now.into())),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(active_model.update(db).await?.try_into_model()?)
}

/// Marks the customer's conversation active and records the phone number the
/// conversation runs over. Upsert keyed by customer id: re-running for the
/// same customer updates in place, and an event arriving before the customer
/// record has replicated seeds a minimal row so later updates have a target.
pub async fn init_conversation_state(
    db: &DatabaseConnection,
    id: &Id,
    phone: &str,
) -> Result<Model, Error> {
    let now = chrono::Utc::now();

    match Entity::find_by_id(id.clone()).one(db).await? {
        Some(customer) => {
            debug!("Marking conversation active for existing customer {id}");

            let active_model = ActiveModel {
                id: Unchanged(customer.id),
                phone: Set(phone.to_owned()),
                conversation_state: Set(ConversationState::Active),
                updated_at: Set(now.into()),
                ..Default::default()
            };

            Ok(active_model.update(db).await?.try_into_model()?)
        }
        None => {
            info!("Seeding conversation state for unseen customer {id}");

            // The key is provided by the upstream event, so this must be an
            // explicit insert; save() would treat the set key as an update.
            let active_model = ActiveModel {
                id: Set(id.clone()),
                phone: Set(phone.to_owned()),
                status: Set(CustomerStatus::Pending),
                extracted_themes: Set(Themes::default()),
                conversation_state: Set(ConversationState::Active),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
                ..Default::default()
            };

            Ok(active_model.insert(db).await?.try_into_model()?)
        }
    }
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn a_customer(id: &str) -> Model {
        let now = chrono::Utc::now();

        Model {
            id: id.to_owned(),
            phone: "+15551234567".to_owned(),
            status: CustomerStatus::Active,
            active_plan_id: Some("plan-1".to_owned()),
            first_name: Some("Amy".to_owned()),
            next_plan_message_scheduled_for: Some(now.into()),
            next_devotional_scheduled_for: None,
            next_check_in_scheduled_for: None,
            timezone: Some("America/Chicago".to_owned()),
            preferred_time_of_day: Some("morning".to_owned()),
            current_life_season: Some("new job".to_owned()),
            extracted_themes: Themes(vec!["hope".to_owned()]),
            conversation_state: ConversationState::Active,
            last_devotional_sent_at: None,
            onboarding_step: None,
            onboarding_step_updated_at: None,
            beta_program: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn find_by_id_returns_the_customer() -> Result<(), Error> {
        let customer = a_customer("c1");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![customer.clone()]])
            .into_connection();

        let found = find_by_id(&db, &"c1".to_owned()).await?;

        assert_eq!(found.id, customer.id);

        Ok(())
    }

    #[tokio::test]
    async fn find_by_id_returns_error_when_customer_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();

        let result = find_by_id(&db, &"missing".to_owned()).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound
        );
    }

    #[tokio::test]
    async fn find_due_for_plan_message_returns_candidates() -> Result<(), Error> {
        let customer = a_customer("c1");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![customer.clone()]])
            .into_connection();

        let due = find_due_for_plan_message(&db, chrono::Utc::now().into()).await?;

        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, customer.id);

        Ok(())
    }

    #[tokio::test]
    async fn reschedule_plan_message_returns_the_updated_customer() -> Result<(), Error> {
        let customer = a_customer("c1");
        let next = chrono::Utc::now() + chrono::Duration::hours(24);

        let mut updated = customer.clone();
        updated.next_plan_message_scheduled_for = Some(next.into());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![updated.clone()]])
            .into_connection();

        let result = reschedule_plan_message(&db, &customer, next.into()).await?;

        assert_eq!(result.next_plan_message_scheduled_for, Some(next.into()));

        Ok(())
    }

    #[tokio::test]
    async fn set_onboarding_step_updates_an_existing_customer() -> Result<(), Error> {
        let customer = a_customer("c1");

        let mut updated = customer.clone();
        updated.onboarding_step = Some(OnboardingStep::AwaitingBackground);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![customer.clone()], vec![updated.clone()]])
            .into_connection();

        let result = set_onboarding_step(&db, &customer.id, OnboardingStep::AwaitingBackground).await?;

        assert_eq!(
            result.onboarding_step,
            Some(OnboardingStep::AwaitingBackground)
        );

        Ok(())
    }

    #[tokio::test]
    async fn init_conversation_state_updates_an_existing_customer() -> Result<(), Error> {
        let customer = a_customer("c1");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![customer.clone()], vec![customer.clone()]])
            .into_connection();

        let result = init_conversation_state(&db, &customer.id, "+15551234567").await?;

        assert_eq!(result.conversation_state, ConversationState::Active);

        Ok(())
    }

    #[tokio::test]
    async fn init_conversation_state_seeds_a_row_for_an_unseen_customer() -> Result<(), Error> {
        let mut seeded = a_customer("c-new");
        seeded.status = CustomerStatus::Pending;
        seeded.active_plan_id = None;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new(), vec![seeded.clone()]])
            .into_connection();

        let result = init_conversation_state(&db, &"c-new".to_owned(), "+15551234567").await?;

        assert_eq!(result.status, CustomerStatus::Pending);
        assert_eq!(result.conversation_state, ConversationState::Active);

        Ok(())
    }
}
