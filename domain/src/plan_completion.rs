//! Queues weekly check-in requests for completed devotional plans.

use crate::error::Error;
use entity_api::devotional_plan;
use log::*;
use messaging::{MessageQueue, WeeklyCheckInRequest};
use sea_orm::DatabaseConnection;

/// Runs one completion pass: every completed plan without a confirmed
/// check-in gets one request queued. Returns how many were queued.
///
/// Emission is deliberately repeatable: `check_in_sent` is set only by the
/// downstream sender after confirmed delivery, so a transient send failure
/// cannot permanently skip a plan. Suppression therefore depends entirely on
/// that flag.
pub async fn process_completed_plans(
    db: &DatabaseConnection,
    queue: &dyn MessageQueue,
) -> Result<usize, Error> {
    let plans = devotional_plan::find_needing_check_in(db).await?;

    if plans.is_empty() {
        info!("No completed plans needing check-in messages");
        return Ok(0);
    }

    info!(
        "Found {} completed plans needing check-in messages",
        plans.len()
    );

    let mut queued = 0;
    for plan in &plans {
        debug!(
            "Queueing weekly check-in request for customer {}, plan {}",
            plan.customer_id, plan.id
        );

        let request = WeeklyCheckInRequest::new(&plan.customer_id, &plan.id);

        match queue.enqueue(&request.into()).await {
            Ok(()) => {
                info!(
                    "Queued weekly check-in request for customer {}",
                    plan.customer_id
                );
                queued += 1;
            }
            Err(e) => error!("Error queueing weekly check-in for plan {}: {e}", plan.id),
        }
    }

    Ok(queued)
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use entity::daily_devotion::PlanDays;
    use entity::devotional_plans::Model;
    use entity::plan_status::PlanStatus;
    use entity::themes::Themes;
    use messaging::{InMemoryQueue, OutboundMessage};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn a_completed_plan(id: &str, customer_id: &str) -> Model {
        let now = chrono::Utc::now();

        Model {
            id: id.to_owned(),
            customer_id: customer_id.to_owned(),
            plan_number: Some(1),
            status: PlanStatus::Completed,
            started_at: Some((now - chrono::Duration::days(7)).into()),
            completed_at: Some(now.into()),
            life_season: None,
            themes: Themes::default(),
            current_day: Some(7),
            days: PlanDays::default(),
            check_in_sent: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn each_completed_plan_gets_exactly_one_check_in_request() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                a_completed_plan("plan-1", "c1"),
                a_completed_plan("plan-2", "c2"),
            ]])
            .into_connection();
        let queue = InMemoryQueue::new();

        let queued = process_completed_plans(&db, &queue).await.unwrap();

        assert_eq!(queued, 2);
        let messages = queue.messages();
        let OutboundMessage::CheckIn(request) = &messages[0] else {
            panic!("expected a weekly check-in request");
        };
        assert_eq!(request.customer_id, "c1");
        assert_eq!(request.metadata.completed_plan_id, "plan-1");
        assert!(request.metadata.expects_response);
    }

    #[tokio::test]
    async fn rerunning_with_the_flag_still_unset_emits_again() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![
                vec![a_completed_plan("plan-1", "c1")],
                vec![a_completed_plan("plan-1", "c1")],
            ])
            .into_connection();
        let queue = InMemoryQueue::new();

        process_completed_plans(&db, &queue).await.unwrap();
        process_completed_plans(&db, &queue).await.unwrap();

        assert_eq!(queue.messages().len(), 2);
    }

    #[tokio::test]
    async fn no_candidates_queues_nothing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();
        let queue = InMemoryQueue::new();

        let queued = process_completed_plans(&db, &queue).await.unwrap();

        assert_eq!(queued, 0);
        assert!(queue.messages().is_empty());
    }
}
