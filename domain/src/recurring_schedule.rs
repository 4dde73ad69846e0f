//! Evaluates recurring message schedules: daily devotionals and season
//! check-ins.

use crate::error::Error;
use crate::templates;
use chrono::{DateTime, FixedOffset};
use entity::customers;
use entity_api::customer;
use log::*;
use messaging::{MessageQueue, ScheduledMessageRequest};
use sea_orm::DatabaseConnection;

/// Runs one recurring-message pass over every customer with a due schedule
/// and an active conversation. Returns how many requests were queued.
pub async fn process_due_recurring_messages(
    db: &DatabaseConnection,
    queue: &dyn MessageQueue,
    now: DateTime<FixedOffset>,
) -> Result<usize, Error> {
    let candidates = customer::find_due_for_recurring_message(db, now).await?;

    if candidates.is_empty() {
        info!("No customers with scheduled messages found");
        return Ok(0);
    }

    info!("Found {} customers with scheduled messages", candidates.len());

    let mut queued = 0;
    for candidate in &candidates {
        queued += evaluate_candidate(queue, candidate, now).await;
    }

    Ok(queued)
}

/// Evaluates one customer's schedule. The devotional and check-in checks are
/// independent and both may fire on the same pass; a failure queueing one is
/// logged and does not block the other. The `next_*` timestamps are not
/// cleared or advanced here: the conversation engine downstream reschedules
/// once it has processed the delivery.
pub async fn evaluate_candidate(
    queue: &dyn MessageQueue,
    customer: &customers::Model,
    now: DateTime<FixedOffset>,
) -> usize {
    let mut queued = 0;

    if customer
        .next_devotional_scheduled_for
        .is_some_and(|due| due <= now)
    {
        info!("Queueing devotional for customer: {}", customer.id);

        let request = ScheduledMessageRequest::daily_devotional(
            &customer.id,
            Some(customer.phone.clone()),
            customer.extracted_themes.0.clone(),
            customer.current_life_season.clone(),
        );

        match queue.enqueue(&request.into()).await {
            Ok(()) => queued += 1,
            Err(e) => error!(
                "Failed to queue devotional message for customer {}: {e}",
                customer.id
            ),
        }
    }

    if customer
        .next_check_in_scheduled_for
        .is_some_and(|due| due <= now)
    {
        info!("Queueing check-in for customer: {}", customer.id);

        let request = ScheduledMessageRequest::season_check_in(
            &customer.id,
            Some(customer.phone.clone()),
            templates::season_check_in_text(),
        );

        match queue.enqueue(&request.into()).await {
            Ok(()) => queued += 1,
            Err(e) => error!(
                "Failed to queue check-in message for customer {}: {e}",
                customer.id
            ),
        }
    }

    queued
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use entity::conversation_state::ConversationState;
    use entity::customer_status::CustomerStatus;
    use entity::themes::Themes;
    use messaging::{InMemoryQueue, MessagePriority, OutboundMessage};

    pub(super) fn a_customer(
        id: &str,
        next_devotional: Option<DateTime<FixedOffset>>,
        next_check_in: Option<DateTime<FixedOffset>>,
    ) -> customers::Model {
        let now = chrono::Utc::now();

        customers::Model {
            id: id.to_owned(),
            phone: "+15551234567".to_owned(),
            status: CustomerStatus::Active,
            active_plan_id: None,
            first_name: None,
            next_plan_message_scheduled_for: None,
            next_devotional_scheduled_for: next_devotional,
            next_check_in_scheduled_for: next_check_in,
            timezone: None,
            preferred_time_of_day: None,
            current_life_season: Some("seeking direction".to_owned()),
            extracted_themes: Themes(vec!["hope".to_owned(), "rest".to_owned()]),
            conversation_state: ConversationState::Active,
            last_devotional_sent_at: None,
            onboarding_step: None,
            onboarding_step_updated_at: None,
            beta_program: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn now() -> DateTime<FixedOffset> {
        chrono::Utc::now().fixed_offset()
    }

    #[tokio::test]
    async fn both_due_schedules_emit_two_requests() {
        let at = now();
        let customer = a_customer(
            "c1",
            Some(at - Duration::minutes(5)),
            Some(at - Duration::minutes(1)),
        );
        let queue = InMemoryQueue::new();

        let queued = evaluate_candidate(&queue, &customer, at).await;

        assert_eq!(queued, 2);
        let messages = queue.messages();
        assert_eq!(messages[0].message_type(), "daily_devotional");
        assert_eq!(messages[1].message_type(), "season_check_in");
    }

    #[tokio::test]
    async fn devotional_request_carries_personalization_context() {
        let at = now();
        let customer = a_customer("c1", Some(at), None);
        let queue = InMemoryQueue::new();

        evaluate_candidate(&queue, &customer, at).await;

        let messages = queue.messages();
        assert_eq!(messages.len(), 1);
        let OutboundMessage::Scheduled(request) = &messages[0] else {
            panic!("expected a scheduled message request");
        };
        assert!(request.message.is_none());
        assert_eq!(request.themes, vec!["hope", "rest"]);
        assert_eq!(request.life_season.as_deref(), Some("seeking direction"));
        assert_eq!(request.priority, MessagePriority::Normal);
    }

    #[tokio::test]
    async fn check_in_request_carries_the_pre_authored_body() {
        let at = now();
        let customer = a_customer("c1", None, Some(at - Duration::hours(1)));
        let queue = InMemoryQueue::new();

        evaluate_candidate(&queue, &customer, at).await;

        let messages = queue.messages();
        assert_eq!(messages.len(), 1);
        let OutboundMessage::Scheduled(request) = &messages[0] else {
            panic!("expected a scheduled message request");
        };
        assert!(request
            .message
            .as_deref()
            .unwrap()
            .contains("Has your season of life changed"));
    }

    #[tokio::test]
    async fn future_schedules_emit_nothing() {
        let at = now();
        let customer = a_customer(
            "c1",
            Some(at + Duration::minutes(5)),
            Some(at + Duration::hours(1)),
        );
        let queue = InMemoryQueue::new();

        let queued = evaluate_candidate(&queue, &customer, at).await;

        assert_eq!(queued, 0);
        assert!(queue.messages().is_empty());
    }

    #[tokio::test]
    async fn a_schedule_due_exactly_now_counts_as_due() {
        let at = now();
        let customer = a_customer("c1", Some(at), None);
        let queue = InMemoryQueue::new();

        assert_eq!(evaluate_candidate(&queue, &customer, at).await, 1);
    }
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod mock_tests {
    use super::*;
    use chrono::Duration;
    use messaging::InMemoryQueue;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn pass_evaluates_every_candidate() {
        let at = chrono::Utc::now().fixed_offset();
        let first = super::tests::a_customer("c1", Some(at - Duration::minutes(2)), None);
        let second = super::tests::a_customer(
            "c2",
            Some(at - Duration::minutes(2)),
            Some(at - Duration::minutes(2)),
        );

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![first, second]])
            .into_connection();
        let queue = InMemoryQueue::new();

        let queued = process_due_recurring_messages(&db, &queue, at).await.unwrap();

        assert_eq!(queued, 3);
        assert_eq!(queue.messages().len(), 3);
    }
}
