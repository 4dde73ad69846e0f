//! Lifecycle event handlers for customer onboarding.
//!
//! Both handlers follow the same policy: an event missing its data payload,
//! customer id, or destination phone is dropped with a warning (data-quality
//! issue, not a transient fault), while any unexpected failure propagates so
//! the transport redelivers the event. Handlers are safe to re-invoke with
//! the same event: conversation-state initialization is an upsert and the
//! welcome command id derives from the event id.

use crate::error::Error;
use crate::templates;
use entity::onboarding_step::OnboardingStep;
use entity_api::customer;
use log::*;
use messaging::{
    CustomerRegistered, MessageQueue, SubscriptionActivated, WelcomeMessage, WelcomeMetadata,
};
use sea_orm::DatabaseConnection;

/// Reacts to a customer completing registration: queues the first welcome
/// message (asking for their season of life) and initializes the
/// conversation state.
pub async fn handle_customer_registered(
    db: &DatabaseConnection,
    queue: &dyn MessageQueue,
    event: &CustomerRegistered,
) -> Result<(), Error> {
    let Some(data) = &event.data else {
        warn!(
            "CustomerRegistered event {:?} has no data payload. Skipping.",
            event.event_id
        );
        return Ok(());
    };
    let (Some(customer_id), Some(phone)) = (&data.customer_id, &data.phone) else {
        warn!(
            "CustomerRegistered event {:?} is missing a customer id or phone. Skipping.",
            event.event_id
        );
        return Ok(());
    };

    info!("CustomerRegistered event received for customer: {customer_id}, phone: {phone}");

    let metadata =
        WelcomeMetadata::first_attempt(event.event_id.clone(), data.registration_stage.clone());
    let welcome = WelcomeMessage::new(
        customer_id,
        phone,
        templates::registration_welcome_text(),
        metadata,
    );

    queue.enqueue(&welcome.into()).await?;

    info!("Welcome message queued successfully for customer: {customer_id}");

    customer::init_conversation_state(db, customer_id, phone).await?;

    Ok(())
}

/// Reacts to a subscription activating after successful payment: queues the
/// welcome message opening the two-step onboarding flow (background first,
/// season second) and initializes the conversation state.
pub async fn handle_subscription_activated(
    db: &DatabaseConnection,
    queue: &dyn MessageQueue,
    event: &SubscriptionActivated,
) -> Result<(), Error> {
    let Some(data) = &event.data else {
        warn!(
            "SubscriptionActivated event {:?} has no data payload. Skipping.",
            event.event_id
        );
        return Ok(());
    };
    let (Some(customer_id), Some(phone)) = (&data.customer_id, &data.phone_number) else {
        warn!(
            "SubscriptionActivated event {:?} is missing a customer id or phone. Skipping.",
            event.event_id
        );
        return Ok(());
    };

    info!(
        "SubscriptionActivated event received for customer: {customer_id}, subscription: {:?}",
        data.subscription_id
    );

    // Best-effort personalization: a missing or unreadable customer record
    // degrades the greeting to the anonymous form, it never fails the event.
    let first_name = match customer::find_by_id(db, customer_id).await {
        Ok(found) => {
            if let Err(e) =
                customer::set_onboarding_step(db, customer_id, OnboardingStep::AwaitingBackground)
                    .await
            {
                warn!("Could not set onboarding step for customer {customer_id}: {e}");
            }
            found.first_name
        }
        Err(e) => {
            warn!("Could not fetch customer {customer_id} for personalization: {e}");
            None
        }
    };

    let metadata = WelcomeMetadata::first_attempt(
        event.event_id.clone(),
        Some("subscription_activated".to_owned()),
    );
    let welcome = WelcomeMessage::new(
        customer_id,
        phone,
        templates::subscription_welcome_text(first_name.as_deref()),
        metadata,
    );

    queue.enqueue(&welcome.into()).await?;

    info!("Welcome message queued successfully for customer: {customer_id} after subscription activation");

    customer::init_conversation_state(db, customer_id, phone).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use messaging::{CustomerRegisteredData, InMemoryQueue};

    pub(super) fn registered_event(
        customer_id: Option<&str>,
        phone: Option<&str>,
    ) -> CustomerRegistered {
        CustomerRegistered {
            event_id: Some("evt-1".to_owned()),
            event_type: Some("CustomerRegistered".to_owned()),
            event_time: None,
            subject: None,
            data: Some(CustomerRegisteredData {
                customer_id: customer_id.map(str::to_owned),
                phone: phone.map(str::to_owned),
                registration_stage: Some("registered".to_owned()),
                created_at: None,
            }),
        }
    }

    // The validation paths never reach storage, so a disconnected handle is
    // enough for them.
    #[tokio::test]
    async fn registered_event_without_data_is_dropped_silently() {
        let db = DatabaseConnection::default();
        let queue = InMemoryQueue::new();
        let event = CustomerRegistered {
            event_id: Some("evt-1".to_owned()),
            event_type: None,
            event_time: None,
            subject: None,
            data: None,
        };

        let result = handle_customer_registered(&db, &queue, &event).await;

        assert!(result.is_ok());
        assert!(queue.messages().is_empty());
    }

    #[tokio::test]
    async fn registered_event_without_phone_is_dropped_silently() {
        let db = DatabaseConnection::default();
        let queue = InMemoryQueue::new();
        let event = registered_event(Some("c1"), None);

        let result = handle_customer_registered(&db, &queue, &event).await;

        assert!(result.is_ok());
        assert!(queue.messages().is_empty());
    }

    #[tokio::test]
    async fn activated_event_without_customer_id_is_dropped_silently() {
        let db = DatabaseConnection::default();
        let queue = InMemoryQueue::new();
        let event: SubscriptionActivated =
            serde_json::from_str(r#"{"eventId":"evt-2","data":{"phoneNumber":"+15551234567"}}"#)
                .unwrap();

        let result = handle_subscription_activated(&db, &queue, &event).await;

        assert!(result.is_ok());
        assert!(queue.messages().is_empty());
    }
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod mock_tests {
    use super::*;
    use entity::conversation_state::ConversationState;
    use entity::customer_status::CustomerStatus;
    use entity::customers::Model;
    use entity::themes::Themes;
    use messaging::{InMemoryQueue, OutboundMessage, SubscriptionActivatedData};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn a_customer(id: &str, first_name: Option<&str>) -> Model {
        let now = chrono::Utc::now();

        Model {
            id: id.to_owned(),
            phone: "+15551234567".to_owned(),
            status: CustomerStatus::Active,
            active_plan_id: None,
            first_name: first_name.map(str::to_owned),
            next_plan_message_scheduled_for: None,
            next_devotional_scheduled_for: None,
            next_check_in_scheduled_for: None,
            timezone: None,
            preferred_time_of_day: None,
            current_life_season: None,
            extracted_themes: Themes::default(),
            conversation_state: ConversationState::Active,
            last_devotional_sent_at: None,
            onboarding_step: None,
            onboarding_step_updated_at: None,
            beta_program: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn activated_event(customer_id: &str) -> SubscriptionActivated {
        SubscriptionActivated {
            event_id: Some("evt-2".to_owned()),
            event_type: Some("SubscriptionActivated".to_owned()),
            event_time: None,
            subject: None,
            data: Some(SubscriptionActivatedData {
                customer_id: Some(customer_id.to_owned()),
                phone_number: Some("+15559876543".to_owned()),
                subscription_id: Some("sub-1".to_owned()),
                stripe_price_id: None,
                status: Some("active".to_owned()),
                activated_at: None,
            }),
        }
    }

    #[tokio::test]
    async fn registered_event_queues_one_welcome_and_initializes_state() {
        let customer = a_customer("c1", None);
        // init_conversation_state: find existing, then update
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![customer.clone()], vec![customer.clone()]])
            .into_connection();
        let queue = InMemoryQueue::new();
        let event = super::tests::registered_event(Some("c1"), Some("+15551234567"));

        handle_customer_registered(&db, &queue, &event).await.unwrap();

        let messages = queue.messages();
        assert_eq!(messages.len(), 1);
        let OutboundMessage::Welcome(welcome) = &messages[0] else {
            panic!("expected a welcome command");
        };
        assert_eq!(welcome.message_type, "onboarding_welcome");
        assert_eq!(welcome.to, "+15551234567");
        assert_eq!(welcome.conversation_id, "conv-c1");
        assert!(welcome.body.contains("season of life"));
        assert_eq!(welcome.metadata.attempt, 1);
        assert_eq!(welcome.metadata.max_retries, 3);
        assert_eq!(
            welcome.metadata.registration_stage.as_deref(),
            Some("registered")
        );
    }

    #[tokio::test]
    async fn activated_event_personalizes_the_greeting_from_the_stored_profile() {
        let customer = a_customer("c2", Some("Amy"));
        // personalization find, onboarding-step find + update, then
        // conversation init find + update
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![
                vec![customer.clone()],
                vec![customer.clone()],
                vec![customer.clone()],
                vec![customer.clone()],
                vec![customer.clone()],
            ])
            .into_connection();
        let queue = InMemoryQueue::new();

        handle_subscription_activated(&db, &queue, &activated_event("c2"))
            .await
            .unwrap();

        let messages = queue.messages();
        assert_eq!(messages.len(), 1);
        let OutboundMessage::Welcome(welcome) = &messages[0] else {
            panic!("expected a welcome command");
        };
        assert!(welcome.body.starts_with("Hey Amy! 🌿"));
        assert_eq!(
            welcome.metadata.registration_stage.as_deref(),
            Some("subscription_activated")
        );
    }

    #[tokio::test]
    async fn activated_event_degrades_to_anonymous_greeting_when_lookup_fails() {
        let customer = a_customer("c2", Some("Amy"));
        // The personalization lookup finds nothing; the conversation init
        // then seeds a fresh row.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![
                Vec::<Model>::new(),
                Vec::<Model>::new(),
                vec![customer],
            ])
            .into_connection();
        let queue = InMemoryQueue::new();

        handle_subscription_activated(&db, &queue, &activated_event("c2"))
            .await
            .unwrap();

        let messages = queue.messages();
        assert_eq!(messages.len(), 1);
        let OutboundMessage::Welcome(welcome) = &messages[0] else {
            panic!("expected a welcome command");
        };
        assert!(welcome.body.starts_with("Hey! 🌿"));
    }

    #[tokio::test]
    async fn redelivered_registered_event_produces_the_same_message_id() {
        let customer = a_customer("c1", None);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![
                vec![customer.clone()],
                vec![customer.clone()],
                vec![customer.clone()],
                vec![customer.clone()],
            ])
            .into_connection();
        let queue = InMemoryQueue::new();
        let event = super::tests::registered_event(Some("c1"), Some("+15551234567"));

        handle_customer_registered(&db, &queue, &event).await.unwrap();
        handle_customer_registered(&db, &queue, &event).await.unwrap();

        let messages = queue.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].message_id(), messages[1].message_id());
    }
}
