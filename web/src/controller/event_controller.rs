//! Controller ingesting lifecycle events from the platform's event topics.
//!
//! Transport adapter only: payload validation and the drop-malformed policy
//! live in the domain handlers. A 2xx acknowledges the event (processed or
//! deliberately dropped); any propagated failure becomes a non-2xx so the
//! transport redelivers.

use crate::{AppState, Error};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::onboarding;
use log::*;
use messaging::{CustomerRegistered, SubscriptionActivated};
use serde::Serialize;

/// Acknowledgment returned to the event transport.
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub status: String,
}

/// POST /events/customer-registered
pub async fn customer_registered(
    State(app_state): State<AppState>,
    Json(event): Json<CustomerRegistered>,
) -> Result<impl IntoResponse, Error> {
    debug!("Received CustomerRegistered event: {:?}", event.event_id);

    onboarding::handle_customer_registered(
        app_state.db_conn_ref(),
        app_state.message_queue.as_ref(),
        &event,
    )
    .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(EventResponse {
            status: "accepted".to_string(),
        }),
    ))
}

/// POST /events/subscription-activated
pub async fn subscription_activated(
    State(app_state): State<AppState>,
    Json(event): Json<SubscriptionActivated>,
) -> Result<impl IntoResponse, Error> {
    debug!("Received SubscriptionActivated event: {:?}", event.event_id);

    onboarding::handle_subscription_activated(
        app_state.db_conn_ref(),
        app_state.message_queue.as_ref(),
        &event,
    )
    .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(EventResponse {
            status: "accepted".to_string(),
        }),
    ))
}
