use crate::{controller::health_check_controller, AppState};
use axum::{
    routing::{get, post},
    Router,
};

use crate::controller::event_controller;

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here. The event
// ingestion endpoints are transport plumbing and deliberately undocumented,
// like any other webhook.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "WIS Conversation Orchestrator API"
        ),
        paths(
            health_check_controller::health_check,
        ),
        tags(
            (name = "conversation_orchestrator", description = "Words in Season conversation orchestration API")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(event_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi2.json", ApiDoc::openapi()).path("/rapidoc"))
}

pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn event_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/events/customer-registered",
            post(event_controller::customer_registered),
        )
        .route(
            "/events/subscription-activated",
            post(event_controller::subscription_activated),
        )
        .with_state(app_state)
}
