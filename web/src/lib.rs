//! HTTP surface for the conversation orchestrator: a health check plus
//! webhook-style ingestion endpoints for the platform's lifecycle events.

use messaging::MessageQueue;
use sea_orm::DatabaseConnection;
use service::config::Config;
use std::sync::Arc;

pub mod controller;
pub mod error;
pub mod router;

pub use error::{Error, Result};

/// Web-level application state: the service-layer infrastructure plus the
/// outbound queue the event handlers emit into.
#[derive(Clone)]
pub struct AppState {
    pub database_connection: Arc<DatabaseConnection>,
    pub config: Config,
    pub message_queue: Arc<dyn MessageQueue>,
}

impl AppState {
    pub fn new(service_state: service::AppState, message_queue: Arc<dyn MessageQueue>) -> Self {
        Self {
            database_connection: service_state.database_connection,
            config: service_state.config,
            message_queue,
        }
    }

    pub fn db_conn_ref(&self) -> &DatabaseConnection {
        self.database_connection.as_ref()
    }
}
