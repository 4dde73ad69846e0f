use log::{error, info};
use messaging::{LoggingQueue, MessageQueue};
use service::{config::Config, logging::Logger};
use std::sync::Arc;
use tokio::time::{interval, Duration};

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config as &Config);

    info!(
        "Starting conversation orchestrator [{}]...",
        config.runtime_env()
    );

    let db = match service::init_database(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let service_state = service::AppState::new(config.clone(), &db);

    // The broker sender binding is deployment-specific; until one is wired
    // up, outbound commands are serialized onto the log stream.
    let message_queue: Arc<dyn MessageQueue> = Arc::new(LoggingQueue::new());

    let app_state = web::AppState::new(service_state.clone(), Arc::clone(&message_queue));

    tokio::spawn(run_scheduler(service_state, Arc::clone(&message_queue)));

    let listen_address = format!(
        "{}:{}",
        config.interface.as_deref().unwrap_or("127.0.0.1"),
        config.port
    );
    info!("Server starting... listening for requests on http://{listen_address}");

    let listener = match tokio::net::TcpListener::bind(&listen_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {listen_address}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, web::router::define_routes(app_state)).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Fixed-interval scheduler driving the three timer passes. Each tick runs
/// the passes sequentially on this task, so a slow tick delays the next one
/// rather than overlapping it; a failed pass is logged and the loop
/// continues.
async fn run_scheduler(state: service::AppState, queue: Arc<dyn MessageQueue>) {
    let mut ticks = interval(Duration::from_secs(state.config.scheduler_interval_seconds));

    info!(
        "Scheduler running every {}s (plan interval: {}h, advance day: {})",
        state.config.scheduler_interval_seconds,
        state.config.plan_message_interval_hours,
        state.config.advance_plan_day
    );

    loop {
        ticks.tick().await;

        let db = state.db_conn_ref();
        let now = chrono::Utc::now().fixed_offset();

        match domain::plan_schedule::process_due_plan_messages(
            db,
            queue.as_ref(),
            state.config.plan_message_interval(),
            state.config.advance_plan_day,
            now,
        )
        .await
        {
            Ok(queued) => info!("Plan advancement pass queued {queued} message(s)"),
            Err(e) => error!("Error processing devotional plan messages: {e}"),
        }

        match domain::recurring_schedule::process_due_recurring_messages(db, queue.as_ref(), now)
            .await
        {
            Ok(queued) => info!("Recurring message pass queued {queued} request(s)"),
            Err(e) => error!("Error processing scheduled messages: {e}"),
        }

        match domain::plan_completion::process_completed_plans(db, queue.as_ref()).await {
            Ok(queued) => info!("Plan completion pass queued {queued} check-in(s)"),
            Err(e) => error!("Error processing plan completions: {e}"),
        }
    }
}
