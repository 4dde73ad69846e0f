pub mod event_controller;
pub mod health_check_controller;
