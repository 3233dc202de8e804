//! Application configuration builders.
//!
//! Constructs the domain service and shared state from `Config`.

use std::sync::Arc;

use tracing::info;

use debtdesk_core::{Clock, Config, DeskService, SystemClock};

use crate::state::AppState;

/// Load configuration from `.env` and environment variables.
pub fn load_config() -> Config {
    debtdesk_core::config::load_dotenv();
    Config::from_env()
}

/// Build the in-memory service, seeding sample data when enabled.
pub fn build_service(config: &Config, clock: Arc<dyn Clock>) -> DeskService {
    let service = DeskService::in_memory(clock);
    if config.data.seed_sample_data {
        service.seed_sample_data();
    } else {
        info!("SEED_SAMPLE_DATA is off; starting with empty collections");
    }
    service
}

/// Build `AppState` backed by the wall clock.
pub fn build_app_state(config: &Config) -> Arc<AppState> {
    let service = build_service(config, Arc::new(SystemClock));
    Arc::new(AppState {
        service: Arc::new(service),
        config: config.clone(),
    })
}
