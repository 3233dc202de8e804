use std::sync::Arc;

use debtdesk_core::{Config, DeskService};

pub struct AppState {
    pub service: Arc<DeskService>,
    pub config: Config,
}
