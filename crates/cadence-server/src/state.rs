use std::sync::Arc;

use cadence_service::Services;
use cadence_store::Store;
use cadence_types::Clock;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>) -> Self {
        Self {
            services: Services::new(store, clock),
        }
    }
}
