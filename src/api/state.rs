use std::sync::Arc;

use crate::config::Config;
use crate::dispatch::DispatchEngine;
use crate::observability::Metrics;
use crate::store::ConfigurationStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<ConfigurationStore>,
    pub engine: Arc<DispatchEngine>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<ConfigurationStore>,
        engine: DispatchEngine,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            engine: Arc::new(engine),
            metrics,
        }
    }
}
