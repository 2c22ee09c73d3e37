use std::sync::Arc;

use crate::{config::Config, services::RecommendationService, store::CatalogStore};

/// Shared application state.
///
/// Nothing here is mutated after startup; each request reads its own
/// snapshot from the store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub service: Arc<RecommendationService>,
    pub default_count: usize,
    pub max_count: usize,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        service: RecommendationService,
        config: &Config,
    ) -> Self {
        Self {
            store,
            service: Arc::new(service),
            default_count: config.default_count,
            max_count: config.max_count,
        }
    }
}
