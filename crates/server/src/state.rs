use std::sync::Arc;

use configs::StoreConfig;
use service::{seed, EntityStore, ThingService, VentureService};

/// Shared handler state. One store per record kind, built once at startup.
#[derive(Clone)]
pub struct ServerState {
    pub things: ThingService,
    pub ventures: VentureService,
}

impl ServerState {
    pub fn new(things: Arc<EntityStore<models::Thing>>, ventures: Arc<EntityStore<models::Venture>>) -> Self {
        Self { things: ThingService::new(things), ventures: VentureService::new(ventures) }
    }

    /// Empty stores, seeded with demo data when the config asks for it.
    pub fn from_config(cfg: &StoreConfig) -> Self {
        let state = Self::new(Arc::new(EntityStore::new()), Arc::new(EntityStore::new()));
        if cfg.seed_dummy_data {
            seed::seed_things(state.things.store());
            seed::seed_ventures(state.ventures.store());
        }
        state
    }
}
