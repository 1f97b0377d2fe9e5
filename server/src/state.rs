use std::sync::Arc;

use redis::aio::ConnectionManager;

use super::{config::Config, content::Catalog, database::init_redis};

pub struct AppState {
    pub config: Config,
    pub catalog: Catalog,
    pub redis: ConnectionManager,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();
        let catalog = Catalog::builtin();
        let redis = init_redis(&config.redis_url).await;

        Arc::new(Self {
            config,
            catalog,
            redis,
        })
    }
}
