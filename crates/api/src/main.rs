use std::sync::Arc;

use anyhow::Context;

use productd_api::config::ApiConfig;
use productd_infra::read_model::{InMemoryProductStore, ProductStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    productd_observability::init();

    let config = ApiConfig::from_env().context("failed to load configuration")?;

    // Constructed once here and shared by every request task.
    let store: Arc<dyn ProductStore> = Arc::new(InMemoryProductStore::new());

    productd_api::server::run(config, store).await
}
