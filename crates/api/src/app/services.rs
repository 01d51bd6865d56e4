use std::sync::Arc;

use anyhow::Context;

use souk_infra::repository::{InMemoryCatalogStore, PostgresCatalogStore};
use souk_infra::{CatalogConfig, CatalogService, SeedCatalog, ServerConfig};

/// Wire the catalog service to a store.
///
/// With `DATABASE_URL` set the service reads Postgres (migrations are applied
/// on startup); otherwise it runs on an in-memory store. `seed_demo_data` loads
/// the bundled demo catalog into whichever store is used.
pub async fn build_services(server: &ServerConfig, catalog: CatalogConfig) -> anyhow::Result<Arc<CatalogService>> {
    match server.database_url.as_deref() {
        Some(url) => {
            let store = PostgresCatalogStore::connect(url, server.max_db_connections)
                .await
                .context("failed to connect to postgres")?;
            store.migrate().await.context("failed to run catalog migrations")?;
            if server.seed_demo_data {
                let entries = SeedCatalog::bundled()?.validate(chrono::Utc::now())?;
                let inserted = store.seed(entries).await.context("failed to seed postgres")?;
                tracing::info!(inserted, "seeded demo catalog");
            }
            tracing::info!(max_connections = server.max_db_connections, "using postgres catalog store");

            let store = Arc::new(store);
            Ok(Arc::new(CatalogService::new(store.clone(), store, catalog)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory catalog store");
            let store = if server.seed_demo_data {
                let store = InMemoryCatalogStore::seeded().context("failed to load demo catalog")?;
                tracing::info!("loaded demo catalog");
                store
            } else {
                InMemoryCatalogStore::new()
            };
            Ok(in_memory_services(Arc::new(store), catalog))
        }
    }
}

/// Catalog service over an in-memory store (dev/test).
pub fn in_memory_services(store: Arc<InMemoryCatalogStore>, catalog: CatalogConfig) -> Arc<CatalogService> {
    Arc::new(CatalogService::new(store.clone(), store, catalog))
}
