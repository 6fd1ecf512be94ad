use std::sync::Arc;

use catalog_core::config::{AppConfig, ConfigError, LoadOptions};
use catalog_db::{InMemoryProductRepository, ProductRepository, RepositoryError, SeedDataset};
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub products: Arc<dyn ProductRepository>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("seed catalog could not be loaded: {0}")]
    Seed(#[source] RepositoryError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let repository = InMemoryProductRepository::default();
    if config.catalog.seed_enabled {
        SeedDataset::load(&repository).await.map_err(BootstrapError::Seed)?;
    } else {
        info!(
            event_name = "system.bootstrap.seed_skipped",
            correlation_id = "bootstrap",
            "seed catalog disabled; starting with an empty store"
        );
    }

    Ok(Application { config, products: Arc::new(repository) })
}

#[cfg(test)]
mod tests {
    use catalog_core::config::{AppConfig, ConfigOverrides, LoadOptions};
    use catalog_core::ProductId;

    use crate::bootstrap::{bootstrap, bootstrap_with_config};

    #[tokio::test]
    async fn bootstrap_seeds_catalog_by_default() {
        let app = bootstrap_with_config(AppConfig::default()).await.expect("bootstrap");

        let products = app.products.list().await.expect("list");
        assert_eq!(products.len(), 5);
        assert_eq!(app.products.next_id().await.expect("next id"), ProductId(6));
    }

    #[tokio::test]
    async fn bootstrap_can_start_with_empty_catalog() {
        let mut config = AppConfig::default();
        config.catalog.seed_enabled = false;

        let app = bootstrap_with_config(config).await.expect("bootstrap");

        assert!(app.products.list().await.expect("list").is_empty());
        assert_eq!(app.products.next_id().await.expect("next id"), ProductId(1));
    }

    #[tokio::test]
    async fn bootstrap_fails_fast_on_invalid_config() {
        let result = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                log_level: Some("verbose".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await;

        let message = result.err().expect("error").to_string();
        assert!(message.contains("logging.level"));
    }
}
