//! Realm server binary.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `realm-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Load the definition catalog
//! 4. Serve until `Ctrl-C`

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use realm_bridge::DefinitionCatalog;
use realm_core::RealmConfig;
use realm_core::config::{CatalogSection, LoggingSection};
use realm_server::{AppState, ServerConfig, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "realm-config.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the file.
    init_tracing(&config.logging);
    info!(
        realm = config.realm.name,
        from_file,
        queue_capacity = config.dispatch.outbound_queue_capacity,
        "Configuration loaded"
    );

    // 3. Load the definition catalog.
    let catalog = load_catalog(&config.catalog)?;
    info!(
        things = catalog.thing_count(),
        skills = catalog.skill_count(),
        "Definition catalog loaded"
    );

    // 4. Serve.
    let state = Arc::new(AppState::new(
        config.realm.name.clone(),
        Arc::new(catalog),
        config.dispatch.outbound_queue_capacity,
    ));
    let server_config = ServerConfig {
        host: config.server.host,
        port: config.server.port,
    };
    start_server(&server_config, state)
        .await
        .context("realm server failed")?;

    Ok(())
}

/// Load `realm-config.yaml` if present, otherwise defaults. Environment
/// overrides apply in both cases.
fn load_config() -> anyhow::Result<(RealmConfig, bool)> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        let config = RealmConfig::from_file(path)
            .with_context(|| format!("failed to load {CONFIG_PATH}"))?;
        Ok((config, true))
    } else {
        let mut config = RealmConfig::default();
        config.apply_env_overrides();
        Ok((config, false))
    }
}

fn init_tracing(logging: &LoggingSection) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_catalog(section: &CatalogSection) -> anyhow::Result<DefinitionCatalog> {
    let Some(path) = &section.path else {
        info!("No catalog configured, transfers will be rejected");
        return Ok(DefinitionCatalog::default());
    };
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    DefinitionCatalog::from_yaml(&yaml)
        .with_context(|| format!("failed to parse catalog {}", path.display()))
}
