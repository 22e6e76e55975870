//! Homepage Server
//!
//! Serves the homepage front-end and the JSON API that edits its config
//! document.
//!
//! # Configuration
//!
//! Settings come from the config file, overridden by environment variables:
//! - `HOMEPAGE_CONFIG`: Path to config file (default: ~/.config/homepage/config.yaml)
//! - `HOMEPAGE_PORT`: Port to listen on (default: 3001)
//! - `HOMEPAGE_BIND_ADDRESS`: Address to bind (default: 0.0.0.0)
//! - `HOMEPAGE_DOCUMENT`: Path to the JSON document (default: ~/.local/share/homepage/config.json)
//! - `HOMEPAGE_BACKUP_DIR`: Directory for backups before full saves (default: none)
//! - `HOMEPAGE_STATIC_DIR`: Site files (default: ~/.local/share/homepage/public)
//! - `HOMEPAGE_ADMIN_PASSWORD`: Shared admin password (default: none, logins fail)
//!
//! # Config File Format
//!
//! ```yaml
//! port: 3001
//! document_path: public/config.json
//! backup_dir: backups
//! static_dir: public
//! admin_password: "change-me"
//! ```

use homepage::config::Config;
use homepage::server::{self, AppState, PasswordCheck};
use homepage_core::{DocumentStore, SectionEditor};
use std::net::{IpAddr, SocketAddr};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "homepage_server=info,homepage=info,homepage_core=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(None)?;

    if let Some(path) = &config.config_file {
        tracing::info!("Config file: {}", path.display());
    }
    tracing::info!("Document: {}", config.document_path.value.display());
    tracing::info!("Static files: {}", config.static_dir.value.display());

    let mut store = DocumentStore::new(&config.document_path.value);
    if let Some(dir) = &config.backup_dir.value {
        tracing::info!("Backups: {}", dir.display());
        store = store.with_backup_dir(dir);
    }

    if !store.exists() {
        tracing::warn!("Document not found, it will be created on first save");
    }

    let login = PasswordCheck::new(config.admin_password.value.as_deref());
    if !login.is_configured() {
        tracing::warn!("No admin password configured - all logins will fail");
    }

    let state = AppState::new(SectionEditor::new(store), login, &config.static_dir.value);
    let app = server::router(state);

    let ip: IpAddr = config.bind_address.value.parse()?;
    let addr = SocketAddr::new(ip, config.port.value);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
