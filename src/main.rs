//! Cuckoo Panel
//!
//! Main entry point. The only argument is the configuration file path.

use anyhow::Context;
use cuckoo_panel::config::{PanelConfig, DEFAULT_CONFIG_PATH};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "CUCKOO_LOG";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Cuckoo Panel v{}", env!("CARGO_PKG_VERSION"));

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = PanelConfig::load(&path)
        .with_context(|| format!("Failed to load configuration from {}", path))?;

    let mut panel = app::PanelApp::new(config)?;
    panel.run()
}
