//! Handler for the `run` command.

use std::path::Path;

use tracing::info;

use crate::adapter::inbound::cli::{load_config, output};
use crate::error::Result;
use crate::infrastructure::bootstrap;

/// Execute the run command.
pub async fn execute(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    config.init_logging();

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Listen", &config.server.bind);
    output::field("Store", config.store_endpoint());
    output::field("Webhook", &config.webhook.url);
    output::field(
        "Telegram",
        if config.telegram.enabled { "enabled" } else { "disabled" },
    );

    info!("signal-relay starting");
    bootstrap::run(config).await?;
    info!("signal-relay stopped");
    Ok(())
}
