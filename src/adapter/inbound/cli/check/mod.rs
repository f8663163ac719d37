//! Configuration validation command handler.

use std::path::Path;

use crate::adapter::inbound::cli::{load_config, output};
use crate::error::Result;
use crate::infrastructure::config::telegram::mask_secret;
use crate::infrastructure::config::Config;

/// Validate configuration without starting the server or the bot.
pub fn execute(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;

    output::section("Configuration Check");
    match config_path {
        Some(path) => output::field("Config", path.display()),
        None => output::field("Config", "defaults + environment"),
    }
    output::success("Configuration is valid");

    print_summary(&config);

    output::success("Configuration check complete");
    Ok(())
}

fn print_summary(config: &Config) {
    output::section("Summary");
    output::field("Listen", &config.server.bind);
    output::field("Store", config.store_endpoint());
    output::field("Store key", mask_secret(&config.store.api_key));
    output::field("Webhook", &config.webhook.url);
    output::field(
        "Timeouts",
        format!(
            "{}s total, {}s connect",
            config.http.timeout_secs, config.http.connect_timeout_secs
        ),
    );

    if config.telegram.enabled {
        output::field("Bot token", config.telegram.masked_token());
        if cfg!(feature = "telegram") {
            output::success("Telegram bot configured");
        } else {
            output::warning("Telegram enabled but this build lacks the `telegram` feature");
        }
    } else {
        output::field("Telegram", "disabled");
    }
}
