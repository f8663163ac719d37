//! Telegram bot configuration.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelegramAppConfig {
    /// Run the preference bot alongside the HTTP server.
    pub enabled: bool,
    /// Loaded from `TELEGRAM_BOT_TOKEN` at runtime (never from the config file).
    #[serde(skip)]
    pub bot_token: String,
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bot_token: String::new(),
        }
    }
}

impl TelegramAppConfig {
    /// Token with everything but the last four characters hidden.
    #[must_use]
    pub fn masked_token(&self) -> String {
        mask_secret(&self.bot_token)
    }
}

/// Mask a secret for display, keeping the last four characters.
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{visible}", "*".repeat(chars.len() - 4))
}
