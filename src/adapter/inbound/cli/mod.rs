//! CLI module graph.

pub mod check;
pub mod command;
pub mod output;
pub mod run;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::infrastructure::config::Config;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Resolve and load configuration.
///
/// An explicit path must exist. Without one, `config.toml` in the working
/// directory is used if present, otherwise defaults plus the environment.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match resolve_config_path(path) {
        Some(path) => Config::load(path),
        None => Config::from_env(),
    }
}

fn resolve_config_path(path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = path {
        return Some(path.to_path_buf());
    }
    let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
    fallback.exists().then_some(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let path = Path::new("/etc/signal-relay/custom.toml");
        assert_eq!(resolve_config_path(Some(path)), Some(path.to_path_buf()));
    }
}
