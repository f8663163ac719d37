//! Terminal output for `signal-relay run` and `signal-relay check`.
//!
//! Every line has a kind (`field`, `success`, ...). In text mode the kind
//! picks a symbol and color; with `--json` each line is printed as
//! `{"type": kind, "payload": {...}}` so scripts can follow a check or a
//! startup summary. `--quiet` hides everything but warnings and errors.

use std::fmt::Display;
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::{json, Value};

/// Flags shared by every handler, set once from the parsed CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

static OUTPUT: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn settings() -> OutputConfig {
    *OUTPUT.get_or_init(Default::default).read()
}

pub fn configure(config: OutputConfig) {
    *OUTPUT.get_or_init(Default::default).write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    settings().json
}

/// Whether a line of this importance is printed in text mode.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Level {
    Info,
    Alert,
}

/// Print one line: JSON to stdout in `--json` mode, otherwise run `text`
/// unless quiet mode hides informational lines.
fn emit(kind: &str, level: Level, payload: Value, text: impl FnOnce()) {
    let config = settings();
    if config.json {
        println!("{}", json!({ "type": kind, "payload": payload }));
        return;
    }
    if config.quiet && level == Level::Info {
        return;
    }
    text();
}

/// Application name and version, printed once at startup.
pub fn header(version: &str) {
    emit(
        "header",
        Level::Info,
        json!({ "app": "signal-relay", "version": version }),
        || {
            println!("{} {}", "signal-relay".bold(), version.dimmed());
            println!();
        },
    );
}

/// A labeled setting, e.g. `Listen  0.0.0.0:8000`.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        Level::Info,
        json!({ "label": label, "value": value }),
        || println!("  {:<12} {}", label.dimmed(), value),
    );
}

pub fn success(message: &str) {
    emit("success", Level::Info, json!({ "message": message }), || {
        println!("  {} {}", "✓".green(), message);
    });
}

pub fn warning(message: &str) {
    emit("warning", Level::Alert, json!({ "message": message }), || {
        println!("  {} {}", "⚠".yellow(), message);
    });
}

/// Fatal error. Goes to stderr in both modes so stdout stays parseable.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
    } else {
        eprintln!("  {} {}", "×".red(), message);
    }
}

pub fn section(title: &str) {
    emit("section", Level::Info, json!({ "title": title }), || {
        println!();
        println!("{}", title.bold());
    });
}
