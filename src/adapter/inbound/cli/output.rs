//! Terminal output for CLI handlers.
//!
//! Handlers print through these helpers so `--json` and `--quiet` are honoured
//! in one place. In JSON mode only [`json_output`] and [`error`] write
//! anything; human-oriented lines are dropped.

use std::fmt::Display;

use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::{json, Value};

/// Output flags taken from the global CLI options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
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

static MODE: RwLock<OutputConfig> = RwLock::new(OutputConfig::new(false, false));

/// Install the flags for the rest of the process.
pub fn configure(config: OutputConfig) {
    *MODE.write() = config;
}

/// True when `--json` was given.
#[must_use]
pub fn is_json() -> bool {
    MODE.read().json
}

fn human() -> bool {
    let mode = *MODE.read();
    !mode.json && !mode.quiet
}

/// Bold heading preceded by a blank line.
pub fn section(title: &str) {
    if human() {
        println!();
        println!("{}", title.bold());
    }
}

/// Indented `label value` pair.
pub fn field(label: &str, value: impl Display) {
    if human() {
        println!("  {:<12} {}", label.dimmed(), value);
    }
}

pub fn success(message: &str) {
    if human() {
        println!("  {} {}", "✓".green(), message);
    }
}

/// Printed in quiet mode too; suppressed only by `--json`.
pub fn warning(message: &str) {
    if !is_json() {
        println!("  {} {}", "!".yellow().bold(), message);
    }
}

/// Errors always go to stderr, as a JSON object in JSON mode.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "error": message }));
    } else {
        eprintln!("  {} {}", "×".red(), message);
    }
}

pub fn table(rendered: impl Display) {
    if human() {
        println!("{rendered}");
    }
}

/// The single document a command emits in JSON mode.
pub fn json_output(value: Value) {
    match serde_json::to_string_pretty(&value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}

/// Three decimals, or `n/a` for a statistic that lacked samples.
#[must_use]
pub fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.3}"))
}

/// A `[0, 1]` rate as a percentage with one decimal.
#[must_use]
pub fn percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}
