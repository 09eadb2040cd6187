//! Runtime configuration from environment variables.
//!
//! - `BLOCKS_INITIAL_VALUE`: value shown at startup (default 123; coerced like typed input)
//! - `BLOCKS_ANIMATION_MS`: duration of one block's move (default 500)
//! - `BLOCKS_STAGGER_MS`: delay per stagger step (default 60)
//! - `BLOCKS_NO_ANIMATION`: "1" or "true" to snap blocks into place
//! - `BLOCKS_LOG_PATH`: file to write logs to (the TUI owns stdout/stderr)

use std::env;

use crate::input::parse_value;
use crate::types::{ANIMATION_MS, STAGGER_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub initial_value: u32,
    pub animation_ms: u32,
    pub stagger_ms: u32,
    pub animate: bool,
    pub log_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            initial_value: 123,
            animation_ms: ANIMATION_MS,
            stagger_ms: STAGGER_MS,
            animate: true,
            log_path: None,
        }
    }
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup (lets tests avoid touching the real environment).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let initial_value = lookup("BLOCKS_INITIAL_VALUE")
            .map(|s| parse_value(&s))
            .unwrap_or(defaults.initial_value);

        let animation_ms = lookup("BLOCKS_ANIMATION_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.animation_ms);

        let stagger_ms = lookup("BLOCKS_STAGGER_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.stagger_ms);

        let animate = !lookup("BLOCKS_NO_ANIMATION")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let log_path = lookup("BLOCKS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            initial_value,
            animation_ms,
            stagger_ms,
            animate,
            log_path,
        }
    }
}
