// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatch configuration and message template interpolation.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

/// Regex pattern for ${variable_name}
// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([a-zA-Z_][a-zA-Z0-9_]*)\}").expect("constant regex pattern is valid")
});

/// Interpolate `${name}` placeholders with values from the vars map.
///
/// Unknown template variables are left as-is.
pub fn interpolate(template: &str, vars: &HashMap<String, String>) -> String {
    VAR_PATTERN
        .replace_all(template, |caps: &regex::Captures| {
            let name = &caps[1];
            match vars.get(name) {
                Some(val) => val.clone(),
                None => caps[0].to_string(),
            }
        })
        .to_string()
}

/// Errors from loading a dispatch config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Outbound message templates.
///
/// Templates see `${customer}`, `${kind}`, `${order}`, `${date}` and
/// `${shift}` when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplates {
    #[serde(default = "default_scheduled_template")]
    pub scheduled: String,
    #[serde(default = "default_rescheduled_template")]
    pub rescheduled: String,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            scheduled: default_scheduled_template(),
            rescheduled: default_rescheduled_template(),
        }
    }
}

fn default_scheduled_template() -> String {
    "Hello ${customer}! Your ${kind} (order ${order}) is scheduled for ${date}, ${shift} shift."
        .to_string()
}

fn default_rescheduled_template() -> String {
    "Hello ${customer}, we are sorry: your ${kind} (order ${order}) planned for ${date} \
     had to be rescheduled. We will contact you with a new date."
        .to_string()
}

/// Engine-wide dispatch settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Seconds between vehicle position reports while a route is active.
    #[serde(default = "default_position_interval_secs")]
    pub position_interval_secs: u64,
    /// Warehouse address routes start from.
    #[serde(default)]
    pub origin_address: String,
    #[serde(default)]
    pub templates: MessageTemplates,
}

fn default_position_interval_secs() -> u64 {
    30
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            position_interval_secs: default_position_interval_secs(),
            origin_address: String::new(),
            templates: MessageTemplates::default(),
        }
    }
}

impl DispatchConfig {
    /// Load from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn position_interval(&self) -> Duration {
        Duration::from_secs(self.position_interval_secs)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
