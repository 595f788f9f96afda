//! Per-rule configuration with explicit defaults.

use serde::{Deserialize, Serialize};

/// Configuration for a validation run. Every field has a documented
/// default, so a partial (or absent) config file behaves predictably.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub logging: LoggingConfig,
}

/// Options consumed by the debug-information/logging rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Production policy: when `true` (the default), a logging setting
    /// left enabled is CRITICAL; when `false` the same finding is INFO.
    pub enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
