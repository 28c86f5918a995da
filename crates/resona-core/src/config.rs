//! Designer configuration.
//!
//! Validation of design arguments is an explicit, injectable policy rather
//! than something toggled by the build profile. A [`DesignConfig`] can be
//! built in code or loaded from TOML:
//!
//! ```toml
//! validation = "unchecked"
//! ignore_sample_rate_change = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How design operations treat their arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Range-check every argument; reject with a warning and leave the
    /// coefficients untouched on failure.
    #[default]
    Strict,
    /// Skip range checks. Out-of-range arguments flow straight into the
    /// formulas. Intended for hot paths where the caller already guarantees
    /// valid input.
    Unchecked,
}

impl ValidationPolicy {
    /// Returns true when arguments are range-checked.
    pub fn is_strict(self) -> bool {
        matches!(self, ValidationPolicy::Strict)
    }
}

/// Construction-time settings for a [`BiquadDesign`](crate::BiquadDesign).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConfig {
    /// Argument validation policy.
    pub validation: ValidationPolicy,
    /// Suppress the stale-coefficient warning on sample-rate changes.
    pub ignore_sample_rate_change: bool,
}

impl DesignConfig {
    /// Set the validation policy.
    pub fn with_validation(mut self, validation: ValidationPolicy) -> Self {
        self.validation = validation;
        self
    }

    /// Set whether sample-rate change notices are ignored.
    pub fn with_ignore_sample_rate_change(mut self, ignore: bool) -> Self {
        self.ignore_sample_rate_change = ignore;
        self
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
