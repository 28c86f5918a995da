//! Error types for coefficient design and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a design operation or sample-rate update was rejected.
///
/// None of these are fatal: the operation that produced one left the
/// coefficients exactly as they were.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DesignError {
    /// Frequency outside the range accepted by the operation.
    #[error("{operation}: frequency argument ({frequency}) is out of range [{min}, {max}]")]
    FrequencyOutOfRange {
        /// Operation that rejected the value.
        operation: &'static str,
        /// The rejected frequency in Hz.
        frequency: f64,
        /// Lowest accepted frequency.
        min: f64,
        /// Highest accepted frequency (Nyquist for most operations).
        max: f64,
    },

    /// Frequency below zero where no upper bound applies.
    #[error("{operation}: frequency argument ({frequency}) is negative")]
    NegativeFrequency {
        /// Operation that rejected the value.
        operation: &'static str,
        /// The rejected frequency in Hz.
        frequency: f64,
    },

    /// Pole radius outside `[0, 1)`.
    #[error("{operation}: radius argument ({radius}) is out of range [0, 1)")]
    RadiusOutOfRange {
        /// Operation that rejected the value.
        operation: &'static str,
        /// The rejected radius.
        radius: f64,
    },

    /// Zero radius below zero.
    #[error("{operation}: radius argument ({radius}) is negative")]
    NegativeRadius {
        /// Operation that rejected the value.
        operation: &'static str,
        /// The rejected radius.
        radius: f64,
    },

    /// Quality factor below zero.
    #[error("{operation}: Q argument ({q}) is negative")]
    NegativeQ {
        /// Operation that rejected the value.
        operation: &'static str,
        /// The rejected Q.
        q: f64,
    },

    /// Filter type index with no matching response.
    #[error("set_filter_type: filter type index {0} is invalid")]
    UnknownFilterType(u32),

    /// Sample rate that is not a positive finite number.
    #[error("sample rate ({0}) must be positive and finite")]
    InvalidSampleRate(f64),
}

/// Errors that can occur while loading or saving a [`DesignConfig`](crate::DesignConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn frequency_out_of_range_display() {
        let err = DesignError::FrequencyOutOfRange {
            operation: "set_notch",
            frequency: -10.0,
            min: 0.0,
            max: 22050.0,
        };
        assert_eq!(
            err.to_string(),
            "set_notch: frequency argument (-10) is out of range [0, 22050]"
        );
    }

    #[test]
    fn radius_out_of_range_display() {
        let err = DesignError::RadiusOutOfRange {
            operation: "set_resonance",
            radius: 1.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("set_resonance"), "got: {msg}");
        assert!(msg.contains("1.5"), "got: {msg}");
    }

    #[test]
    fn unknown_filter_type_names_the_value() {
        let msg = DesignError::UnknownFilterType(9).to_string();
        assert!(msg.contains('9'), "got: {msg}");
    }

    #[test]
    fn read_file_display_and_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "mock");
        let err = ConfigError::read_file("/a/design.toml", io);
        let msg = err.to_string();
        assert!(msg.contains("failed to read file"), "got: {msg}");
        assert!(msg.contains("/a/design.toml"), "got: {msg}");
        assert!(err.source().is_some());
    }
}
