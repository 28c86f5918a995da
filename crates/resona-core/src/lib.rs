//! Resona Core - two-pole, two-zero filter coefficient design
//!
//! This crate computes and maintains the five coefficients of a second-order
//! recursive filter for real-time audio chains:
//!
//! ```text
//! y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]
//! ```
//!
//! # Core Abstractions
//!
//! ## Coefficient Design
//!
//! - [`BiquadDesign`] - Owns the coefficients and derives them from
//!   resonance, notch, canonical filter type, or fixed zero placement
//! - [`FilterType`] - LowPass, HighPass, BandPass, BandReject, AllPass
//! - [`Coefficients`] - Plain coefficient values with response evaluation
//!
//! ## Collaborators
//!
//! - [`FilterHistory`] / [`DirectFormI`] - Delay-line state that runs the
//!   difference equation
//! - [`SampleRateHub`] - Shared sample rate with change notification
//! - [`WarningSink`] / [`TracingSink`] - Delivery of non-fatal warnings
//!
//! ## Configuration
//!
//! - [`DesignConfig`] / [`ValidationPolicy`] - Explicit argument validation
//!   policy, loadable from TOML
//!
//! # Example
//!
//! ```rust
//! use resona_core::{BiquadDesign, Effect, FilterType, SampleRateHub};
//!
//! let hub = SampleRateHub::new(48000.0);
//! let mut filter = BiquadDesign::new(&hub);
//! filter.set_filter_type(FilterType::LowPass, 1000.0, 0.707).unwrap();
//!
//! let mut block = [1.0_f64; 64];
//! filter.process_block_inplace(&mut block);
//! assert!(block.iter().all(|s| s.is_finite()));
//! ```
//!
//! # Design Principles
//!
//! - **Explicit validation**: argument checks are a runtime policy, not a
//!   build flag
//! - **Non-fatal**: rejected arguments warn and leave coefficients untouched
//! - **No hidden recomputation**: a sample-rate change only warns

pub mod biquad;
pub mod coefficients;
pub mod config;
pub mod effect;
pub mod error;
pub mod history;
pub mod math;
pub mod sample_rate;
pub mod warning;

// Re-export main types at crate root
pub use biquad::{BiquadDesign, FilterType};
pub use coefficients::Coefficients;
pub use config::{DesignConfig, ValidationPolicy};
pub use effect::Effect;
pub use error::{ConfigError, DesignError};
pub use history::{DirectFormI, FilterHistory};
pub use math::{angular_frequency, flush_denormal, linear_to_db};
pub use sample_rate::{
    AlertRegistration, DEFAULT_SAMPLE_RATE, SampleRateHub, SampleRateListener,
};
pub use warning::{DesignWarning, TracingSink, WarningSink};
