//! Non-fatal warning delivery.
//!
//! Every rejected parameter and every sample-rate change that may leave
//! coefficients stale is reported through a [`WarningSink`]. The default
//! [`TracingSink`] forwards to `tracing` at `WARN` level; hosts that want to
//! surface warnings elsewhere (a UI log, a test recorder) supply their own.

use core::fmt;

use crate::error::DesignError;

/// A non-fatal condition raised by the coefficient designer.
#[derive(Debug, Clone, PartialEq)]
pub enum DesignWarning {
    /// An operation rejected its arguments and left the coefficients untouched.
    InvalidParameter(DesignError),
    /// The sample rate changed after coefficients were computed in Hz.
    StaleCoefficients {
        /// Rate now in effect.
        new_rate: f64,
        /// Rate the coefficients may have been designed for.
        old_rate: f64,
    },
}

impl fmt::Display for DesignWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignWarning::InvalidParameter(err) => write!(f, "{err}"),
            DesignWarning::StaleCoefficients { new_rate, old_rate } => write!(
                f,
                "sample rate changed from {old_rate} Hz to {new_rate} Hz: \
                 filter coefficients may need to be recomputed"
            ),
        }
    }
}

impl From<DesignError> for DesignWarning {
    fn from(err: DesignError) -> Self {
        DesignWarning::InvalidParameter(err)
    }
}

/// Receiver for [`DesignWarning`]s.
pub trait WarningSink: Send + Sync {
    /// Deliver one warning.
    fn emit(&self, warning: &DesignWarning);
}

/// Forwards warnings to `tracing::warn!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn emit(&self, warning: &DesignWarning) {
        tracing::warn!("{warning}");
    }
}
