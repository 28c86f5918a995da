//! Small numeric helpers shared by the filter code.

use libm::log10;

/// Convert linear gain to decibels.
///
/// Gains at or below `1e-10` are clamped to -200 dB so a perfect null
/// reports a finite value.
///
/// # Example
///
/// ```rust
/// use resona_core::linear_to_db;
///
/// assert!((linear_to_db(1.0)).abs() < 1e-12);
/// assert!((linear_to_db(0.5) + 6.0206).abs() < 1e-3);
/// ```
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    20.0 * log10(linear.max(1e-10))
}

/// Flush denormal numbers to zero.
///
/// Recursive filters decaying toward silence can produce subnormal values
/// that are very slow on some CPUs.
#[inline]
pub fn flush_denormal(x: f64) -> f64 {
    if x.abs() < 1e-30 { 0.0 } else { x }
}

/// Normalized angular frequency (radians per sample) for `frequency` Hz.
#[inline]
pub fn angular_frequency(frequency: f64, sample_rate: f64) -> f64 {
    core::f64::consts::TAU * frequency / sample_rate
}
