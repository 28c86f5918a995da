//! Second-order section coefficients.
//!
//! A [`Coefficients`] value describes the difference equation
//!
//! ```text
//! y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
//!                - a1*y[n-1] - a2*y[n-2]
//! ```
//!
//! with the leading denominator coefficient `a0` fixed at 1. The helpers
//! here evaluate the transfer function on the unit circle so callers can
//! inspect the response a design produces without running audio through it.

use libm::{atan2, cos, sin, sqrt};

use crate::math::linear_to_db;

/// The five live coefficients of a two-pole, two-zero section.
///
/// `a0` is implicit and always exactly 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Feedforward coefficient for `x[n]`
    pub b0: f64,
    /// Feedforward coefficient for `x[n-1]`
    pub b1: f64,
    /// Feedforward coefficient for `x[n-2]`
    pub b2: f64,
    /// Feedback coefficient for `y[n-1]`
    pub a1: f64,
    /// Feedback coefficient for `y[n-2]`
    pub a2: f64,
}

impl Coefficients {
    /// Pass-through section: `y[n] = x[n]`.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Creates coefficients from raw values (`a0` is implicitly 1).
    pub const fn new(b0: f64, b1: f64, b2: f64, a1: f64, a2: f64) -> Self {
        Self { b0, b1, b2, a1, a2 }
    }

    /// Numerator polynomial `B(z)` evaluated at `z = e^{jω}`.
    ///
    /// Returns `(real, imaginary)`.
    pub fn numerator_response(&self, omega: f64) -> (f64, f64) {
        eval_quadratic(self.b0, self.b1, self.b2, omega)
    }

    /// Denominator polynomial `A(z)` evaluated at `z = e^{jω}`.
    ///
    /// Returns `(real, imaginary)`.
    pub fn denominator_response(&self, omega: f64) -> (f64, f64) {
        eval_quadratic(1.0, self.a1, self.a2, omega)
    }

    /// Complex frequency response `H(e^{jω}) = B / A`.
    ///
    /// `omega` is the normalized angular frequency in radians per sample
    /// (`π` is Nyquist). Returns `(real, imaginary)`. A zero denominator
    /// yields non-finite components.
    pub fn response(&self, omega: f64) -> (f64, f64) {
        let (br, bi) = self.numerator_response(omega);
        let (ar, ai) = self.denominator_response(omega);
        let norm = ar * ar + ai * ai;
        ((br * ar + bi * ai) / norm, (bi * ar - br * ai) / norm)
    }

    /// Magnitude of the frequency response at `omega`.
    pub fn magnitude(&self, omega: f64) -> f64 {
        let (re, im) = self.response(omega);
        sqrt(re * re + im * im)
    }

    /// Magnitude of the frequency response at `omega`, in dB.
    pub fn magnitude_db(&self, omega: f64) -> f64 {
        linear_to_db(self.magnitude(omega))
    }

    /// Phase of the frequency response at `omega`, in radians.
    pub fn phase(&self, omega: f64) -> f64 {
        let (re, im) = self.response(omega);
        atan2(im, re)
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// `c0 + c1 e^{-jω} + c2 e^{-2jω}`
#[inline]
fn eval_quadratic(c0: f64, c1: f64, c2: f64, omega: f64) -> (f64, f64) {
    let re = c0 + c1 * cos(omega) + c2 * cos(2.0 * omega);
    let im = -(c1 * sin(omega) + c2 * sin(2.0 * omega));
    (re, im)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_identity_is_flat() {
        let c = Coefficients::default();
        assert_eq!(c, Coefficients::IDENTITY);
        for &omega in &[0.0, 0.3, FRAC_PI_2, 2.5, PI] {
            assert!((c.magnitude(omega) - 1.0).abs() < 1e-12);
            assert!(c.phase(omega).abs() < 1e-12);
        }
    }

    #[test]
    fn test_one_sample_delay_phase() {
        // y[n] = x[n-1]
        let c = Coefficients::new(0.0, 1.0, 0.0, 0.0, 0.0);
        let omega = 0.4;
        assert!((c.magnitude(omega) - 1.0).abs() < 1e-12);
        assert!((c.phase(omega) + omega).abs() < 1e-12);
    }

    #[test]
    fn test_dc_and_nyquist_gain() {
        // Two-point average: unity at DC, null at Nyquist.
        let c = Coefficients::new(0.5, 0.5, 0.0, 0.0, 0.0);
        assert!((c.magnitude(0.0) - 1.0).abs() < 1e-12);
        assert!(c.magnitude(PI) < 1e-12);
        assert_eq!(c.magnitude_db(PI), -200.0);
    }

    #[test]
    fn test_one_pole_feedback() {
        // y[n] = x[n] + 0.5 y[n-1]  ->  |H(1)| = 2
        let c = Coefficients::new(1.0, 0.0, 0.0, -0.5, 0.0);
        assert!((c.magnitude(0.0) - 2.0).abs() < 1e-12);
        assert!((c.magnitude(PI) - 2.0 / 3.0).abs() < 1e-12);
    }
}
