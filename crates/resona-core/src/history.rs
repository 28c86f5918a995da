//! Delay-line state for running a second-order section.
//!
//! The coefficient designer never stores sample history itself. It hands its
//! live [`Coefficients`] to a [`FilterHistory`] implementation on every
//! sample and asks it to [`reset`](FilterHistory::reset) when a coefficient
//! change should not be combined with stale history.

use crate::coefficients::Coefficients;
use crate::math::flush_denormal;

/// Owner of the per-sample recursion state.
///
/// Implementations keep whatever history their structure needs and apply the
/// coefficients they are handed; they do not own the coefficients.
pub trait FilterHistory {
    /// Run one sample through the difference equation.
    fn process(&mut self, coefficients: &Coefficients, input: f64) -> f64;

    /// Zero all delay lines.
    fn reset(&mut self);
}

/// Direct Form I history: two past inputs and two past outputs.
///
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectFormI {
    /// Input delay line: x[n-1], x[n-2]
    x1: f64,
    x2: f64,

    /// Output delay line: y[n-1], y[n-2]
    y1: f64,
    y2: f64,
}

impl DirectFormI {
    /// Creates zeroed history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when every delay slot is zero.
    pub fn is_clear(&self) -> bool {
        self.x1 == 0.0 && self.x2 == 0.0 && self.y1 == 0.0 && self.y2 == 0.0
    }
}

impl FilterHistory for DirectFormI {
    #[inline]
    fn process(&mut self, c: &Coefficients, input: f64) -> f64 {
        let output = c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2
            - c.a1 * self.y1
            - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = flush_denormal(output);

        output
    }

    fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_passthrough() {
        let mut history = DirectFormI::new();
        let c = Coefficients::IDENTITY;

        for i in 0..10_i32 {
            let input = f64::from(i) * 0.1;
            let output = history.process(&c, input);
            assert!((output - input).abs() < 1e-12);
        }
    }

    #[test]
    fn test_reset_clears_delay_lines() {
        let mut history = DirectFormI::new();
        let c = Coefficients::new(0.5, 0.25, 0.125, -0.5, 0.1);

        for _ in 0..10 {
            history.process(&c, 1.0);
        }
        assert!(!history.is_clear());

        history.reset();
        assert!(history.is_clear());
    }

    #[test]
    fn test_impulse_response_matches_recursion() {
        // y[n] = x[n] - a1*y[n-1] with a1 = -0.5 gives 1, 0.5, 0.25, ...
        let mut history = DirectFormI::new();
        let c = Coefficients::new(1.0, 0.0, 0.0, -0.5, 0.0);

        let mut expected = 1.0;
        for n in 0..8 {
            let input = if n == 0 { 1.0 } else { 0.0 };
            let output = history.process(&c, input);
            assert!((output - expected).abs() < 1e-12, "n={n}: {output}");
            expected *= 0.5;
        }
    }

    #[test]
    fn test_feedforward_taps() {
        let mut history = DirectFormI::new();
        let c = Coefficients::new(1.0, 2.0, 3.0, 0.0, 0.0);

        let outputs: Vec<f64> = [1.0, 0.0, 0.0, 0.0]
            .iter()
            .map(|&x| history.process(&c, x))
            .collect();
        assert_eq!(outputs, vec![1.0, 2.0, 3.0, 0.0]);
    }
}
