//! Sample processing trait.
//!
//! The [`Effect`] trait is the uniform way to push audio through anything in
//! this crate that holds recursion state. It mirrors the usual plugin
//! contract: single-sample processing, block processing, and a state reset.
//!
//! - **Mono processing**: one `f64` in, one `f64` out.
//! - **Object-safe**: `dyn Effect` works for runtime dispatch.
//! - **No allocations**: every method is safe to call from an audio callback.

/// Core trait for stateful sample processors.
///
/// # Example
///
/// ```rust
/// use resona_core::Effect;
///
/// struct Gain {
///     gain: f64,
/// }
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f64) -> f64 {
///         input * self.gain
///     }
///
///     fn reset(&mut self) {
///         // Gain has no internal state to reset
///     }
/// }
///
/// let mut g = Gain { gain: 0.5 };
/// assert_eq!(g.process(1.0), 0.5);
/// ```
pub trait Effect {
    /// Process a single sample, advancing any internal state by one step.
    fn process(&mut self, input: f64) -> f64;

    /// Process a block of samples.
    ///
    /// Default implementation calls `process()` for each sample.
    ///
    /// # Panics
    /// Debug builds panic if `input.len() != output.len()`.
    fn process_block(&mut self, input: &[f64], output: &mut [f64]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in-place.
    fn process_block_inplace(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Reset internal state.
    ///
    /// Clears delay lines without changing parameters.
    fn reset(&mut self);
}
