//! Two-pole, two-zero coefficient designer.
//!
//! [`BiquadDesign`] owns the five coefficients of a second-order section and
//! derives them from high-level parameters:
//!
//! - [`set_resonance`](BiquadDesign::set_resonance) places a conjugate pole
//!   pair, optionally with zeros at ±1 scaled for roughly unity peak gain;
//! - [`set_notch`](BiquadDesign::set_notch) places a conjugate zero pair with
//!   no gain normalization;
//! - [`set_filter_type`](BiquadDesign::set_filter_type) runs a
//!   bilinear-transform design for five canonical responses;
//! - [`set_equal_gain_zeroes`](BiquadDesign::set_equal_gain_zeroes) fixes the
//!   zeros at ±1;
//! - [`set_coefficients`](BiquadDesign::set_coefficients) assigns raw values.
//!
//! Frequencies are in Hz and converted with the rate of the shared
//! [`SampleRateHub`]. The designer registers with the hub on construction and
//! warns (through its [`WarningSink`]) when the rate changes, since nothing
//! is recomputed automatically.
//!
//! # Example
//!
//! ```rust
//! use resona_core::{BiquadDesign, Effect, SampleRateHub};
//!
//! let hub = SampleRateHub::new(44100.0);
//! let mut filter = BiquadDesign::new(&hub);
//!
//! filter.set_resonance(1000.0, 0.9, true).unwrap();
//! let c = filter.coefficients();
//! assert!((c.a2 - 0.81).abs() < 1e-12);
//! assert!((c.b0 - 0.095).abs() < 1e-12);
//!
//! let y = filter.process(1.0);
//! assert!((y - 0.095).abs() < 1e-12);
//! ```

use core::f64::consts::{PI, TAU};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use libm::{atan2, cos, fmod, tan};

use crate::coefficients::Coefficients;
use crate::config::{DesignConfig, ValidationPolicy};
use crate::effect::Effect;
use crate::error::DesignError;
use crate::history::{DirectFormI, FilterHistory};
use crate::math::angular_frequency;
use crate::sample_rate::{AlertRegistration, SampleRateHub, SampleRateListener};
use crate::warning::{DesignWarning, TracingSink, WarningSink};

/// Canonical responses produced by [`BiquadDesign::set_filter_type`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterType {
    /// Second-order low-pass, unity gain at DC.
    LowPass,
    /// Second-order high-pass, unity gain at Nyquist.
    HighPass,
    /// Band-pass with zeros at DC and Nyquist.
    BandPass,
    /// Band-reject (notch-shaped).
    BandReject,
    /// All-pass: unit magnitude, frequency-dependent phase.
    AllPass,
}

impl FilterType {
    /// All types in index order.
    pub const ALL: [FilterType; 5] = [
        FilterType::LowPass,
        FilterType::HighPass,
        FilterType::BandPass,
        FilterType::BandReject,
        FilterType::AllPass,
    ];

    /// Look up a type by its stable index (0 = `LowPass` … 4 = `AllPass`).
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Stable index of this type.
    pub fn index(self) -> u32 {
        match self {
            FilterType::LowPass => 0,
            FilterType::HighPass => 1,
            FilterType::BandPass => 2,
            FilterType::BandReject => 3,
            FilterType::AllPass => 4,
        }
    }
}

/// Listener registered with the hub on behalf of a designer.
struct StaleCoefficientAlert {
    ignore: AtomicBool,
    sink: Arc<dyn WarningSink>,
}

impl SampleRateListener for StaleCoefficientAlert {
    fn sample_rate_changed(&self, new_rate: f64, old_rate: f64) {
        if !self.ignore.load(Ordering::Relaxed) {
            self.sink.emit(&DesignWarning::StaleCoefficients { new_rate, old_rate });
        }
    }
}

/// Second-order section with coefficient design operations.
///
/// Implements
///
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
///
/// with `a0 = 1`. Coefficients start as pass-through. The sample history
/// lives in `H`; the designer only asks it to reset.
///
/// Every design operation either writes its coefficients or, when it
/// rejects its arguments, emits exactly one warning and leaves all five
/// coefficients bit-identical.
pub struct BiquadDesign<H: FilterHistory = DirectFormI> {
    coefficients: Coefficients,
    history: H,
    gain: f64,
    last_out: f64,
    validation: ValidationPolicy,
    hub: Arc<SampleRateHub>,
    sink: Arc<dyn WarningSink>,
    alert: Arc<StaleCoefficientAlert>,
    _registration: AlertRegistration,
}

impl BiquadDesign<DirectFormI> {
    /// Creates a pass-through section with Direct Form I history, strict
    /// validation, and warnings routed to `tracing`.
    pub fn new(hub: &Arc<SampleRateHub>) -> Self {
        Self::with_config(hub, DesignConfig::default())
    }

    /// Creates a pass-through section with the given configuration.
    pub fn with_config(hub: &Arc<SampleRateHub>, config: DesignConfig) -> Self {
        Self::from_parts(hub, DirectFormI::new(), Arc::new(TracingSink), config)
    }
}

impl<H: FilterHistory> BiquadDesign<H> {
    /// Creates a pass-through section from explicit collaborators.
    pub fn from_parts(
        hub: &Arc<SampleRateHub>,
        history: H,
        sink: Arc<dyn WarningSink>,
        config: DesignConfig,
    ) -> Self {
        let alert = Arc::new(StaleCoefficientAlert {
            ignore: AtomicBool::new(config.ignore_sample_rate_change),
            sink: Arc::clone(&sink),
        });
        let registration = hub.register(alert.clone());

        Self {
            coefficients: Coefficients::IDENTITY,
            history,
            gain: 1.0,
            last_out: 0.0,
            validation: config.validation,
            hub: Arc::clone(hub),
            sink,
            alert,
            _registration: registration,
        }
    }

    /// Current coefficients.
    #[inline]
    pub fn coefficients(&self) -> Coefficients {
        self.coefficients
    }

    /// The history collaborator.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Current sample rate of the shared hub, in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.hub.sample_rate()
    }

    /// Active validation policy.
    pub fn validation(&self) -> ValidationPolicy {
        self.validation
    }

    /// Change the validation policy.
    pub fn set_validation(&mut self, validation: ValidationPolicy) {
        self.validation = validation;
    }

    /// Suppress (or restore) the stale-coefficient warning on rate changes.
    pub fn ignore_sample_rate_change(&self, ignore: bool) {
        self.alert.ignore.store(ignore, Ordering::Relaxed);
    }

    /// Input gain applied before the difference equation.
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Set the input gain. Default 1.0.
    pub fn set_gain(&mut self, gain: f64) {
        self.gain = gain;
    }

    /// Most recent output sample.
    pub fn last_out(&self) -> f64 {
        self.last_out
    }

    /// Zero the history and the last output.
    pub fn clear(&mut self) {
        self.history.reset();
        self.last_out = 0.0;
    }

    /// Assign all five coefficients directly. No validation.
    ///
    /// When `clear_state` is true the history is reset once, so stale
    /// samples are not run through the new coefficients.
    pub fn set_coefficients(
        &mut self,
        b0: f64,
        b1: f64,
        b2: f64,
        a1: f64,
        a2: f64,
        clear_state: bool,
    ) {
        self.commit("set_coefficients", Coefficients::new(b0, b1, b2, a1, a2));
        if clear_state {
            self.clear();
        }
    }

    /// Place a conjugate pole pair at `radius` and the angle of `frequency`.
    ///
    /// ```text
    /// a2 = radius^2
    /// a1 = -2 * radius * cos(2π * frequency / sampleRate)
    /// ```
    ///
    /// With `normalize`, zeros go to ±1 and are scaled so the peak gain is
    /// close to unity: `b0 = 0.5 - 0.5*a2`, `b1 = 0`, `b2 = -b0`. Without
    /// it the feedforward coefficients are left as they are.
    ///
    /// Under [`ValidationPolicy::Strict`], `frequency` must lie in
    /// `[0, Nyquist]` and `radius` in `[0, 1)`.
    pub fn set_resonance(
        &mut self,
        frequency: f64,
        radius: f64,
        normalize: bool,
    ) -> Result<(), DesignError> {
        const OP: &str = "set_resonance";
        if self.validation.is_strict() {
            self.check_frequency(OP, frequency)?;
            if !(0.0..1.0).contains(&radius) {
                return self.reject(DesignError::RadiusOutOfRange {
                    operation: OP,
                    radius,
                });
            }
        }

        let mut c = self.coefficients;
        c.a2 = radius * radius;
        c.a1 = -2.0 * radius * cos(angular_frequency(frequency, self.sample_rate()));

        if normalize {
            c.b0 = 0.5 - 0.5 * c.a2;
            c.b1 = 0.0;
            c.b2 = -c.b0;
        }

        self.commit(OP, c);
        Ok(())
    }

    /// Place a conjugate zero pair at `radius` and the angle of `frequency`.
    ///
    /// ```text
    /// b2 = radius^2
    /// b1 = -2 * radius * cos(2π * frequency / sampleRate)
    /// ```
    ///
    /// `b0`, `a1` and `a2` are untouched and the gain is not normalized.
    /// Zeros may sit outside the unit circle, so the radius has no upper
    /// bound. Under [`ValidationPolicy::Strict`], `frequency` must lie in
    /// `[0, Nyquist]` and `radius` must not be negative.
    pub fn set_notch(&mut self, frequency: f64, radius: f64) -> Result<(), DesignError> {
        const OP: &str = "set_notch";
        if self.validation.is_strict() {
            self.check_frequency(OP, frequency)?;
            if radius < 0.0 {
                return self.reject(DesignError::NegativeRadius {
                    operation: OP,
                    radius,
                });
            }
        }

        let mut c = self.coefficients;
        c.b2 = radius * radius;
        c.b1 = -2.0 * radius * cos(angular_frequency(frequency, self.sample_rate()));

        self.commit(OP, c);
        Ok(())
    }

    /// Bilinear-transform design of a canonical response.
    ///
    /// ```text
    /// K     = tan(π * frequency / sampleRate)
    /// denom = 1 / (K²Q + K + Q)
    /// a1    = 2Q(K² - 1) * denom
    /// a2    = (K²Q - K + Q) * denom
    /// ```
    ///
    /// The numerator depends on `kind`; see [`FilterType`]. Under
    /// [`ValidationPolicy::Strict`], `frequency` and `q` must not be
    /// negative. `q = 0` is not guarded: `denom` becomes infinite and the
    /// coefficients non-finite.
    pub fn set_filter_type(
        &mut self,
        kind: FilterType,
        frequency: f64,
        q: f64,
    ) -> Result<(), DesignError> {
        const OP: &str = "set_filter_type";
        if self.validation.is_strict() {
            if frequency < 0.0 {
                return self.reject(DesignError::NegativeFrequency {
                    operation: OP,
                    frequency,
                });
            }
            if q < 0.0 {
                return self.reject(DesignError::NegativeQ { operation: OP, q });
            }
        }

        let k = tan(PI * frequency / self.sample_rate());
        let k_sqr = k * k;
        let denom = 1.0 / (k_sqr * q + k + q);

        let a1 = 2.0 * q * (k_sqr - 1.0) * denom;
        let a2 = (k_sqr * q - k + q) * denom;

        let (b0, b1, b2) = match kind {
            FilterType::LowPass => {
                let b0 = k_sqr * q * denom;
                (b0, 2.0 * b0, b0)
            }
            FilterType::HighPass => {
                let b0 = q * denom;
                (b0, -2.0 * b0, b0)
            }
            FilterType::BandPass => {
                let b0 = k * denom;
                (b0, 0.0, -b0)
            }
            FilterType::BandReject => {
                let b0 = q * (k_sqr + 1.0) * denom;
                (b0, 2.0 * q * (k_sqr - 1.0) * denom, b0)
            }
            FilterType::AllPass => (a2, a1, 1.0),
        };

        self.commit(OP, Coefficients::new(b0, b1, b2, a1, a2));
        Ok(())
    }

    /// [`set_filter_type`](Self::set_filter_type) with the type given as a
    /// raw index, as it arrives from host parameters or config files.
    ///
    /// An index with no matching [`FilterType`] is always rejected with a
    /// warning, whatever the validation policy.
    pub fn set_filter_type_index(
        &mut self,
        index: u32,
        frequency: f64,
        q: f64,
    ) -> Result<(), DesignError> {
        match FilterType::from_index(index) {
            Some(kind) => self.set_filter_type(kind, frequency, q),
            None => self.reject(DesignError::UnknownFilterType(index)),
        }
    }

    /// Zeros at ±1: `b0 = 1`, `b1 = 0`, `b2 = -1`. Poles untouched.
    pub fn set_equal_gain_zeroes(&mut self) {
        let mut c = self.coefficients;
        c.b0 = 1.0;
        c.b1 = 0.0;
        c.b2 = -1.0;
        self.commit("set_equal_gain_zeroes", c);
    }

    /// Phase delay in samples at `frequency`, for the live coefficients
    /// and gain.
    ///
    /// `frequency` must lie in `(0, Nyquist]`; anything else is rejected
    /// with a warning regardless of the validation policy.
    pub fn phase_delay(&self, frequency: f64) -> Result<f64, DesignError> {
        let nyquist = self.hub.nyquist();
        if !(frequency > 0.0 && frequency <= nyquist) {
            return self.reject(DesignError::FrequencyOutOfRange {
                operation: "phase_delay",
                frequency,
                min: 0.0,
                max: nyquist,
            });
        }

        let omega = angular_frequency(frequency, self.sample_rate());
        let (br, bi) = self.coefficients.numerator_response(omega);
        let (ar, ai) = self.coefficients.denominator_response(omega);
        let phase = atan2(self.gain * bi, self.gain * br) - atan2(ai, ar);

        Ok(fmod(-phase, TAU) / omega)
    }

    fn check_frequency(&self, operation: &'static str, frequency: f64) -> Result<(), DesignError> {
        let nyquist = self.hub.nyquist();
        if (0.0..=nyquist).contains(&frequency) {
            Ok(())
        } else {
            self.reject(DesignError::FrequencyOutOfRange {
                operation,
                frequency,
                min: 0.0,
                max: nyquist,
            })
        }
    }

    fn reject<T>(&self, err: DesignError) -> Result<T, DesignError> {
        self.sink.emit(&DesignWarning::InvalidParameter(err.clone()));
        Err(err)
    }

    fn commit(&mut self, operation: &'static str, coefficients: Coefficients) {
        tracing::trace!(
            "{operation}: b=[{}, {}, {}] a=[1, {}, {}]",
            coefficients.b0,
            coefficients.b1,
            coefficients.b2,
            coefficients.a1,
            coefficients.a2
        );
        self.coefficients = coefficients;
    }
}

impl<H: FilterHistory> Effect for BiquadDesign<H> {
    #[inline]
    fn process(&mut self, input: f64) -> f64 {
        self.last_out = self.history.process(&self.coefficients, self.gain * input);
        self.last_out
    }

    fn reset(&mut self) {
        self.clear();
    }
}

impl<H: FilterHistory> core::fmt::Debug for BiquadDesign<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BiquadDesign")
            .field("coefficients", &self.coefficients)
            .field("gain", &self.gain)
            .field("validation", &self.validation)
            .field("sample_rate", &self.hub.sample_rate())
            .finish_non_exhaustive()
    }
}
