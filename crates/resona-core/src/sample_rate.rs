//! Sample-rate provider and change broadcaster.
//!
//! A [`SampleRateHub`] holds the rate that frequency-dependent designs are
//! computed against and notifies registered [`SampleRateListener`]s,
//! synchronously, whenever it changes. Registration returns an
//! [`AlertRegistration`] guard; dropping the guard removes the listener.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use resona_core::{SampleRateHub, SampleRateListener};
//!
//! struct Counter(AtomicUsize);
//!
//! impl SampleRateListener for Counter {
//!     fn sample_rate_changed(&self, _new_rate: f64, _old_rate: f64) {
//!         self.0.fetch_add(1, Ordering::Relaxed);
//!     }
//! }
//!
//! let hub = SampleRateHub::new(44100.0);
//! let counter = Arc::new(Counter(AtomicUsize::new(0)));
//! let registration = hub.register(counter.clone());
//!
//! hub.set_sample_rate(48000.0).unwrap();
//! assert_eq!(counter.0.load(Ordering::Relaxed), 1);
//!
//! drop(registration);
//! hub.set_sample_rate(96000.0).unwrap();
//! assert_eq!(counter.0.load(Ordering::Relaxed), 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::error::DesignError;

/// Rate a hub starts at when none is given.
pub const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

/// Receiver of sample-rate change notices.
pub trait SampleRateListener: Send + Sync {
    /// Called once per change, after the new rate is already visible through
    /// [`SampleRateHub::sample_rate`].
    fn sample_rate_changed(&self, new_rate: f64, old_rate: f64);
}

struct ListenerSlot {
    id: u64,
    listener: Weak<dyn SampleRateListener>,
}

/// Shared sample rate with push notification on change.
///
/// The rate is read lock-free (stored as `f64` bits in an atomic). The
/// listener list sits behind an `RwLock`; listeners are called after the
/// lock is released, so a listener may register or drop registrations from
/// inside its callback.
pub struct SampleRateHub {
    rate_bits: AtomicU64,
    next_id: AtomicU64,
    listeners: RwLock<Vec<ListenerSlot>>,
}

impl SampleRateHub {
    /// Creates a hub at `sample_rate` Hz.
    ///
    /// Non-positive or non-finite rates fall back to [`DEFAULT_SAMPLE_RATE`].
    pub fn new(sample_rate: f64) -> Arc<Self> {
        let rate = if is_valid_rate(sample_rate) {
            sample_rate
        } else {
            tracing::warn!(
                "SampleRateHub: invalid initial rate {sample_rate}, using {DEFAULT_SAMPLE_RATE}"
            );
            DEFAULT_SAMPLE_RATE
        };
        Arc::new(Self {
            rate_bits: AtomicU64::new(rate.to_bits()),
            next_id: AtomicU64::new(0),
            listeners: RwLock::new(Vec::new()),
        })
    }

    /// Creates a hub at [`DEFAULT_SAMPLE_RATE`].
    pub fn with_default_rate() -> Arc<Self> {
        Self::new(DEFAULT_SAMPLE_RATE)
    }

    /// Current sample rate in Hz.
    #[inline]
    pub fn sample_rate(&self) -> f64 {
        f64::from_bits(self.rate_bits.load(Ordering::Acquire))
    }

    /// Half the current sample rate.
    #[inline]
    pub fn nyquist(&self) -> f64 {
        0.5 * self.sample_rate()
    }

    /// Change the rate and notify every live listener.
    ///
    /// Each listener is called exactly once with `(new_rate, old_rate)`.
    /// Setting the rate the hub already holds is a no-op. The rate must be
    /// positive and finite; otherwise nothing changes and no listener is
    /// called.
    pub fn set_sample_rate(&self, sample_rate: f64) -> Result<(), DesignError> {
        if !is_valid_rate(sample_rate) {
            return Err(DesignError::InvalidSampleRate(sample_rate));
        }

        let old_rate = f64::from_bits(self.rate_bits.swap(sample_rate.to_bits(), Ordering::AcqRel));
        if old_rate == sample_rate {
            return Ok(());
        }
        tracing::debug!("sample_rate: {old_rate} -> {sample_rate}");

        let live: Vec<Arc<dyn SampleRateListener>> = {
            let mut listeners = self.listeners.write();
            listeners.retain(|slot| slot.listener.strong_count() > 0);
            listeners
                .iter()
                .filter_map(|slot| slot.listener.upgrade())
                .collect()
        };

        for listener in live {
            listener.sample_rate_changed(sample_rate, old_rate);
        }
        Ok(())
    }

    /// Register a listener for rate changes.
    ///
    /// The hub keeps only a weak reference. The listener stays registered
    /// until the returned guard is dropped.
    #[must_use = "dropping the registration immediately unregisters the listener"]
    pub fn register(self: &Arc<Self>, listener: Arc<dyn SampleRateListener>) -> AlertRegistration {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.write().push(ListenerSlot {
            id,
            listener: Arc::downgrade(&listener),
        });
        tracing::debug!("sample_rate: registered listener {id}");

        AlertRegistration {
            hub: Arc::downgrade(self),
            id,
        }
    }

    /// Number of registered listeners that are still alive.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .iter()
            .filter(|slot| slot.listener.strong_count() > 0)
            .count()
    }

    fn unregister(&self, id: u64) {
        self.listeners.write().retain(|slot| slot.id != id);
        tracing::debug!("sample_rate: removed listener {id}");
    }
}

impl core::fmt::Debug for SampleRateHub {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SampleRateHub")
            .field("sample_rate", &self.sample_rate())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Scoped listener registration. Unregisters on drop.
#[derive(Debug)]
pub struct AlertRegistration {
    hub: Weak<SampleRateHub>,
    id: u64,
}

impl Drop for AlertRegistration {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.unregister(self.id);
        }
    }
}

fn is_valid_rate(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<(f64, f64)>>);

    impl SampleRateListener for Recorder {
        fn sample_rate_changed(&self, new_rate: f64, old_rate: f64) {
            self.0.lock().push((new_rate, old_rate));
        }
    }

    #[test]
    fn test_default_rate() {
        assert_eq!(SampleRateHub::with_default_rate().sample_rate(), DEFAULT_SAMPLE_RATE);
        assert_eq!(SampleRateHub::new(-1.0).sample_rate(), DEFAULT_SAMPLE_RATE);
        assert_eq!(SampleRateHub::new(f64::NAN).sample_rate(), DEFAULT_SAMPLE_RATE);
    }

    #[test]
    fn test_set_sample_rate_notifies_with_old_rate() {
        let hub = SampleRateHub::new(44100.0);
        let recorder = Arc::new(Recorder::default());
        let _registration = hub.register(recorder.clone());

        hub.set_sample_rate(48000.0).unwrap();
        hub.set_sample_rate(96000.0).unwrap();

        assert_eq!(hub.sample_rate(), 96000.0);
        assert_eq!(hub.nyquist(), 48000.0);
        assert_eq!(
            *recorder.0.lock(),
            vec![(48000.0, 44100.0), (96000.0, 48000.0)]
        );
    }

    #[test]
    fn test_unchanged_rate_notifies_nobody() {
        let hub = SampleRateHub::new(44100.0);
        let recorder = Arc::new(Recorder::default());
        let _registration = hub.register(recorder.clone());

        hub.set_sample_rate(44100.0).unwrap();
        assert!(recorder.0.lock().is_empty());

        hub.set_sample_rate(48000.0).unwrap();
        hub.set_sample_rate(48000.0).unwrap();
        assert_eq!(*recorder.0.lock(), vec![(48000.0, 44100.0)]);
        assert_eq!(hub.sample_rate(), 48000.0);
    }

    #[test]
    fn test_with_default_rate_accepts_listeners() {
        let hub = SampleRateHub::with_default_rate();
        let recorder = Arc::new(Recorder::default());
        let _registration = hub.register(recorder.clone());

        hub.set_sample_rate(96000.0).unwrap();
        assert_eq!(*recorder.0.lock(), vec![(96000.0, DEFAULT_SAMPLE_RATE)]);
    }

    #[test]
    fn test_invalid_rate_is_rejected_silently() {
        let hub = SampleRateHub::new(44100.0);
        let recorder = Arc::new(Recorder::default());
        let _registration = hub.register(recorder.clone());

        assert_eq!(
            hub.set_sample_rate(0.0),
            Err(DesignError::InvalidSampleRate(0.0))
        );
        assert!(hub.set_sample_rate(f64::INFINITY).is_err());
        assert_eq!(hub.sample_rate(), 44100.0);
        assert!(recorder.0.lock().is_empty());
    }

    #[test]
    fn test_registration_drop_unregisters() {
        let hub = SampleRateHub::new(44100.0);
        let recorder = Arc::new(Recorder::default());

        let registration = hub.register(recorder.clone());
        assert_eq!(hub.listener_count(), 1);

        drop(registration);
        assert_eq!(hub.listener_count(), 0);

        hub.set_sample_rate(48000.0).unwrap();
        assert!(recorder.0.lock().is_empty());
    }

    #[test]
    fn test_dead_listener_is_skipped() {
        let hub = SampleRateHub::new(44100.0);
        let recorder = Arc::new(Recorder::default());
        let _registration = hub.register(recorder.clone());

        drop(recorder);
        assert_eq!(hub.listener_count(), 0);
        hub.set_sample_rate(48000.0).unwrap();
    }

    #[test]
    fn test_registration_outliving_hub() {
        let hub = SampleRateHub::new(44100.0);
        let recorder = Arc::new(Recorder::default());
        let registration = hub.register(recorder);
        drop(hub);
        drop(registration);
    }
}
