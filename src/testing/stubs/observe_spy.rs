use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::ConfigError;
use crate::core::mixture::MixtureState;
use crate::estimators::{BatchEmEstimator, MixtureEstimator, UpdateOutcome};

/// Counts `observe` calls while delegating to a real estimator.
pub struct ObserveSpy {
    inner: BatchEmEstimator,
    calls: Arc<AtomicUsize>,
}

#[derive(Clone)]
pub struct ObserveSpyHandle(Arc<AtomicUsize>);

impl ObserveSpyHandle {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl ObserveSpy {
    pub fn new(inner: BatchEmEstimator) -> (Self, ObserveSpyHandle) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner,
                calls: Arc::clone(&calls),
            },
            ObserveSpyHandle(calls),
        )
    }
}

impl MixtureEstimator for ObserveSpy {
    fn observe(&mut self, x: f64) -> UpdateOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.observe(x)
    }

    fn mixture(&self) -> &MixtureState {
        self.inner.mixture()
    }

    fn set_component_count(&mut self, k: usize) -> Result<(), ConfigError> {
        self.inner.set_component_count(k)
    }

    fn batch_length(&self) -> usize {
        self.inner.batch_length()
    }

    fn pending_samples(&self) -> usize {
        self.inner.pending_samples()
    }

    fn updates_performed(&self) -> u64 {
        self.inner.updates_performed()
    }
}
