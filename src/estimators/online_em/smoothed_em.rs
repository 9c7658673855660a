use tracing::debug;

use crate::config::ConfigError;
use crate::core::mixture::{MixtureState, spread_means};
use crate::estimators::online_em::BatchEmEstimator;
use crate::estimators::{
    DegeneracyPolicy, MIN_STD_DEV, MStepSummary, MixtureEstimator, UpdateOutcome,
};

/// [`BatchEmEstimator`] whose M-step results are exponentially smoothed.
///
/// After every completed batch each parameter becomes
/// `(1 - alpha) * previous + alpha * estimate`, and the blended value is both
/// fed back as the live parameter and remembered as the next `previous`.
/// Samples that do not complete a batch behave exactly as in the wrapped
/// estimator.
#[derive(Clone, Debug)]
pub struct SmoothedEmEstimator {
    inner: BatchEmEstimator,
    alpha: f64,
    previous: MixtureState,
}

impl SmoothedEmEstimator {
    pub fn new(components: usize, batch_length: usize, alpha: f64) -> Result<Self, ConfigError> {
        Self::with_policy(components, batch_length, alpha, DegeneracyPolicy::default())
    }

    pub fn with_policy(
        components: usize,
        batch_length: usize,
        alpha: f64,
        policy: DegeneracyPolicy,
    ) -> Result<Self, ConfigError> {
        validate_alpha(alpha)?;
        let inner = BatchEmEstimator::with_policy(components, batch_length, policy)?;
        Ok(Self {
            inner,
            alpha,
            previous: initial_previous(components),
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn policy(&self) -> DegeneracyPolicy {
        self.inner.policy()
    }

    /// Last smoothed parameters (the blend target of the next M-step).
    pub fn previous(&self) -> &MixtureState {
        &self.previous
    }

    fn blend(&mut self) {
        let alpha = self.alpha;
        let guard = self.inner.policy() == DegeneracyPolicy::Guard;
        let live = self.inner.mixture_mut();
        let previous = &mut self.previous;

        let pairs = [
            (&mut live.weights, &mut previous.weights),
            (&mut live.means, &mut previous.means),
            (&mut live.std_devs, &mut previous.std_devs),
        ];
        for (current, prev) in pairs {
            for (c, p) in current.iter_mut().zip(prev.iter_mut()) {
                *c = (1.0 - alpha) * *p + alpha * *c;
                *p = *c;
            }
        }
        if guard {
            for (c, p) in live.std_devs.iter_mut().zip(previous.std_devs.iter_mut()) {
                if *c < MIN_STD_DEV {
                    *c = MIN_STD_DEV;
                    *p = MIN_STD_DEV;
                }
            }
        }
        debug!(alpha, mixture = %live, "smoothed");
    }
}

/// Zero weights and scales, means at the default spread.
fn initial_previous(k: usize) -> MixtureState {
    MixtureState {
        weights: vec![0.0; k],
        means: spread_means(k),
        std_devs: vec![0.0; k],
    }
}

fn validate_alpha(alpha: f64) -> Result<(), ConfigError> {
    if alpha > 0.0 && alpha <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: "alpha",
            value: alpha.to_string(),
        })
    }
}

impl MixtureEstimator for SmoothedEmEstimator {
    fn observe(&mut self, x: f64) -> UpdateOutcome {
        match self.inner.observe(x) {
            UpdateOutcome::Updated(summary) => {
                self.blend();
                let mixture = self.inner.mixture();
                let non_finite_components = mixture
                    .components()
                    .filter(|c| {
                        !(c.weight.is_finite() && c.mean.is_finite() && c.std_dev.is_finite())
                    })
                    .count();
                UpdateOutcome::Updated(MStepSummary {
                    active_components: mixture.active_components(),
                    non_finite_components,
                    ..summary
                })
            }
            other => other,
        }
    }

    fn mixture(&self) -> &MixtureState {
        self.inner.mixture()
    }

    fn set_component_count(&mut self, k: usize) -> Result<(), ConfigError> {
        self.inner.set_component_count(k)?;
        self.previous = initial_previous(k);
        Ok(())
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
