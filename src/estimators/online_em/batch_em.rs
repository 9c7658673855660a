use tracing::{debug, warn};

use crate::config::ConfigError;
use crate::core::mixture::MixtureState;
use crate::estimators::online_em::MOMENT_FLOOR;
use crate::estimators::online_em::moment_accumulator::MomentAccumulator;
use crate::estimators::{
    Degeneracy, DegeneracyPolicy, MIN_STD_DEV, MStepSummary, MixtureEstimator, UpdateOutcome,
};
use crate::utils::math::logsumexp;

/// Online EM over consecutive windows of the stream.
///
/// Each sample runs an E-step against the current parameters and adds its
/// responsibility-weighted moments to the accumulator. Every `batch_length`
/// samples an M-step re-estimates weights, means and standard deviations from
/// those moments and the accumulator starts over. Unlike batch EM, each
/// iteration sees a fresh window of samples instead of revisiting the same
/// data set.
#[derive(Clone, Debug)]
pub struct BatchEmEstimator {
    mixture: MixtureState,
    accumulator: MomentAccumulator,
    responsibilities: Vec<f64>,
    batch_length: usize,
    policy: DegeneracyPolicy,
    updates: u64,
}

impl BatchEmEstimator {
    pub fn new(components: usize, batch_length: usize) -> Result<Self, ConfigError> {
        Self::with_policy(components, batch_length, DegeneracyPolicy::default())
    }

    pub fn with_policy(
        components: usize,
        batch_length: usize,
        policy: DegeneracyPolicy,
    ) -> Result<Self, ConfigError> {
        Self::from_mixture(MixtureState::new(components)?, batch_length, policy)
    }

    /// Starts from existing parameters instead of the default layout.
    ///
    /// Under [`DegeneracyPolicy::Guard`] scales below [`MIN_STD_DEV`] are
    /// raised to it.
    pub fn from_mixture(
        mut mixture: MixtureState,
        batch_length: usize,
        policy: DegeneracyPolicy,
    ) -> Result<Self, ConfigError> {
        if batch_length == 0 {
            return Err(ConfigError::InvalidParameter(
                "batch length must be > 0".into(),
            ));
        }
        if policy == DegeneracyPolicy::Guard {
            for s in &mut mixture.std_devs {
                if *s < MIN_STD_DEV {
                    *s = MIN_STD_DEV;
                }
            }
        }
        let k = mixture.component_count();
        Ok(Self {
            mixture,
            accumulator: MomentAccumulator::new(k),
            responsibilities: vec![0.0; k],
            batch_length,
            policy,
            updates: 0,
        })
    }

    pub fn policy(&self) -> DegeneracyPolicy {
        self.policy
    }

    pub(crate) fn mixture_mut(&mut self) -> &mut MixtureState {
        &mut self.mixture
    }

    /// Linear-space posteriors. Returns the degeneracy, if any, that leaked
    /// into the responsibilities.
    fn direct_responsibilities(&mut self, x: f64) -> Option<Degeneracy> {
        let mut total = 0.0;
        for (r, c) in self
            .responsibilities
            .iter_mut()
            .zip(self.mixture.components())
        {
            *r = c.weighted_density(x);
            total += *r;
        }
        for r in &mut self.responsibilities {
            *r /= total;
        }

        if !x.is_finite() {
            Some(Degeneracy::NonFiniteObservation)
        } else if !(total > 0.0 && total.is_finite()) {
            Some(Degeneracy::ZeroDensity)
        } else {
            None
        }
    }

    /// Log-space posteriors; leaves the buffer untouched on failure.
    fn log_space_responsibilities(&mut self, x: f64) -> Result<(), Degeneracy> {
        if !x.is_finite() {
            return Err(Degeneracy::NonFiniteObservation);
        }
        for (r, c) in self
            .responsibilities
            .iter_mut()
            .zip(self.mixture.components())
        {
            *r = c.ln_weighted_density(x);
        }
        let normaliser = logsumexp(&self.responsibilities);
        if !normaliser.is_finite() {
            return Err(Degeneracy::ZeroDensity);
        }
        for r in &mut self.responsibilities {
            *r = (*r - normaliser).exp();
        }
        Ok(())
    }

    fn m_step(&mut self) -> MStepSummary {
        let guard = self.policy == DegeneracyPolicy::Guard;
        let n = self.batch_length as f64;
        let mut summary = MStepSummary::default();

        let zeroth = self.accumulator.zeroth();
        let first = self.accumulator.first();
        let second = self.accumulator.second();

        for i in 0..self.mixture.component_count() {
            let mean = first[i] / zeroth[i];
            let mut variance = second[i] / zeroth[i] - mean * mean;
            if variance < 0.0 {
                summary.negative_variances += 1;
                if guard {
                    variance = 0.0;
                }
            }
            let mut std_dev = variance.sqrt();
            if guard && std_dev < MIN_STD_DEV {
                std_dev = MIN_STD_DEV;
            }
            let mut weight = zeroth[i] / n;
            if weight < MOMENT_FLOOR {
                weight = 0.0;
            }

            if !(mean.is_finite() && std_dev.is_finite() && weight.is_finite()) {
                summary.non_finite_components += 1;
            }
            self.mixture.means[i] = mean;
            self.mixture.std_devs[i] = std_dev;
            self.mixture.weights[i] = weight;
        }

        self.accumulator.reset();
        self.updates += 1;
        summary.active_components = self.mixture.active_components();

        debug!(update = self.updates, mixture = %self.mixture, "M-step");
        if summary.non_finite_components > 0 {
            warn!(
                update = self.updates,
                components = summary.non_finite_components,
                "M-step left non-finite parameters"
            );
        }
        summary
    }
}

impl MixtureEstimator for BatchEmEstimator {
    fn observe(&mut self, x: f64) -> UpdateOutcome {
        let leaked = match self.policy {
            DegeneracyPolicy::Propagate => self.direct_responsibilities(x),
            DegeneracyPolicy::Guard => {
                if let Err(reason) = self.log_space_responsibilities(x) {
                    warn!(x, %reason, "sample rejected");
                    return UpdateOutcome::Rejected(reason);
                }
                None
            }
        };
        if let Some(reason) = leaked {
            warn!(x, %reason, "sample poisoned the accumulated moments");
        }

        self.accumulator.accumulate(&self.responsibilities, x);

        if self.accumulator.samples() == self.batch_length {
            return UpdateOutcome::Updated(self.m_step());
        }
        match leaked {
            Some(reason) => UpdateOutcome::Degenerate(reason),
            None => UpdateOutcome::Accumulated,
        }
    }

    fn mixture(&self) -> &MixtureState {
        &self.mixture
    }

    fn set_component_count(&mut self, k: usize) -> Result<(), ConfigError> {
        self.mixture.initialize(k)?;
        self.accumulator = MomentAccumulator::new(k);
        self.responsibilities = vec![0.0; k];
        Ok(())
    }

    fn batch_length(&self) -> usize {
        self.batch_length
    }

    fn pending_samples(&self) -> usize {
        self.accumulator.samples()
    }

    fn updates_performed(&self) -> u64 {
        self.updates
    }
}
