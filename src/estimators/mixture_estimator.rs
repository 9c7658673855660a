use crate::config::ConfigError;
use crate::core::mixture::MixtureState;
use crate::estimators::UpdateOutcome;

/// Online estimator of a univariate Gaussian mixture.
///
/// Samples are pushed one at a time through [`observe`](Self::observe). Every
/// query reflects the last completed update; samples accumulated since then
/// are invisible until the batch fills.
///
/// One instance serves one stream. Mixtures trained in parallel each get
/// their own estimator.
pub trait MixtureEstimator {
    fn observe(&mut self, x: f64) -> UpdateOutcome;

    fn mixture(&self) -> &MixtureState;

    /// Re-initialises the mixture with `k` components and drops every
    /// partially accumulated statistic.
    fn set_component_count(&mut self, k: usize) -> Result<(), ConfigError>;

    /// Samples per M-step.
    fn batch_length(&self) -> usize;

    /// Samples accumulated since the last M-step.
    fn pending_samples(&self) -> usize;

    fn updates_performed(&self) -> u64;

    fn density(&self, x: f64) -> f64 {
        self.mixture().density(x)
    }

    fn log_density(&self, x: f64) -> f64 {
        self.mixture().log_density(x)
    }

    fn weights(&self) -> &[f64] {
        self.mixture().weights()
    }

    fn means(&self) -> &[f64] {
        self.mixture().means()
    }

    fn std_devs(&self) -> &[f64] {
        self.mixture().std_devs()
    }

    fn component_count(&self) -> usize {
        self.mixture().component_count()
    }
}
