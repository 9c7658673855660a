use std::fmt::{Display, Formatter};

use crate::config::ConfigError;
use crate::core::mixture::Component;
use crate::utils::math::logsumexp;

/// Scale given to every component by [`MixtureState::initialize`].
pub const DEFAULT_STD_DEV: f64 = 0.1;

/// Parameter vectors of a univariate Gaussian mixture with a fixed number of
/// components.
///
/// Scales are stored as standard deviations, not variances. The vectors are
/// only ever mutated by the estimators of this crate; callers get read-only
/// slices.
#[derive(Clone, Debug, PartialEq)]
pub struct MixtureState {
    pub(crate) weights: Vec<f64>,
    pub(crate) means: Vec<f64>,
    pub(crate) std_devs: Vec<f64>,
}

impl MixtureState {
    /// A mixture of `k` components in the default starting configuration.
    pub fn new(k: usize) -> Result<Self, ConfigError> {
        let mut state = Self {
            weights: Vec::new(),
            means: Vec::new(),
            std_devs: Vec::new(),
        };
        state.initialize(k)?;
        Ok(state)
    }

    pub fn from_parameters(
        weights: Vec<f64>,
        means: Vec<f64>,
        std_devs: Vec<f64>,
    ) -> Result<Self, ConfigError> {
        if weights.is_empty() {
            return Err(ConfigError::InvalidParameter(
                "a mixture needs at least one component".into(),
            ));
        }
        if weights.len() != means.len() || weights.len() != std_devs.len() {
            return Err(ConfigError::InvalidParameter(format!(
                "parameter vectors differ in length: weights={}, means={}, std_devs={}",
                weights.len(),
                means.len(),
                std_devs.len()
            )));
        }
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::InvalidParameter(
                "weights must be finite and >= 0".into(),
            ));
        }
        if means.iter().any(|m| !m.is_finite()) {
            return Err(ConfigError::InvalidParameter("means must be finite".into()));
        }
        if std_devs.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(ConfigError::InvalidParameter(
                "standard deviations must be finite and >= 0".into(),
            ));
        }
        Ok(Self {
            weights,
            means,
            std_devs,
        })
    }

    /// Resets to `k` components: uniform weights, means at `i - k/2`, every
    /// scale at [`DEFAULT_STD_DEV`].
    ///
    /// Destructive: previously learned parameters are discarded.
    pub fn initialize(&mut self, k: usize) -> Result<(), ConfigError> {
        if k == 0 {
            return Err(ConfigError::InvalidParameter(
                "component count must be > 0".into(),
            ));
        }
        self.weights = vec![1.0 / k as f64; k];
        self.means = spread_means(k);
        self.std_devs = vec![DEFAULT_STD_DEV; k];
        Ok(())
    }

    #[inline]
    pub fn component_count(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn std_devs(&self) -> &[f64] {
        &self.std_devs
    }

    pub fn components(&self) -> impl Iterator<Item = Component> + '_ {
        self.weights
            .iter()
            .zip(&self.means)
            .zip(&self.std_devs)
            .map(|((&weight, &mean), &std_dev)| Component {
                weight,
                mean,
                std_dev,
            })
    }

    /// Mixture density at `x`: the sum of every component's weighted density.
    pub fn density(&self, x: f64) -> f64 {
        self.components().map(|c| c.weighted_density(x)).sum()
    }

    /// `ln(density(x))`, accumulated in log space.
    pub fn log_density(&self, x: f64) -> f64 {
        let terms: Vec<f64> = self
            .components()
            .map(|c| c.ln_weighted_density(x))
            .collect();
        logsumexp(&terms)
    }

    /// Mixture CDF at `x`. Equals [`weight_sum`](Self::weight_sum) in the
    /// limit, so it only reaches 1 for normalised weights.
    pub fn cdf(&self, x: f64) -> f64 {
        self.components().map(|c| c.weighted_cdf(x)).sum()
    }

    pub fn weight_sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// `true` once any parameter has become `NaN` or infinite.
    pub fn is_degenerate(&self) -> bool {
        self.weights
            .iter()
            .chain(&self.means)
            .chain(&self.std_devs)
            .any(|v| !v.is_finite())
    }

    pub fn active_components(&self) -> usize {
        self.components().filter(Component::is_active).count()
    }
}

pub(crate) fn spread_means(k: usize) -> Vec<f64> {
    (0..k).map(|i| i as f64 - k as f64 / 2.0).collect()
}

impl Display for MixtureState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "weights={:?}, means={:?}, std_devs={:?}",
            self.weights, self.means, self.std_devs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    /// Trapezoid rule over a wide window.
    fn integrate(state: &MixtureState, lo: f64, hi: f64, steps: usize) -> f64 {
        let h = (hi - lo) / steps as f64;
        let mut acc = 0.5 * (state.density(lo) + state.density(hi));
        for i in 1..steps {
            acc += state.density(lo + h * i as f64);
        }
        acc * h
    }

    #[test]
    fn zero_components_is_a_config_error() {
        assert!(matches!(
            MixtureState::new(0),
            Err(ConfigError::InvalidParameter(_))
        ));
    }

    #[test]
    fn default_layout_for_two_components() {
        let s = MixtureState::new(2).unwrap();
        assert_eq!(s.component_count(), 2);
        assert_eq!(s.weights(), &[0.5, 0.5]);
        assert_eq!(s.means(), &[-1.0, 0.0]);
        assert_eq!(s.std_devs(), &[DEFAULT_STD_DEV, DEFAULT_STD_DEV]);
    }

    #[test]
    fn default_layout_for_three_components() {
        let s = MixtureState::new(3).unwrap();
        assert_eq!(s.means(), &[-1.5, -0.5, 0.5]);
    }

    #[test]
    fn initialize_discards_learned_parameters() {
        let mut s =
            MixtureState::from_parameters(vec![0.2, 0.8], vec![4.0, 5.0], vec![1.0, 2.0]).unwrap();
        s.initialize(4).unwrap();
        assert_eq!(s, MixtureState::new(4).unwrap());
    }

    #[test]
    fn initialize_with_zero_is_rejected_and_keeps_state() {
        let mut s = MixtureState::new(2).unwrap();
        assert!(s.initialize(0).is_err());
        assert_eq!(s.component_count(), 2);
    }

    #[test]
    fn from_parameters_validates() {
        assert!(MixtureState::from_parameters(vec![], vec![], vec![]).is_err());
        assert!(MixtureState::from_parameters(vec![1.0], vec![0.0, 1.0], vec![1.0]).is_err());
        assert!(MixtureState::from_parameters(vec![-0.1], vec![0.0], vec![1.0]).is_err());
        assert!(MixtureState::from_parameters(vec![1.0], vec![f64::NAN], vec![1.0]).is_err());
        assert!(MixtureState::from_parameters(vec![1.0], vec![0.0], vec![-1.0]).is_err());
        assert!(MixtureState::from_parameters(vec![1.0], vec![0.0], vec![0.0]).is_ok());
    }

    #[test]
    fn density_is_sum_of_components() {
        let s = MixtureState::from_parameters(vec![0.3, 0.7], vec![-1.0, 2.0], vec![0.5, 1.5])
            .unwrap();
        let x = 0.4;
        let expected: f64 = s.components().map(|c| c.weighted_density(x)).sum();
        assert!(approx_eq(s.density(x), expected, 1e-15));
        assert!(approx_eq(s.log_density(x), expected.ln(), 1e-12));
    }

    #[test]
    fn normalised_mixture_integrates_to_one() {
        let s = MixtureState::from_parameters(
            vec![0.5, 0.2, 0.3],
            vec![-2.0, 1.0, 2.0],
            vec![0.2, 1.0, 0.5],
        )
        .unwrap();
        assert!(approx_eq(integrate(&s, -15.0, 15.0, 30_000), 1.0, 1e-6));
        assert!(approx_eq(s.cdf(50.0), 1.0, 1e-12));
        assert!(approx_eq(s.cdf(-50.0), 0.0, 1e-12));
    }

    #[test]
    fn inactive_components_are_skipped() {
        let s = MixtureState::from_parameters(vec![1.0, 0.0], vec![0.0, 3.0], vec![1.0, 0.0])
            .unwrap();
        assert_eq!(s.active_components(), 1);
        assert!(s.density(3.0).is_finite());
        assert!(!s.is_degenerate());
    }

    #[test]
    fn degenerate_state_is_reported_and_poisons_density() {
        let mut s = MixtureState::new(2).unwrap();
        s.weights[0] = f64::NAN;
        assert!(s.is_degenerate());
        assert!(s.density(0.0).is_nan());
    }

    #[test]
    fn display_lists_all_vectors() {
        let s = MixtureState::new(1).unwrap();
        assert_eq!(
            s.to_string(),
            "weights=[1.0], means=[-0.5], std_devs=[0.1]"
        );
    }

    proptest! {
        #[test]
        fn initialize_invariants(k in 1usize..64) {
            let s = MixtureState::new(k).unwrap();
            prop_assert!((s.weight_sum() - 1.0).abs() <= 1e-9);
            prop_assert!(s.means().windows(2).all(|w| w[1] > w[0]));
            prop_assert!((s.means()[0] + k as f64 / 2.0).abs() <= 1e-12);
            prop_assert!(s.std_devs().iter().all(|&v| v == DEFAULT_STD_DEV));
        }

        #[test]
        fn density_is_never_negative(
            params in prop::collection::vec((0.0f64..1.0, -10.0f64..10.0, 1e-3f64..5.0), 1..8),
            x in -50.0f64..50.0,
        ) {
            let weights = params.iter().map(|p| p.0).collect();
            let means = params.iter().map(|p| p.1).collect();
            let std_devs = params.iter().map(|p| p.2).collect();
            let s = MixtureState::from_parameters(weights, means, std_devs).unwrap();
            prop_assert!(s.density(x) >= 0.0);
        }
    }
}
