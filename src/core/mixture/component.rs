use crate::utils::math::{LN_SQRT_2PI, ONE_PER_SQRT_2PI, normal_probability};

/// Read-only view of one Gaussian component of a mixture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Component {
    pub weight: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl Component {
    /// A component with exactly zero weight takes no part in the mixture.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.weight != 0.0
    }

    /// `weight * N(x; mean, std_dev)`.
    ///
    /// Inactive components return 0 without touching the exponential, so a
    /// dead component with a zero scale never divides by zero. Any other
    /// degenerate parameter (zero or `NaN` scale, `NaN` weight) is evaluated
    /// as is and may produce `NaN`.
    #[inline]
    pub fn weighted_density(&self, x: f64) -> f64 {
        if !self.is_active() {
            return 0.0;
        }
        let z = (x - self.mean) / self.std_dev;
        self.weight * ONE_PER_SQRT_2PI * (1.0 / self.std_dev) * (-0.5 * z * z).exp()
    }

    /// Natural log of [`weighted_density`](Self::weighted_density), computed
    /// directly so that far tails do not underflow to `-inf`.
    #[inline]
    pub fn ln_weighted_density(&self, x: f64) -> f64 {
        if !self.is_active() {
            return f64::NEG_INFINITY;
        }
        let z = (x - self.mean) / self.std_dev;
        self.weight.ln() - self.std_dev.ln() - LN_SQRT_2PI - 0.5 * z * z
    }

    /// `weight * P(X <= x)` for this component. A collapsed (zero scale)
    /// component is a point mass at its mean.
    pub fn weighted_cdf(&self, x: f64) -> f64 {
        if !self.is_active() {
            return 0.0;
        }
        if self.std_dev > 0.0 {
            self.weight * normal_probability((x - self.mean) / self.std_dev)
        } else if x >= self.mean {
            self.weight
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn unit() -> Component {
        Component {
            weight: 1.0,
            mean: 0.0,
            std_dev: 1.0,
        }
    }

    #[test]
    fn standard_normal_peak() {
        let c = unit();
        assert!(approx_eq(c.weighted_density(0.0), ONE_PER_SQRT_2PI, 1e-15));
        assert!(approx_eq(
            c.weighted_density(1.0),
            ONE_PER_SQRT_2PI * (-0.5f64).exp(),
            1e-15
        ));
    }

    #[test]
    fn weight_scales_density() {
        let c = Component {
            weight: 0.25,
            ..unit()
        };
        assert!(approx_eq(
            c.weighted_density(0.3),
            0.25 * unit().weighted_density(0.3),
            1e-15
        ));
    }

    #[test]
    fn inactive_component_short_circuits() {
        let dead = Component {
            weight: 0.0,
            mean: 1.0,
            std_dev: 0.0,
        };
        assert!(!dead.is_active());
        assert_eq!(dead.weighted_density(1.0), 0.0);
        assert_eq!(dead.ln_weighted_density(1.0), f64::NEG_INFINITY);
        assert_eq!(dead.weighted_cdf(5.0), 0.0);
    }

    #[test]
    fn collapsed_active_component_is_nan_off_mean() {
        let collapsed = Component {
            weight: 1.0,
            mean: -2.0,
            std_dev: 0.0,
        };
        assert!(collapsed.weighted_density(2.0).is_nan());
    }

    #[test]
    fn nan_weight_poisons_density() {
        let poisoned = Component {
            weight: f64::NAN,
            ..unit()
        };
        assert!(poisoned.weighted_density(0.0).is_nan());
    }

    #[test]
    fn log_density_agrees_and_survives_tails() {
        let c = Component {
            weight: 0.5,
            mean: 1.0,
            std_dev: 0.1,
        };
        assert!(approx_eq(
            c.ln_weighted_density(1.05),
            c.weighted_density(1.05).ln(),
            1e-12
        ));
        // far enough out that the direct density underflows
        assert_eq!(c.weighted_density(100.0), 0.0);
        assert!(c.ln_weighted_density(100.0).is_finite());
    }

    #[test]
    fn cdf_of_point_mass_is_a_step() {
        let c = Component {
            weight: 0.4,
            mean: 2.0,
            std_dev: 0.0,
        };
        assert_eq!(c.weighted_cdf(1.999), 0.0);
        assert_eq!(c.weighted_cdf(2.0), 0.4);
    }

    #[test]
    fn cdf_at_mean_is_half_the_weight() {
        let c = Component {
            weight: 0.6,
            mean: -3.0,
            std_dev: 2.0,
        };
        assert!(approx_eq(c.weighted_cdf(-3.0), 0.3, 1e-12));
    }
}
