use strum_macros::Display;

/// Numeric failure detected while processing one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Degeneracy {
    /// Every component assigned zero (or non-finite) density to the sample,
    /// so the responsibilities could not be normalised.
    #[strum(to_string = "zero mixture density")]
    ZeroDensity,
    #[strum(to_string = "non-finite observation")]
    NonFiniteObservation,
}

/// What an M-step did to the parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MStepSummary {
    /// Components left with a non-zero weight.
    pub active_components: usize,
    /// Components whose variance estimate came out negative.
    pub negative_variances: usize,
    /// Components left holding a `NaN` or infinite parameter.
    pub non_finite_components: usize,
}

impl MStepSummary {
    pub fn is_clean(&self) -> bool {
        self.negative_variances == 0 && self.non_finite_components == 0
    }
}

/// Result of feeding one observation to an estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// E-step only; parameters unchanged.
    Accumulated,
    /// The batch filled and the parameters were re-estimated.
    Updated(MStepSummary),
    /// The sample was accumulated but poisoned the statistics.
    Degenerate(Degeneracy),
    /// The sample was discarded without touching the statistics.
    Rejected(Degeneracy),
}

impl UpdateOutcome {
    pub fn is_update(&self) -> bool {
        matches!(self, UpdateOutcome::Updated(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, UpdateOutcome::Rejected(_))
    }
}
