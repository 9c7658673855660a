mod degeneracy_policy;
mod mixture_estimator;
pub mod online_em;
mod update_outcome;

pub use degeneracy_policy::{DegeneracyPolicy, MIN_STD_DEV};
pub use mixture_estimator::MixtureEstimator;
pub use online_em::{BatchEmEstimator, SmoothedEmEstimator};
pub use update_outcome::{Degeneracy, MStepSummary, UpdateOutcome};
