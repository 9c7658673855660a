mod estimators;
mod preview;

pub use estimators::{Estimator, MeanEstimator};
pub use preview::{DensityCurve, Snapshot};
