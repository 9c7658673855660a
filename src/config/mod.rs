mod build;
mod error;
mod estimator_choice;
mod options;

pub use build::build_estimator;
pub use error::ConfigError;
pub use estimator_choice::{BatchEmParameters, EstimatorChoice, EstimatorKind, SmoothedEmParameters};
pub use options::Options;
