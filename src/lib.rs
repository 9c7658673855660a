pub mod config;
pub mod core;
pub mod estimators;
pub mod evaluation;
pub mod streams;
pub mod tasks;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use crate::core::mixture::MixtureState;
pub use crate::estimators::{BatchEmEstimator, MixtureEstimator, SmoothedEmEstimator};
