use std::convert::TryFrom;

use crate::config::{BatchEmParameters, ConfigError, EstimatorChoice, SmoothedEmParameters};
use crate::estimators::{BatchEmEstimator, MixtureEstimator, SmoothedEmEstimator};

impl TryFrom<BatchEmParameters> for BatchEmEstimator {
    type Error = ConfigError;

    fn try_from(parameters: BatchEmParameters) -> Result<Self, Self::Error> {
        BatchEmEstimator::with_policy(
            parameters.components,
            parameters.batch_length,
            parameters.policy,
        )
    }
}

impl TryFrom<SmoothedEmParameters> for SmoothedEmEstimator {
    type Error = ConfigError;

    fn try_from(parameters: SmoothedEmParameters) -> Result<Self, Self::Error> {
        SmoothedEmEstimator::with_policy(
            parameters.components,
            parameters.batch_length,
            parameters.alpha,
            parameters.policy,
        )
    }
}

pub fn build_estimator(choice: EstimatorChoice) -> Result<Box<dyn MixtureEstimator>, ConfigError> {
    match choice {
        EstimatorChoice::BatchEm(p) => Ok(Box::new(BatchEmEstimator::try_from(p)?)),
        EstimatorChoice::SmoothedEm(p) => Ok(Box::new(SmoothedEmEstimator::try_from(p)?)),
    }
}
