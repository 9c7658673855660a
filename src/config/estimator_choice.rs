use std::str::FromStr;

use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

use crate::config::{ConfigError, Options};
use crate::estimators::DegeneracyPolicy;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BatchEmParameters {
    #[schemars(
        title = "Components",
        description = "Number of Gaussian components",
        range(min = 1)
    )]
    pub components: usize,

    #[schemars(
        title = "Batch Length",
        description = "Samples accumulated between M-steps",
        range(min = 1)
    )]
    pub batch_length: usize,

    #[serde(default)]
    #[schemars(
        title = "Degeneracy Policy",
        description = "guard (log-space E-step, scale floor) or propagate (NaN flows through)"
    )]
    pub policy: DegeneracyPolicy,
}

/// `alpha` has no default and must always be given.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SmoothedEmParameters {
    #[schemars(
        title = "Components",
        description = "Number of Gaussian components",
        range(min = 1)
    )]
    pub components: usize,

    #[schemars(
        title = "Batch Length",
        description = "Samples accumulated between M-steps",
        range(min = 1)
    )]
    pub batch_length: usize,

    #[schemars(
        title = "Alpha",
        description = "Weight of the newest M-step estimate, in (0, 1]",
        range(min = 0.0, max = 1.0)
    )]
    pub alpha: f64,

    #[serde(default)]
    #[schemars(
        title = "Degeneracy Policy",
        description = "guard (log-space E-step, scale floor) or propagate (NaN flows through)"
    )]
    pub policy: DegeneracyPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(EstimatorKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum EstimatorChoice {
    #[strum_discriminants(strum(
        message = "Batch Online EM",
        detailed_message = "One M-step per window of samples, computed from soft-responsibility moments."
    ))]
    BatchEm(BatchEmParameters),

    #[strum_discriminants(strum(
        message = "Smoothed Online EM",
        detailed_message = "Batch online EM with exponential smoothing of every M-step result."
    ))]
    SmoothedEm(SmoothedEmParameters),
}

const BATCH_KEYS: &[&str] = &["components", "batch_length", "policy"];
const SMOOTHED_KEYS: &[&str] = &["components", "batch_length", "alpha", "policy"];

impl EstimatorChoice {
    pub fn schema() -> Schema {
        schema_for!(EstimatorChoice)
    }

    pub fn kind(&self) -> EstimatorKind {
        EstimatorKind::from(self)
    }

    /// Builds a choice from a kind name (`batch-em`, `smoothed-em`) and a
    /// comma-separated `key=value` string.
    ///
    /// `components` and `batch_length` are always required, `alpha` is
    /// required for `smoothed-em`, and `policy` defaults to `guard`.
    pub fn from_options(kind: &str, line: &str) -> Result<Self, ConfigError> {
        let kind = EstimatorKind::from_str(kind.trim())
            .map_err(|_| ConfigError::UnknownKind(kind.to_string()))?;
        let options = Options::parse(line)?;

        let choice = match kind {
            EstimatorKind::BatchEm => {
                options.ensure_only(BATCH_KEYS)?;
                EstimatorChoice::BatchEm(BatchEmParameters {
                    components: options.require("components")?,
                    batch_length: options.require("batch_length")?,
                    policy: options.optional("policy")?.unwrap_or_default(),
                })
            }
            EstimatorKind::SmoothedEm => {
                options.ensure_only(SMOOTHED_KEYS)?;
                EstimatorChoice::SmoothedEm(SmoothedEmParameters {
                    components: options.require("components")?,
                    batch_length: options.require("batch_length")?,
                    alpha: options.require("alpha")?,
                    policy: options.optional("policy")?.unwrap_or_default(),
                })
            }
        };
        choice.validate()?;
        Ok(choice)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let choice: EstimatorChoice = serde_json::from_str(json)?;
        choice.validate()?;
        Ok(choice)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (components, batch_length) = match self {
            EstimatorChoice::BatchEm(p) => (p.components, p.batch_length),
            EstimatorChoice::SmoothedEm(p) => (p.components, p.batch_length),
        };
        if components == 0 {
            return Err(ConfigError::InvalidValue {
                key: "components",
                value: components.to_string(),
            });
        }
        if batch_length == 0 {
            return Err(ConfigError::InvalidValue {
                key: "batch_length",
                value: batch_length.to_string(),
            });
        }
        if let EstimatorChoice::SmoothedEm(p) = self {
            if !(p.alpha > 0.0 && p.alpha <= 1.0) {
                return Err(ConfigError::InvalidValue {
                    key: "alpha",
                    value: p.alpha.to_string(),
                });
            }
        }
        Ok(())
    }
}
