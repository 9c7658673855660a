use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Smallest standard deviation a component keeps under
/// [`DegeneracyPolicy::Guard`].
pub const MIN_STD_DEV: f64 = 1e-6;

/// How an estimator treats zero-density samples and collapsed components.
///
/// `Propagate` is the bare algorithm: responsibilities are normalised in
/// linear space and any `NaN` produced along the way lands in the parameters,
/// where it poisons every later density query. Degeneracies are still
/// reported through [`UpdateOutcome`](crate::estimators::UpdateOutcome).
///
/// `Guard` computes responsibilities in log space, rejects samples no active
/// component can explain (and non-finite samples), clamps negative variance
/// estimates to zero and keeps every standard deviation at or above
/// [`MIN_STD_DEV`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DegeneracyPolicy {
    Propagate,
    #[default]
    Guard,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn names_round_trip_through_strum_and_serde() {
        for policy in DegeneracyPolicy::iter() {
            let name = policy.to_string();
            assert_eq!(DegeneracyPolicy::from_str(&name).unwrap(), policy);
            let json = serde_json::to_string(&policy).unwrap();
            assert_eq!(json, format!("\"{name}\""));
        }
    }

    #[test]
    fn guard_is_the_default() {
        assert_eq!(DegeneracyPolicy::default(), DegeneracyPolicy::Guard);
        assert!(DegeneracyPolicy::from_str("clamp").is_err());
    }
}
