use std::collections::BTreeMap;
use std::str::FromStr;

use crate::config::ConfigError;
use crate::utils::option_parsing::parse_options;

/// Raw `key=value` options with typed, validating lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    values: BTreeMap<String, String>,
}

impl Options {
    pub fn parse(line: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            values: parse_options(line)?,
        })
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn require<T: FromStr>(&self, key: &'static str) -> Result<T, ConfigError> {
        self.optional(key)?.ok_or(ConfigError::MissingKey(key))
    }

    pub fn optional<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, ConfigError> {
        self.values
            .get(key)
            .map(|raw| {
                raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                    key,
                    value: raw.clone(),
                })
            })
            .transpose()
    }

    /// Fails on the first key outside `allowed`.
    pub fn ensure_only(&self, allowed: &[&str]) -> Result<(), ConfigError> {
        match self.values.keys().find(|k| !allowed.contains(&k.as_str())) {
            Some(unknown) => Err(ConfigError::InvalidParameter(format!(
                "unknown option: {unknown}"
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_lookups() {
        let options = Options::parse("alpha=0.3,components=3").unwrap();
        assert_eq!(options.require::<f64>("alpha").unwrap(), 0.3);
        assert_eq!(options.require::<usize>("components").unwrap(), 3);
        assert_eq!(options.optional::<usize>("batch_length").unwrap(), None);
        assert_eq!(options.raw("alpha"), Some("0.3"));
    }

    #[test]
    fn missing_and_unparsable_values() {
        let options = Options::parse("components=three").unwrap();
        assert!(matches!(
            options.require::<f64>("alpha"),
            Err(ConfigError::MissingKey("alpha"))
        ));
        assert!(matches!(
            options.require::<usize>("components"),
            Err(ConfigError::InvalidValue { key: "components", value }) if value == "three"
        ));
    }

    #[test]
    fn unknown_keys_are_reported() {
        let options = Options::parse("alpah=0.3").unwrap();
        assert!(options.ensure_only(&["alpha"]).is_err());
        assert!(Options::default().ensure_only(&["alpha"]).is_ok());
    }
}
