use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing mandatory option: {0}")]
    MissingKey(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("malformed option token (expected key=value): {0:?}")]
    MalformedOption(String),

    #[error("option given more than once: {0}")]
    DuplicateKey(String),

    #[error("unknown estimator kind: {0}")]
    UnknownKind(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
