use thiserror::Error;

/// Errors produced when building or validating domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field} must be a valid http(s) URL: {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    #[error("invalid timestamp {value:?}: expected an ISO 8601 date")]
    InvalidTimestamp { value: String },

    #[error("invalid value for {param}: {value:?}")]
    InvalidParam { param: &'static str, value: String },
}
