use std::fmt;

use thiserror::Error;

/// Business-rule failures raised by the domain services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A referenced row does not exist.
    #[error("{}", .reason.as_deref().unwrap_or("not found"))]
    NotFound { reason: Option<String> },

    /// The write would break a uniqueness rule.
    #[error("{}", .reason.as_deref().unwrap_or("conflict"))]
    Conflict { reason: Option<String> },

    /// The write is refused by a referential or temporal guard.
    #[error("{}", .reason.as_deref().unwrap_or("forbidden"))]
    Forbidden { reason: Option<String> },

    /// Input failed field validation.
    #[error("invalid input: {0}")]
    Validation(#[from] cadence_types::TypeError),

    /// The store itself failed.
    #[error("store error: {0}")]
    Store(#[from] cadence_store::StoreError),
}

impl ServiceError {
    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::NotFound {
            reason: Some(reason.into()),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: Some(reason.into()),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: Some(reason.into()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Store(_) => ErrorKind::Internal,
        }
    }
}

/// Coarse classification used by the request surface to pick a status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Forbidden,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validation => "validation",
            Self::NotFound => "not-found",
            Self::Conflict => "conflict",
            Self::Forbidden => "forbidden",
            Self::Internal => "internal",
        };
        f.write_str(name)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
