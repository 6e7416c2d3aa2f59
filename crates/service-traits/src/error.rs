use std::error::Error as StdError;

/// Crate-wide result type for collaborator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Typed errors shared across the collaborator traits.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input payload or parameter is invalid.
    #[error("invalid store input: {message}")]
    InvalidInput { message: String },

    /// A referenced record does not exist.
    #[error("record not found: {message}")]
    NotFound { message: String },

    /// A uniqueness constraint was violated (e.g. lead phone number).
    ///
    /// Callers creating a lead must treat this as "already exists, re-fetch
    /// and continue" rather than a fatal error.
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// Operation is currently unavailable (backend unreachable, not ready).
    #[error("store operation unavailable: {message}")]
    Unavailable { message: String },

    /// Wrapped source error from an external dependency.
    #[error("store operation failed: {context}: {source}")]
    External {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl Error {
    #[must_use]
    pub fn invalid_input(message: impl std::fmt::Display) -> Self {
        Self::InvalidInput {
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn not_found(message: impl std::fmt::Display) -> Self {
        Self::NotFound {
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn conflict(message: impl std::fmt::Display) -> Self {
        Self::Conflict {
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn unavailable(message: impl std::fmt::Display) -> Self {
        Self::Unavailable {
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn external(
        context: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::External {
            context: context.into(),
            source: Box::new(source),
        }
    }
}
