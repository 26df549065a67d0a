use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the sluice workspace.
///
/// This covers routing failures, provider-tagged failures, preprocessor
/// registry conflicts, configuration problems, and data invariant violations.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SluiceError {
    /// One or more requested tags matched no registered provider.
    #[error("no provider can serve tags: {tags:?}")]
    Unroutable {
        /// Tags that no provider claimed, in request order.
        tags: Vec<String>,
    },

    /// An individual provider returned an error.
    #[error("{provider} failed: {msg}")]
    Provider {
        /// Provider name that failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A resource or tag could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "series for tag TRA-35TT8566".
        what: String,
    },

    /// A preprocessor type name was registered twice.
    #[error("preprocessor with name '{name}' has already been added")]
    RegistrationConflict {
        /// The conflicting type name.
        name: String,
    },

    /// No constructor is registered for the requested preprocessor type.
    #[error("can't find a preprocessor with name '{name}'")]
    UnknownType {
        /// The requested type name.
        name: String,
    },

    /// A declarative configuration record is malformed (e.g. missing `type`).
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Issues with the supplied or produced data (ordering, shape, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl SluiceError {
    /// Helper: build an `Unroutable` error from the unmatched tags.
    pub fn unroutable<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Unroutable {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Helper: build a `Provider` error with the provider name and message.
    pub fn provider(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `RegistrationConflict` error.
    pub fn registration_conflict(name: impl Into<String>) -> Self {
        Self::RegistrationConflict { name: name.into() }
    }

    /// Helper: build an `UnknownType` error.
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }

    /// Returns true if this error was raised by routing rather than by a provider.
    #[must_use]
    pub const fn is_routing(&self) -> bool {
        matches!(self, Self::Unroutable { .. })
    }

    /// Tags that could not be routed, or an empty slice for other variants.
    #[must_use]
    pub fn unroutable_tags(&self) -> &[String] {
        match self {
            Self::Unroutable { tags } => tags,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for SluiceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<humantime::DurationError> for SluiceError {
    fn from(e: humantime::DurationError) -> Self {
        Self::InvalidArg(format!("invalid duration: {e}"))
    }
}
