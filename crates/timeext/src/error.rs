//! Error types for timeext operations.

use thiserror::Error;

/// Boxed low-level failure carried for diagnostic chaining.
type Source = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum TimeExtError {
    /// A malformed input string, or a range whose end precedes its start.
    ///
    /// The message embeds the offending input; when a lower-level parse
    /// failure triggered the rejection it is reachable through
    /// [`std::error::Error::source`].
    #[error("invalid argument: {message}")]
    InvalidArgument {
        message: String,
        #[source]
        source: Option<Source>,
    },
}

impl TimeExtError {
    /// An invalid argument with no underlying cause (length checks,
    /// inverted ranges).
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        TimeExtError::InvalidArgument {
            message: message.into(),
            source: None,
        }
    }

    /// An invalid argument wrapping the parse failure that triggered it.
    pub(crate) fn invalid_from(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        TimeExtError::InvalidArgument {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

pub type Result<T> = std::result::Result<T, TimeExtError>;
