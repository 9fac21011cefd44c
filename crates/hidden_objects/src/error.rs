//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Sampling and the session state machine never fail; errors come from theme
//! validation and scene composition, before a round starts.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// The theme cannot produce a playable round (e.g. no target-capable objects).
    #[error("configuration error in theme '{theme}': {message}")]
    Configuration { theme: String, message: String },

    #[error("unknown theme '{key}'")]
    UnknownTheme { key: String },

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn configuration(theme: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Configuration {
            theme: theme.into(),
            message: message.into(),
        }
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
