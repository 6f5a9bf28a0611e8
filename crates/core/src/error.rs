//! Core error model.

use thiserror::Error;

/// Core-level error.
///
/// Keep this focused on deterministic failures (validation, malformed
/// configuration). Host transport failures belong to the crate that talks
/// to the host.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OfferError {
    /// A value failed validation (e.g. malformed amount).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. empty string).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl OfferError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
