//! Core error types for the waymark routing layer.
//!
//! This module provides the [`WaymarkError`] enum covering configuration
//! errors, suspicious operations, and IO failures, together with the
//! [`WaymarkResult`] alias used throughout the workspace.
//!
//! The rewrite chain itself raises no errors of its own: malformed input
//! degrades to no-op rewrites, and the only control-flow deviation it
//! produces is a redirect outcome. The variants here exist for the
//! surrounding machinery (settings loading, parameter-map mutation,
//! filesystem tree checks).

use thiserror::Error;

/// The primary error type for the waymark workspace.
///
/// Each variant maps to an appropriate HTTP status code via
/// [`WaymarkError::status_code`], so callers embedding the router in an HTTP
/// stack can translate failures directly.
#[derive(Error, Debug)]
pub enum WaymarkError {
    /// A requested resource, module, or named entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The router or chain is improperly configured.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    /// A potentially unsafe operation was detected, such as mutating an
    /// immutable parameter map or escaping the content-tree root.
    #[error("Suspicious operation: {0}")]
    SuspiciousOperation(String),

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl WaymarkError {
    /// Returns the HTTP status code associated with this error.
    ///
    /// - `NotFound` -> 404
    /// - `SuspiciousOperation` -> 403
    /// - Everything else -> 500
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::SuspiciousOperation(_) => 403,
            Self::ConfigurationError(_)
            | Self::ImproperlyConfigured(_)
            | Self::SerializationError(_)
            | Self::IoError(_) => 500,
        }
    }
}

/// A convenience type alias for `Result<T, WaymarkError>`.
pub type WaymarkResult<T> = Result<T, WaymarkError>;
