//! Error types for aina.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`AinaError`].
pub type Result<T> = std::result::Result<T, AinaError>;

/// Errors that can occur while classifying, resolving, persisting or loading.
#[derive(Error, Debug)]
pub enum AinaError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored record could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error loading a model asset from file.
    #[error("failed to load model from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// The asset decoded but contained no triangles.
    #[error("model {path} contains no triangle meshes")]
    EmptyModel {
        /// The file path.
        path: PathBuf,
    },

    /// Unsupported file format.
    #[error("unsupported model format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// An optional decoder or loader was not provided.
    #[error("capability not available: {capability}")]
    CapabilityMissing {
        /// Name of the missing capability.
        capability: &'static str,
    },

    /// A gender string did not name a known gender.
    #[error("unknown gender: {0}")]
    UnknownGender(String),

    /// A shape or body-type string did not name a known label.
    #[error("unknown shape: {0}")]
    UnknownShape(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl AinaError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        AinaError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Create a load error for the given path.
    pub fn load<P: Into<PathBuf>, M: std::fmt::Display>(path: P, message: M) -> Self {
        AinaError::LoadError {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
