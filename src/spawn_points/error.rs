//! Error types for spawn-point persistence.

use thiserror::Error;

/// Errors that can occur when reading or writing a level's spawn points.
#[derive(Debug, Error)]
pub enum SpawnPointError {
    /// File exists but could not be read.
    #[error("Failed to read spawn points '{path}': {details}")]
    ReadError { path: String, details: String },

    /// JSON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// File or its directory could not be written.
    #[error("Failed to write spawn points '{path}': {details}")]
    WriteError { path: String, details: String },

    /// No level is loaded, so there is no file to use.
    #[error("No level is loaded")]
    NoLevel,
}
