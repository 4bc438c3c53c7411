//! Error types for weapon catalog loading.

use thiserror::Error;

/// Errors that can occur when loading the per-game weapons file.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// File could not be read.
    #[error("Failed to read weapons file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// A line could not be parsed.
    #[error("Parse error on line {line}: {details}")]
    ParseError { line: usize, details: String },

    /// Section header names no known weapon tag.
    #[error("Unknown weapon tag '{tag}' on line {line}")]
    UnknownTag { tag: String, line: usize },

    /// A weapon entry appeared before any section header.
    #[error("Weapon entry outside of a tag section on line {line}")]
    EntryOutsideSection { line: usize },

    /// The same basename is listed twice.
    #[error("Weapon '{0}' is listed more than once")]
    DuplicateWeapon(String),
}
