//! Platform error types

use thiserror::Error;

/// Host-model errors
///
/// Runtime motion code never surfaces these; missing nodes are skipped.
/// They are returned by the parsing entry points used while a page is
/// being assembled.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// Selector string could not be parsed
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// Link target could not be interpreted
    #[error("Invalid link target: {0}")]
    InvalidLink(String),

    /// Element is not (or no longer) part of the document
    #[error("Element not found: {0}")]
    ElementNotFound(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
