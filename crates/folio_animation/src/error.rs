//! Animation error types

use folio_platform::PlatformError;
use thiserror::Error;

/// Errors raised while assembling animations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Scroll-trigger point string could not be parsed
    #[error("Invalid trigger point: {0}")]
    InvalidTriggerPoint(String),

    /// The frame scheduler was dropped while a handle was still in use
    #[error("Frame scheduler has been dropped")]
    SchedulerDropped,

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
