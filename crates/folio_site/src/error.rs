//! Error types for folio_site

use folio_animation::AnimationError;
use folio_platform::PlatformError;
use thiserror::Error;

/// Errors that can occur while assembling the site
#[derive(Error, Debug)]
pub enum SiteError {
    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {0}")]
    Config(String),

    /// Host-model error (bad selector, missing element, bad link)
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Animation error (bad trigger point, scheduler gone)
    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),

    /// Operation on a site that was already torn down
    #[error("Site has been torn down")]
    TornDown,
}

impl From<anyhow::Error> for SiteError {
    fn from(err: anyhow::Error) -> Self {
        SiteError::Config(format!("{err:#}"))
    }
}

/// Result type for folio_site operations
pub type Result<T> = std::result::Result<T, SiteError>;
