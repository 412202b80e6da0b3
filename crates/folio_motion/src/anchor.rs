//! Link activation
//!
//! Fragment links scroll the page to their target with the host's own smooth
//! scroll, outside the smooth scroll driver; the driver picks the position up
//! again once the host lands. A bare `#` scrolls back to the top. Everything
//! else opens in a new browsing context.

use folio_platform::{Document, ElementId, PlatformError, Result};

/// Parsed `href`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    /// Bare `#`, the top of the page
    Top,
    /// `#fragment`, without the `#`
    Fragment(String),
    /// `mailto:`, `tel:`, `http://` or `https://`
    External(String),
}

const EXTERNAL_SCHEMES: [&str; 4] = ["mailto:", "tel:", "http://", "https://"];

impl LinkTarget {
    pub fn parse(href: &str) -> Result<Self> {
        let href = href.trim();
        if let Some(fragment) = href.strip_prefix('#') {
            if fragment.is_empty() {
                return Ok(LinkTarget::Top);
            }
            if fragment.contains(char::is_whitespace) {
                return Err(PlatformError::InvalidLink(href.to_string()));
            }
            return Ok(LinkTarget::Fragment(fragment.to_string()));
        }
        let lower = href.to_ascii_lowercase();
        match EXTERNAL_SCHEMES.iter().find(|scheme| lower.starts_with(**scheme)) {
            Some(scheme) if href.len() > scheme.len() => Ok(LinkTarget::External(href.to_string())),
            _ => Err(PlatformError::InvalidLink(href.to_string())),
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, LinkTarget::External(_))
    }
}

/// Outcome of activating a link
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkActivation {
    /// Host smooth scroll started toward the element
    ScrollTo(ElementId),
    /// Host smooth scroll started toward the top of the page
    ScrollToTop,
    /// Open the URL in a new browsing context (`target="_blank"`)
    OpenExternal { url: String },
    /// Fragment with no matching element
    Skipped,
}

impl LinkTarget {
    /// Carry out the link's default behavior
    pub fn activate(&self, doc: &mut Document) -> LinkActivation {
        match self {
            LinkTarget::Top => {
                doc.smooth_scroll_to(0.0);
                LinkActivation::ScrollToTop
            }
            LinkTarget::Fragment(fragment) => match doc.find_by_id(fragment) {
                Some(id) if doc.scroll_into_view(id) => LinkActivation::ScrollTo(id),
                _ => {
                    tracing::debug!("anchor #{fragment} has no target, skipped");
                    LinkActivation::Skipped
                }
            },
            LinkTarget::External(url) => LinkActivation::OpenExternal { url: url.clone() },
        }
    }
}
