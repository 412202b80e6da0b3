//! Folio Site
//!
//! Assembles the portfolio page on top of the motion layer: builds the
//! document skeleton, mounts the smooth scroll driver, trigger engine,
//! momentum skew, eased cursor, loading gate, navigation and every section,
//! and runs them from the host's frame callback.
//!
//! # Example
//!
//! ```
//! use folio_site::prelude::*;
//!
//! let mut site = Site::mount(SiteConfig::default(), PointerCapabilities::mouse()).unwrap();
//! site.handle_event(Event::Input(InputEvent::Wheel { delta_x: 0.0, delta_y: 120.0 }));
//! let mut ts = 0.0;
//! while ts < 1000.0 {
//!     site.frame(ts);
//!     ts += 16.0;
//! }
//! assert!(site.scroll().state().position > 0.0);
//! site.teardown();
//! ```

mod app;
pub mod config;
mod error;
pub mod logging;
pub mod sections;

#[cfg(test)]
mod testing;

#[cfg(test)]
mod tests;

pub use app::{Site, SKEW_CONTAINER_CLASS};
pub use config::SiteConfig;
pub use error::{Result, SiteError};
pub use sections::{Section, SectionKind};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::app::Site;
    pub use crate::config::SiteConfig;
    pub use crate::error::{Result, SiteError};
    pub use crate::sections::SectionKind;

    pub use folio_motion::{LinkActivation, LinkTarget};
    pub use folio_platform::{Event, InputEvent, PointerCapabilities, PointerEvent, ViewportEvent};
}
