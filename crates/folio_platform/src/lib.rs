//! Folio Host Model
//!
//! This crate provides the host-side surface the motion layer runs against:
//! an in-memory document tree with layout bounds and inline styles, input
//! events, and pointer capability detection.
//!
//! # Architecture
//!
//! - [`Document`] - Element tree, inline styles, listeners, mutation observers
//!   and the host's native scroll position
//! - [`InputEvent`] - Pointer, wheel and touch input routed through the document
//! - [`PointerCapabilities`] - What the primary and secondary pointers can do
//!
//! A browser binding would mirror this surface onto the real DOM; the motion
//! crates only ever talk to [`Document`].
//!
//! # Example
//!
//! ```
//! use folio_platform::prelude::*;
//!
//! let mut doc = Document::new(Size::new(1280.0, 800.0));
//! let section = doc.create_element(ElementKind::Section, None);
//! doc.set_bounds(section, Rect::new(0.0, 0.0, 1280.0, 900.0));
//! let link = doc.create_element(ElementKind::Anchor, Some(section));
//!
//! assert_eq!(doc.interactive_targets(), vec![link]);
//! ```

mod dom;
mod error;
mod event;
mod geometry;
mod input;
mod pointer;
mod selector;
mod style;

// Re-export all public types
pub use dom::{
    Document, Element, ElementId, ElementKind, InteractiveRegistry, ListenerId, ListenerTarget,
    MutationObserver, MutationRecord, ObserverId, HOVER_ATTRIBUTE,
};
pub use error::{PlatformError, Result};
pub use event::{Event, ViewportEvent};
pub use geometry::{Point, Rect, Size};
pub use input::{EventKind, InputEvent, PointerEvent, TouchEvent, TouchPhase};
pub use pointer::{MixedPointerPolicy, PointerCapabilities, PointerPrecision};
pub use selector::Selector;
pub use style::{Property, Style};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dom::{
        Document, ElementId, ElementKind, InteractiveRegistry, ListenerId, ListenerTarget,
        MutationRecord, ObserverId, HOVER_ATTRIBUTE,
    };
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{Event, ViewportEvent};
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::input::{EventKind, InputEvent, PointerEvent, TouchEvent, TouchPhase};
    pub use crate::pointer::{MixedPointerPolicy, PointerCapabilities, PointerPrecision};
    pub use crate::selector::Selector;
    pub use crate::style::{Property, Style};
}
