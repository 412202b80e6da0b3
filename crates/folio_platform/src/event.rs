//! Host events

use crate::input::InputEvent;

/// Events delivered by the host to a mounted site
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Input event (pointer, wheel, touch)
    Input(InputEvent),
    /// Viewport event
    Viewport(ViewportEvent),
    /// Frame tick - time to advance animations and render
    ///
    /// Sent once per display refresh with the host's frame timestamp.
    Frame {
        /// Frame timestamp in milliseconds since an arbitrary origin
        timestamp_ms: f64,
    },
}

/// Viewport events
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportEvent {
    /// Viewport was resized (CSS pixels)
    Resized { width: f32, height: f32 },
}
