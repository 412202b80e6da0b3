//! Input event types for pointer, wheel and touch

use crate::dom::ElementId;

/// Input events
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer (mouse/pen) event
    Pointer(PointerEvent),
    /// Wheel/trackpad event
    Wheel {
        /// Horizontal delta in pixels
        delta_x: f32,
        /// Vertical delta in pixels
        delta_y: f32,
    },
    /// Touch event (mobile/touchscreen)
    Touch(TouchEvent),
}

impl InputEvent {
    /// The listener kind this event is delivered to
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::Pointer(PointerEvent::Moved { .. }) => EventKind::PointerMove,
            InputEvent::Pointer(PointerEvent::Enter { .. }) => EventKind::PointerEnter,
            InputEvent::Pointer(PointerEvent::Leave { .. }) => EventKind::PointerLeave,
            InputEvent::Wheel { .. } => EventKind::Wheel,
            InputEvent::Touch(_) => EventKind::Touch,
        }
    }

    /// Element the event is addressed to, if it is element-scoped
    pub fn target(&self) -> Option<ElementId> {
        match self {
            InputEvent::Pointer(PointerEvent::Enter { target })
            | InputEvent::Pointer(PointerEvent::Leave { target }) => Some(*target),
            _ => None,
        }
    }
}

/// Pointer events
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to a viewport position
    Moved {
        /// X position in viewport coordinates
        x: f32,
        /// Y position in viewport coordinates
        y: f32,
    },
    /// Pointer entered an element
    Enter { target: ElementId },
    /// Pointer left an element
    Leave { target: ElementId },
}

/// Touch events
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    /// Touch identifier
    pub id: u64,
    /// Touch phase
    pub phase: TouchPhase,
    /// X position in viewport coordinates
    pub x: f32,
    /// Y position in viewport coordinates
    pub y: f32,
}

/// Touch phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// Listener categories
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    PointerEnter,
    PointerLeave,
    Wheel,
    Touch,
}
