//! Folio Motion Layer
//!
//! The scroll-synchronized animation pipeline of the site, built on
//! [`folio_animation`] and driven by one [`FrameScheduler`](folio_animation::FrameScheduler):
//!
//! - [`SmoothScroll`] - wheel/touch input republished as an eased virtual
//!   scroll position with a velocity signal
//! - [`TriggerEngine`] - scroll-bound timelines (toggle and scrub)
//! - [`AnimationScope`] - per-section ownership of timelines and triggers
//! - [`EasedCursor`] - pointer-following marker with hover tracking
//! - [`SkewEffect`] - velocity-driven skew of the scroll container
//! - [`LoadingGate`] - one-shot intro overlay
//! - [`LinkTarget`] - in-page anchor and external link activation
//!
//! Within a frame the scroll driver runs before trigger evaluation, which
//! runs before timelines render; pointer sampling precedes cursor smoothing.

pub mod anchor;
pub mod cursor;
pub mod gate;
pub mod scope;
pub mod scroll;
pub mod skew;
pub mod trigger;

pub use anchor::{LinkActivation, LinkTarget};
pub use cursor::{CursorConfig, CursorState, EasedCursor, CURSOR_CLASS, HOVER_CLASS};
pub use gate::{GateState, LoadingGate, GATE_DURATION_MS};
pub use scope::AnimationScope;
pub use scroll::{
    ScrollConfig, ScrollPhase, ScrollPhysics, ScrollReader, ScrollSignal, ScrollState, SmoothScroll,
    SubscriberId,
};
pub use skew::{MomentumSkew, SkewConfig, SkewEffect};
pub use trigger::{
    ProgressCallback, ScrollTrigger, ToggleAction, ToggleActions, TriggerEngine, TriggerHandle,
    TriggerId, TriggerMode, TriggerPoint, TriggerZone,
};
