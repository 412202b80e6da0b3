//! Folio Animation System
//!
//! Easing curves, property tweens, timeline orchestration and the frame
//! scheduler that drives them.
//!
//! # Features
//!
//! - **Easing**: Exact-endpoint curves plus the smooth-scroll exponential
//! - **Tweens**: `from_to` and `to` property tweens on document elements
//! - **Timelines**: Positioned, staggered, repeatable sequences that play,
//!   reverse, seek and revert deterministically
//! - **Frame Scheduler**: An owned ticker with phase-ordered callbacks,
//!   handed to components as a weak [`SchedulerHandle`]

pub mod easing;
pub mod error;
pub mod scheduler;
pub mod timeline;
pub mod tween;
pub mod values;

pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use scheduler::{
    CompletionCallback, FrameInfo, FrameScheduler, SchedulerHandle, TickCallback, TickCallbackId,
    TickPhase, TimelineId,
};
pub use timeline::{Direction, PlaybackState, Position, Timeline, TimelineEvent, TweenIndex};
pub use tween::Tween;
pub use values::{Interpolate, Props};
