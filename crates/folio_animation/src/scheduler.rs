//! Frame scheduler
//!
//! Owns every registered timeline and the per-frame callbacks of the motion
//! layer, and runs them once per frame in a fixed phase order:
//!
//! 1. [`TickPhase::Input`] - pointer sampling
//! 2. [`TickPhase::Scroll`] - smooth scroll integration
//! 3. [`TickPhase::Triggers`] - scroll-trigger evaluation
//! 4. [`TickPhase::Timelines`] - timelines advance and render, then callbacks
//! 5. [`TickPhase::Effects`] - cursor smoothing, momentum skew
//! 6. [`TickPhase::Render`] - anything that must observe final styles
//!
//! Components receive a [`SchedulerHandle`], a weak reference that turns
//! every operation into a no-op once the scheduler is dropped.
//!
//! Callbacks never run while the scheduler's state is borrowed, so they are
//! free to register, remove or control timelines through a handle.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_platform::Document;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::error::{AnimationError, Result};
use crate::timeline::{Timeline, TimelineEvent};

new_key_type! {
    /// Handle to a registered timeline
    pub struct TimelineId;
    /// Handle to a registered tick callback
    pub struct TickCallbackId;
}

/// Frame phases, in execution order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TickPhase {
    Input,
    Scroll,
    Triggers,
    Timelines,
    Effects,
    Render,
}

impl TickPhase {
    pub const ALL: [TickPhase; 6] = [
        TickPhase::Input,
        TickPhase::Scroll,
        TickPhase::Triggers,
        TickPhase::Timelines,
        TickPhase::Effects,
        TickPhase::Render,
    ];
}

/// Timing of the frame being processed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInfo {
    /// Host timestamp of this frame
    pub timestamp_ms: f64,
    /// Time since the previous frame, after lag smoothing (0 on the first frame)
    pub dt_ms: f32,
    /// Frames processed since the scheduler started
    pub frame: u64,
}

/// Per-frame callback
pub type TickCallback = Box<dyn FnMut(&FrameInfo, &mut Document)>;

/// Called when a timeline finishes playing forward
pub type CompletionCallback = Box<dyn FnMut(&mut Document)>;

struct TimelineEntry {
    timeline: Timeline,
    on_complete: Option<CompletionCallback>,
}

struct CallbackEntry {
    phase: TickPhase,
    order: u64,
    /// Taken out while the callback runs
    callback: Option<TickCallback>,
}

/// Internal state of the frame scheduler
struct SchedulerInner {
    timelines: SlotMap<TimelineId, TimelineEntry>,
    callbacks: SlotMap<TickCallbackId, CallbackEntry>,
    next_order: u64,
    running: bool,
    last_timestamp: Option<f64>,
    frame: u64,
    max_frame_delta_ms: Option<f32>,
}

/// The owned frame scheduler
///
/// Held by whatever drives frames (the site, a test). Components get a
/// [`SchedulerHandle`] and never keep the scheduler alive.
///
/// ```
/// use folio_animation::{FrameScheduler, TickPhase};
/// use folio_platform::{Document, Size};
///
/// let mut doc = Document::new(Size::new(800.0, 600.0));
/// let scheduler = FrameScheduler::new();
/// scheduler.handle().add_tick_callback(TickPhase::Effects, |frame, _doc| {
///     assert!(frame.dt_ms >= 0.0);
/// });
///
/// scheduler.start();
/// scheduler.tick(0.0, &mut doc);
/// scheduler.tick(16.0, &mut doc);
/// scheduler.stop();
/// ```
pub struct FrameScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                timelines: SlotMap::with_key(),
                callbacks: SlotMap::with_key(),
                next_order: 0,
                running: false,
                last_timestamp: None,
                frame: 0,
                max_frame_delta_ms: None,
            })),
        }
    }

    /// Get a weak handle for components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Clamp frame deltas so a stalled host does not jump animations ahead
    pub fn set_max_frame_delta(&self, max_ms: Option<f32>) {
        self.inner.borrow_mut().max_frame_delta_ms = max_ms.map(|ms| ms.max(0.0));
    }

    pub fn start(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.running {
            return;
        }
        inner.running = true;
        inner.last_timestamp = None;
        tracing::debug!("frame scheduler started");
    }

    /// Stop ticking; registered timelines and callbacks are kept
    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.running {
            return;
        }
        inner.running = false;
        inner.last_timestamp = None;
        tracing::debug!(frames = inner.frame, "frame scheduler stopped");
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    /// Run one frame
    ///
    /// Returns true if any timeline is still playing. A stopped scheduler
    /// does nothing and returns false.
    pub fn tick(&self, timestamp_ms: f64, doc: &mut Document) -> bool {
        let frame = {
            let mut inner = self.inner.borrow_mut();
            if !inner.running {
                return false;
            }
            let mut dt_ms = match inner.last_timestamp {
                Some(last) => (timestamp_ms - last).max(0.0) as f32,
                None => 0.0,
            };
            if let Some(max) = inner.max_frame_delta_ms {
                dt_ms = dt_ms.min(max);
            }
            inner.last_timestamp = Some(timestamp_ms);
            inner.frame += 1;
            FrameInfo {
                timestamp_ms,
                dt_ms,
                frame: inner.frame,
            }
        };

        for phase in TickPhase::ALL {
            if phase == TickPhase::Timelines {
                self.advance_timelines(frame.dt_ms, doc);
            }
            self.run_phase(phase, &frame, doc);
        }

        self.has_active_timelines()
    }

    fn advance_timelines(&self, dt_ms: f32, doc: &mut Document) {
        let completed: SmallVec<[TimelineId; 4]> = {
            let mut inner = self.inner.borrow_mut();
            let mut completed = SmallVec::new();
            for (id, entry) in inner.timelines.iter_mut() {
                if let Some(TimelineEvent::Completed) = entry.timeline.tick(dt_ms) {
                    completed.push(id);
                }
                entry.timeline.render_if_dirty(doc);
            }
            completed
        };

        for id in completed {
            let callback = self
                .inner
                .borrow_mut()
                .timelines
                .get_mut(id)
                .and_then(|entry| entry.on_complete.take());
            if let Some(mut callback) = callback {
                tracing::trace!(?id, "timeline completed");
                callback(doc);
                if let Some(entry) = self.inner.borrow_mut().timelines.get_mut(id) {
                    entry.on_complete.get_or_insert(callback);
                }
            }
        }
    }

    fn run_phase(&self, phase: TickPhase, frame: &FrameInfo, doc: &mut Document) {
        let ids: SmallVec<[TickCallbackId; 8]> = {
            let inner = self.inner.borrow();
            let mut ids: SmallVec<[(u64, TickCallbackId); 8]> = inner
                .callbacks
                .iter()
                .filter(|(_, entry)| entry.phase == phase)
                .map(|(id, entry)| (entry.order, id))
                .collect();
            ids.sort_unstable_by_key(|(order, _)| *order);
            ids.into_iter().map(|(_, id)| id).collect()
        };

        for id in ids {
            let callback = self
                .inner
                .borrow_mut()
                .callbacks
                .get_mut(id)
                .and_then(|entry| entry.callback.take());
            let Some(mut callback) = callback else {
                continue;
            };
            callback(frame, doc);
            // Removed by its own callback: drop it
            if let Some(entry) = self.inner.borrow_mut().callbacks.get_mut(id) {
                entry.callback = Some(callback);
            }
        }
    }

    /// Check if any timeline is playing
    pub fn has_active_timelines(&self) -> bool {
        self.inner
            .borrow()
            .timelines
            .iter()
            .any(|(_, entry)| entry.timeline.is_playing())
    }

    pub fn timeline_count(&self) -> usize {
        self.inner.borrow().timelines.len()
    }

    pub fn callback_count(&self) -> usize {
        self.inner.borrow().callbacks.len()
    }

    /// Frames processed so far
    pub fn frame_count(&self) -> u64 {
        self.inner.borrow().frame
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the frame scheduler
///
/// This is passed to components that need to register timelines or
/// callbacks. It won't prevent the scheduler from being dropped.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<RefCell<SchedulerInner>>,
}

impl SchedulerHandle {
    /// A handle that was never attached to a scheduler
    pub fn detached() -> Self {
        Self { inner: Weak::new() }
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Check if the scheduler is alive and running
    pub fn is_running(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow().running)
            .unwrap_or(false)
    }

    /// Like [`is_alive`](Self::is_alive), as an error for `?` chains
    pub fn ensure_alive(&self) -> Result<()> {
        if self.is_alive() {
            Ok(())
        } else {
            Err(AnimationError::SchedulerDropped)
        }
    }

    // =========================================================================
    // Timeline Operations
    // =========================================================================

    /// Register a timeline and return its ID
    pub fn register_timeline(&self, timeline: Timeline) -> Option<TimelineId> {
        self.inner.upgrade().map(|inner| {
            let id = inner.borrow_mut().timelines.insert(TimelineEntry {
                timeline,
                on_complete: None,
            });
            tracing::trace!(?id, "timeline registered");
            id
        })
    }

    /// Remove a timeline, handing it back so the caller can revert it
    pub fn remove_timeline(&self, id: TimelineId) -> Option<Timeline> {
        let inner = self.inner.upgrade()?;
        let entry = inner.borrow_mut().timelines.remove(id)?;
        tracing::trace!(?id, "timeline removed");
        Some(entry.timeline)
    }

    /// Access a timeline
    ///
    /// Returns None if the scheduler is dropped or the timeline doesn't exist.
    pub fn with_timeline<F, R>(&self, id: TimelineId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Timeline) -> R,
    {
        self.inner
            .upgrade()
            .and_then(|inner| inner.borrow_mut().timelines.get_mut(id).map(|entry| f(&mut entry.timeline)))
    }

    pub fn contains_timeline(&self, id: TimelineId) -> bool {
        self.with_timeline(id, |_| ()).is_some()
    }

    pub fn play(&self, id: TimelineId) {
        self.with_timeline(id, Timeline::play);
    }

    pub fn reverse(&self, id: TimelineId) {
        self.with_timeline(id, Timeline::reverse);
    }

    pub fn restart(&self, id: TimelineId) {
        self.with_timeline(id, Timeline::restart);
    }

    pub fn pause(&self, id: TimelineId) {
        self.with_timeline(id, Timeline::pause);
    }

    pub fn resume(&self, id: TimelineId) {
        self.with_timeline(id, Timeline::resume);
    }

    pub fn seek(&self, id: TimelineId, time_ms: f32) {
        self.with_timeline(id, |timeline| timeline.seek(time_ms));
    }

    pub fn set_progress(&self, id: TimelineId, progress: f32) {
        self.with_timeline(id, |timeline| timeline.set_progress(progress));
    }

    pub fn set_playback_rate(&self, id: TimelineId, rate: f32) {
        self.with_timeline(id, |timeline| timeline.set_playback_rate(rate));
    }

    /// Check if timeline is playing
    pub fn is_timeline_playing(&self, id: TimelineId) -> bool {
        self.with_timeline(id, |timeline| timeline.is_playing())
            .unwrap_or(false)
    }

    pub fn timeline_progress(&self, id: TimelineId) -> Option<f32> {
        self.with_timeline(id, |timeline| timeline.progress())
    }

    /// Render a timeline's current state right away
    ///
    /// Used at mount so `from` values are in place before the first frame.
    pub fn render_now(&self, id: TimelineId, doc: &mut Document) {
        self.with_timeline(id, |timeline| timeline.render(doc));
    }

    /// Set the callback run each time the timeline completes forward
    pub fn on_complete<F>(&self, id: TimelineId, callback: F)
    where
        F: FnMut(&mut Document) + 'static,
    {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(entry) = inner.borrow_mut().timelines.get_mut(id) {
                entry.on_complete = Some(Box::new(callback));
            }
        }
    }

    // =========================================================================
    // Tick Callbacks
    // =========================================================================

    /// Run a callback every frame in the given phase
    ///
    /// Callbacks in the same phase run in registration order.
    pub fn add_tick_callback<F>(&self, phase: TickPhase, callback: F) -> Option<TickCallbackId>
    where
        F: FnMut(&FrameInfo, &mut Document) + 'static,
    {
        self.inner.upgrade().map(|inner| {
            let mut inner = inner.borrow_mut();
            let order = inner.next_order;
            inner.next_order += 1;
            inner.callbacks.insert(CallbackEntry {
                phase,
                order,
                callback: Some(Box::new(callback)),
            })
        })
    }

    pub fn remove_tick_callback(&self, id: TickCallbackId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow_mut().callbacks.remove(id).is_some())
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for SchedulerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}
