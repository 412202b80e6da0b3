//! Smooth scroll driver
//!
//! Intercepts wheel and touch input and republishes a virtual scroll
//! position that eases toward an input-driven target. Every input restarts
//! the easing from the current position, so consecutive wheel ticks build
//! up inertia; the per-frame pump carries the position between inputs.
//!
//! # State machine
//!
//! - `Idle` - position equals target, velocity reaches zero
//! - `Animating` - easing toward the target after input
//! - `Native` - the host is running its own smooth scroll (in-page anchor);
//!   the driver follows the host position and re-synchronizes when it lands
//!
//! The driver has no failure modes: with no subscribers it still advances,
//! and a document shorter than the viewport simply pins the position at 0.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_animation::{Easing, FrameInfo, Result, SchedulerHandle, TickCallbackId, TickPhase};
use folio_platform::{Document, EventKind, InputEvent, ListenerId, ListenerTarget, TouchPhase};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

/// Below this, a host scroll position is considered equal to the virtual one
const SYNC_EPSILON: f32 = 0.5;

new_key_type! {
    /// Handle to a scroll subscriber
    pub struct SubscriberId;
}

// ============================================================================
// Scroll Configuration
// ============================================================================

/// Configuration for the smooth scroll driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollConfig {
    /// Length of the easing after each input
    pub duration_ms: f32,
    /// Scale applied to wheel deltas
    pub wheel_multiplier: f32,
    /// Scale applied to touch drag distances
    pub touch_multiplier: f32,
    /// Ease wheel input (false = jump straight to the target)
    pub smooth_wheel: bool,
    pub easing: Easing,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1200.0,
            wheel_multiplier: 1.0,
            touch_multiplier: 2.0,
            smooth_wheel: true,
            easing: Easing::ScrollExpo,
        }
    }
}

// ============================================================================
// Scroll State
// ============================================================================

/// What the driver publishes every tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    /// Virtual scroll position, always within `[0, limit]`
    pub position: f32,
    /// Position delta of the last tick
    pub velocity: f32,
}

/// Driver phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollPhase {
    #[default]
    Idle,
    Animating,
    Native,
}

/// Events that drive [`ScrollPhase`] transitions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollSignal {
    /// Wheel or touch input moved the target
    Input,
    /// The easing reached its target
    Settled,
    /// A host smooth scroll began
    NativeStarted,
    /// The host smooth scroll finished
    NativeLanded,
}

impl ScrollPhase {
    /// Returns true if the position may still change without new input
    pub fn is_active(&self) -> bool {
        !matches!(self, ScrollPhase::Idle)
    }

    /// Next phase for a signal, or `None` if the signal does not apply
    pub fn on_event(&self, signal: ScrollSignal) -> Option<Self> {
        match (self, signal) {
            // User input always hands control back to the easing
            (ScrollPhase::Idle, ScrollSignal::Input) => Some(ScrollPhase::Animating),
            (ScrollPhase::Native, ScrollSignal::Input) => Some(ScrollPhase::Animating),
            (ScrollPhase::Animating, ScrollSignal::Input) => None,

            (ScrollPhase::Animating, ScrollSignal::Settled) => Some(ScrollPhase::Idle),

            (ScrollPhase::Idle, ScrollSignal::NativeStarted) => Some(ScrollPhase::Native),
            (ScrollPhase::Animating, ScrollSignal::NativeStarted) => Some(ScrollPhase::Native),

            (ScrollPhase::Native, ScrollSignal::NativeLanded) => Some(ScrollPhase::Idle),

            _ => None,
        }
    }
}

// ============================================================================
// Scroll Physics
// ============================================================================

/// Position integration for the driver, independent of any document
#[derive(Clone, Debug)]
pub struct ScrollPhysics {
    pub config: ScrollConfig,
    position: f32,
    target: f32,
    /// Position the current easing started from
    origin: f32,
    elapsed_ms: f32,
    limit: f32,
    last_tick_position: f32,
    velocity: f32,
    phase: ScrollPhase,
}

impl Default for ScrollPhysics {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollPhysics {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            position: 0.0,
            target: 0.0,
            origin: 0.0,
            elapsed_ms: 0.0,
            limit: 0.0,
            last_tick_position: 0.0,
            velocity: 0.0,
            phase: ScrollPhase::Idle,
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn limit(&self) -> f32 {
        self.limit
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn state(&self) -> ScrollState {
        ScrollState {
            position: self.position,
            velocity: self.velocity,
        }
    }

    fn transition(&mut self, signal: ScrollSignal) {
        if let Some(next) = self.phase.on_event(signal) {
            self.phase = next;
        }
    }

    /// Update the scrollable range, pulling position and target inside it
    pub fn set_limit(&mut self, limit: f32) {
        self.limit = limit.max(0.0);
        self.target = self.target.clamp(0.0, self.limit);
        self.position = self.position.clamp(0.0, self.limit);
        self.origin = self.origin.clamp(0.0, self.limit);
    }

    /// Apply a wheel delta (positive scrolls down)
    pub fn apply_wheel(&mut self, delta_y: f32) {
        let smooth = self.config.smooth_wheel;
        self.scroll_by(delta_y * self.config.wheel_multiplier, smooth);
    }

    /// Apply a touch drag distance (positive scrolls down)
    pub fn apply_touch(&mut self, delta_y: f32) {
        self.scroll_by(delta_y * self.config.touch_multiplier, true);
    }

    /// Move the target and restart the easing from the current position
    pub fn scroll_by(&mut self, delta: f32, smooth: bool) {
        self.scroll_to(self.target + delta, smooth);
    }

    /// Set the target directly
    pub fn scroll_to(&mut self, target: f32, smooth: bool) {
        self.target = target.clamp(0.0, self.limit);
        if smooth {
            self.origin = self.position;
            self.elapsed_ms = 0.0;
            self.transition(ScrollSignal::Input);
        } else {
            self.position = self.target;
            self.transition(ScrollSignal::Input);
            self.transition(ScrollSignal::Settled);
        }
    }

    /// The host started its own smooth scroll
    pub fn begin_native(&mut self) {
        self.transition(ScrollSignal::NativeStarted);
    }

    /// Adopt a position set outside the driver
    pub fn follow_native(&mut self, position: f32) {
        self.position = position.clamp(0.0, self.limit);
        self.target = self.position;
        self.origin = self.position;
    }

    /// The host smooth scroll finished at `position`
    pub fn land_native(&mut self, position: f32) {
        self.follow_native(position);
        self.transition(ScrollSignal::NativeLanded);
    }

    /// Advance the easing by `dt_ms` and recompute velocity
    pub fn tick(&mut self, dt_ms: f32) -> ScrollState {
        if self.phase == ScrollPhase::Animating {
            self.elapsed_ms += dt_ms;
            let t = if self.config.duration_ms > 0.0 {
                self.elapsed_ms / self.config.duration_ms
            } else {
                1.0
            };
            if t >= 1.0 {
                self.position = self.target;
                self.transition(ScrollSignal::Settled);
            } else {
                let eased = self.config.easing.apply(t);
                self.position = self.origin + (self.target - self.origin) * eased;
            }
        }

        self.position = self.position.clamp(0.0, self.limit);
        self.velocity = self.position - self.last_tick_position;
        self.last_tick_position = self.position;
        self.state()
    }
}

// ============================================================================
// Driver
// ============================================================================

/// Scroll subscriber callback
pub type ScrollSubscriber = Box<dyn FnMut(ScrollState)>;

struct DriverInner {
    physics: ScrollPhysics,
    subscribers: SlotMap<SubscriberId, Option<ScrollSubscriber>>,
    /// Last y of each active touch
    touches: FxHashMap<u64, f32>,
    /// Input arrived since the last frame
    input_pending: bool,
    listeners: SmallVec<[ListenerId; 2]>,
    tick: Option<TickCallbackId>,
}

impl DriverInner {
    fn on_input(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Wheel { delta_y, .. } => {
                self.physics.apply_wheel(*delta_y);
                self.input_pending = true;
            }
            InputEvent::Touch(touch) => match touch.phase {
                TouchPhase::Started => {
                    self.touches.insert(touch.id, touch.y);
                }
                TouchPhase::Moved => {
                    if let Some(last) = self.touches.insert(touch.id, touch.y) {
                        // Dragging the finger up scrolls the page down
                        self.physics.apply_touch(last - touch.y);
                        self.input_pending = true;
                    }
                }
                TouchPhase::Ended | TouchPhase::Cancelled => {
                    self.touches.remove(&touch.id);
                }
            },
            InputEvent::Pointer(_) => {}
        }
    }

    fn on_frame(&mut self, dt_ms: f32, doc: &mut Document) -> ScrollState {
        self.physics.set_limit(doc.max_scroll());

        let input = std::mem::take(&mut self.input_pending);
        if doc.is_native_scrolling() {
            if input {
                // User input takes over from the host scroll
                doc.cancel_native_scroll();
            } else {
                self.physics.begin_native();
                if doc.advance_native_scroll(dt_ms) {
                    self.physics.follow_native(doc.scroll_y());
                } else {
                    tracing::debug!("SmoothScroll: native scroll landed at {:.0}", doc.scroll_y());
                    self.physics.land_native(doc.scroll_y());
                }
            }
        } else if !input
            && self.physics.phase() == ScrollPhase::Idle
            && (doc.scroll_y() - self.physics.position()).abs() > SYNC_EPSILON
        {
            self.physics.follow_native(doc.scroll_y());
        }

        let state = self.physics.tick(dt_ms);
        if self.physics.phase() != ScrollPhase::Native {
            doc.set_scroll_y(state.position);
        }
        state
    }
}

/// The smooth scroll driver
///
/// Owns the virtual scroll position. Consumers read it through
/// [`state`](Self::state) or by subscribing; they never write it.
pub struct SmoothScroll {
    inner: Rc<RefCell<DriverInner>>,
    scheduler: SchedulerHandle,
}

impl SmoothScroll {
    /// Attach the driver to the document's wheel/touch input and the
    /// scheduler's scroll phase
    pub fn mount(config: ScrollConfig, scheduler: &SchedulerHandle, doc: &mut Document) -> Result<Self> {
        scheduler.ensure_alive()?;

        let mut physics = ScrollPhysics::new(config);
        physics.set_limit(doc.max_scroll());
        physics.follow_native(doc.scroll_y());

        let inner = Rc::new(RefCell::new(DriverInner {
            physics,
            subscribers: SlotMap::with_key(),
            touches: FxHashMap::default(),
            input_pending: false,
            listeners: SmallVec::new(),
            tick: None,
        }));

        let mut listeners = SmallVec::new();
        for kind in [EventKind::Wheel, EventKind::Touch] {
            let weak = Rc::downgrade(&inner);
            listeners.push(doc.add_listener(ListenerTarget::Window, kind, move |event| {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().on_input(event);
                }
            }));
        }

        let weak = Rc::downgrade(&inner);
        let tick = scheduler.add_tick_callback(TickPhase::Scroll, move |frame: &FrameInfo, doc: &mut Document| {
            if let Some(inner) = weak.upgrade() {
                Self::pump(&inner, frame.dt_ms, doc);
            }
        });

        {
            let mut state = inner.borrow_mut();
            state.listeners = listeners;
            state.tick = tick;
        }

        tracing::debug!(
            "SmoothScroll: mounted (duration {}ms, wheel x{}, touch x{})",
            config.duration_ms,
            config.wheel_multiplier,
            config.touch_multiplier
        );
        Ok(Self {
            inner,
            scheduler: scheduler.clone(),
        })
    }

    fn pump(inner: &Rc<RefCell<DriverInner>>, dt_ms: f32, doc: &mut Document) {
        let (state, ids) = {
            let mut inner = inner.borrow_mut();
            let state = inner.on_frame(dt_ms, doc);
            let ids: SmallVec<[SubscriberId; 4]> = inner.subscribers.keys().collect();
            (state, ids)
        };

        for id in ids {
            let subscriber = inner
                .borrow_mut()
                .subscribers
                .get_mut(id)
                .and_then(Option::take);
            if let Some(mut subscriber) = subscriber {
                subscriber(state);
                if let Some(slot) = inner.borrow_mut().subscribers.get_mut(id) {
                    *slot = Some(subscriber);
                }
            }
        }
    }

    /// Latest published state
    pub fn state(&self) -> ScrollState {
        self.inner.borrow().physics.state()
    }

    pub fn phase(&self) -> ScrollPhase {
        self.inner.borrow().physics.phase()
    }

    pub fn target(&self) -> f32 {
        self.inner.borrow().physics.target()
    }

    /// Receive the scroll state after every tick
    pub fn subscribe<F>(&self, subscriber: F) -> SubscriberId
    where
        F: FnMut(ScrollState) + 'static,
    {
        self.inner
            .borrow_mut()
            .subscribers
            .insert(Some(Box::new(subscriber)))
    }

    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.inner.borrow_mut().subscribers.remove(id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Programmatic scroll, eased unless `immediate`
    pub fn scroll_to(&self, target: f32, immediate: bool) {
        let mut inner = self.inner.borrow_mut();
        inner.physics.scroll_to(target, !immediate);
        inner.input_pending = true;
    }

    /// Detach from the document and the scheduler
    ///
    /// Safe to call more than once.
    pub fn destroy(&self, doc: &mut Document) {
        let mut inner = self.inner.borrow_mut();
        for id in inner.listeners.drain(..) {
            doc.remove_listener(id);
        }
        if let Some(id) = inner.tick.take() {
            self.scheduler.remove_tick_callback(id);
            tracing::debug!("SmoothScroll: destroyed");
        }
        inner.subscribers.clear();
    }

    /// Weak read-only view for components that must not keep the driver alive
    pub fn reader(&self) -> ScrollReader {
        ScrollReader {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl Drop for SmoothScroll {
    fn drop(&mut self) {
        // Listeners hold weak references and go quiet on their own
        if let Some(id) = self.inner.borrow_mut().tick.take() {
            self.scheduler.remove_tick_callback(id);
        }
    }
}

/// Weak read access to a [`SmoothScroll`]
#[derive(Clone)]
pub struct ScrollReader {
    inner: Weak<RefCell<DriverInner>>,
}

impl ScrollReader {
    /// Latest state, or the resting default once the driver is gone
    pub fn state(&self) -> ScrollState {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow().physics.state())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_animation::FrameScheduler;
    use folio_platform::{ElementKind, Rect, Size, TouchEvent};
    use std::cell::Cell;

    fn physics() -> ScrollPhysics {
        let mut physics = ScrollPhysics::default();
        physics.set_limit(2000.0);
        physics
    }

    fn tall_document() -> Document {
        let mut doc = Document::new(Size::new(1000.0, 800.0));
        let main = doc.create_element(ElementKind::Main, None);
        doc.set_bounds(main, Rect::new(0.0, 0.0, 1000.0, 3000.0));
        doc
    }

    fn run_frames(scheduler: &FrameScheduler, doc: &mut Document, start: f64, frames: usize) -> f64 {
        let mut ts = start;
        for _ in 0..frames {
            scheduler.tick(ts, doc);
            ts += 16.0;
        }
        ts
    }

    #[test]
    fn test_phase_transitions() {
        assert_eq!(ScrollPhase::Idle.on_event(ScrollSignal::Input), Some(ScrollPhase::Animating));
        assert_eq!(ScrollPhase::Animating.on_event(ScrollSignal::Input), None);
        assert_eq!(ScrollPhase::Animating.on_event(ScrollSignal::Settled), Some(ScrollPhase::Idle));
        assert_eq!(
            ScrollPhase::Animating.on_event(ScrollSignal::NativeStarted),
            Some(ScrollPhase::Native)
        );
        assert_eq!(ScrollPhase::Native.on_event(ScrollSignal::Input), Some(ScrollPhase::Animating));
        assert_eq!(ScrollPhase::Idle.on_event(ScrollSignal::NativeLanded), None);
    }

    #[test]
    fn test_wheel_eases_toward_target() {
        let mut physics = physics();
        physics.apply_wheel(100.0);
        assert_eq!(physics.target(), 100.0);
        assert_eq!(physics.phase(), ScrollPhase::Animating);

        let mut last = 0.0;
        for _ in 0..10 {
            let state = physics.tick(16.0);
            assert!(state.position >= last);
            assert!(state.position < 100.0);
            last = state.position;
        }

        for _ in 0..100 {
            physics.tick(16.0);
        }
        assert_eq!(physics.position(), 100.0);
        assert_eq!(physics.phase(), ScrollPhase::Idle);
        assert_eq!(physics.velocity(), 0.0);
    }

    #[test]
    fn test_input_restarts_from_current_position() {
        let mut physics = physics();
        physics.apply_wheel(100.0);
        for _ in 0..5 {
            physics.tick(16.0);
        }
        let mid = physics.position();
        physics.apply_wheel(100.0);
        assert_eq!(physics.target(), 200.0);
        // The restarted easing begins where the previous one was
        let next = physics.tick(0.0).position;
        assert!((next - mid - (200.0 - mid) * 0.001).abs() < 1e-3);
    }

    #[test]
    fn test_position_clamped_to_limit() {
        let mut physics = physics();
        physics.apply_wheel(-500.0);
        assert_eq!(physics.target(), 0.0);
        physics.apply_wheel(10_000.0);
        assert_eq!(physics.target(), 2000.0);
        for _ in 0..200 {
            let state = physics.tick(16.0);
            assert!((0.0..=2000.0).contains(&state.position));
        }

        physics.set_limit(500.0);
        assert_eq!(physics.position(), 500.0);
        assert_eq!(physics.target(), 500.0);
    }

    #[test]
    fn test_multipliers() {
        let mut physics = physics();
        physics.apply_touch(30.0);
        assert_eq!(physics.target(), 60.0);

        let mut config = ScrollConfig::default();
        config.smooth_wheel = false;
        config.wheel_multiplier = 0.5;
        let mut physics = ScrollPhysics::new(config);
        physics.set_limit(2000.0);
        physics.apply_wheel(100.0);
        assert_eq!(physics.position(), 50.0);
        assert_eq!(physics.phase(), ScrollPhase::Idle);
        assert_eq!(physics.tick(16.0).velocity, 50.0);
        assert_eq!(physics.tick(16.0).velocity, 0.0);
    }

    #[test]
    fn test_short_document_stays_at_zero() {
        let mut physics = ScrollPhysics::default();
        physics.set_limit(-100.0);
        physics.apply_wheel(300.0);
        for _ in 0..10 {
            assert_eq!(physics.tick(16.0), ScrollState::default());
        }
    }

    #[test]
    fn test_driver_advances_without_subscribers() {
        let mut doc = tall_document();
        let scheduler = FrameScheduler::new();
        let scroll = SmoothScroll::mount(ScrollConfig::default(), &scheduler.handle(), &mut doc).unwrap();
        scheduler.start();

        doc.dispatch(&InputEvent::Wheel {
            delta_x: 0.0,
            delta_y: 400.0,
        });
        run_frames(&scheduler, &mut doc, 0.0, 120);

        assert_eq!(scroll.state().position, 400.0);
        assert_eq!(doc.scroll_y(), 400.0);
        assert_eq!(scroll.phase(), ScrollPhase::Idle);
    }

    #[test]
    fn test_touch_drag_scrolls() {
        let mut doc = tall_document();
        let scheduler = FrameScheduler::new();
        let scroll = SmoothScroll::mount(ScrollConfig::default(), &scheduler.handle(), &mut doc).unwrap();
        for (phase, y) in [
            (TouchPhase::Started, 500.0),
            (TouchPhase::Moved, 450.0),
            (TouchPhase::Moved, 400.0),
            (TouchPhase::Ended, 400.0),
        ] {
            doc.dispatch(&InputEvent::Touch(TouchEvent { id: 1, phase, x: 0.0, y }));
        }
        assert_eq!(scroll.target(), 200.0);
    }

    #[test]
    fn test_subscribers_receive_state() {
        let mut doc = tall_document();
        let scheduler = FrameScheduler::new();
        let scroll = SmoothScroll::mount(ScrollConfig::default(), &scheduler.handle(), &mut doc).unwrap();
        let seen = Rc::new(Cell::new(ScrollState::default()));
        let sub = {
            let seen = Rc::clone(&seen);
            scroll.subscribe(move |state| seen.set(state))
        };
        scheduler.start();
        scroll.scroll_to(300.0, true);
        run_frames(&scheduler, &mut doc, 0.0, 1);
        assert_eq!(seen.get(), ScrollState { position: 300.0, velocity: 300.0 });

        assert!(scroll.unsubscribe(sub));
        scroll.scroll_to(0.0, true);
        run_frames(&scheduler, &mut doc, 16.0, 5);
        assert_eq!(seen.get().position, 300.0);
    }

    #[test]
    fn test_native_scroll_resync() {
        let mut doc = tall_document();
        let target = doc.create_element(ElementKind::Section, None);
        doc.set_bounds(target, Rect::new(0.0, 1500.0, 1000.0, 800.0));

        let scheduler = FrameScheduler::new();
        let scroll = SmoothScroll::mount(ScrollConfig::default(), &scheduler.handle(), &mut doc).unwrap();
        scheduler.start();

        assert!(doc.scroll_into_view(target));
        let ts = run_frames(&scheduler, &mut doc, 0.0, 10);
        assert_eq!(scroll.phase(), ScrollPhase::Native);
        assert!(scroll.state().position > 0.0);

        run_frames(&scheduler, &mut doc, ts, 60);
        assert_eq!(scroll.phase(), ScrollPhase::Idle);
        assert_eq!(scroll.state().position, 1500.0);

        // Wheel input continues from where the host landed
        doc.dispatch(&InputEvent::Wheel {
            delta_x: 0.0,
            delta_y: 100.0,
        });
        assert_eq!(scroll.target(), 1600.0);
    }

    #[test]
    fn test_input_cancels_native_scroll() {
        let mut doc = tall_document();
        let target = doc.create_element(ElementKind::Section, None);
        doc.set_bounds(target, Rect::new(0.0, 1500.0, 1000.0, 800.0));
        let scheduler = FrameScheduler::new();
        let scroll = SmoothScroll::mount(ScrollConfig::default(), &scheduler.handle(), &mut doc).unwrap();
        scheduler.start();

        doc.scroll_into_view(target);
        let ts = run_frames(&scheduler, &mut doc, 0.0, 5);
        doc.dispatch(&InputEvent::Wheel {
            delta_x: 0.0,
            delta_y: 50.0,
        });
        run_frames(&scheduler, &mut doc, ts, 1);
        assert!(!doc.is_native_scrolling());
        assert_eq!(scroll.phase(), ScrollPhase::Animating);
    }

    #[test]
    fn test_destroy_detaches() {
        let mut doc = tall_document();
        let scheduler = FrameScheduler::new();
        let scroll = SmoothScroll::mount(ScrollConfig::default(), &scheduler.handle(), &mut doc).unwrap();
        assert_eq!(doc.listener_count(EventKind::Wheel), 1);
        assert_eq!(scheduler.callback_count(), 1);

        scroll.destroy(&mut doc);
        scroll.destroy(&mut doc);
        assert_eq!(doc.listener_count(EventKind::Wheel), 0);
        assert_eq!(doc.listener_count(EventKind::Touch), 0);
        assert_eq!(scheduler.callback_count(), 0);
    }

    #[test]
    fn test_mount_requires_live_scheduler() {
        let mut doc = tall_document();
        let handle = FrameScheduler::new().handle();
        assert!(SmoothScroll::mount(ScrollConfig::default(), &handle, &mut doc).is_err());
    }
}
