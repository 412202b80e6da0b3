//! Scroll-trigger timeline engine
//!
//! Binds timelines to scroll position. A trigger watches one element and
//! resolves two points, `start` and `end`, into scroll offsets:
//!
//! ```text
//! offset = element_top + element_frac * element_height - viewport_frac * viewport_height
//! ```
//!
//! where a point is written `"<element edge> <viewport edge>"`, each edge being
//! `top`, `center`, `bottom` or a percentage (`"top 80%"`).
//!
//! Toggle triggers fire one of four [`ToggleAction`]s when the scroll
//! position crosses the points; scrub triggers seek their timeline (or call
//! an update callback) with the progress between them.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use folio_animation::{
    AnimationError, FrameInfo, Result, SchedulerHandle, TickCallbackId, TickPhase, TimelineId,
};
use folio_platform::{Document, ElementId};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::scroll::{SmoothScroll, SubscriberId};

new_key_type! {
    /// Handle to a registered scroll trigger
    pub struct TriggerId;
}

// ============================================================================
// Trigger Points
// ============================================================================

/// A point on the trigger element matched against a point in the viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerPoint {
    /// Fraction of the element height from its top edge
    pub element: f32,
    /// Fraction of the viewport height from its top edge
    pub viewport: f32,
}

impl TriggerPoint {
    pub const fn new(element: f32, viewport: f32) -> Self {
        Self { element, viewport }
    }

    /// Parse `"<element edge> <viewport edge>"`
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let (Some(element), Some(viewport), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(AnimationError::InvalidTriggerPoint(s.to_string()));
        };
        let edge = |token: &str| parse_edge(token).ok_or_else(|| AnimationError::InvalidTriggerPoint(s.to_string()));
        Ok(Self::new(edge(element)?, edge(viewport)?))
    }

    /// Scroll offset at which this point is reached
    pub fn resolve(&self, element_top: f32, element_height: f32, viewport_height: f32) -> f32 {
        element_top + self.element * element_height - self.viewport * viewport_height
    }
}

impl FromStr for TriggerPoint {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_edge(token: &str) -> Option<f32> {
    match token {
        "top" => Some(0.0),
        "center" => Some(0.5),
        "bottom" => Some(1.0),
        _ => {
            let percent: f32 = token.strip_suffix('%')?.parse().ok()?;
            percent.is_finite().then_some(percent / 100.0)
        }
    }
}

// ============================================================================
// Toggle Actions
// ============================================================================

/// What a toggle trigger does to its timeline on a crossing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToggleAction {
    Play,
    Pause,
    Resume,
    Reverse,
    Restart,
    /// Jump back to the start and stop
    Reset,
    /// Jump to the end and stop
    Complete,
    #[default]
    None,
}

impl ToggleAction {
    fn parse(token: &str) -> Option<Self> {
        Some(match token {
            "play" => ToggleAction::Play,
            "pause" => ToggleAction::Pause,
            "resume" => ToggleAction::Resume,
            "reverse" => ToggleAction::Reverse,
            "restart" => ToggleAction::Restart,
            "reset" => ToggleAction::Reset,
            "complete" => ToggleAction::Complete,
            "none" => ToggleAction::None,
            _ => return None,
        })
    }

    fn apply(self, scheduler: &SchedulerHandle, timeline: TimelineId) {
        match self {
            ToggleAction::Play => scheduler.play(timeline),
            ToggleAction::Pause => scheduler.pause(timeline),
            ToggleAction::Resume => scheduler.resume(timeline),
            ToggleAction::Reverse => scheduler.reverse(timeline),
            ToggleAction::Restart => scheduler.restart(timeline),
            ToggleAction::Reset => scheduler.set_progress(timeline, 0.0),
            ToggleAction::Complete => scheduler.set_progress(timeline, 1.0),
            ToggleAction::None => {}
        }
    }
}

/// Actions for enter, leave, enter-back and leave-back
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl Default for ToggleActions {
    /// `"play none none reverse"`
    fn default() -> Self {
        Self {
            on_enter: ToggleAction::Play,
            on_leave: ToggleAction::None,
            on_enter_back: ToggleAction::None,
            on_leave_back: ToggleAction::Reverse,
        }
    }
}

impl ToggleActions {
    /// Parse four space-separated actions, e.g. `"play none none reverse"`
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || AnimationError::InvalidTriggerPoint(format!("toggle actions '{s}'"));
        let actions: SmallVec<[ToggleAction; 4]> = s
            .split_whitespace()
            .map(|token| ToggleAction::parse(token).ok_or_else(invalid))
            .collect::<Result<_>>()?;
        match actions.as_slice() {
            [on_enter, on_leave, on_enter_back, on_leave_back] => Ok(Self {
                on_enter: *on_enter,
                on_leave: *on_leave,
                on_enter_back: *on_enter_back,
                on_leave_back: *on_leave_back,
            }),
            _ => Err(invalid()),
        }
    }
}

// ============================================================================
// Trigger Declarations
// ============================================================================

/// Callback receiving scrub progress
pub type ProgressCallback = Box<dyn FnMut(f32, &mut Document)>;

/// How a trigger drives its timeline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerMode {
    Toggle(ToggleActions),
    Scrub,
}

/// Where the scroll position is relative to a trigger's active range
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TriggerZone {
    /// Not evaluated yet
    #[default]
    Unknown,
    Before,
    Active,
    After,
}

/// Declaration of a scroll trigger
pub struct ScrollTrigger {
    element: ElementId,
    start: TriggerPoint,
    end: TriggerPoint,
    mode: TriggerMode,
    timeline: Option<TimelineId>,
    on_update: Option<ProgressCallback>,
}

impl ScrollTrigger {
    /// Toggle trigger with the default actions, active until `"bottom top"`
    pub fn toggle(element: ElementId, start: &str) -> Result<Self> {
        Ok(Self {
            element,
            start: TriggerPoint::parse(start)?,
            end: TriggerPoint::new(1.0, 0.0),
            mode: TriggerMode::Toggle(ToggleActions::default()),
            timeline: None,
            on_update: None,
        })
    }

    /// Scrub trigger between two points
    pub fn scrub(element: ElementId, start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            element,
            start: TriggerPoint::parse(start)?,
            end: TriggerPoint::parse(end)?,
            mode: TriggerMode::Scrub,
            timeline: None,
            on_update: None,
        })
    }

    /// Replace the end point
    pub fn end(mut self, end: &str) -> Result<Self> {
        self.end = TriggerPoint::parse(end)?;
        Ok(self)
    }

    /// Replace the toggle actions (turns a scrub trigger into a toggle one)
    pub fn actions(mut self, actions: ToggleActions) -> Self {
        self.mode = TriggerMode::Toggle(actions);
        self
    }

    /// Bind a timeline
    pub fn timeline(mut self, timeline: TimelineId) -> Self {
        self.timeline = Some(timeline);
        self
    }

    /// Receive scrub progress instead of (or as well as) seeking a timeline
    pub fn on_update<F>(mut self, callback: F) -> Self
    where
        F: FnMut(f32, &mut Document) + 'static,
    {
        self.on_update = Some(Box::new(callback));
        self
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn mode(&self) -> TriggerMode {
        self.mode
    }
}

impl fmt::Debug for ScrollTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollTrigger")
            .field("element", &self.element)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("mode", &self.mode)
            .field("timeline", &self.timeline)
            .finish()
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Resolved scroll range of a trigger
#[derive(Clone, Copy, Debug, PartialEq)]
struct Range {
    start: f32,
    end: f32,
}

impl Range {
    fn zone(&self, scroll: f32) -> TriggerZone {
        if scroll < self.start {
            TriggerZone::Before
        } else if scroll > self.end {
            TriggerZone::After
        } else {
            TriggerZone::Active
        }
    }

    fn progress(&self, scroll: f32) -> f32 {
        if self.end > self.start {
            ((scroll - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
        } else if scroll >= self.start {
            1.0
        } else {
            0.0
        }
    }
}

struct TriggerEntry {
    trigger: ScrollTrigger,
    range: Option<Range>,
    zone: TriggerZone,
    progress: Option<f32>,
}

/// Work collected while the engine is borrowed, applied after
enum Pending {
    Action(TimelineId, ToggleAction),
    Seek(TimelineId, f32),
    Update(TriggerId, f32),
}

struct EngineInner {
    triggers: SlotMap<TriggerId, TriggerEntry>,
    /// Latest scroll position from the driver
    scroll: f32,
    needs_refresh: bool,
}

/// Evaluates scroll triggers once per frame, after the scroll driver
pub struct TriggerEngine {
    inner: Rc<RefCell<EngineInner>>,
    scheduler: SchedulerHandle,
    tick: Option<TickCallbackId>,
    subscription: Option<SubscriberId>,
}

impl TriggerEngine {
    /// Create an engine that is updated explicitly with [`update`](Self::update)
    pub fn new(scheduler: &SchedulerHandle) -> Self {
        Self {
            inner: Rc::new(RefCell::new(EngineInner {
                triggers: SlotMap::with_key(),
                scroll: 0.0,
                needs_refresh: true,
            })),
            scheduler: scheduler.clone(),
            tick: None,
            subscription: None,
        }
    }

    /// Create an engine fed by a scroll driver and evaluated every frame in
    /// the trigger phase
    pub fn mount(scheduler: &SchedulerHandle, scroll: &SmoothScroll) -> Result<Self> {
        scheduler.ensure_alive()?;
        let mut engine = Self::new(scheduler);
        engine.inner.borrow_mut().scroll = scroll.state().position;

        let weak = Rc::downgrade(&engine.inner);
        engine.subscription = Some(scroll.subscribe(move |state| {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().scroll = state.position;
            }
        }));

        let weak = Rc::downgrade(&engine.inner);
        let handle = scheduler.clone();
        engine.tick = scheduler.add_tick_callback(TickPhase::Triggers, move |_: &FrameInfo, doc: &mut Document| {
            if let Some(inner) = weak.upgrade() {
                let scroll = inner.borrow().scroll;
                evaluate(&inner, &handle, scroll, doc);
            }
        });
        Ok(engine)
    }

    /// Weak handle for scopes to register and release triggers
    pub fn handle(&self) -> TriggerHandle {
        TriggerHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Re-resolve every trigger's offsets on the next update (layout changed)
    pub fn refresh(&self) {
        self.inner.borrow_mut().needs_refresh = true;
    }

    /// Evaluate every trigger against a scroll position
    pub fn update(&self, scroll: f32, doc: &mut Document) {
        self.inner.borrow_mut().scroll = scroll;
        evaluate(&self.inner, &self.scheduler, scroll, doc);
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Zone of a trigger as of the last update
    pub fn zone(&self, id: TriggerId) -> Option<TriggerZone> {
        self.inner.borrow().triggers.get(id).map(|entry| entry.zone)
    }

    /// Scrub progress of a trigger as of the last update
    pub fn progress(&self, id: TriggerId) -> Option<f32> {
        self.inner.borrow().triggers.get(id).and_then(|entry| entry.progress)
    }

    /// Stop evaluating; registered triggers are dropped
    ///
    /// Safe to call more than once.
    pub fn destroy(&mut self, scroll: Option<&SmoothScroll>) {
        if let Some(id) = self.tick.take() {
            self.scheduler.remove_tick_callback(id);
        }
        if let (Some(id), Some(scroll)) = (self.subscription.take(), scroll) {
            scroll.unsubscribe(id);
        }
        self.inner.borrow_mut().triggers.clear();
    }
}

impl Drop for TriggerEngine {
    fn drop(&mut self) {
        if let Some(id) = self.tick.take() {
            self.scheduler.remove_tick_callback(id);
        }
    }
}

fn resolve(trigger: &ScrollTrigger, doc: &Document) -> Option<Range> {
    let bounds = doc.bounds(trigger.element)?;
    let viewport = doc.viewport().height;
    Some(Range {
        start: trigger.start.resolve(bounds.top(), bounds.height, viewport),
        end: trigger.end.resolve(bounds.top(), bounds.height, viewport),
    })
}

fn evaluate(inner: &Rc<RefCell<EngineInner>>, scheduler: &SchedulerHandle, scroll: f32, doc: &mut Document) {
    let pending: Vec<Pending> = {
        let mut inner = inner.borrow_mut();
        let refresh = std::mem::take(&mut inner.needs_refresh);
        let mut pending = Vec::new();

        for (id, entry) in inner.triggers.iter_mut() {
            if refresh || entry.range.is_none() {
                entry.range = resolve(&entry.trigger, doc);
            }
            // Missing trigger elements are skipped
            let Some(range) = entry.range else {
                continue;
            };

            match entry.trigger.mode {
                TriggerMode::Toggle(actions) => {
                    let zone = range.zone(scroll);
                    let previous = std::mem::replace(&mut entry.zone, zone);
                    let Some(timeline) = entry.trigger.timeline else {
                        continue;
                    };
                    for action in crossings(previous, zone, &actions) {
                        tracing::trace!(?id, ?action, "trigger crossing");
                        pending.push(Pending::Action(timeline, action));
                    }
                }
                TriggerMode::Scrub => {
                    entry.zone = range.zone(scroll);
                    let progress = range.progress(scroll);
                    if entry.progress == Some(progress) {
                        continue;
                    }
                    entry.progress = Some(progress);
                    if let Some(timeline) = entry.trigger.timeline {
                        pending.push(Pending::Seek(timeline, progress));
                    }
                    if entry.trigger.on_update.is_some() {
                        pending.push(Pending::Update(id, progress));
                    }
                }
            }
        }
        pending
    };

    for work in pending {
        match work {
            Pending::Action(timeline, action) => action.apply(scheduler, timeline),
            Pending::Seek(timeline, progress) => scheduler.set_progress(timeline, progress),
            Pending::Update(id, progress) => {
                let callback = inner
                    .borrow_mut()
                    .triggers
                    .get_mut(id)
                    .and_then(|entry| entry.trigger.on_update.take());
                if let Some(mut callback) = callback {
                    callback(progress, doc);
                    if let Some(entry) = inner.borrow_mut().triggers.get_mut(id) {
                        entry.trigger.on_update.get_or_insert(callback);
                    }
                }
            }
        }
    }
}

/// Actions fired moving from one zone to another
///
/// Jumping across the whole range fires both crossings in order.
fn crossings(from: TriggerZone, to: TriggerZone, actions: &ToggleActions) -> SmallVec<[ToggleAction; 2]> {
    use TriggerZone::*;

    let fired: SmallVec<[ToggleAction; 2]> = match (from, to) {
        (Unknown | Before, Active) => smallvec::smallvec![actions.on_enter],
        (Unknown | Before, After) => smallvec::smallvec![actions.on_enter, actions.on_leave],
        (Active, After) => smallvec::smallvec![actions.on_leave],
        (After, Active) => smallvec::smallvec![actions.on_enter_back],
        (After, Before) => smallvec::smallvec![actions.on_enter_back, actions.on_leave_back],
        (Active, Before) => smallvec::smallvec![actions.on_leave_back],
        _ => SmallVec::new(),
    };
    fired
        .into_iter()
        .filter(|action| *action != ToggleAction::None)
        .collect()
}

/// Weak handle to a [`TriggerEngine`]
#[derive(Clone)]
pub struct TriggerHandle {
    inner: Weak<RefCell<EngineInner>>,
}

impl TriggerHandle {
    /// A handle that was never attached to an engine
    pub fn detached() -> Self {
        Self { inner: Weak::new() }
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Register a trigger; it is evaluated from the next update on
    pub fn add(&self, trigger: ScrollTrigger) -> Option<TriggerId> {
        self.inner.upgrade().map(|inner| {
            let id = inner.borrow_mut().triggers.insert(TriggerEntry {
                trigger,
                range: None,
                zone: TriggerZone::Unknown,
                progress: None,
            });
            tracing::trace!(?id, "trigger registered");
            id
        })
    }

    pub fn remove(&self, id: TriggerId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow_mut().triggers.remove(id).is_some())
            .unwrap_or(false)
    }

    pub fn contains(&self, id: TriggerId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow().triggers.contains_key(id))
            .unwrap_or(false)
    }
}

impl fmt::Debug for TriggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}
