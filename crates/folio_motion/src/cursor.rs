//! Eased cursor
//!
//! Pointer moves only record the raw position. Once per frame the marker
//! moves a fixed fraction of the remaining distance toward it, so it
//! converges geometrically and never overshoots.
//!
//! Hover tracking listens for enter/leave on every interactive element
//! (anchors, buttons, `data-cursor-hover`). The listened set is rebuilt on
//! every subtree mutation, so elements added after mount are picked up.
//!
//! On devices whose pointer cannot hover (per [`MixedPointerPolicy`]) nothing
//! is mounted: no marker element and no pointer listener.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_animation::{FrameInfo, Result, SchedulerHandle, TickCallbackId, TickPhase};
use folio_platform::{
    Document, ElementId, ElementKind, EventKind, InputEvent, InteractiveRegistry, ListenerId,
    ListenerTarget, MixedPointerPolicy, MutationRecord, ObserverId, Point, PointerCapabilities,
    PointerEvent, Property, HOVER_ATTRIBUTE,
};
use rustc_hash::FxHashMap;

/// Class of the marker element
pub const CURSOR_CLASS: &str = "cursor";

/// Class toggled on the marker while an interactive element is hovered
pub const HOVER_CLASS: &str = "hover";

/// Cursor configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorConfig {
    /// Fraction of the remaining distance covered each frame
    pub smoothing: f32,
    pub mixed_pointer: MixedPointerPolicy,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.15,
            mixed_pointer: MixedPointerPolicy::default(),
        }
    }
}

/// Raw and rendered cursor positions
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorState {
    pub raw_x: f32,
    pub raw_y: f32,
    pub rendered_x: f32,
    pub rendered_y: f32,
    pub hovering: bool,
}

impl CursorState {
    pub fn raw(&self) -> Point {
        Point::new(self.raw_x, self.raw_y)
    }

    pub fn rendered(&self) -> Point {
        Point::new(self.rendered_x, self.rendered_y)
    }

    /// Distance still to cover
    pub fn error(&self) -> f32 {
        self.rendered().distance(self.raw())
    }

    /// Record a pointer position
    pub fn set_raw(&mut self, x: f32, y: f32) {
        self.raw_x = x;
        self.raw_y = y;
    }

    /// Move the rendered position toward the raw one
    pub fn step(&mut self, smoothing: f32) {
        let smoothing = smoothing.clamp(0.0, 1.0);
        self.rendered_x += (self.raw_x - self.rendered_x) * smoothing;
        self.rendered_y += (self.raw_y - self.rendered_y) * smoothing;
    }
}

// ============================================================================
// Hover Tracking
// ============================================================================

/// Enter/leave listeners on the current interactive set
#[derive(Default)]
struct HoverTracker {
    listeners: FxHashMap<ElementId, [ListenerId; 2]>,
    hovered: Option<ElementId>,
}

impl HoverTracker {
    /// Match the listened set to the document's interactive targets
    ///
    /// Returns false if the hovered element left the set.
    fn resync(&mut self, doc: &mut Document, cursor: &Weak<RefCell<CursorInner>>) -> bool {
        let targets = doc.interactive_targets();

        let stale: Vec<ElementId> = self
            .listeners
            .keys()
            .filter(|id| !targets.contains(id))
            .copied()
            .collect();
        for id in stale {
            if let Some(ids) = self.listeners.remove(&id) {
                for listener in ids {
                    doc.remove_listener(listener);
                }
            }
        }

        for id in targets {
            if self.listeners.contains_key(&id) {
                continue;
            }
            let enter = {
                let cursor = cursor.clone();
                doc.add_listener(ListenerTarget::Element(id), EventKind::PointerEnter, move |_| {
                    if let Some(cursor) = cursor.upgrade() {
                        cursor.borrow_mut().set_hovered(Some(id));
                    }
                })
            };
            let leave = {
                let cursor = cursor.clone();
                doc.add_listener(ListenerTarget::Element(id), EventKind::PointerLeave, move |_| {
                    if let Some(cursor) = cursor.upgrade() {
                        let mut cursor = cursor.borrow_mut();
                        if cursor.hover.hovered == Some(id) {
                            cursor.set_hovered(None);
                        }
                    }
                })
            };
            self.listeners.insert(id, [enter, leave]);
        }

        match self.hovered {
            Some(id) => self.listeners.contains_key(&id),
            None => true,
        }
    }

    fn len(&self) -> usize {
        self.listeners.len()
    }

    fn clear(&mut self, doc: &mut Document) {
        for (_, ids) in self.listeners.drain() {
            for listener in ids {
                doc.remove_listener(listener);
            }
        }
        self.hovered = None;
    }
}

// ============================================================================
// Cursor
// ============================================================================

struct CursorInner {
    state: CursorState,
    smoothing: f32,
    marker: ElementId,
    hover: HoverTracker,
    move_listener: Option<ListenerId>,
    observer: Option<ObserverId>,
    tick: Option<TickCallbackId>,
}

impl CursorInner {
    fn set_hovered(&mut self, target: Option<ElementId>) {
        self.hover.hovered = target;
        self.state.hovering = target.is_some();
    }

    fn render(&mut self, doc: &mut Document) {
        self.state.step(self.smoothing);
        doc.set_style(self.marker, Property::X, self.state.rendered_x);
        doc.set_style(self.marker, Property::Y, self.state.rendered_y);
        doc.toggle_class(self.marker, HOVER_CLASS, self.state.hovering);
    }
}

/// The eased cursor renderer
pub struct EasedCursor {
    inner: Rc<RefCell<CursorInner>>,
    scheduler: SchedulerHandle,
}

impl EasedCursor {
    /// Mount the cursor, or return `None` on a device without hover
    pub fn mount(
        config: CursorConfig,
        capabilities: PointerCapabilities,
        scheduler: &SchedulerHandle,
        doc: &mut Document,
    ) -> Result<Option<Self>> {
        scheduler.ensure_alive()?;
        if !capabilities.supports_hover_effects(config.mixed_pointer) {
            tracing::debug!(
                "EasedCursor: skipped for {:?} pointer ({:?} policy)",
                capabilities.primary,
                config.mixed_pointer
            );
            return Ok(None);
        }

        let marker = doc.create_element(ElementKind::Div, None);
        doc.add_class(marker, CURSOR_CLASS);

        let inner = Rc::new(RefCell::new(CursorInner {
            state: CursorState::default(),
            smoothing: config.smoothing,
            marker,
            hover: HoverTracker::default(),
            move_listener: None,
            observer: None,
            tick: None,
        }));
        let weak = Rc::downgrade(&inner);

        let move_listener = {
            let weak = weak.clone();
            doc.add_listener(ListenerTarget::Window, EventKind::PointerMove, move |event| {
                if let InputEvent::Pointer(PointerEvent::Moved { x, y }) = event {
                    if let Some(inner) = weak.upgrade() {
                        inner.borrow_mut().state.set_raw(*x, *y);
                    }
                }
            })
        };

        let observer = {
            let weak = weak.clone();
            doc.observe(Box::new(move |doc: &mut Document, records: &[MutationRecord]| {
                let relevant = records.iter().any(|record| match record {
                    MutationRecord::ChildAdded { .. } | MutationRecord::ChildRemoved { .. } => true,
                    MutationRecord::AttributeChanged { name, .. } => name == HOVER_ATTRIBUTE,
                });
                if !relevant {
                    return;
                }
                if let Some(inner) = weak.upgrade() {
                    let mut cursor = inner.borrow_mut();
                    if !cursor.hover.resync(doc, &weak) {
                        cursor.set_hovered(None);
                    }
                }
            }))
        };

        let tick = {
            let weak = weak.clone();
            scheduler.add_tick_callback(TickPhase::Effects, move |_: &FrameInfo, doc: &mut Document| {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().render(doc);
                }
            })
        };

        {
            let mut cursor = inner.borrow_mut();
            cursor.hover.resync(doc, &weak);
            cursor.move_listener = Some(move_listener);
            cursor.observer = Some(observer);
            cursor.tick = tick;
            tracing::debug!("EasedCursor: mounted, tracking {} interactive element(s)", cursor.hover.len());
        }

        Ok(Some(Self {
            inner,
            scheduler: scheduler.clone(),
        }))
    }

    pub fn state(&self) -> CursorState {
        self.inner.borrow().state
    }

    pub fn marker(&self) -> ElementId {
        self.inner.borrow().marker
    }

    pub fn is_hovering(&self) -> bool {
        self.inner.borrow().state.hovering
    }

    /// Number of interactive elements currently listened to
    pub fn tracked_count(&self) -> usize {
        self.inner.borrow().hover.len()
    }

    /// Remove the marker and every listener
    ///
    /// Safe to call more than once.
    pub fn destroy(&self, doc: &mut Document) {
        let mut inner = self.inner.borrow_mut();
        if let Some(id) = inner.tick.take() {
            self.scheduler.remove_tick_callback(id);
        }
        if let Some(id) = inner.observer.take() {
            doc.disconnect(id);
        }
        if let Some(id) = inner.move_listener.take() {
            doc.remove_listener(id);
            let marker = inner.marker;
            doc.remove_element(marker);
            tracing::debug!("EasedCursor: destroyed");
        }
        inner.hover.clear(doc);
    }
}

impl Drop for EasedCursor {
    fn drop(&mut self) {
        if let Some(id) = self.inner.borrow_mut().tick.take() {
            self.scheduler.remove_tick_callback(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_animation::FrameScheduler;
    use folio_platform::{PointerPrecision, Selector, Size};

    fn mounted() -> (Document, FrameScheduler, EasedCursor) {
        let mut doc = Document::new(Size::new(1000.0, 800.0));
        let scheduler = FrameScheduler::new();
        let cursor = EasedCursor::mount(
            CursorConfig::default(),
            PointerCapabilities::mouse(),
            &scheduler.handle(),
            &mut doc,
        )
        .unwrap()
        .unwrap();
        scheduler.start();
        (doc, scheduler, cursor)
    }

    fn move_to(doc: &mut Document, x: f32, y: f32) {
        doc.dispatch(&InputEvent::Pointer(PointerEvent::Moved { x, y }));
    }

    #[test]
    fn test_step_geometric() {
        let mut state = CursorState::default();
        state.set_raw(100.0, 0.0);
        state.step(0.15);
        assert!((state.rendered_x - 15.0).abs() < 1e-4);
        state.step(0.15);
        assert!((state.rendered_x - 27.75).abs() < 1e-4);
    }

    #[test]
    fn test_converges_without_overshoot() {
        let mut state = CursorState::default();
        state.set_raw(-40.0, 250.0);
        let mut last = state.error();
        for _ in 0..200 {
            state.step(0.15);
            assert!(state.rendered_x >= -40.0 && state.rendered_y <= 250.0);
            assert!(state.error() <= last);
            last = state.error();
        }
        assert!(last < 1e-3);
    }

    #[test]
    fn test_pointer_jump_error_bound() {
        let (mut doc, scheduler, cursor) = mounted();
        move_to(&mut doc, 0.0, 0.0);
        scheduler.tick(0.0, &mut doc);
        move_to(&mut doc, 100.0, 100.0);

        let initial = cursor.state().error();
        assert!((initial - 141.42).abs() < 0.01);
        for n in 1..=60 {
            scheduler.tick(n as f64 * 16.0, &mut doc);
            let bound = 0.85f32.powi(n) * initial + 1e-3;
            assert!(cursor.state().error() <= bound, "frame {n}");
        }

        let marker = cursor.marker();
        let x = doc.get_style(marker, Property::X).unwrap();
        assert!((x - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_raw_updates_synchronously() {
        let (mut doc, _scheduler, cursor) = mounted();
        move_to(&mut doc, 12.0, 34.0);
        let state = cursor.state();
        assert_eq!((state.raw_x, state.raw_y), (12.0, 34.0));
        assert_eq!((state.rendered_x, state.rendered_y), (0.0, 0.0));
    }

    #[test]
    fn test_coarse_pointer_mounts_nothing() {
        let mut doc = Document::new(Size::new(400.0, 800.0));
        let scheduler = FrameScheduler::new();
        for caps in [
            PointerCapabilities::touch(),
            PointerCapabilities::mixed(PointerPrecision::Coarse),
        ] {
            let cursor = EasedCursor::mount(CursorConfig::default(), caps, &scheduler.handle(), &mut doc).unwrap();
            assert!(cursor.is_none());
        }
        assert_eq!(doc.listener_count(EventKind::PointerMove), 0);
        assert!(doc.query(&Selector::class(CURSOR_CLASS)).is_empty());
        assert_eq!(doc.observer_count(), 0);
        assert_eq!(scheduler.callback_count(), 0);
    }

    #[test]
    fn test_hover_enter_leave() {
        let (mut doc, scheduler, cursor) = mounted();
        let link = doc.create_element(ElementKind::Anchor, None);
        doc.flush_mutations();

        doc.dispatch(&InputEvent::Pointer(PointerEvent::Enter { target: link }));
        assert!(cursor.is_hovering());
        scheduler.tick(0.0, &mut doc);
        assert!(doc.has_class(cursor.marker(), HOVER_CLASS));

        doc.dispatch(&InputEvent::Pointer(PointerEvent::Leave { target: link }));
        assert!(!cursor.is_hovering());
        scheduler.tick(16.0, &mut doc);
        assert!(!doc.has_class(cursor.marker(), HOVER_CLASS));
    }

    #[test]
    fn test_resync_on_mutation() {
        let (mut doc, _scheduler, cursor) = mounted();
        assert_eq!(cursor.tracked_count(), 0);

        let card = doc.create_element(ElementKind::Div, None);
        let button = doc.create_element(ElementKind::Button, Some(card));
        doc.flush_mutations();
        assert_eq!(cursor.tracked_count(), 1);

        doc.set_attribute(card, HOVER_ATTRIBUTE, "");
        doc.flush_mutations();
        assert_eq!(cursor.tracked_count(), 2);

        // Removing the hovered element clears hovering
        doc.dispatch(&InputEvent::Pointer(PointerEvent::Enter { target: button }));
        assert!(cursor.is_hovering());
        doc.remove_element(card);
        doc.flush_mutations();
        assert_eq!(cursor.tracked_count(), 0);
        assert!(!cursor.is_hovering());
        assert_eq!(doc.listener_count(EventKind::PointerEnter), 0);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let (mut doc, scheduler, cursor) = mounted();
        doc.create_element(ElementKind::Anchor, None);
        doc.flush_mutations();

        cursor.destroy(&mut doc);
        cursor.destroy(&mut doc);
        assert_eq!(doc.listener_count(EventKind::PointerMove), 0);
        assert_eq!(doc.listener_count(EventKind::PointerEnter), 0);
        assert_eq!(doc.observer_count(), 0);
        assert_eq!(scheduler.callback_count(), 0);
        assert!(doc.query(&Selector::class(CURSOR_CLASS)).is_empty());
    }
}
