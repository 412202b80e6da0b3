//! Loading gate
//!
//! A one-shot splash that covers the page at mount, plays a fixed
//! non-interruptible intro and then removes its overlay for good:
//!
//! | step | target  | animation                            | time (ms)  |
//! |------|---------|--------------------------------------|------------|
//! | 1    | mark    | scale 1.5 -> 1, opacity 0 -> 1       | 0 - 800    |
//! | 2    | mark    | scale -> 0.9, opacity -> 0           | 1100 - 1500|
//! | 3    | overlay | y_percent 0 -> -100                  | 1300 - 2100|

use std::cell::Cell;
use std::rc::Rc;

use folio_animation::{
    AnimationError, Easing, Position, Props, Result, SchedulerHandle, Timeline, TimelineId,
};
use folio_platform::{Document, ElementId};

/// Total length of the gate intro
pub const GATE_DURATION_MS: f32 = 2100.0;

/// Gate lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GateState {
    /// Overlay visible, intro playing
    #[default]
    Active,
    /// Intro finished and the overlay was removed
    Completed,
    /// Torn down before the intro finished
    Cancelled,
}

/// The loading gate
pub struct LoadingGate {
    overlay: ElementId,
    mark: ElementId,
    timeline: Option<TimelineId>,
    state: Rc<Cell<GateState>>,
    scheduler: SchedulerHandle,
}

impl LoadingGate {
    /// Build the intro timeline for an existing overlay and logo mark, render
    /// its first frame and start it
    pub fn mount(
        overlay: ElementId,
        mark: ElementId,
        scheduler: &SchedulerHandle,
        doc: &mut Document,
    ) -> Result<Self> {
        scheduler.ensure_alive()?;

        let timeline = scheduler
            .register_timeline(Self::intro(overlay, mark))
            .ok_or(AnimationError::SchedulerDropped)?;
        scheduler.render_now(timeline, doc);

        let state = Rc::new(Cell::new(GateState::Active));
        {
            let state = Rc::clone(&state);
            let handle = scheduler.clone();
            scheduler.on_complete(timeline, move |doc| {
                if state.get() != GateState::Active {
                    return;
                }
                state.set(GateState::Completed);
                handle.remove_timeline(timeline);
                doc.remove_element(overlay);
                tracing::info!("LoadingGate: complete");
            });
        }
        scheduler.play(timeline);
        tracing::debug!("LoadingGate: mounted");

        Ok(Self {
            overlay,
            mark,
            timeline: Some(timeline),
            state,
            scheduler: scheduler.clone(),
        })
    }

    fn intro(overlay: ElementId, mark: ElementId) -> Timeline {
        let mut timeline = Timeline::new();
        timeline.from_to(
            mark,
            Props::new().scale(1.5).opacity(0.0),
            Props::new().scale(1.0).opacity(1.0),
            800,
            Easing::EaseOutExpo,
            Position::Sequence,
        );
        timeline.to(
            mark,
            Props::new().scale(0.9).opacity(0.0),
            400,
            Easing::EaseInCubic,
            Position::AfterPrevious(300.0),
        );
        timeline.to(
            overlay,
            Props::new().y_percent(-100.0),
            800,
            Easing::EaseInOutExpo,
            Position::AfterPrevious(-200.0),
        );
        timeline
    }

    /// Whether the overlay is still covering the page
    pub fn is_active(&self) -> bool {
        self.state.get() == GateState::Active
    }

    pub fn state(&self) -> GateState {
        self.state.get()
    }

    pub fn overlay(&self) -> ElementId {
        self.overlay
    }

    pub fn mark(&self) -> ElementId {
        self.mark
    }

    /// Cancel the intro if it is still running and remove the overlay
    ///
    /// Safe to call more than once; a completed gate is left as is.
    pub fn teardown(&mut self, doc: &mut Document) {
        let Some(timeline) = self.timeline.take() else {
            return;
        };
        if self.state.get() == GateState::Active {
            self.scheduler.remove_timeline(timeline);
            doc.remove_element(self.overlay);
            self.state.set(GateState::Cancelled);
            tracing::debug!("LoadingGate: cancelled");
        }
    }
}

impl Drop for LoadingGate {
    fn drop(&mut self) {
        if let Some(timeline) = self.timeline.take() {
            if self.state.get() == GateState::Active {
                self.scheduler.remove_timeline(timeline);
                self.state.set(GateState::Cancelled);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_animation::FrameScheduler;
    use folio_platform::{ElementKind, Property, Size};

    fn setup() -> (Document, FrameScheduler, ElementId, ElementId) {
        let mut doc = Document::new(Size::new(1000.0, 800.0));
        let overlay = doc.create_element(ElementKind::Div, None);
        let mark = doc.create_element(ElementKind::Div, Some(overlay));
        let scheduler = FrameScheduler::new();
        scheduler.start();
        (doc, scheduler, overlay, mark)
    }

    fn run(scheduler: &FrameScheduler, doc: &mut Document, from_ms: f64, to_ms: f64) {
        let mut ts = from_ms;
        while ts <= to_ms {
            scheduler.tick(ts, doc);
            ts += 16.0;
        }
    }

    #[test]
    fn test_intro_layout() {
        let (_, _, overlay, mark) = setup();
        let timeline = LoadingGate::intro(overlay, mark);
        assert_eq!(timeline.tween_count(), 3);
        assert_eq!(timeline.duration_ms(), GATE_DURATION_MS);
    }

    #[test]
    fn test_first_frame_hidden_mark() {
        let (mut doc, scheduler, overlay, mark) = setup();
        let gate = LoadingGate::mount(overlay, mark, &scheduler.handle(), &mut doc).unwrap();
        assert!(gate.is_active());
        assert_eq!(doc.get_style(mark, Property::Scale), Some(1.5));
        assert_eq!(doc.get_style(mark, Property::Opacity), Some(0.0));
    }

    #[test]
    fn test_completes_exactly_once() {
        let (mut doc, scheduler, overlay, mark) = setup();
        let gate = LoadingGate::mount(overlay, mark, &scheduler.handle(), &mut doc).unwrap();

        run(&scheduler, &mut doc, 0.0, 2000.0);
        assert!(gate.is_active());
        assert!(doc.contains(overlay));

        run(&scheduler, &mut doc, 2016.0, 2200.0);
        assert_eq!(gate.state(), GateState::Completed);
        assert!(!doc.contains(overlay));
        assert!(!doc.contains(mark));
        assert_eq!(scheduler.timeline_count(), 0);

        // Never reappears
        run(&scheduler, &mut doc, 2216.0, 6000.0);
        assert_eq!(gate.state(), GateState::Completed);
        assert!(!doc.contains(overlay));
    }

    #[test]
    fn test_teardown_mid_animation() {
        let (mut doc, scheduler, overlay, mark) = setup();
        let mut gate = LoadingGate::mount(overlay, mark, &scheduler.handle(), &mut doc).unwrap();
        run(&scheduler, &mut doc, 0.0, 1000.0);

        gate.teardown(&mut doc);
        gate.teardown(&mut doc);
        assert_eq!(gate.state(), GateState::Cancelled);
        assert!(!gate.is_active());
        assert_eq!(scheduler.timeline_count(), 0);
        assert!(!doc.contains(overlay));

        run(&scheduler, &mut doc, 1016.0, 3000.0);
        assert_eq!(gate.state(), GateState::Cancelled);
    }

    #[test]
    fn test_teardown_after_completion_keeps_state() {
        let (mut doc, scheduler, overlay, mark) = setup();
        let mut gate = LoadingGate::mount(overlay, mark, &scheduler.handle(), &mut doc).unwrap();
        run(&scheduler, &mut doc, 0.0, 2200.0);
        gate.teardown(&mut doc);
        assert_eq!(gate.state(), GateState::Completed);
    }
}
