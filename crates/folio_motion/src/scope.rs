//! Animation scopes
//!
//! A scope owns everything one section acquires at mount: timelines, scroll
//! triggers, tick callbacks and element listeners. [`AnimationScope::revert`]
//! releases all of it and restores the inline styles the timelines touched.
//! Dropping an unreverted scope still cancels its timelines, triggers and
//! callbacks; restoring styles and removing listeners needs the document
//! and only happens on `revert`.

use folio_animation::{
    FrameInfo, SchedulerHandle, TickCallbackId, TickPhase, Timeline, TimelineId,
};
use folio_platform::{Document, EventKind, InputEvent, ListenerId, ListenerTarget};
use smallvec::SmallVec;

use crate::trigger::{ScrollTrigger, TriggerHandle, TriggerId};

/// Owner of a section's animation resources
pub struct AnimationScope {
    name: &'static str,
    scheduler: SchedulerHandle,
    triggers: TriggerHandle,
    timelines: SmallVec<[TimelineId; 4]>,
    trigger_ids: SmallVec<[TriggerId; 4]>,
    callbacks: SmallVec<[TickCallbackId; 2]>,
    listeners: SmallVec<[ListenerId; 4]>,
    reverted: bool,
}

impl AnimationScope {
    pub fn new(name: &'static str, scheduler: &SchedulerHandle, triggers: &TriggerHandle) -> Self {
        Self {
            name,
            scheduler: scheduler.clone(),
            triggers: triggers.clone(),
            timelines: SmallVec::new(),
            trigger_ids: SmallVec::new(),
            callbacks: SmallVec::new(),
            listeners: SmallVec::new(),
            reverted: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn scheduler(&self) -> &SchedulerHandle {
        &self.scheduler
    }

    /// Register a timeline and render its current state right away, so
    /// `from` values are in place before the first frame
    pub fn add_timeline(&mut self, timeline: Timeline, doc: &mut Document) -> Option<TimelineId> {
        let id = self.scheduler.register_timeline(timeline)?;
        self.scheduler.render_now(id, doc);
        self.timelines.push(id);
        Some(id)
    }

    /// Register a trigger
    pub fn add_trigger(&mut self, trigger: ScrollTrigger) -> Option<TriggerId> {
        let id = self.triggers.add(trigger)?;
        self.trigger_ids.push(id);
        Some(id)
    }

    /// Register a timeline driven by a trigger
    pub fn add_triggered(
        &mut self,
        timeline: Timeline,
        trigger: ScrollTrigger,
        doc: &mut Document,
    ) -> Option<(TimelineId, TriggerId)> {
        let timeline = self.add_timeline(timeline, doc)?;
        let trigger = self.add_trigger(trigger.timeline(timeline))?;
        Some((timeline, trigger))
    }

    pub fn add_tick_callback<F>(&mut self, phase: TickPhase, callback: F) -> Option<TickCallbackId>
    where
        F: FnMut(&FrameInfo, &mut Document) + 'static,
    {
        let id = self.scheduler.add_tick_callback(phase, callback)?;
        self.callbacks.push(id);
        Some(id)
    }

    pub fn add_listener<F>(
        &mut self,
        doc: &mut Document,
        target: ListenerTarget,
        kind: EventKind,
        callback: F,
    ) -> ListenerId
    where
        F: FnMut(&InputEvent) + 'static,
    {
        let id = doc.add_listener(target, kind, callback);
        self.listeners.push(id);
        id
    }

    pub fn timelines(&self) -> &[TimelineId] {
        &self.timelines
    }

    pub fn triggers(&self) -> &[TriggerId] {
        &self.trigger_ids
    }

    pub fn is_reverted(&self) -> bool {
        self.reverted
    }

    /// Release everything and restore touched styles
    ///
    /// Safe to call more than once, and after a partial setup.
    pub fn revert(&mut self, doc: &mut Document) {
        if self.reverted {
            return;
        }
        self.release_scheduled();
        for id in self.listeners.drain(..) {
            doc.remove_listener(id);
        }
        // Latest first, so the earliest captured originals are restored last
        for id in self.timelines.drain(..).rev() {
            if let Some(mut timeline) = self.scheduler.remove_timeline(id) {
                timeline.revert(doc);
            }
        }
        self.reverted = true;
        tracing::debug!("{}: scope reverted", self.name);
    }

    fn release_scheduled(&mut self) {
        for id in self.trigger_ids.drain(..) {
            self.triggers.remove(id);
        }
        for id in self.callbacks.drain(..) {
            self.scheduler.remove_tick_callback(id);
        }
    }
}

impl Drop for AnimationScope {
    fn drop(&mut self) {
        if self.reverted {
            return;
        }
        self.release_scheduled();
        for id in self.timelines.drain(..) {
            self.scheduler.remove_timeline(id);
        }
        tracing::trace!("{}: scope dropped without revert", self.name);
    }
}

impl std::fmt::Debug for AnimationScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationScope")
            .field("name", &self.name)
            .field("timelines", &self.timelines.len())
            .field("triggers", &self.trigger_ids.len())
            .field("reverted", &self.reverted)
            .finish()
    }
}
