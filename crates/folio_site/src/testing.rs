//! Test fixture for driving sections without the full site

use folio_animation::FrameScheduler;
use folio_motion::{AnimationScope, TriggerEngine};
use folio_platform::{Document, ElementId, ElementKind, Rect};

use crate::config::LayoutSettings;
use crate::sections::{Section, SectionKind};

const FRAME_MS: f64 = 16.0;

/// A document, scheduler and explicitly updated trigger engine
pub(crate) struct Harness {
    pub doc: Document,
    pub scheduler: FrameScheduler,
    pub engine: TriggerEngine,
    pub main: ElementId,
    pub layout: LayoutSettings,
    now: f64,
}

impl Harness {
    pub fn new() -> Self {
        crate::logging::init_for_tests();
        let layout = LayoutSettings::default();
        let mut doc = Document::new(layout.viewport());
        let main = doc.create_element(ElementKind::Main, None);
        doc.set_bounds(main, Rect::new(0.0, 0.0, layout.viewport_width, 20_000.0));

        let scheduler = FrameScheduler::new();
        let engine = TriggerEngine::new(&scheduler.handle());
        scheduler.start();
        scheduler.tick(0.0, &mut doc);

        Self {
            doc,
            scheduler,
            engine,
            main,
            layout,
            now: 0.0,
        }
    }

    pub fn scope(&self, name: &'static str) -> AnimationScope {
        AnimationScope::new(name, &self.scheduler.handle(), &self.engine.handle())
    }

    /// Build and animate one section at its layout slot
    pub fn mount_section(&mut self, kind: SectionKind) -> (Box<dyn Section>, AnimationScope) {
        let section = kind.build(&mut self.doc, self.main, &self.layout);
        let mut scope = self.scope(kind.name());
        section
            .animate(&mut scope, &mut self.doc)
            .expect("section animates");
        (section, scope)
    }

    /// Evaluate triggers at a scroll position
    pub fn scroll(&mut self, y: f32) {
        self.doc.set_scroll_y(y);
        self.engine.update(y, &mut self.doc);
    }

    /// Run frames covering `ms` of time
    pub fn advance(&mut self, ms: f64) {
        let end = self.now + ms;
        while self.now < end {
            self.now = (self.now + FRAME_MS).min(end);
            self.scheduler.tick(self.now, &mut self.doc);
        }
    }
}
