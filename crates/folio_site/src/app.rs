//! Site assembly and frame loop

use std::collections::BTreeMap;

use folio_animation::FrameScheduler;
use folio_motion::{
    AnimationScope, EasedCursor, LinkActivation, LinkTarget, LoadingGate, SkewEffect, SmoothScroll,
    TriggerEngine,
};
use folio_platform::{
    Document, ElementId, ElementKind, Event, PlatformError, PointerCapabilities, Rect, Size,
    ViewportEvent,
};

use crate::config::SiteConfig;
use crate::error::{Result, SiteError};
use crate::sections::{Navigation, Section, SectionKind};

/// Class of the element skewed by scroll momentum
pub const SKEW_CONTAINER_CLASS: &str = "skew-container";

/// A section currently in the document
struct Mounted {
    section: Box<dyn Section>,
    scope: AnimationScope,
}

/// The whole site: document, scheduler and every motion component
///
/// Construction order is the frame order's dependency order: the scroll
/// driver first, then the trigger engine that reads it, then everything
/// that declares timelines.
pub struct Site {
    config: SiteConfig,
    doc: Document,
    scheduler: FrameScheduler,
    scroll: SmoothScroll,
    triggers: TriggerEngine,
    skew: SkewEffect,
    cursor: Option<EasedCursor>,
    gate: Option<LoadingGate>,
    navigation: Navigation,
    navigation_scope: AnimationScope,
    container: ElementId,
    main: ElementId,
    sections: BTreeMap<SectionKind, Mounted>,
    torn_down: bool,
}

impl Site {
    /// Build the page and start the motion layer
    pub fn mount(config: SiteConfig, capabilities: PointerCapabilities) -> Result<Self> {
        config.validate()?;
        let layout = config.layout;
        let mut doc = Document::new(layout.viewport());

        let container = doc.create_element(ElementKind::Div, None);
        doc.add_class(container, SKEW_CONTAINER_CLASS);
        let main = doc.create_element(ElementKind::Main, Some(container));

        let mut sections = BTreeMap::new();
        let mut pending = Vec::with_capacity(SectionKind::ALL.len());
        for kind in SectionKind::ALL {
            pending.push((kind, kind.build(&mut doc, main, &layout)));
        }
        let height: f32 = SectionKind::ALL.iter().map(|kind| kind.height(&layout)).sum();
        let page = Rect::new(0.0, 0.0, layout.viewport_width, height);
        doc.set_bounds(container, page);
        doc.set_bounds(main, page);
        let navigation = Navigation::build(&mut doc, layout.viewport_width);

        let scheduler = FrameScheduler::new();
        scheduler.set_max_frame_delta(config.scheduler.max_frame_delta_ms);
        let handle = scheduler.handle();

        let scroll = SmoothScroll::mount(config.scroll.into(), &handle, &mut doc)?;
        let triggers = TriggerEngine::mount(&handle, &scroll)?;
        let skew = SkewEffect::mount(config.skew.into(), container, &handle, &scroll)?;
        let cursor = EasedCursor::mount(config.cursor.into(), capabilities, &handle, &mut doc)?;

        let mut navigation_scope = AnimationScope::new("navigation", &handle, &triggers.handle());
        navigation.animate(&mut navigation_scope, &mut doc)?;

        for (kind, section) in pending {
            let mut scope = AnimationScope::new(kind.name(), &handle, &triggers.handle());
            section.animate(&mut scope, &mut doc)?;
            tracing::debug!("Site: mounted {kind}");
            sections.insert(kind, Mounted { section, scope });
        }

        let gate = if config.gate.enabled {
            let overlay = doc.create_element(ElementKind::Div, None);
            doc.add_class(overlay, "loading-overlay");
            doc.set_bounds(overlay, Rect::new(0.0, 0.0, layout.viewport_width, layout.viewport_height));
            let mark = doc.create_element(ElementKind::Span, Some(overlay));
            doc.add_class(mark, "loading-mark");
            Some(LoadingGate::mount(overlay, mark, &handle, &mut doc)?)
        } else {
            None
        };

        // Deliver records from the build so the cursor sees the final tree
        doc.flush_mutations();
        scheduler.start();
        tracing::info!(
            "Site: mounted {} sections, page height {:.0}px, cursor {}",
            sections.len(),
            height,
            if cursor.is_some() { "on" } else { "off" }
        );

        Ok(Self {
            config,
            doc,
            scheduler,
            scroll,
            triggers,
            skew,
            cursor,
            gate,
            navigation,
            navigation_scope,
            container,
            main,
            sections,
            torn_down: false,
        })
    }

    // =========================================================================
    // Host events
    // =========================================================================

    /// Route a host event
    ///
    /// Returns whether animations are still running after a frame event;
    /// input and viewport events return true.
    pub fn handle_event(&mut self, event: Event) -> bool {
        if self.torn_down {
            return false;
        }
        match event {
            Event::Input(input) => {
                self.doc.dispatch(&input);
                true
            }
            Event::Viewport(ViewportEvent::Resized { width, height }) => {
                self.resize(Size::new(width, height));
                true
            }
            Event::Frame { timestamp_ms } => self.frame(timestamp_ms),
        }
    }

    /// Run one frame: every scheduler phase, then mutation delivery
    ///
    /// Returns whether any timeline is still playing.
    pub fn frame(&mut self, timestamp_ms: f64) -> bool {
        if self.torn_down {
            return false;
        }
        let active = self.scheduler.tick(timestamp_ms, &mut self.doc);
        self.doc.flush_mutations();
        active
    }

    fn resize(&mut self, viewport: Size) {
        tracing::debug!("Site: viewport {}x{}", viewport.width, viewport.height);
        self.doc.set_viewport(viewport);
        self.triggers.refresh();
    }

    // =========================================================================
    // Links
    // =========================================================================

    /// Activate an `href`
    pub fn activate_href(&mut self, href: &str) -> Result<LinkActivation> {
        if self.torn_down {
            return Err(SiteError::TornDown);
        }
        Ok(LinkTarget::parse(href)?.activate(&mut self.doc))
    }

    /// Activate an anchor element (a click on it)
    pub fn activate(&mut self, element: ElementId) -> Result<LinkActivation> {
        let href = self
            .doc
            .element(element)
            .and_then(|e| e.attribute("href"))
            .map(str::to_owned)
            .ok_or_else(|| PlatformError::ElementNotFound(format!("{element:?} with href")))?;
        self.activate_href(&href)
    }

    // =========================================================================
    // Conditional sections
    // =========================================================================

    /// Remove a section and release everything it acquired
    ///
    /// Returns false if the section was not mounted. Its layout slot is kept.
    pub fn unmount_section(&mut self, kind: SectionKind) -> bool {
        let Some(mut mounted) = self.sections.remove(&kind) else {
            return false;
        };
        mounted.scope.revert(&mut self.doc);
        self.doc.remove_element(mounted.section.root());
        self.triggers.refresh();
        tracing::debug!("Site: unmounted {kind}");
        true
    }

    /// Rebuild a previously unmounted section in its slot
    ///
    /// Returns false if it is already mounted.
    pub fn mount_section(&mut self, kind: SectionKind) -> Result<bool> {
        if self.torn_down {
            return Err(SiteError::TornDown);
        }
        if self.sections.contains_key(&kind) {
            return Ok(false);
        }
        let section = kind.build(&mut self.doc, self.main, &self.config.layout);
        let mut scope = AnimationScope::new(kind.name(), &self.scheduler.handle(), &self.triggers.handle());
        if let Err(err) = section.animate(&mut scope, &mut self.doc) {
            scope.revert(&mut self.doc);
            self.doc.remove_element(section.root());
            return Err(err);
        }
        self.triggers.refresh();
        self.sections.insert(kind, Mounted { section, scope });
        tracing::debug!("Site: mounted {kind}");
        Ok(true)
    }

    pub fn is_section_mounted(&self, kind: SectionKind) -> bool {
        self.sections.contains_key(&kind)
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Release every component, listener and timeline
    ///
    /// Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        if let Some(gate) = self.gate.as_mut() {
            gate.teardown(&mut self.doc);
        }
        if let Some(cursor) = self.cursor.as_ref() {
            cursor.destroy(&mut self.doc);
        }
        self.skew.destroy(Some(&self.scroll), &mut self.doc);

        // Page order reversed, navigation last
        while let Some((kind, mut mounted)) = self.sections.pop_last() {
            mounted.scope.revert(&mut self.doc);
            tracing::trace!("Site: reverted {kind}");
        }
        self.navigation_scope.revert(&mut self.doc);
        self.navigation.reset(&mut self.doc);

        self.triggers.destroy(Some(&self.scroll));
        self.scroll.destroy(&mut self.doc);
        self.scheduler.stop();
        self.doc.flush_mutations();
        self.torn_down = true;
        tracing::info!("Site: torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn scroll(&self) -> &SmoothScroll {
        &self.scroll
    }

    pub fn triggers(&self) -> &TriggerEngine {
        &self.triggers
    }

    pub fn skew(&self) -> &SkewEffect {
        &self.skew
    }

    pub fn cursor(&self) -> Option<&EasedCursor> {
        self.cursor.as_ref()
    }

    pub fn gate(&self) -> Option<&LoadingGate> {
        self.gate.as_ref()
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    /// Element skewed by scroll momentum
    pub fn skew_container(&self) -> ElementId {
        self.container
    }

    /// Root element of a mounted section
    pub fn section_root(&self, kind: SectionKind) -> Option<ElementId> {
        self.sections.get(&kind).map(|mounted| mounted.section.root())
    }
}

impl Drop for Site {
    fn drop(&mut self) {
        self.teardown();
    }
}
