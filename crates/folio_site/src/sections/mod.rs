//! Page sections
//!
//! Each section builds its own slice of the document and declares its
//! animations into an [`AnimationScope`]. Sections stack vertically inside
//! the skew container in [`SectionKind::ALL`] order; the navigation bar sits
//! outside that flow.

mod about;
mod footer;
mod hero;
mod navigation;
mod process;
mod services;
mod testimonials;
mod work;

pub use about::About;
pub use footer::{Footer, CONTACT_MAILTO, MARQUEE_HOVER_RATE, MARQUEE_PERIOD_MS};
pub use hero::{Hero, HERO_INTRO_DELAY_MS};
pub use navigation::{Navigation, NAV_INTRO_DELAY_MS, SCROLLED_CLASS, SCROLLED_THRESHOLD};
pub use process::Process;
pub use services::{Services, SERVICE_ARROW_SCALE, SERVICE_HOVER_MS, SERVICE_TITLE_SHIFT};
pub use testimonials::Testimonials;
pub use work::{Project, Work, PROJECTS};

use folio_animation::{AnimationError, Easing};
use folio_motion::AnimationScope;
use folio_platform::{Document, ElementId, ElementKind, Rect};

use crate::config::LayoutSettings;
use crate::error::Result;

/// Entrance curve shared by the scroll reveals (`power3.out`)
pub(crate) const REVEAL_EASE: Easing = Easing::EaseOutQuart;

/// Nominal length of a scrubbed timeline; only its progress matters
pub(crate) const SCRUB_MS: u32 = 1000;

/// A mounted page section
pub trait Section {
    /// Outermost element of the section
    fn root(&self) -> ElementId;

    /// Declare the section's timelines and triggers
    fn animate(&self, scope: &mut AnimationScope, doc: &mut Document) -> Result<()>;
}

/// The sections of the page, in page order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    Hero,
    Work,
    Services,
    Process,
    About,
    Testimonials,
    Footer,
}

impl SectionKind {
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Hero,
        SectionKind::Work,
        SectionKind::Services,
        SectionKind::Process,
        SectionKind::About,
        SectionKind::Testimonials,
        SectionKind::Footer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::Work => "work",
            SectionKind::Services => "services",
            SectionKind::Process => "process",
            SectionKind::About => "about",
            SectionKind::Testimonials => "testimonials",
            SectionKind::Footer => "footer",
        }
    }

    /// Height of the section's layout slot
    pub fn height(self, layout: &LayoutSettings) -> f32 {
        match self {
            SectionKind::Hero => layout.hero_height,
            SectionKind::Work => work::HEADER_HEIGHT + layout.work_card_height * layout.work_cards as f32,
            SectionKind::Services => layout.services_height,
            SectionKind::Process => layout.process_height,
            SectionKind::About => layout.about_height,
            SectionKind::Testimonials => layout.testimonials_height,
            SectionKind::Footer => layout.footer_height,
        }
    }

    /// Top edge of the section's slot, in document coordinates
    pub fn top(self, layout: &LayoutSettings) -> f32 {
        Self::ALL
            .iter()
            .take_while(|kind| **kind != self)
            .map(|kind| kind.height(layout))
            .sum()
    }

    /// Build the section's elements under `parent`
    pub fn build(self, doc: &mut Document, parent: ElementId, layout: &LayoutSettings) -> Box<dyn Section> {
        let slot = Rect::new(0.0, self.top(layout), layout.viewport_width, self.height(layout));
        match self {
            SectionKind::Hero => Box::new(Hero::build(doc, parent, slot)),
            SectionKind::Work => Box::new(Work::build(doc, parent, slot, layout)),
            SectionKind::Services => Box::new(Services::build(doc, parent, slot)),
            SectionKind::Process => Box::new(Process::build(doc, parent, slot)),
            SectionKind::About => Box::new(About::build(doc, parent, slot)),
            SectionKind::Testimonials => Box::new(Testimonials::build(doc, parent, slot, layout)),
            SectionKind::Footer => Box::new(Footer::build(doc, parent, slot)),
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Building helpers
// =============================================================================

/// Create an element with layout bounds
pub(crate) fn place(doc: &mut Document, kind: ElementKind, parent: ElementId, bounds: Rect) -> ElementId {
    let id = doc.create_element(kind, Some(parent));
    doc.set_bounds(id, bounds);
    id
}

/// Create an element with a class and layout bounds
pub(crate) fn place_with_class(
    doc: &mut Document,
    kind: ElementKind,
    parent: ElementId,
    class: &str,
    bounds: Rect,
) -> ElementId {
    let id = place(doc, kind, parent, bounds);
    doc.add_class(id, class);
    id
}

/// Create an anchor pointing at `href`
pub(crate) fn link(doc: &mut Document, parent: ElementId, href: &str, bounds: Rect) -> ElementId {
    let id = place(doc, ElementKind::Anchor, parent, bounds);
    doc.set_attribute(id, "href", href);
    id
}

/// Split `rect` into `count` equal rows
pub(crate) fn rows(rect: Rect, count: usize) -> impl Iterator<Item = Rect> {
    let height = if count == 0 { 0.0 } else { rect.height / count as f32 };
    (0..count).map(move |i| Rect::new(rect.x, rect.y + height * i as f32, rect.width, height))
}

/// Split `rect` into `count` equal columns
pub(crate) fn columns(rect: Rect, count: usize) -> impl Iterator<Item = Rect> {
    let width = if count == 0 { 0.0 } else { rect.width / count as f32 };
    (0..count).map(move |i| Rect::new(rect.x + width * i as f32, rect.y, width, rect.height))
}

/// Horizontal band of `slot` starting `offset` below its top
pub(crate) fn band(slot: Rect, offset: f32, height: f32) -> Rect {
    Rect::new(slot.x, slot.y + offset, slot.width, height)
}

/// Unwrap a registration that only fails once the scheduler is gone
pub(crate) fn registered<T>(value: Option<T>) -> Result<T> {
    value.ok_or_else(|| AnimationError::SchedulerDropped.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_stack_in_page_order() {
        let layout = LayoutSettings::default();
        assert_eq!(SectionKind::Hero.top(&layout), 0.0);
        assert_eq!(SectionKind::Work.top(&layout), layout.hero_height);
        for pair in SectionKind::ALL.windows(2) {
            assert_eq!(pair[1].top(&layout), pair[0].top(&layout) + pair[0].height(&layout));
        }
    }

    #[test]
    fn test_rows_and_columns_cover_rect() {
        let rect = Rect::new(10.0, 100.0, 300.0, 90.0);
        let split: Vec<Rect> = rows(rect, 3).collect();
        assert_eq!(split.len(), 3);
        assert_eq!(split[2].y, 160.0);
        assert_eq!(split[2].height, 30.0);

        let split: Vec<Rect> = columns(rect, 2).collect();
        assert_eq!(split[1].x, 160.0);
        assert_eq!(split[1].width, 150.0);
        assert_eq!(columns(rect, 0).count(), 0);
    }
}
