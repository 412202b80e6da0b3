//! Fixed navigation bar
//!
//! Slides in after the loading gate, gains the `scrolled` class once the
//! page leaves the top, and holds the in-page links.

use folio_animation::{Easing, FrameInfo, Position, Props, TickPhase, Timeline};
use folio_motion::AnimationScope;
use folio_platform::{Document, ElementId, ElementKind, Rect};

use super::{columns, link, registered, Section};
use crate::error::Result;

/// Intro start, timed to land just before the hero intro
pub const NAV_INTRO_DELAY_MS: u32 = 1500;

/// Class present while the page is scrolled past [`SCROLLED_THRESHOLD`]
pub const SCROLLED_CLASS: &str = "scrolled";

/// Host scroll position beyond which the bar counts as scrolled
pub const SCROLLED_THRESHOLD: f32 = 100.0;

const HEIGHT: f32 = 80.0;
const LINKS: [&str; 4] = ["#work", "#services", "#about", "#testimonials"];
const CTA: &str = "#footer";

pub struct Navigation {
    root: ElementId,
    links: Vec<ElementId>,
}

impl Navigation {
    pub fn build(doc: &mut Document, width: f32) -> Self {
        let root = doc.create_element(ElementKind::Nav, None);
        let bar = Rect::new(0.0, 0.0, width, HEIGHT);
        doc.set_bounds(root, bar);

        // logo, links, call to action
        let hrefs = std::iter::once("#").chain(LINKS).chain(std::iter::once(CTA));
        let slots = columns(bar, LINKS.len() + 2);
        let links = slots.zip(hrefs).map(|(bounds, href)| link(doc, root, href, bounds)).collect();

        Self { root, links }
    }

    /// Logo, section links and call to action, in order
    pub fn links(&self) -> &[ElementId] {
        &self.links
    }

    /// Drop the scrolled state after the scope is reverted
    pub fn reset(&self, doc: &mut Document) {
        doc.remove_class(self.root, SCROLLED_CLASS);
    }
}

impl Section for Navigation {
    fn root(&self) -> ElementId {
        self.root
    }

    fn animate(&self, scope: &mut AnimationScope, doc: &mut Document) -> Result<()> {
        let mut intro = Timeline::new().with_delay(NAV_INTRO_DELAY_MS);
        intro.from_to(
            self.root,
            Props::new().y(-100.0).opacity(0.0),
            Props::new().y(0.0).opacity(1.0),
            1000,
            Easing::EaseOutExpo,
            Position::Sequence,
        );
        let intro = registered(scope.add_timeline(intro, doc))?;
        scope.scheduler().play(intro);

        let root = self.root;
        registered(scope.add_tick_callback(TickPhase::Effects, move |_: &FrameInfo, doc: &mut Document| {
            let scrolled = doc.scroll_y() > SCROLLED_THRESHOLD;
            doc.toggle_class(root, SCROLLED_CLASS, scrolled);
        }))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;
    use folio_platform::Property;

    fn mount(h: &mut Harness) -> (Navigation, AnimationScope) {
        let nav = Navigation::build(&mut h.doc, h.layout.viewport_width);
        let mut scope = h.scope("navigation");
        nav.animate(&mut scope, &mut h.doc).unwrap();
        (nav, scope)
    }

    #[test]
    fn test_intro_after_delay() {
        let mut h = Harness::new();
        let (nav, _scope) = mount(&mut h);
        assert_eq!(nav.links().len(), 6);
        assert_eq!(h.doc.get_style(nav.root(), Property::Y), Some(-100.0));

        h.advance(1400.0);
        assert_eq!(h.doc.get_style(nav.root(), Property::Opacity), Some(0.0));
        h.advance(1200.0);
        assert_eq!(h.doc.get_style(nav.root(), Property::Y), Some(0.0));
        assert_eq!(h.doc.get_style(nav.root(), Property::Opacity), Some(1.0));
    }

    #[test]
    fn test_scrolled_class_tracks_host_scroll() {
        let mut h = Harness::new();
        let (nav, mut scope) = mount(&mut h);

        h.scroll(SCROLLED_THRESHOLD);
        h.advance(16.0);
        assert!(!h.doc.has_class(nav.root(), SCROLLED_CLASS));

        h.scroll(SCROLLED_THRESHOLD + 1.0);
        h.advance(16.0);
        assert!(h.doc.has_class(nav.root(), SCROLLED_CLASS));

        h.scroll(0.0);
        h.advance(16.0);
        assert!(!h.doc.has_class(nav.root(), SCROLLED_CLASS));

        h.scroll(500.0);
        h.advance(16.0);
        scope.revert(&mut h.doc);
        nav.reset(&mut h.doc);
        assert!(!h.doc.has_class(nav.root(), SCROLLED_CLASS));
        assert!(h.doc.style(nav.root()).unwrap().is_empty());
    }
}
