//! Footer: section reveal, link list and the hover-accelerated marquee

use folio_animation::{Easing, Position, Props, Timeline, TimelineId};
use folio_motion::{AnimationScope, ScrollTrigger};
use folio_platform::{
    Document, ElementId, ElementKind, EventKind, ListenerTarget, Property, Rect, HOVER_ATTRIBUTE,
};

use super::{band, columns, link, place, place_with_class, registered, rows, Section, REVEAL_EASE};
use crate::error::Result;

/// Time for the marquee to travel one copy of its content
pub const MARQUEE_PERIOD_MS: u32 = 20_000;

/// Marquee playback rate while hovered (halves the period)
pub const MARQUEE_HOVER_RATE: f32 = 2.0;

const LINKS: [&str; 6] = [
    "#work",
    "#services",
    "#about",
    "#testimonials",
    "#connect",
    "#privacy-policy",
];

/// Booking call to action and the contact line
pub const CONTACT_MAILTO: &str = "mailto:shrey.work.dev@gmail.com";

const SOCIAL: [&str; 3] = [
    "https://www.linkedin.com/in/shreychandpa/",
    "https://www.instagram.com/neezdutz/",
    "https://www.youtube.com/channel/UClfcLZnNC1p-aL1_04A9nUg",
];

/// Logo and privacy links lead back to the top of the page
const TOP: &str = "#";

pub struct Footer {
    root: ElementId,
    marquee: ElementId,
    content: ElementId,
}

impl Footer {
    pub fn build(doc: &mut Document, parent: ElementId, slot: Rect) -> Self {
        let root = place(doc, ElementKind::Footer, parent, slot);
        doc.set_id(root, "footer");

        let marquee_band = band(slot, 0.0, 200.0);
        let marquee = place_with_class(doc, ElementKind::Div, root, "marquee", marquee_band);
        doc.set_attribute(marquee, HOVER_ATTRIBUTE, "");
        // Two copies side by side; shifting by half loops seamlessly
        let content = place_with_class(
            doc,
            ElementKind::Div,
            marquee,
            "marquee-content",
            Rect::new(marquee_band.x, marquee_band.y, marquee_band.width * 2.0, marquee_band.height),
        );

        let cta = link(doc, root, CONTACT_MAILTO, band(slot, 220.0, 60.0));
        doc.add_class(cta, "btn-primary");
        doc.set_attribute(cta, HOVER_ATTRIBUTE, "");

        let mut grid = columns(band(slot, 320.0, 200.0), 3);
        if let (Some(logo), Some(nav), Some(contact)) = (grid.next(), grid.next(), grid.next()) {
            link(doc, root, TOP, logo);
            for (bounds, href) in rows(nav, LINKS.len()).zip(LINKS) {
                link(doc, root, href, bounds);
            }
            let mut lines = rows(contact, 2);
            if let (Some(email), Some(social)) = (lines.next(), lines.next()) {
                link(doc, root, CONTACT_MAILTO, email);
                for (bounds, href) in columns(social, SOCIAL.len()).zip(SOCIAL) {
                    let id = link(doc, root, href, bounds);
                    doc.set_attribute(id, HOVER_ATTRIBUTE, "");
                }
            }
        }

        let privacy = link(doc, root, TOP, band(slot, slot.height - 80.0, 40.0));
        doc.add_class(privacy, "privacy-link");

        Self {
            root,
            marquee,
            content,
        }
    }

    pub fn marquee(&self) -> ElementId {
        self.marquee
    }

    fn marquee_loop(&self) -> Timeline {
        let mut timeline = Timeline::new();
        timeline.from_to(
            self.content,
            Props::new().with(Property::XPercent, 0.0),
            Props::new().with(Property::XPercent, -50.0),
            MARQUEE_PERIOD_MS,
            Easing::Linear,
            Position::Sequence,
        );
        timeline.set_repeat(-1);
        timeline
    }

    fn hover_rate(&self, scope: &mut AnimationScope, doc: &mut Document, timeline: TimelineId) {
        for (kind, rate) in [(EventKind::PointerEnter, MARQUEE_HOVER_RATE), (EventKind::PointerLeave, 1.0)] {
            let scheduler = scope.scheduler().clone();
            scope.add_listener(doc, ListenerTarget::Element(self.marquee), kind, move |_| {
                scheduler.set_playback_rate(timeline, rate);
            });
        }
    }
}

impl Section for Footer {
    fn root(&self) -> ElementId {
        self.root
    }

    fn animate(&self, scope: &mut AnimationScope, doc: &mut Document) -> Result<()> {
        let mut reveal = Timeline::new();
        reveal.from_to(
            self.root,
            Props::new().y(100.0).opacity(0.0),
            Props::new().y(0.0).opacity(1.0),
            1000,
            REVEAL_EASE,
            Position::Sequence,
        );
        let trigger = ScrollTrigger::toggle(self.root, "top 90%")?;
        registered(scope.add_triggered(reveal, trigger, doc))?;

        let marquee = registered(scope.add_timeline(self.marquee_loop(), doc))?;
        scope.scheduler().play(marquee);
        self.hover_rate(scope, doc, marquee);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::SectionKind;
    use crate::testing::Harness;
    use folio_platform::{InputEvent, PointerEvent};

    #[test]
    fn test_marquee_loops_and_speeds_up_on_hover() {
        let mut h = Harness::new();
        let (_section, scope) = h.mount_section(SectionKind::Footer);
        let marquee = h.doc.query_str(".marquee").unwrap()[0];
        let content = h.doc.query_str(".marquee-content").unwrap()[0];
        let looping = scope.timelines()[1];

        h.advance(5000.0);
        let shift = h.doc.get_style(content, Property::XPercent).unwrap();
        assert!((shift + 12.5).abs() < 0.1, "shift {shift}");

        h.doc.dispatch(&InputEvent::Pointer(PointerEvent::Enter { target: marquee }));
        assert_eq!(
            h.scheduler.handle().with_timeline(looping, |t| t.playback_rate()),
            Some(MARQUEE_HOVER_RATE)
        );
        h.advance(5000.0);
        let shift = h.doc.get_style(content, Property::XPercent).unwrap();
        assert!((shift + 37.5).abs() < 0.1, "shift {shift}");

        // Wraps instead of finishing
        h.advance(5000.0);
        assert!(h.scheduler.handle().is_timeline_playing(looping));
        let shift = h.doc.get_style(content, Property::XPercent).unwrap();
        assert!((shift + 12.5).abs() < 0.1, "shift {shift}");

        h.doc.dispatch(&InputEvent::Pointer(PointerEvent::Leave { target: marquee }));
        assert_eq!(
            h.scheduler.handle().with_timeline(looping, |t| t.playback_rate()),
            Some(1.0)
        );
    }

    #[test]
    fn test_contact_and_top_links() {
        let mut h = Harness::new();
        let (section, _scope) = h.mount_section(SectionKind::Footer);
        let hrefs: Vec<String> = h
            .doc
            .query_str("[href]")
            .unwrap()
            .into_iter()
            .filter_map(|id| h.doc.element(id)?.attribute("href").map(str::to_owned))
            .collect();

        assert_eq!(hrefs.iter().filter(|href| *href == CONTACT_MAILTO).count(), 2);
        assert_eq!(hrefs.iter().filter(|href| *href == TOP).count(), 2);
        for href in LINKS.iter().chain(&SOCIAL) {
            assert!(hrefs.iter().any(|candidate| candidate == *href), "{href}");
        }
        let cta = h.doc.query_str(".btn-primary").unwrap()[0];
        assert!(h.doc.element(cta).unwrap().has_attribute(HOVER_ATTRIBUTE));

        // Everything sits inside the footer's slot
        let slot = h.doc.bounds(section.root()).unwrap();
        for id in h.doc.query_str("[href]").unwrap() {
            let bounds = h.doc.bounds(id).unwrap();
            assert!(bounds.top() >= slot.top() && bounds.bottom() <= slot.bottom());
        }
    }

    #[test]
    fn test_revert_removes_hover_listeners() {
        let mut h = Harness::new();
        let (_section, mut scope) = h.mount_section(SectionKind::Footer);
        assert_eq!(h.doc.listener_count(EventKind::PointerEnter), 1);
        scope.revert(&mut h.doc);
        assert_eq!(h.doc.listener_count(EventKind::PointerEnter), 0);
        assert_eq!(h.doc.listener_count(EventKind::PointerLeave), 0);
        let footer = h.doc.find_by_id("footer").unwrap();
        assert!(h.doc.style(footer).unwrap().is_empty());
    }
}
