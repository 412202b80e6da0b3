//! Services list
//!
//! Items stagger in as the section enters. Hovering an item slides its
//! title right, fades its description in and swells the arrow disc;
//! leaving plays the same motion backward from wherever it is.

use folio_animation::{Easing, Position, Props, Timeline, TimelineId};
use folio_motion::{AnimationScope, ScrollTrigger};
use folio_platform::{Document, ElementId, ElementKind, EventKind, ListenerTarget, Rect, HOVER_ATTRIBUTE};

use super::{band, place, place_with_class, registered, rows, Section, REVEAL_EASE};
use crate::error::Result;

const SERVICES: [&str; 5] = [
    "Strategy",
    "Brand Identity",
    "Web Design",
    "Web Development",
    "Web Apps",
];

/// Length of the hover transition in either direction
pub const SERVICE_HOVER_MS: u32 = 500;

/// Distance the title slides while hovered
pub const SERVICE_TITLE_SHIFT: f32 = 20.0;

/// Arrow disc scale while hovered
pub const SERVICE_ARROW_SCALE: f32 = 1.1;

const ARROW_SIZE: f32 = 48.0;

/// One row of the list and the parts its hover moves
struct ServiceItem {
    item: ElementId,
    title: ElementId,
    description: ElementId,
    arrow: ElementId,
    icon: ElementId,
}

impl ServiceItem {
    fn build(doc: &mut Document, root: ElementId, bounds: Rect) -> Self {
        let item = place_with_class(doc, ElementKind::Div, root, "service-item", bounds);
        doc.set_attribute(item, HOVER_ATTRIBUTE, "");

        let text = Rect::new(bounds.x, bounds.y, (bounds.width - ARROW_SIZE * 3.0).max(0.0), bounds.height);
        let title = place_with_class(doc, ElementKind::Heading, item, "service-title", band(text, 0.0, text.height * 0.6));
        let description = place_with_class(
            doc,
            ElementKind::Paragraph,
            item,
            "service-description",
            band(text, text.height * 0.6, text.height * 0.4),
        );

        let disc = Rect::new(
            bounds.x + bounds.width - ARROW_SIZE * 2.0,
            bounds.y + (bounds.height - ARROW_SIZE) / 2.0,
            ARROW_SIZE,
            ARROW_SIZE,
        );
        let arrow = place_with_class(doc, ElementKind::Div, item, "service-arrow", disc);
        let icon = place_with_class(doc, ElementKind::Span, arrow, "service-arrow-icon", disc);

        Self {
            item,
            title,
            description,
            arrow,
            icon,
        }
    }

    /// Rest state at time zero, hovered state at the end
    fn hover(&self) -> Timeline {
        let mut timeline = Timeline::new();
        let steps = [
            (self.title, Props::new().x(0.0), Props::new().x(SERVICE_TITLE_SHIFT)),
            (self.description, Props::new().opacity(0.0), Props::new().opacity(1.0)),
            (self.arrow, Props::new().scale(1.0), Props::new().scale(SERVICE_ARROW_SCALE)),
            (self.icon, Props::new().x(0.0), Props::new().x(2.0)),
        ];
        for (target, from, to) in steps {
            timeline.from_to(target, from, to, SERVICE_HOVER_MS, Easing::EaseOutExpo, Position::At(0.0));
        }
        timeline
    }
}

pub struct Services {
    root: ElementId,
    items: Vec<ServiceItem>,
}

impl Services {
    pub fn build(doc: &mut Document, parent: ElementId, slot: Rect) -> Self {
        let root = place(doc, ElementKind::Section, parent, slot);
        doc.set_id(root, "services");
        place(doc, ElementKind::Heading, root, band(slot, 80.0, 120.0));

        let list = band(slot, 240.0, (slot.height - 320.0).max(0.0));
        let items = rows(list, SERVICES.len())
            .map(|bounds| ServiceItem::build(doc, root, bounds))
            .collect();

        Self { root, items }
    }

    fn entrance(&self) -> Timeline {
        let items: Vec<ElementId> = self.items.iter().map(|service| service.item).collect();
        let mut timeline = Timeline::new();
        timeline.stagger_from_to(
            &items,
            Props::new().x(-50.0).opacity(0.0),
            Props::new().x(0.0).opacity(1.0),
            800,
            REVEAL_EASE,
            Position::Sequence,
            100.0,
        );
        timeline
    }

    fn hover_listeners(scope: &mut AnimationScope, doc: &mut Document, item: ElementId, hover: TimelineId) {
        let scheduler = scope.scheduler().clone();
        scope.add_listener(doc, ListenerTarget::Element(item), EventKind::PointerEnter, move |_| {
            scheduler.play(hover);
        });
        let scheduler = scope.scheduler().clone();
        scope.add_listener(doc, ListenerTarget::Element(item), EventKind::PointerLeave, move |_| {
            scheduler.reverse(hover);
        });
    }
}

impl Section for Services {
    fn root(&self) -> ElementId {
        self.root
    }

    fn animate(&self, scope: &mut AnimationScope, doc: &mut Document) -> Result<()> {
        let trigger = ScrollTrigger::toggle(self.root, "top 70%")?;
        registered(scope.add_triggered(self.entrance(), trigger, doc))?;

        for service in &self.items {
            let hover = registered(scope.add_timeline(service.hover(), doc))?;
            Self::hover_listeners(scope, doc, service.item, hover);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::SectionKind;
    use crate::testing::Harness;
    use folio_platform::{InputEvent, InteractiveRegistry, PointerEvent, Property};

    #[test]
    fn test_items_stagger_in() {
        let mut h = Harness::new();
        let (section, _scope) = h.mount_section(SectionKind::Services);
        let items = h.doc.query_str(".service-item").unwrap();
        assert_eq!(items.len(), SERVICES.len());
        for item in &items {
            assert!(h.doc.interactive_targets().contains(item));
            assert_eq!(h.doc.get_style(*item, Property::X), Some(-50.0));
        }

        let top = h.doc.bounds(section.root()).unwrap().top();
        h.scroll(top - h.layout.viewport_height * 0.7 + 1.0);
        // First item finishes at 800ms, the last one 400ms later
        h.advance(850.0);
        assert_eq!(h.doc.get_style(items[0], Property::Opacity), Some(1.0));
        assert!(h.doc.get_style(items[4], Property::Opacity).unwrap() < 1.0);
        h.advance(400.0);
        assert_eq!(h.doc.get_style(items[4], Property::X), Some(0.0));
    }

    fn parts(h: &Harness) -> [Vec<ElementId>; 4] {
        [".service-title", ".service-description", ".service-arrow", ".service-arrow-icon"]
            .map(|selector| h.doc.query_str(selector).unwrap())
    }

    #[test]
    fn test_hover_moves_only_that_item() {
        let mut h = Harness::new();
        let (_section, _scope) = h.mount_section(SectionKind::Services);
        let items = h.doc.query_str(".service-item").unwrap();
        let [titles, descriptions, arrows, icons] = parts(&h);
        assert_eq!(h.doc.listener_count(EventKind::PointerEnter), items.len());
        assert_eq!(h.doc.listener_count(EventKind::PointerLeave), items.len());

        // Rest state applied at mount
        for i in 0..items.len() {
            assert_eq!(h.doc.get_style(titles[i], Property::X), Some(0.0));
            assert_eq!(h.doc.get_style(descriptions[i], Property::Opacity), Some(0.0));
            assert_eq!(h.doc.get_style(arrows[i], Property::Scale), Some(1.0));
        }

        h.doc.dispatch(&InputEvent::Pointer(PointerEvent::Enter { target: items[1] }));
        h.advance(SERVICE_HOVER_MS as f64 + 50.0);
        assert_eq!(h.doc.get_style(titles[1], Property::X), Some(SERVICE_TITLE_SHIFT));
        assert_eq!(h.doc.get_style(descriptions[1], Property::Opacity), Some(1.0));
        assert_eq!(h.doc.get_style(arrows[1], Property::Scale), Some(SERVICE_ARROW_SCALE));
        assert_eq!(h.doc.get_style(icons[1], Property::X), Some(2.0));
        for i in [0, 2, 3, 4] {
            assert_eq!(h.doc.get_style(titles[i], Property::X), Some(0.0));
            assert_eq!(h.doc.get_style(descriptions[i], Property::Opacity), Some(0.0));
            assert_eq!(h.doc.get_style(arrows[i], Property::Scale), Some(1.0));
        }

        h.doc.dispatch(&InputEvent::Pointer(PointerEvent::Leave { target: items[1] }));
        h.advance(SERVICE_HOVER_MS as f64 + 50.0);
        assert_eq!(h.doc.get_style(titles[1], Property::X), Some(0.0));
        assert_eq!(h.doc.get_style(descriptions[1], Property::Opacity), Some(0.0));
        assert_eq!(h.doc.get_style(arrows[1], Property::Scale), Some(1.0));
        assert_eq!(h.doc.get_style(icons[1], Property::X), Some(0.0));
    }

    #[test]
    fn test_leave_mid_hover_reverses_from_current() {
        let mut h = Harness::new();
        let (_section, _scope) = h.mount_section(SectionKind::Services);
        let items = h.doc.query_str(".service-item").unwrap();
        let [titles, ..] = parts(&h);

        h.doc.dispatch(&InputEvent::Pointer(PointerEvent::Enter { target: items[0] }));
        h.advance(100.0);
        let partway = h.doc.get_style(titles[0], Property::X).unwrap();
        assert!(partway > 0.0 && partway < SERVICE_TITLE_SHIFT, "x {partway}");

        h.doc.dispatch(&InputEvent::Pointer(PointerEvent::Leave { target: items[0] }));
        h.advance(16.0);
        assert!(h.doc.get_style(titles[0], Property::X).unwrap() < partway);
        h.advance(200.0);
        assert_eq!(h.doc.get_style(titles[0], Property::X), Some(0.0));
    }

    #[test]
    fn test_revert_releases_hover() {
        let mut h = Harness::new();
        let (_section, mut scope) = h.mount_section(SectionKind::Services);
        let items = h.doc.query_str(".service-item").unwrap();
        h.doc.dispatch(&InputEvent::Pointer(PointerEvent::Enter { target: items[2] }));
        h.advance(200.0);

        scope.revert(&mut h.doc);
        assert_eq!(h.doc.listener_count(EventKind::PointerEnter), 0);
        assert_eq!(h.doc.listener_count(EventKind::PointerLeave), 0);
        for part in parts(&h).iter().flatten() {
            assert!(h.doc.style(*part).unwrap().is_empty());
        }
        assert_eq!(h.scheduler.timeline_count(), 0);
    }
}
