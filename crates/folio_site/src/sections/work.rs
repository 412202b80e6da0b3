//! Selected work
//!
//! Project cards reveal as they enter, their images drift against the
//! scroll, and each card pushes the one above it back (smaller and darker)
//! as it slides up over it.

use folio_animation::{Easing, Position, Props, Timeline};
use folio_motion::{AnimationScope, ScrollTrigger};
use folio_platform::{Document, ElementId, ElementKind, Property, Rect, HOVER_ATTRIBUTE};

use super::{band, place, place_with_class, registered, Section, REVEAL_EASE, SCRUB_MS};
use crate::config::LayoutSettings;
use crate::error::Result;

/// Space above the first card
pub(crate) const HEADER_HEIGHT: f32 = 200.0;

/// Gap between consecutive cards
const CARD_GAP: f32 = 100.0;

/// A case study shown as a card
pub struct Project {
    pub title: &'static str,
    pub link: &'static str,
}

/// Cards cycle through these when the layout asks for more
pub const PROJECTS: [Project; 4] = [
    Project { title: "GAM", link: "#" },
    Project { title: "Pharsalus", link: "#" },
    Project { title: "TheSystemsBoss", link: "#" },
    Project { title: "Expert Insights", link: "#" },
];

pub struct Work {
    root: ElementId,
    cards: Vec<ElementId>,
    images: Vec<ElementId>,
}

impl Work {
    pub fn build(doc: &mut Document, parent: ElementId, slot: Rect, layout: &LayoutSettings) -> Self {
        let root = place(doc, ElementKind::Section, parent, slot);
        doc.set_id(root, "work");
        place_with_class(doc, ElementKind::Span, root, "caption", band(slot, 0.0, HEADER_HEIGHT));

        let card_height = (layout.work_card_height - CARD_GAP).max(0.0);
        let mut cards = Vec::with_capacity(layout.work_cards);
        let mut images = Vec::with_capacity(layout.work_cards);
        for i in 0..layout.work_cards {
            let offset = HEADER_HEIGHT + layout.work_card_height * i as f32;
            let bounds = band(slot, offset, card_height);
            let card = place_with_class(doc, ElementKind::Div, root, "project-card", bounds);
            images.push(place_with_class(
                doc,
                ElementKind::Image,
                card,
                "project-image",
                band(bounds, 0.0, card_height * 0.7),
            ));
            link(doc, card, &PROJECTS[i % PROJECTS.len()], bounds);
            cards.push(card);
        }

        Self { root, cards, images }
    }

    pub fn cards(&self) -> &[ElementId] {
        &self.cards
    }

    fn entrance(card: ElementId) -> Timeline {
        let mut timeline = Timeline::new();
        timeline.from_to(
            card,
            Props::new().y(100.0).opacity(0.0),
            Props::new().y(0.0).opacity(1.0),
            1000,
            REVEAL_EASE,
            Position::Sequence,
        );
        timeline
    }

    fn scrubbed(target: ElementId, to: Props) -> Timeline {
        let mut timeline = Timeline::new();
        timeline.to(target, to, SCRUB_MS, Easing::Linear, Position::Sequence);
        timeline
    }
}

/// "View project" link covering the lower part of a card
fn link(doc: &mut Document, card: ElementId, project: &Project, bounds: Rect) -> ElementId {
    let cta = band(bounds, bounds.height * 0.7, bounds.height * 0.3);
    let id = super::link(doc, card, project.link, cta);
    doc.add_class(id, "project-link");
    doc.set_attribute(id, HOVER_ATTRIBUTE, "");
    doc.set_attribute(id, "aria-label", project.title);
    id
}

impl Section for Work {
    fn root(&self) -> ElementId {
        self.root
    }

    fn animate(&self, scope: &mut AnimationScope, doc: &mut Document) -> Result<()> {
        for (i, (&card, &image)) in self.cards.iter().zip(&self.images).enumerate() {
            let trigger = ScrollTrigger::toggle(card, "top 85%")?;
            registered(scope.add_triggered(Self::entrance(card), trigger, doc))?;

            let trigger = ScrollTrigger::scrub(card, "top bottom", "bottom top")?;
            let parallax = Self::scrubbed(image, Props::new().y(-50.0));
            registered(scope.add_triggered(parallax, trigger, doc))?;

            if i > 0 {
                let previous = self.cards[i - 1];
                let stacked = Props::new()
                    .scale(0.95)
                    .with(Property::Brightness, 0.5);
                let trigger = ScrollTrigger::scrub(card, "top 60%", "top 20%")?;
                registered(scope.add_triggered(Self::scrubbed(previous, stacked), trigger, doc))?;
            }
        }
        Ok(())
    }
}
