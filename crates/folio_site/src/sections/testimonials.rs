//! Testimonials grid

use folio_animation::{Position, Props, Timeline};
use folio_motion::{AnimationScope, ScrollTrigger};
use folio_platform::{Document, ElementId, ElementKind, Rect};

use super::{band, columns, place, place_with_class, registered, rows, Section, REVEAL_EASE};
use crate::config::LayoutSettings;
use crate::error::Result;

const COLUMNS: usize = 3;

/// Extra delay per card, in page order
const CARD_DELAY_MS: u32 = 100;

pub struct Testimonials {
    root: ElementId,
    cards: Vec<ElementId>,
}

impl Testimonials {
    pub fn build(doc: &mut Document, parent: ElementId, slot: Rect, layout: &LayoutSettings) -> Self {
        let root = place(doc, ElementKind::Section, parent, slot);
        doc.set_id(root, "testimonials");
        place(doc, ElementKind::Heading, root, band(slot, 80.0, 100.0));

        let count = layout.testimonials;
        let grid = band(slot, 220.0, (slot.height - 260.0).max(0.0));
        let cards = rows(grid, count.div_ceil(COLUMNS))
            .flat_map(|row| columns(row, COLUMNS))
            .take(count)
            .map(|bounds| place_with_class(doc, ElementKind::Div, root, "testimonial-card", bounds))
            .collect();

        Self { root, cards }
    }

    fn reveal(card: ElementId, index: usize) -> Timeline {
        let mut timeline = Timeline::new().with_delay(CARD_DELAY_MS * index as u32);
        timeline.from_to(
            card,
            Props::new().y(50.0).opacity(0.0),
            Props::new().y(0.0).opacity(1.0),
            800,
            REVEAL_EASE,
            Position::Sequence,
        );
        timeline
    }
}

impl Section for Testimonials {
    fn root(&self) -> ElementId {
        self.root
    }

    fn animate(&self, scope: &mut AnimationScope, doc: &mut Document) -> Result<()> {
        for (index, &card) in self.cards.iter().enumerate() {
            let trigger = ScrollTrigger::toggle(card, "top 85%")?;
            registered(scope.add_triggered(Self::reveal(card, index), trigger, doc))?;
        }
        Ok(())
    }
}
