//! Process: heading, paragraph and stats

use folio_animation::{Position, Props, Timeline};
use folio_motion::{AnimationScope, ScrollTrigger};
use folio_platform::{Document, ElementId, ElementKind, Rect};

use super::{band, columns, place, place_with_class, registered, Section, REVEAL_EASE};
use crate::error::Result;

const HEADING: &str = "Strategy comes first.";
const STATS: usize = 3;

pub struct Process {
    root: ElementId,
    heading: ElementId,
    words: Vec<ElementId>,
    paragraph: ElementId,
    stats: ElementId,
    stat_items: Vec<ElementId>,
}

impl Process {
    pub fn build(doc: &mut Document, parent: ElementId, slot: Rect) -> Self {
        let root = place(doc, ElementKind::Section, parent, slot);
        doc.set_id(root, "process");

        let heading_band = band(slot, 100.0, 200.0);
        let heading = place(doc, ElementKind::Heading, root, heading_band);
        let words = columns(heading_band, HEADING.split_whitespace().count())
            .map(|bounds| place_with_class(doc, ElementKind::Span, heading, "word", bounds))
            .collect();

        let paragraph = place_with_class(
            doc,
            ElementKind::Paragraph,
            root,
            "process-paragraph",
            band(slot, 360.0, 160.0),
        );

        let stats_band = band(slot, 580.0, 200.0);
        let stats = place(doc, ElementKind::Div, root, stats_band);
        let stat_items = columns(stats_band, STATS)
            .map(|bounds| place_with_class(doc, ElementKind::Div, stats, "stat-item", bounds))
            .collect();

        Self {
            root,
            heading,
            words,
            paragraph,
            stats,
            stat_items,
        }
    }
}

impl Section for Process {
    fn root(&self) -> ElementId {
        self.root
    }

    fn animate(&self, scope: &mut AnimationScope, doc: &mut Document) -> Result<()> {
        let mut words = Timeline::new();
        words.stagger_from_to(
            &self.words,
            Props::new().y_percent(100.0).opacity(0.0),
            Props::new().y_percent(0.0).opacity(1.0),
            800,
            REVEAL_EASE,
            Position::Sequence,
            50.0,
        );
        let trigger = ScrollTrigger::toggle(self.heading, "top 80%")?;
        registered(scope.add_triggered(words, trigger, doc))?;

        let mut paragraph = Timeline::new();
        paragraph.from_to(
            self.paragraph,
            Props::new().y(30.0).opacity(0.0),
            Props::new().y(0.0).opacity(1.0),
            800,
            REVEAL_EASE,
            Position::Sequence,
        );
        let trigger = ScrollTrigger::toggle(self.paragraph, "top 85%")?;
        registered(scope.add_triggered(paragraph, trigger, doc))?;

        let mut stats = Timeline::new();
        stats.stagger_from_to(
            &self.stat_items,
            Props::new().y(50.0).opacity(0.0),
            Props::new().y(0.0).opacity(1.0),
            800,
            REVEAL_EASE,
            Position::Sequence,
            150.0,
        );
        let trigger = ScrollTrigger::toggle(self.stats, "top 80%")?;
        registered(scope.add_triggered(stats, trigger, doc))?;
        Ok(())
    }
}
