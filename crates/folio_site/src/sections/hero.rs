//! Hero section
//!
//! Plays a one-time intro once the loading gate has cleared, then parallaxes
//! the name and the gradient while the hero scrolls out.

use folio_animation::{Easing, Position, Props, Timeline};
use folio_motion::{AnimationScope, ScrollTrigger};
use folio_platform::{Document, ElementId, ElementKind, Rect};

use super::{band, columns, place, place_with_class, registered, Section, REVEAL_EASE, SCRUB_MS};
use crate::error::Result;

/// Intro start, timed to follow the loading gate
pub const HERO_INTRO_DELAY_MS: u32 = 1800;

const NAME_LINES: [&str; 2] = ["SHREY", "CHANDPA"];

pub struct Hero {
    root: ElementId,
    grid: ElementId,
    name: ElementId,
    chars: Vec<ElementId>,
    tagline: ElementId,
    gradient: ElementId,
}

impl Hero {
    pub fn build(doc: &mut Document, parent: ElementId, slot: Rect) -> Self {
        let root = place(doc, ElementKind::Section, parent, slot);
        doc.set_id(root, "hero");

        let grid = place_with_class(doc, ElementKind::Div, root, "hero-grid", slot);
        let name_band = band(slot, 200.0, 320.0);
        let name = place_with_class(doc, ElementKind::Heading, root, "hero-name", name_band);

        let mut chars = Vec::new();
        for (line, text) in NAME_LINES.iter().enumerate() {
            let line_band = band(name_band, 160.0 * line as f32, 160.0);
            for bounds in columns(line_band, text.chars().count()) {
                chars.push(place_with_class(doc, ElementKind::Span, name, "name-char", bounds));
            }
        }

        let tagline = place(doc, ElementKind::Paragraph, root, band(slot, 560.0, 80.0));
        let gradient = place_with_class(
            doc,
            ElementKind::Div,
            root,
            "hero-gradient",
            band(slot, (slot.height - 250.0).max(0.0), 250.0),
        );

        Self {
            root,
            grid,
            name,
            chars,
            tagline,
            gradient,
        }
    }

    pub fn chars(&self) -> &[ElementId] {
        &self.chars
    }

    pub fn name(&self) -> ElementId {
        self.name
    }

    pub fn gradient(&self) -> ElementId {
        self.gradient
    }

    fn intro(&self) -> Timeline {
        let mut intro = Timeline::new().with_delay(HERO_INTRO_DELAY_MS);
        intro.from_to(
            self.grid,
            Props::new().scale_y(0.0),
            Props::new().scale_y(1.0),
            1000,
            REVEAL_EASE,
            Position::At(0.0),
        );
        intro.stagger_from_to(
            &self.chars,
            Props::new().y(100.0).opacity(0.0).rotate_x(-90.0),
            Props::new().y(0.0).opacity(1.0).rotate_x(0.0),
            1200,
            Easing::EaseOutExpo,
            Position::At(200.0),
            30.0,
        );
        intro.from_to(
            self.tagline,
            Props::new().y(50.0).opacity(0.0),
            Props::new().y(0.0).opacity(1.0),
            800,
            REVEAL_EASE,
            Position::At(800.0),
        );
        intro.from_to(
            self.gradient,
            Props::new().y(200.0).opacity(0.0),
            Props::new().y(0.0).opacity(1.0),
            1200,
            REVEAL_EASE,
            Position::At(400.0),
        );
        intro
    }

    fn parallax(target: ElementId, to_y: f32) -> Timeline {
        let mut timeline = Timeline::new();
        timeline.from_to(
            target,
            Props::new().y(0.0),
            Props::new().y(to_y),
            SCRUB_MS,
            Easing::Linear,
            Position::Sequence,
        );
        timeline
    }
}

impl Section for Hero {
    fn root(&self) -> ElementId {
        self.root
    }

    fn animate(&self, scope: &mut AnimationScope, doc: &mut Document) -> Result<()> {
        // Parallax first so the intro's hidden start values win at mount
        for (target, to_y) in [(self.name, -300.0), (self.gradient, -100.0)] {
            let trigger = ScrollTrigger::scrub(self.root, "top top", "bottom top")?;
            registered(scope.add_triggered(Self::parallax(target, to_y), trigger, doc))?;
        }

        let intro = registered(scope.add_timeline(self.intro(), doc))?;
        scope.scheduler().play(intro);
        Ok(())
    }
}
