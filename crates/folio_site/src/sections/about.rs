//! About: portrait parallax, tags, bio and features

use folio_animation::{Easing, Position, Props, Timeline};
use folio_motion::{AnimationScope, ScrollTrigger};
use folio_platform::{Document, ElementId, ElementKind, Rect};

use super::{band, columns, link, place, place_with_class, registered, rows, Section, REVEAL_EASE, SCRUB_MS};
use crate::error::Result;

const TAGS: [&str; 5] = ["SON", "GAMER", "DEVELOPER", "DESIGNER", "COOL KID"];
const FEATURES: [&str; 4] = ["Awwwards", "Lapa Ninja", "Land Book", "Flux Academy"];
const PROFILES: [&str; 2] = ["https://www.instagram.com", "https://open.spotify.com"];

pub struct About {
    root: ElementId,
    image: ElementId,
    tags: ElementId,
    tag_items: Vec<ElementId>,
    bio: ElementId,
    features: ElementId,
    feature_items: Vec<ElementId>,
}

impl About {
    pub fn build(doc: &mut Document, parent: ElementId, slot: Rect) -> Self {
        let root = place(doc, ElementKind::Section, parent, slot);
        doc.set_id(root, "about");

        let image = place_with_class(doc, ElementKind::Image, root, "about-image", band(slot, 100.0, 500.0));

        let tags_band = band(slot, 640.0, 60.0);
        let tags = place(doc, ElementKind::Div, root, tags_band);
        let tag_items = columns(tags_band, TAGS.len())
            .map(|bounds| place_with_class(doc, ElementKind::Span, tags, "tag-item", bounds))
            .collect();

        let bio = place_with_class(doc, ElementKind::Paragraph, root, "bio-text", band(slot, 720.0, 140.0));
        for (bounds, href) in columns(band(slot, 870.0, 40.0), PROFILES.len()).zip(PROFILES) {
            link(doc, bio, href, bounds);
        }

        let features_band = band(slot, 920.0, 160.0);
        let features = place(doc, ElementKind::Div, root, features_band);
        let feature_items = rows(features_band, FEATURES.len())
            .map(|bounds| place_with_class(doc, ElementKind::Div, features, "feature-item", bounds))
            .collect();

        Self {
            root,
            image,
            tags,
            tag_items,
            bio,
            features,
            feature_items,
        }
    }

    fn reveal(targets: &[ElementId], rise: f32, duration_ms: u32, stagger_ms: f32) -> Timeline {
        let mut timeline = Timeline::new();
        timeline.stagger_from_to(
            targets,
            Props::new().y(rise).opacity(0.0),
            Props::new().y(0.0).opacity(1.0),
            duration_ms,
            REVEAL_EASE,
            Position::Sequence,
            stagger_ms,
        );
        timeline
    }
}

impl Section for About {
    fn root(&self) -> ElementId {
        self.root
    }

    fn animate(&self, scope: &mut AnimationScope, doc: &mut Document) -> Result<()> {
        let mut parallax = Timeline::new();
        parallax.from_to(
            self.image,
            Props::new().y(100.0),
            Props::new().y(-100.0),
            SCRUB_MS,
            Easing::Linear,
            Position::Sequence,
        );
        let trigger = ScrollTrigger::scrub(self.root, "top bottom", "bottom top")?;
        registered(scope.add_triggered(parallax, trigger, doc))?;

        let trigger = ScrollTrigger::toggle(self.tags, "top 80%")?;
        registered(scope.add_triggered(Self::reveal(&self.tag_items, 20.0, 600, 100.0), trigger, doc))?;

        let trigger = ScrollTrigger::toggle(self.bio, "top 85%")?;
        registered(scope.add_triggered(Self::reveal(&[self.bio], 30.0, 800, 0.0), trigger, doc))?;

        let trigger = ScrollTrigger::toggle(self.features, "top 85%")?;
        registered(scope.add_triggered(Self::reveal(&self.feature_items, 20.0, 600, 100.0), trigger, doc))?;
        Ok(())
    }
}
