//! Single-target property tweens
//!
//! A tween animates a set of style properties on one element from start
//! values to end values over a duration. Start values are either given
//! (`from_to`) or captured from the element's current style on first render
//! (`to`). The element's inline values from before the first render are
//! remembered so the tween can be reverted.

use folio_platform::{Document, ElementId, Property};
use smallvec::SmallVec;

use crate::easing::Easing;
use crate::values::{Interpolate, Props};

/// Inline values that existed before a tween first touched the element
type Originals = SmallVec<[(Property, Option<f32>); 4]>;

/// A property tween on one element
#[derive(Clone, Debug)]
pub struct Tween {
    target: ElementId,
    from: Option<Props>,
    to: Props,
    duration_ms: f32,
    easing: Easing,
    /// Offset of this tween inside its timeline
    start_ms: f32,
    /// Render the start values as soon as the tween is created
    immediate_render: bool,
    originals: Option<Originals>,
    rendered: bool,
}

impl Tween {
    /// Tween from explicit start values to end values
    ///
    /// `from_to` tweens render their start values immediately when their
    /// timeline is first rendered, so elements stay hidden until triggered.
    pub fn from_to(target: ElementId, from: Props, to: Props, duration_ms: u32, easing: Easing) -> Self {
        Self {
            target,
            from: Some(from),
            to,
            duration_ms: duration_ms as f32,
            easing,
            start_ms: 0.0,
            immediate_render: true,
            originals: None,
            rendered: false,
        }
    }

    /// Tween from the element's current values to end values
    pub fn to(target: ElementId, to: Props, duration_ms: u32, easing: Easing) -> Self {
        Self {
            target,
            from: None,
            to,
            duration_ms: duration_ms as f32,
            easing,
            start_ms: 0.0,
            immediate_render: false,
            originals: None,
            rendered: false,
        }
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    pub fn start_ms(&self) -> f32 {
        self.start_ms
    }

    pub fn end_ms(&self) -> f32 {
        self.start_ms + self.duration_ms
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    pub(crate) fn set_start_ms(&mut self, start_ms: f32) {
        self.start_ms = start_ms.max(0.0);
    }

    /// Whether this tween has written to its target at least once
    pub fn has_rendered(&self) -> bool {
        self.rendered
    }

    pub(crate) fn wants_immediate_render(&self) -> bool {
        self.immediate_render
    }

    /// Linear progress at a timeline time
    pub fn progress_at(&self, timeline_ms: f32) -> f32 {
        if self.duration_ms <= 0.0 {
            return if timeline_ms >= self.start_ms { 1.0 } else { 0.0 };
        }
        ((timeline_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Write the tween's values for a timeline time into the document
    ///
    /// Missing targets are skipped.
    pub fn render(&mut self, timeline_ms: f32, doc: &mut Document) {
        let Some(style) = doc.style(self.target) else {
            return;
        };

        if self.originals.is_none() {
            let properties = self
                .to
                .properties()
                .chain(self.from.iter().flat_map(|f| f.properties()));
            let mut originals = Originals::new();
            for property in properties {
                if !originals.iter().any(|(p, _)| *p == property) {
                    originals.push((property, style.inline(property)));
                }
            }
            self.originals = Some(originals);
        }

        let from = match &self.from {
            Some(from) => from.clone(),
            None => {
                let captured = Props::capture(style, self.to.properties());
                self.from = Some(captured.clone());
                captured
            }
        };

        let eased = self.easing.apply(self.progress_at(timeline_ms));
        let Some(style) = doc.style_mut(self.target) else {
            return;
        };
        for (property, end) in self.to.iter() {
            let start = from.get(property).unwrap_or_else(|| property.initial());
            // Land exactly on the keyframes at either end
            let value = if eased <= 0.0 {
                start
            } else if eased >= 1.0 {
                end
            } else {
                Interpolate::lerp(&start, &end, eased)
            };
            style.set(property, value);
        }
        self.rendered = true;
    }

    /// Restore the inline values from before the first render
    pub fn revert(&mut self, doc: &mut Document) {
        let Some(originals) = self.originals.take() else {
            return;
        };
        if let Some(style) = doc.style_mut(self.target) {
            for (property, value) in originals {
                match value {
                    Some(v) => style.set(property, v),
                    None => style.clear(property),
                }
            }
        }
        self.rendered = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_platform::{ElementKind, Size};

    fn setup() -> (Document, ElementId) {
        let mut doc = Document::new(Size::new(800.0, 600.0));
        let el = doc.create_element(ElementKind::Div, None);
        (doc, el)
    }

    #[test]
    fn test_from_to_endpoints() {
        let (mut doc, el) = setup();
        let mut tween = Tween::from_to(
            el,
            Props::new().y(100.0).opacity(0.0),
            Props::new().y(0.0).opacity(1.0),
            1000,
            Easing::EaseOutQuart,
        );

        tween.render(0.0, &mut doc);
        assert_eq!(doc.get_style(el, Property::Y), Some(100.0));
        assert_eq!(doc.get_style(el, Property::Opacity), Some(0.0));

        tween.render(1000.0, &mut doc);
        assert_eq!(doc.get_style(el, Property::Y), Some(0.0));
        assert_eq!(doc.get_style(el, Property::Opacity), Some(1.0));
    }

    #[test]
    fn test_to_captures_current_value() {
        let (mut doc, el) = setup();
        doc.set_style(el, Property::Y, 40.0);
        let mut tween = Tween::to(el, Props::new().y(-300.0), 1000, Easing::Linear);

        tween.render(500.0, &mut doc);
        assert_eq!(doc.get_style(el, Property::Y), Some(-130.0));

        tween.render(0.0, &mut doc);
        assert_eq!(doc.get_style(el, Property::Y), Some(40.0));
    }

    #[test]
    fn test_revert_restores_inline_state() {
        let (mut doc, el) = setup();
        doc.set_style(el, Property::Opacity, 0.5);
        let mut tween = Tween::from_to(
            el,
            Props::new().opacity(0.0).y(20.0),
            Props::new().opacity(1.0).y(0.0),
            600,
            Easing::Linear,
        );
        tween.render(300.0, &mut doc);
        tween.revert(&mut doc);

        let style = doc.style(el).unwrap();
        assert_eq!(style.inline(Property::Opacity), Some(0.5));
        assert_eq!(style.inline(Property::Y), None);
    }

    #[test]
    fn test_missing_target_skipped() {
        let (mut doc, el) = setup();
        doc.remove_element(el);
        let mut tween = Tween::to(el, Props::new().y(10.0), 100, Easing::Linear);
        tween.render(50.0, &mut doc);
        assert!(!tween.has_rendered());
    }

    #[test]
    fn test_zero_duration_is_a_set() {
        let (mut doc, el) = setup();
        let mut tween = Tween::to(el, Props::new().scale(0.95), 0, Easing::Linear);
        tween.render(0.0, &mut doc);
        assert_eq!(doc.get_style(el, Property::Scale), Some(0.95));
    }
}
