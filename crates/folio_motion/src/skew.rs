//! Momentum skew
//!
//! Tilts the primary scroll container along the y axis in proportion to
//! scroll velocity, smoothed so it eases in and settles back to zero.

use std::cell::Cell;
use std::rc::Rc;

use folio_animation::{FrameInfo, Result, SchedulerHandle, TickCallbackId, TickPhase};
use folio_platform::{Document, ElementId, Property};

use crate::scroll::{SmoothScroll, SubscriberId};

/// Below this magnitude, a skew with no velocity behind it snaps to zero
const SETTLE_EPSILON: f32 = 1e-3;

/// Skew configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkewConfig {
    /// Degrees of skew per pixel of per-tick velocity
    pub factor: f32,
    /// Fraction of the remaining distance covered each tick
    pub smoothing: f32,
    /// Magnitude limit in degrees
    pub max_degrees: f32,
}

impl Default for SkewConfig {
    fn default() -> Self {
        Self {
            factor: 0.02,
            smoothing: 0.1,
            max_degrees: 10.0,
        }
    }
}

/// Smoothed skew value
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MomentumSkew {
    pub config: SkewConfig,
    skew: f32,
}

impl MomentumSkew {
    pub fn new(config: SkewConfig) -> Self {
        Self { config, skew: 0.0 }
    }

    pub fn value(&self) -> f32 {
        self.skew
    }

    /// Advance one tick with the latest scroll velocity
    ///
    /// The result never exceeds `max_degrees` in magnitude.
    pub fn update(&mut self, velocity: f32) -> f32 {
        let max = self.config.max_degrees.abs();
        let target = if velocity.is_finite() {
            (velocity * self.config.factor).clamp(-max, max)
        } else {
            0.0
        };
        let smoothing = self.config.smoothing.clamp(0.0, 1.0);
        self.skew += (target - self.skew) * smoothing;
        if target == 0.0 && self.skew.abs() < SETTLE_EPSILON {
            self.skew = 0.0;
        }
        self.skew
    }
}

/// Applies [`MomentumSkew`] to an element every frame
pub struct SkewEffect {
    target: ElementId,
    skew: Rc<Cell<MomentumSkew>>,
    scheduler: SchedulerHandle,
    tick: Option<TickCallbackId>,
    subscription: Option<SubscriberId>,
}

impl SkewEffect {
    /// Skew `target` with the velocity published by `scroll`
    pub fn mount(
        config: SkewConfig,
        target: ElementId,
        scheduler: &SchedulerHandle,
        scroll: &SmoothScroll,
    ) -> Result<Self> {
        scheduler.ensure_alive()?;
        let velocity = Rc::new(Cell::new(0.0f32));
        let skew = Rc::new(Cell::new(MomentumSkew::new(config)));

        let subscription = {
            let velocity = Rc::clone(&velocity);
            scroll.subscribe(move |state| velocity.set(state.velocity))
        };

        let tick = {
            let skew = Rc::clone(&skew);
            scheduler.add_tick_callback(TickPhase::Effects, move |_: &FrameInfo, doc: &mut Document| {
                let mut current = skew.get();
                let value = current.update(velocity.get());
                skew.set(current);
                doc.set_style(target, Property::SkewY, value);
            })
        };

        tracing::debug!("SkewEffect: mounted on {:?}", target);
        Ok(Self {
            target,
            skew,
            scheduler: scheduler.clone(),
            tick,
            subscription: Some(subscription),
        })
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    pub fn value(&self) -> f32 {
        self.skew.get().value()
    }

    /// Stop skewing and clear the property
    ///
    /// Safe to call more than once.
    pub fn destroy(&mut self, scroll: Option<&SmoothScroll>, doc: &mut Document) {
        if let Some(id) = self.tick.take() {
            self.scheduler.remove_tick_callback(id);
            if let Some(style) = doc.style_mut(self.target) {
                style.clear(Property::SkewY);
            }
            tracing::debug!("SkewEffect: destroyed");
        }
        if let (Some(id), Some(scroll)) = (self.subscription.take(), scroll) {
            scroll.unsubscribe(id);
        }
    }
}

impl Drop for SkewEffect {
    fn drop(&mut self) {
        if let Some(id) = self.tick.take() {
            self.scheduler.remove_tick_callback(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::ScrollConfig;
    use folio_animation::FrameScheduler;
    use folio_platform::{ElementKind, InputEvent, Rect, Size};

    #[test]
    fn test_bounded_for_every_velocity() {
        let velocities = [0.0, 1.0, -1.0, 50.0, -50.0, 499.0, 500.0, 1e4, -1e6, f32::MAX, f32::NAN];
        for v in velocities {
            let mut skew = MomentumSkew::default();
            for _ in 0..500 {
                let value = skew.update(v);
                assert!(value.abs() <= 10.0, "velocity {v} gave {value}");
            }
        }
    }

    #[test]
    fn test_returns_to_exact_zero() {
        for v in [1.0, -30.0, 500.0, -1e5] {
            let mut skew = MomentumSkew::default();
            for _ in 0..100 {
                skew.update(v);
            }
            assert!(skew.value() != 0.0);

            // 10 degrees decays below the settle threshold in under 100 ticks
            let mut ticks = 0;
            while skew.update(0.0) != 0.0 {
                ticks += 1;
                assert!(ticks < 100, "velocity {v} did not settle");
            }
            assert_eq!(skew.value(), 0.0);
        }
    }

    #[test]
    fn test_smoothing_step() {
        let mut skew = MomentumSkew::default();
        // target = 100 * 0.02 = 2, first step covers 10%
        assert!((skew.update(100.0) - 0.2).abs() < 1e-6);
        assert!((skew.update(100.0) - 0.38).abs() < 1e-6);
    }

    #[test]
    fn test_effect_follows_scroll_velocity() {
        let mut doc = Document::new(Size::new(1000.0, 800.0));
        let container = doc.create_element(ElementKind::Main, None);
        doc.set_bounds(container, Rect::new(0.0, 0.0, 1000.0, 5000.0));
        let scheduler = FrameScheduler::new();
        let handle = scheduler.handle();
        let scroll = SmoothScroll::mount(ScrollConfig::default(), &handle, &mut doc).unwrap();
        let mut effect = SkewEffect::mount(SkewConfig::default(), container, &handle, &scroll).unwrap();
        scheduler.start();

        doc.dispatch(&InputEvent::Wheel {
            delta_x: 0.0,
            delta_y: 1000.0,
        });
        let mut ts = 0.0;
        for _ in 0..5 {
            scheduler.tick(ts, &mut doc);
            ts += 16.0;
        }
        let skewed = doc.get_style(container, Property::SkewY).unwrap();
        assert!(skewed > 0.0);
        assert_eq!(skewed, effect.value());

        for _ in 0..300 {
            scheduler.tick(ts, &mut doc);
            ts += 16.0;
        }
        assert_eq!(doc.get_style(container, Property::SkewY), Some(0.0));

        effect.destroy(Some(&scroll), &mut doc);
        effect.destroy(Some(&scroll), &mut doc);
        assert_eq!(scroll.subscriber_count(), 0);
        assert_eq!(doc.style(container).unwrap().inline(Property::SkewY), None);
    }
}
