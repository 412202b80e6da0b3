//! Animatable value types
//!
//! Provides the interpolation trait and the property sets tweens animate.

use folio_platform::{Point, Property, Style};
use smallvec::SmallVec;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal (for settling detection)
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

// ============================================================================
// f32 Implementation
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

// ============================================================================
// Point Implementation
// ============================================================================

impl Interpolate for Point {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Point::new(
            Interpolate::lerp(&self.x, &other.x, t),
            Interpolate::lerp(&self.y, &other.y, t),
        )
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.approx_eq(&other.x, epsilon) && self.y.approx_eq(&other.y, epsilon)
    }
}

// ============================================================================
// Property Sets
// ============================================================================

/// An ordered set of style property values
///
/// Setting a property twice keeps one entry with the latest value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props {
    values: SmallVec<[(Property, f32); 4]>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, property: Property, value: f32) -> Self {
        self.set(property, value);
        self
    }

    pub fn x(self, value: f32) -> Self {
        self.with(Property::X, value)
    }

    pub fn y(self, value: f32) -> Self {
        self.with(Property::Y, value)
    }

    pub fn y_percent(self, value: f32) -> Self {
        self.with(Property::YPercent, value)
    }

    pub fn opacity(self, value: f32) -> Self {
        self.with(Property::Opacity, value)
    }

    pub fn scale(self, value: f32) -> Self {
        self.with(Property::Scale, value)
    }

    pub fn scale_y(self, value: f32) -> Self {
        self.with(Property::ScaleY, value)
    }

    pub fn rotate_x(self, value: f32) -> Self {
        self.with(Property::RotateX, value)
    }

    pub fn set(&mut self, property: Property, value: f32) {
        match self.values.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value,
            None => self.values.push((property, value)),
        }
    }

    pub fn get(&self, property: Property) -> Option<f32> {
        self.values
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, f32)> + '_ {
        self.values.iter().copied()
    }

    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.values.iter().map(|(p, _)| *p)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read the current values of `properties` from a style
    pub fn capture(style: &Style, properties: impl Iterator<Item = Property>) -> Self {
        let mut props = Props::new();
        for property in properties {
            props.set(property, style.get(property));
        }
        props
    }
}
