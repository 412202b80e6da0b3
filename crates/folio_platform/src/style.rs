//! Inline style properties
//!
//! Only the properties the motion layer animates are modelled. A property
//! that was never written reports its CSS initial value.

use rustc_hash::FxHashMap;

/// An animatable inline style property
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    /// Horizontal translation in pixels
    X,
    /// Vertical translation in pixels
    Y,
    /// Horizontal translation as a percentage of the element's own width
    XPercent,
    /// Vertical translation as a percentage of the element's own height
    YPercent,
    /// Uniform scale
    Scale,
    /// Vertical scale
    ScaleY,
    /// Rotation around the X axis in degrees
    RotateX,
    /// Vertical skew in degrees
    SkewY,
    Opacity,
    /// `filter: brightness(..)` factor
    Brightness,
    /// Absolute left position in pixels (fixed-position markers)
    Left,
    /// Absolute top position in pixels (fixed-position markers)
    Top,
}

impl Property {
    /// CSS initial value for this property
    pub fn initial(self) -> f32 {
        match self {
            Property::Scale | Property::ScaleY | Property::Opacity | Property::Brightness => 1.0,
            _ => 0.0,
        }
    }
}

/// Inline style of one element
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    values: FxHashMap<Property, f32>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value, falling back to the property's initial value
    pub fn get(&self, property: Property) -> f32 {
        self.values
            .get(&property)
            .copied()
            .unwrap_or_else(|| property.initial())
    }

    /// Inline value if one was written
    pub fn inline(&self, property: Property) -> Option<f32> {
        self.values.get(&property).copied()
    }

    pub fn set(&mut self, property: Property, value: f32) {
        self.values.insert(property, value);
    }

    /// Drop the inline value so the property reports its initial value again
    pub fn clear(&mut self, property: Property) {
        self.values.remove(&property);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
