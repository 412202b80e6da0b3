//! Pointer capability detection
//!
//! Mirrors the `pointer` / `any-pointer` media features: the primary pointer
//! has a precision, and the device may additionally expose other pointers.

use serde::{Deserialize, Serialize};

/// Precision of a pointing device
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerPrecision {
    /// Mouse, trackpad, pen
    #[default]
    Fine,
    /// Finger on a touchscreen
    Coarse,
    /// No pointing device
    None,
}

/// Pointer capabilities reported by the host once at startup
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerCapabilities {
    /// Precision of the primary pointer (`pointer` media feature)
    pub primary: PointerPrecision,
    /// Any attached pointer is fine (`any-pointer: fine`)
    pub any_fine: bool,
    /// Any attached pointer is coarse (`any-pointer: coarse`)
    pub any_coarse: bool,
}

impl Default for PointerCapabilities {
    fn default() -> Self {
        Self::mouse()
    }
}

impl PointerCapabilities {
    /// Desktop with a mouse or trackpad only
    pub fn mouse() -> Self {
        Self {
            primary: PointerPrecision::Fine,
            any_fine: true,
            any_coarse: false,
        }
    }

    /// Phone or tablet with touch only
    pub fn touch() -> Self {
        Self {
            primary: PointerPrecision::Coarse,
            any_fine: false,
            any_coarse: true,
        }
    }

    /// Touch laptop: both kinds present, `primary` decides which one leads
    pub fn mixed(primary: PointerPrecision) -> Self {
        Self {
            primary,
            any_fine: true,
            any_coarse: true,
        }
    }

    /// Whether the primary pointer is coarse (`pointer: coarse`)
    pub fn is_coarse(&self) -> bool {
        self.primary == PointerPrecision::Coarse
    }

    /// Whether both fine and coarse pointers are attached
    pub fn is_mixed(&self) -> bool {
        self.any_fine && self.any_coarse
    }

    /// Decide whether hover-driven effects (custom cursor) should run
    pub fn supports_hover_effects(&self, policy: MixedPointerPolicy) -> bool {
        match policy {
            MixedPointerPolicy::Primary => self.primary == PointerPrecision::Fine,
            MixedPointerPolicy::PreferFine => {
                self.any_fine || self.primary == PointerPrecision::Fine
            }
            MixedPointerPolicy::Disable => {
                self.primary == PointerPrecision::Fine && !self.any_coarse
            }
        }
    }
}

/// How to treat devices that report both fine and coarse pointers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MixedPointerPolicy {
    /// Follow the primary pointer only
    #[default]
    Primary,
    /// Enable hover effects whenever any fine pointer is attached
    PreferFine,
    /// Disable hover effects whenever any coarse pointer is attached
    Disable,
}
