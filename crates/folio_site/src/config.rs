//! Site configuration
//!
//! Read from a TOML file (conventionally `folio.toml`). Every table and
//! field is optional:
//!
//! ```toml
//! [scroll]
//! duration_ms = 1200
//! touch_multiplier = 2.0
//!
//! [cursor]
//! mixed_pointer = "prefer-fine"
//!
//! [scheduler]
//! max_frame_delta_ms = 100
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use folio_animation::Easing;
use folio_motion::{CursorConfig, ScrollConfig, SkewConfig};
use folio_platform::{MixedPointerPolicy, Size};
use serde::{Deserialize, Serialize};

use crate::error::SiteError;

/// Complete site configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    pub scroll: ScrollSettings,
    pub cursor: CursorSettings,
    pub skew: SkewSettings,
    pub gate: GateSettings,
    pub scheduler: SchedulerSettings,
    pub layout: LayoutSettings,
}

impl SiteConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded site configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).context("Invalid TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize site configuration")
    }

    /// Reject values the motion layer cannot run with
    pub fn validate(&self) -> std::result::Result<(), SiteError> {
        fn fraction(name: &str, value: f32) -> std::result::Result<(), SiteError> {
            if value > 0.0 && value <= 1.0 {
                Ok(())
            } else {
                Err(SiteError::Config(format!("{name} must be in (0, 1], got {value}")))
            }
        }
        fn positive(name: &str, value: f32) -> std::result::Result<(), SiteError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SiteError::Config(format!("{name} must be positive, got {value}")))
            }
        }

        positive("scroll.duration_ms", self.scroll.duration_ms)?;
        positive("scroll.wheel_multiplier", self.scroll.wheel_multiplier)?;
        positive("scroll.touch_multiplier", self.scroll.touch_multiplier)?;
        fraction("cursor.smoothing", self.cursor.smoothing)?;
        fraction("skew.smoothing", self.skew.smoothing)?;
        positive("skew.max_degrees", self.skew.max_degrees)?;
        if !self.skew.factor.is_finite() {
            return Err(SiteError::Config("skew.factor must be finite".into()));
        }
        if let Some(max) = self.scheduler.max_frame_delta_ms {
            positive("scheduler.max_frame_delta_ms", max)?;
        }
        positive("layout.viewport_width", self.layout.viewport_width)?;
        positive("layout.viewport_height", self.layout.viewport_height)?;
        Ok(())
    }
}

// =============================================================================
// Sections
// =============================================================================

/// `[scroll]`
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrollSettings {
    pub duration_ms: f32,
    pub wheel_multiplier: f32,
    pub touch_multiplier: f32,
    pub smooth_wheel: bool,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        let config = ScrollConfig::default();
        Self {
            duration_ms: config.duration_ms,
            wheel_multiplier: config.wheel_multiplier,
            touch_multiplier: config.touch_multiplier,
            smooth_wheel: config.smooth_wheel,
        }
    }
}

impl From<ScrollSettings> for ScrollConfig {
    fn from(settings: ScrollSettings) -> Self {
        ScrollConfig {
            duration_ms: settings.duration_ms,
            wheel_multiplier: settings.wheel_multiplier,
            touch_multiplier: settings.touch_multiplier,
            smooth_wheel: settings.smooth_wheel,
            easing: Easing::ScrollExpo,
        }
    }
}

/// `[cursor]`
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CursorSettings {
    pub smoothing: f32,
    /// `primary`, `prefer-fine` or `disable`
    pub mixed_pointer: MixedPointerPolicy,
}

impl Default for CursorSettings {
    fn default() -> Self {
        let config = CursorConfig::default();
        Self {
            smoothing: config.smoothing,
            mixed_pointer: config.mixed_pointer,
        }
    }
}

impl From<CursorSettings> for CursorConfig {
    fn from(settings: CursorSettings) -> Self {
        CursorConfig {
            smoothing: settings.smoothing,
            mixed_pointer: settings.mixed_pointer,
        }
    }
}

/// `[skew]`
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SkewSettings {
    pub factor: f32,
    pub smoothing: f32,
    pub max_degrees: f32,
}

impl Default for SkewSettings {
    fn default() -> Self {
        let config = SkewConfig::default();
        Self {
            factor: config.factor,
            smoothing: config.smoothing,
            max_degrees: config.max_degrees,
        }
    }
}

impl From<SkewSettings> for SkewConfig {
    fn from(settings: SkewSettings) -> Self {
        SkewConfig {
            factor: settings.factor,
            smoothing: settings.smoothing,
            max_degrees: settings.max_degrees,
        }
    }
}

/// `[gate]`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GateSettings {
    pub enabled: bool,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// `[scheduler]`
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SchedulerSettings {
    /// Clamp on a single frame's delta; absent disables lag smoothing
    pub max_frame_delta_ms: Option<f32>,
}

/// `[layout]`
///
/// Sizes used to lay out the page skeleton. Sections stack vertically in
/// page order.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub hero_height: f32,
    /// Height of one work card, including its spacing
    pub work_card_height: f32,
    pub work_cards: usize,
    pub services_height: f32,
    pub process_height: f32,
    pub about_height: f32,
    pub testimonials_height: f32,
    pub testimonials: usize,
    pub footer_height: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 800.0,
            hero_height: 900.0,
            work_card_height: 700.0,
            work_cards: 4,
            services_height: 1000.0,
            process_height: 900.0,
            about_height: 1100.0,
            testimonials_height: 900.0,
            testimonials: 6,
            footer_height: 800.0,
        }
    }
}

impl LayoutSettings {
    pub fn viewport(&self) -> Size {
        Size::new(self.viewport_width, self.viewport_height)
    }
}
