use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::models::MapRef;

pub const DEFAULT_MIN_SCALE: f64 = 1.0;
pub const DEFAULT_MAX_SCALE: f64 = 8.0;

/// Linear wheel increment. Not multiplicative: each notch adds or removes the same amount.
pub const DEFAULT_ZOOM_STEP: f64 = 0.2;

/// Pointer displacement (per axis, in pixels) still treated as a click.
pub const DEFAULT_CLICK_THRESHOLD: f64 = 2.0;

pub const DEFAULT_ROOT_DATA: &str = "/static/data/maps/main_maps/map.json";
pub const DEFAULT_ROOT_IMAGE: &str = "/static/img/maps/world_map.webp";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewportConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_step: f64,
    pub click_threshold: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        ViewportConfig {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            zoom_step: DEFAULT_ZOOM_STEP,
            click_threshold: DEFAULT_CLICK_THRESHOLD,
        }
    }
}

impl ViewportConfig {
    pub fn validate(&self) -> Result<(), MapError> {
        let all_finite = [
            self.min_scale,
            self.max_scale,
            self.zoom_step,
            self.click_threshold,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(MapError::InvalidConfig("values must be finite".to_string()));
        }
        if self.min_scale <= 0.0 {
            return Err(MapError::InvalidConfig(format!(
                "min_scale must be positive, got {}",
                self.min_scale
            )));
        }
        if self.max_scale < self.min_scale {
            return Err(MapError::InvalidConfig(format!(
                "max_scale {} is below min_scale {}",
                self.max_scale, self.min_scale
            )));
        }
        if self.zoom_step <= 0.0 {
            return Err(MapError::InvalidConfig(format!(
                "zoom_step must be positive, got {}",
                self.zoom_step
            )));
        }
        if self.click_threshold < 0.0 {
            return Err(MapError::InvalidConfig(format!(
                "click_threshold must not be negative, got {}",
                self.click_threshold
            )));
        }
        Ok(())
    }
}

/// Everything a host needs to boot a map viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapConfig {
    pub root: MapRef,
    pub viewport: ViewportConfig,
    /// Enables the POI placement tools.
    pub dev_mode: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            root: MapRef::new(DEFAULT_ROOT_DATA, DEFAULT_ROOT_IMAGE),
            viewport: ViewportConfig::default(),
            dev_mode: false,
        }
    }
}
