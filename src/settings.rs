//! Canvas settings persisted as JSON.
//!
//! Every field has a default, so a partial file (or `{}`) is valid. Values
//! that would break the geometry invariants are rejected by `validate`.

use crate::clamp::SizeLimits;
use crate::constants::{
    GRID_GAP, MAX_SCALE, MIN_ITEM_HEIGHT, MIN_ITEM_WIDTH, MIN_SCALE, WHEEL_LINE_HEIGHT, WHEEL_ZOOM_SENSITIVITY,
};
use crate::error::{CanvasError, CanvasResult};
use crate::rectangle::RectangleConfig;
use crate::viewport::ViewportConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const SETTINGS_DIR: &str = "collection-canvas";
const SETTINGS_FILE: &str = "canvas.json";

/// Location of the settings file under the platform config directory.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub min_item_width: f64,
    pub min_item_height: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub wheel_zoom_sensitivity: f64,
    pub wheel_line_height: f64,
    /// Keep items inside the visible canvas while dragging and resizing
    pub constrain_items_to_canvas: bool,
    pub grid_gap: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            min_item_width: MIN_ITEM_WIDTH,
            min_item_height: MIN_ITEM_HEIGHT,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            wheel_zoom_sensitivity: WHEEL_ZOOM_SENSITIVITY,
            wheel_line_height: WHEEL_LINE_HEIGHT,
            constrain_items_to_canvas: false,
            grid_gap: GRID_GAP,
        }
    }
}

impl CanvasSettings {
    /// Read and validate settings from `path`.
    pub fn load_from(path: &Path) -> CanvasResult<Self> {
        let contents = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents)?;
        settings.validate()?;
        debug!(path = %path.display(), "Loaded canvas settings");
        Ok(settings)
    }

    /// Settings from the default location, or defaults when the file is
    /// missing or unusable.
    pub fn load() -> Self {
        let Some(path) = default_settings_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load canvas settings, using defaults");
                Self::default()
            }
        }
    }

    /// Write pretty JSON to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> CanvasResult<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        debug!(path = %path.display(), "Saved canvas settings");
        Ok(())
    }

    /// Write to the default location.
    pub fn save(&self) -> CanvasResult<()> {
        let path = default_settings_path().ok_or(CanvasError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn validate(&self) -> CanvasResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.min_item_width) || !positive(self.min_item_height) {
            return Err(CanvasError::InvalidSettings(format!(
                "minimum item size must be positive, got {}x{}",
                self.min_item_width, self.min_item_height
            )));
        }
        if !positive(self.min_scale) || !self.max_scale.is_finite() || self.min_scale > self.max_scale {
            return Err(CanvasError::InvalidSettings(format!(
                "scale bounds must satisfy 0 < min <= max, got [{}, {}]",
                self.min_scale, self.max_scale
            )));
        }
        if !positive(self.wheel_zoom_sensitivity) {
            return Err(CanvasError::InvalidSettings(format!(
                "wheel zoom sensitivity must be positive, got {}",
                self.wheel_zoom_sensitivity
            )));
        }
        if !positive(self.wheel_line_height) {
            return Err(CanvasError::InvalidSettings(format!(
                "wheel line height must be positive, got {}",
                self.wheel_line_height
            )));
        }
        if !self.grid_gap.is_finite() || self.grid_gap < 0.0 {
            return Err(CanvasError::InvalidSettings(format!(
                "grid gap must be non-negative, got {}",
                self.grid_gap
            )));
        }
        Ok(())
    }

    pub fn size_limits(&self) -> SizeLimits {
        SizeLimits {
            min_width: self.min_item_width,
            min_height: self.min_item_height,
        }
    }

    pub fn viewport_config(&self) -> ViewportConfig {
        ViewportConfig {
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            wheel_zoom_sensitivity: self.wheel_zoom_sensitivity,
            wheel_line_height: self.wheel_line_height,
        }
    }

    pub fn rectangle_config(&self) -> RectangleConfig {
        RectangleConfig {
            constrain_to_container: self.constrain_items_to_canvas,
            limits: self.size_limits(),
        }
    }
}
