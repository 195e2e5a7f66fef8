//! Editor configuration loaded from JSON.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Lattice dimensions and placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    /// Hexagon circumradius in world units.
    pub hex_radius: f64,
    /// Center of cell (0, 0).
    pub origin: Point,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 30,
            cols: 30,
            hex_radius: 0.035,
            origin: Point::new(-0.95, 0.95),
        }
    }
}

/// Tuning for the tool dispatcher and line rasterizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Minimum time between two accepted brush/eraser drag samples.
    pub paint_interval_ms: u64,
    /// Minimum pointer travel (world units) before the line preview is rebuilt.
    pub line_resample_distance: f64,
    /// Distance to the endpoint at which line stepping stops.
    pub line_step_tolerance: f64,
    /// Hard cap on rasterizer iterations.
    pub line_max_steps: usize,
}

impl ToolConfig {
    pub fn paint_interval(&self) -> Duration {
        Duration::from_millis(self.paint_interval_ms)
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            paint_interval_ms: 30,
            line_resample_distance: 0.01,
            line_step_tolerance: 0.01,
            line_max_steps: 1000,
        }
    }
}

/// Top-level editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub grid: GridConfig,
    pub tools: ToolConfig,
    /// View scale while zoomed in (smaller is closer).
    pub zoom_factor: f64,
    /// Maximum number of undoable operations.
    pub undo_capacity: usize,
    /// Canvas size in pixels, used to normalise pointer positions.
    pub viewport: Size,
    /// Initial brush color as 0..=255 channels.
    pub brush: [u8; 3],
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            tools: ToolConfig::default(),
            zoom_factor: 0.2,
            undo_capacity: 20,
            viewport: Size::new(512.0, 512.0),
            brush: [255, 0, 0],
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if self.grid.rows == 0 || self.grid.cols == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must have at least one cell, got {}x{}",
                self.grid.rows, self.grid.cols
            )));
        }
        if !positive(self.grid.hex_radius) {
            return Err(ConfigError::Invalid(format!(
                "hex_radius must be positive, got {}",
                self.grid.hex_radius
            )));
        }
        if !positive(self.zoom_factor) {
            return Err(ConfigError::Invalid(format!(
                "zoom_factor must be positive, got {}",
                self.zoom_factor
            )));
        }
        if self.undo_capacity == 0 {
            return Err(ConfigError::Invalid("undo_capacity must be non-zero".to_string()));
        }
        if !positive(self.viewport.width) || !positive(self.viewport.height) {
            return Err(ConfigError::Invalid(format!(
                "viewport must be positive, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if self.tools.line_max_steps == 0 || !positive(self.tools.line_step_tolerance) {
            return Err(ConfigError::Invalid(
                "line rasterizer needs a positive tolerance and step cap".to_string(),
            ));
        }
        Ok(())
    }
}
