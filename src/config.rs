//! Engine configuration: zoom limits, seeding layout, node size, edge anchoring.
//!
//! Two presets cover the hosts that embed the engine: the free-form node
//! canvas and the task board. A host may load JSON overrides on top of a
//! preset with [`CanvasConfig::from_json`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    BOARD_GRID_ORIGIN, BOARD_GRID_SPACING_X, BOARD_GRID_SPACING_Y, BOARD_MAX_SCALE, BOARD_MIN_SCALE,
    BOARD_NODE_HEIGHT, BOARD_NODE_WIDTH, CANVAS_GRID_ORIGIN, CANVAS_GRID_SPACING_X, CANVAS_GRID_SPACING_Y,
    CANVAS_MAX_SCALE, CANVAS_MIN_SCALE, CANVAS_NODE_HEIGHT, CANVAS_NODE_WIDTH, ZOOM_SENSITIVITY, ZOOM_STEP,
};
use crate::edges::EdgeAnchor;
use crate::entities::GridLayout;
use crate::error::CanvasError;
use crate::viewport::{Viewport, ZoomLimits};

/// Which host the engine is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CanvasPreset {
    /// General-purpose node canvas.
    #[default]
    FreeCanvas,
    /// Task board canvas.
    TaskBoard,
}

impl CanvasPreset {
    /// Parse a preset name (`"canvas"` or `"board"`).
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidConfig`] for unknown names.
    pub fn parse(raw: &str) -> Result<Self, CanvasError> {
        match raw {
            "canvas" => Ok(Self::FreeCanvas),
            "board" => Ok(Self::TaskBoard),
            other => Err(CanvasError::InvalidConfig(format!(
                "unknown preset '{other}' (expected 'canvas' or 'board')"
            ))),
        }
    }

    /// The full configuration for this preset.
    #[must_use]
    pub fn config(self) -> CanvasConfig {
        match self {
            Self::FreeCanvas => CanvasConfig::free_canvas(),
            Self::TaskBoard => CanvasConfig::task_board(),
        }
    }
}

/// Tunable engine behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Smallest allowed viewport scale.
    pub min_scale: f64,
    /// Largest allowed viewport scale.
    pub max_scale: f64,
    /// Wheel sensitivity used by `exp(-delta_y * sensitivity)`.
    pub zoom_sensitivity: f64,
    /// Scale factor of one zoom-in / zoom-out command.
    pub zoom_step: f64,
    /// Viewport restored by "reset view".
    pub default_viewport: Viewport,
    /// Grid used to place seeded entities without a saved position.
    pub layout: GridLayout,
    /// Width of newly created entities, in world units.
    pub node_width: f64,
    /// Height of newly created entities, in world units.
    pub node_height: f64,
    /// Where edge segments attach to their nodes.
    pub edge_anchor: EdgeAnchor,
    /// Whether entities expose a drag-to-connect handle.
    pub drag_to_connect: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self::free_canvas()
    }
}

impl CanvasConfig {
    /// Preset for the general-purpose node canvas.
    #[must_use]
    pub fn free_canvas() -> Self {
        Self {
            min_scale: CANVAS_MIN_SCALE,
            max_scale: CANVAS_MAX_SCALE,
            zoom_sensitivity: ZOOM_SENSITIVITY,
            zoom_step: ZOOM_STEP,
            default_viewport: Viewport::default(),
            layout: GridLayout {
                origin_x: CANVAS_GRID_ORIGIN,
                origin_y: CANVAS_GRID_ORIGIN,
                spacing_x: CANVAS_GRID_SPACING_X,
                spacing_y: CANVAS_GRID_SPACING_Y,
            },
            node_width: CANVAS_NODE_WIDTH,
            node_height: CANVAS_NODE_HEIGHT,
            edge_anchor: EdgeAnchor::Center,
            drag_to_connect: true,
        }
    }

    /// Preset for the task board.
    #[must_use]
    pub fn task_board() -> Self {
        Self {
            min_scale: BOARD_MIN_SCALE,
            max_scale: BOARD_MAX_SCALE,
            zoom_sensitivity: ZOOM_SENSITIVITY,
            zoom_step: ZOOM_STEP,
            default_viewport: Viewport::default(),
            layout: GridLayout {
                origin_x: BOARD_GRID_ORIGIN,
                origin_y: BOARD_GRID_ORIGIN,
                spacing_x: BOARD_GRID_SPACING_X,
                spacing_y: BOARD_GRID_SPACING_Y,
            },
            node_width: BOARD_NODE_WIDTH,
            node_height: BOARD_NODE_HEIGHT,
            edge_anchor: EdgeAnchor::Boundary,
            drag_to_connect: false,
        }
    }

    /// Build a config from a preset name plus a JSON object of overrides.
    ///
    /// Keys absent from `json` keep the preset's value.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ConfigParse`] for malformed JSON and
    /// [`CanvasError::InvalidConfig`] for unknown presets or out-of-range values.
    pub fn from_json(preset: &str, json: &str) -> Result<Self, CanvasError> {
        let base = serde_json::to_value(CanvasPreset::parse(preset)?.config())?;
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let merged = merge_objects(base, overrides)?;
        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value constraints.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidConfig`] describing the first violation.
    pub fn validate(&self) -> Result<(), CanvasError> {
        if self.min_scale <= 0.0 {
            return Err(CanvasError::InvalidConfig("min_scale must be positive".into()));
        }
        if self.max_scale < self.min_scale {
            return Err(CanvasError::InvalidConfig(format!(
                "max_scale {} is below min_scale {}",
                self.max_scale, self.min_scale
            )));
        }
        if self.zoom_sensitivity <= 0.0 {
            return Err(CanvasError::InvalidConfig("zoom_sensitivity must be positive".into()));
        }
        if self.zoom_step <= 1.0 {
            return Err(CanvasError::InvalidConfig("zoom_step must be greater than 1".into()));
        }
        if self.node_width <= 0.0 || self.node_height <= 0.0 {
            return Err(CanvasError::InvalidConfig("node size must be positive".into()));
        }
        if self.layout.spacing_x <= 0.0 || self.layout.spacing_y <= 0.0 {
            return Err(CanvasError::InvalidConfig("layout spacing must be positive".into()));
        }
        let scale = self.default_viewport.scale;
        if scale < self.min_scale || scale > self.max_scale {
            return Err(CanvasError::InvalidConfig(format!(
                "default_viewport scale {scale} is outside [{}, {}]",
                self.min_scale, self.max_scale
            )));
        }
        Ok(())
    }

    /// Zoom limits derived from this config.
    #[must_use]
    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits { min_scale: self.min_scale, max_scale: self.max_scale, sensitivity: self.zoom_sensitivity }
    }
}

/// Merge the keys of `overrides` into `base`, recursing into nested objects.
fn merge_objects(mut base: serde_json::Value, overrides: serde_json::Value) -> Result<serde_json::Value, CanvasError> {
    let serde_json::Value::Object(incoming) = overrides else {
        return Err(CanvasError::InvalidConfig("config overrides must be a JSON object".into()));
    };
    let Some(existing) = base.as_object_mut() else {
        return Err(CanvasError::InvalidConfig("preset did not serialize to an object".into()));
    };
    for (key, value) in incoming {
        let merged = match (existing.remove(&key), value) {
            (Some(current @ serde_json::Value::Object(_)), nested @ serde_json::Value::Object(_)) => {
                merge_objects(current, nested)?
            }
            (_, value) => value,
        };
        existing.insert(key, merged);
    }
    Ok(base)
}
