#![allow(clippy::float_cmp)]

use super::*;

// --- Presets ---

#[test]
fn default_is_free_canvas() {
    assert_eq!(CanvasConfig::default(), CanvasConfig::free_canvas());
}

#[test]
fn free_canvas_preset_values() {
    let cfg = CanvasConfig::free_canvas();
    assert_eq!(cfg.min_scale, 0.2);
    assert_eq!(cfg.max_scale, 2.8);
    assert_eq!(cfg.edge_anchor, EdgeAnchor::Center);
    assert!(cfg.drag_to_connect);
    assert!(cfg.validate().is_ok());
}

#[test]
fn task_board_preset_values() {
    let cfg = CanvasConfig::task_board();
    assert_eq!(cfg.min_scale, 0.3);
    assert_eq!(cfg.max_scale, 2.0);
    assert_eq!(cfg.edge_anchor, EdgeAnchor::Boundary);
    assert!(!cfg.drag_to_connect);
    assert!(cfg.validate().is_ok());
}

#[test]
fn zoom_limits_follow_config() {
    let cfg = CanvasConfig::task_board();
    let limits = cfg.zoom_limits();
    assert_eq!(limits.min_scale, 0.3);
    assert_eq!(limits.max_scale, 2.0);
    assert_eq!(limits.sensitivity, cfg.zoom_sensitivity);
}

// --- CanvasPreset ---

#[test]
fn preset_parse_known_names() {
    assert_eq!(CanvasPreset::parse("canvas").unwrap(), CanvasPreset::FreeCanvas);
    assert_eq!(CanvasPreset::parse("board").unwrap(), CanvasPreset::TaskBoard);
}

#[test]
fn preset_parse_unknown_rejects() {
    let err = CanvasPreset::parse("kanban").unwrap_err();
    assert!(matches!(err, CanvasError::InvalidConfig(_)));
    assert!(err.to_string().contains("kanban"));
}

// --- from_json ---

#[test]
fn from_json_empty_object_is_preset() {
    let cfg = CanvasConfig::from_json("board", "{}").unwrap();
    assert_eq!(cfg, CanvasConfig::task_board());
}

#[test]
fn from_json_applies_top_level_override() {
    let cfg = CanvasConfig::from_json("canvas", r#"{"max_scale": 4.0, "drag_to_connect": false}"#).unwrap();
    assert_eq!(cfg.max_scale, 4.0);
    assert!(!cfg.drag_to_connect);
    assert_eq!(cfg.min_scale, 0.2);
}

#[test]
fn from_json_merges_nested_layout() {
    let cfg = CanvasConfig::from_json("canvas", r#"{"layout": {"spacing_x": 300.0}}"#).unwrap();
    assert_eq!(cfg.layout.spacing_x, 300.0);
    assert_eq!(cfg.layout.spacing_y, CanvasConfig::free_canvas().layout.spacing_y);
}

#[test]
fn from_json_parses_edge_anchor() {
    let cfg = CanvasConfig::from_json("canvas", r#"{"edge_anchor": "boundary"}"#).unwrap();
    assert_eq!(cfg.edge_anchor, EdgeAnchor::Boundary);
}

#[test]
fn from_json_malformed_is_parse_error() {
    let err = CanvasConfig::from_json("canvas", "{max_scale").unwrap_err();
    assert!(matches!(err, CanvasError::ConfigParse(_)));
}

#[test]
fn from_json_non_object_rejects() {
    let err = CanvasConfig::from_json("canvas", "[1, 2]").unwrap_err();
    assert!(matches!(err, CanvasError::InvalidConfig(_)));
}

#[test]
fn from_json_unknown_preset_rejects() {
    let err = CanvasConfig::from_json("timeline", "{}").unwrap_err();
    assert!(matches!(err, CanvasError::InvalidConfig(_)));
}

#[test]
fn from_json_validates_ranges() {
    let err = CanvasConfig::from_json("canvas", r#"{"min_scale": 3.0}"#).unwrap_err();
    assert!(err.to_string().contains("below min_scale"));
}

// --- validate ---

#[test]
fn validate_rejects_non_positive_min_scale() {
    let cfg = CanvasConfig { min_scale: 0.0, ..CanvasConfig::free_canvas() };
    assert!(cfg.validate().is_err());
}

#[test]
fn validate_rejects_zero_sensitivity() {
    let cfg = CanvasConfig { zoom_sensitivity: 0.0, ..CanvasConfig::free_canvas() };
    assert!(cfg.validate().is_err());
}

#[test]
fn validate_rejects_step_at_most_one() {
    let cfg = CanvasConfig { zoom_step: 1.0, ..CanvasConfig::free_canvas() };
    assert!(cfg.validate().is_err());
}

#[test]
fn validate_rejects_empty_node_size() {
    let cfg = CanvasConfig { node_width: 0.0, ..CanvasConfig::free_canvas() };
    assert!(cfg.validate().is_err());
}

#[test]
fn validate_rejects_default_viewport_out_of_range() {
    let cfg = CanvasConfig {
        default_viewport: Viewport { offset_x: 0.0, offset_y: 0.0, scale: 5.0 },
        ..CanvasConfig::free_canvas()
    };
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("default_viewport"));
}
