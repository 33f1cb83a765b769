use super::*;

#[test]
fn surface_not_mounted_message() {
    let err = CanvasError::SurfaceNotMounted;
    assert_eq!(err.to_string(), "canvas surface is not mounted");
    assert_eq!(err.error_code(), "E_SURFACE_NOT_MOUNTED");
}

#[test]
fn invalid_config_carries_reason() {
    let err = CanvasError::InvalidConfig("min_scale must be positive".into());
    assert!(err.to_string().contains("min_scale must be positive"));
    assert_eq!(err.error_code(), "E_INVALID_CONFIG");
}

#[test]
fn config_parse_converts_from_serde_error() {
    let serde_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: CanvasError = serde_err.into();
    assert!(matches!(err, CanvasError::ConfigParse(_)));
    assert_eq!(err.error_code(), "E_CONFIG_PARSE");
}

#[test]
fn surface_error_code() {
    let err = CanvasError::Surface("InvalidPointerId".into());
    assert_eq!(err.error_code(), "E_SURFACE");
    assert!(err.to_string().contains("InvalidPointerId"));
}
