//! Error taxonomy for the canvas engine.
//!
//! Only precondition and configuration failures are errors. Guarded no-ops
//! (duplicate edges, self-edges, unknown ids) are reported as `None` or an
//! empty action list instead.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Error returned by engine operations and config loading.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// An operation needed surface geometry before the host mounted the canvas.
    #[error("canvas surface is not mounted")]
    SurfaceNotMounted,
    /// A configuration value violates its constraints.
    #[error("invalid canvas config: {0}")]
    InvalidConfig(String),
    /// Configuration JSON could not be parsed.
    #[error("failed to parse canvas config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    /// A browser surface call (bounding rect, pointer capture) failed.
    #[error("canvas surface call failed: {0}")]
    Surface(String),
}

impl CanvasError {
    /// Stable machine-readable code for the host.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SurfaceNotMounted => "E_SURFACE_NOT_MOUNTED",
            Self::InvalidConfig(_) => "E_INVALID_CONFIG",
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::Surface(_) => "E_SURFACE",
        }
    }
}
