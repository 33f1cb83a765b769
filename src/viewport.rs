//! Viewport: pan offset and zoom scale over the infinite world plane.
//!
//! The transform is `screen = world * scale + offset`. Screen space is the
//! surface-local pixel space of the mounted canvas; world space is where
//! entities live.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_MAX_SCALE, CANVAS_MIN_SCALE, ZOOM_SENSITIVITY};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Component-wise sum `self + other`.
    #[must_use]
    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

/// Bounds and sensitivity applied by zoom operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min_scale: f64,
    pub max_scale: f64,
    pub sensitivity: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min_scale: CANVAS_MIN_SCALE, max_scale: CANVAS_MAX_SCALE, sensitivity: ZOOM_SENSITIVITY }
    }
}

impl ZoomLimits {
    /// Clamp a candidate scale into `[min_scale, max_scale]`.
    ///
    /// Inverted bounds resolve to `max_scale` instead of panicking.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.max(self.min_scale).min(self.max_scale)
    }
}

/// World-to-screen transform for the canvas.
///
/// `offset_x` / `offset_y` are in screen pixels and unconstrained.
/// `scale` stays within the active [`ZoomLimits`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { offset_x: 0.0, offset_y: 0.0, scale: 1.0 }
    }
}

impl Viewport {
    /// Convert a screen-space point to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.offset_x) / self.scale,
            y: (screen.y - self.offset_y) / self.scale,
        }
    }

    /// Convert a world-space point to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.offset_x,
            y: world.y * self.scale + self.offset_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Zoom by a wheel delta, keeping the world point under `screen` fixed.
    ///
    /// Positive `delta_y` (wheel down) zooms out.
    pub fn zoom_at(&mut self, screen: Point, delta_y: f64, limits: &ZoomLimits) {
        let factor = (-delta_y * limits.sensitivity).exp();
        self.zoom_to(screen, self.scale * factor, limits);
    }

    /// Multiply the scale by `factor`, keeping the world point under `screen` fixed.
    pub fn zoom_by(&mut self, screen: Point, factor: f64, limits: &ZoomLimits) {
        self.zoom_to(screen, self.scale * factor, limits);
    }

    fn zoom_to(&mut self, screen: Point, target_scale: f64, limits: &ZoomLimits) {
        let world_under = self.screen_to_world(screen);
        let next_scale = limits.clamp(target_scale);
        self.scale = next_scale;
        self.offset_x = screen.x - world_under.x * next_scale;
        self.offset_y = screen.y - world_under.y * next_scale;
    }

    /// Translate the view by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Restore `default`.
    pub fn reset(&mut self, default: Viewport) {
        *self = default;
    }
}
