//! Context menu opened by right-click (or long-press) on the background.
//!
//! The host draws the menu; the engine only tracks where it is anchored and
//! which world point its "create entity" action targets.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use serde::Serialize;

use crate::consts::{MENU_HEIGHT_PX, MENU_WIDTH_PX};
use crate::entities::{Entity, EntityId, EntityKind};
use crate::viewport::Point;

/// An open context menu.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContextMenu {
    /// Screen-space top-left of the menu.
    pub screen: Point,
    /// World point under the pointer when the menu opened.
    pub world: Point,
}

impl ContextMenu {
    /// Whether a screen-space point falls inside the menu's footprint.
    #[must_use]
    pub fn contains(&self, screen: Point) -> bool {
        screen.x >= self.screen.x
            && screen.x <= self.screen.x + MENU_WIDTH_PX
            && screen.y >= self.screen.y
            && screen.y <= self.screen.y + MENU_HEIGHT_PX
    }
}

/// A new entity of the given size centered on `world`.
#[must_use]
pub fn entity_centered_at(world: Point, kind: EntityKind, label: String, size: (f64, f64)) -> Entity {
    let (width, height) = size;
    Entity {
        id: EntityId::generate(),
        kind,
        x: world.x - width / 2.0,
        y: world.y - height / 2.0,
        width,
        height,
        label,
    }
}
