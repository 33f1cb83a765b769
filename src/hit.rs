#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::CONNECT_HANDLE_RADIUS_PX;
use crate::entities::{Entity, EntityId, EntityStore};
use crate::viewport::{Point, Viewport};

/// Which part of an entity was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    /// The drag-to-connect affordance on the entity's right edge.
    ConnectHandle,
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub entity_id: EntityId,
    pub part: HitPart,
}

/// World-space center of an entity's connect handle (midpoint of the right edge).
#[must_use]
pub fn connect_handle_center(entity: &Entity) -> Point {
    Point::new(entity.x + entity.width, entity.y + entity.height / 2.0)
}

/// Test which entity (if any) is under `world_pt`.
///
/// Entities are tested topmost first. When `handles` is set, each entity's
/// connect handle is tested before its body; the handle keeps a constant
/// on-screen radius regardless of zoom.
#[must_use]
pub fn hit_test(world_pt: Point, entities: &EntityStore, viewport: &Viewport, handles: bool) -> Option<Hit> {
    let radius = viewport.screen_dist_to_world(CONNECT_HANDLE_RADIUS_PX);
    for entity in entities.list_all().iter().rev() {
        if handles {
            let handle = connect_handle_center(entity);
            let dx = world_pt.x - handle.x;
            let dy = world_pt.y - handle.y;
            if dx * dx + dy * dy <= radius * radius {
                return Some(Hit { entity_id: entity.id.clone(), part: HitPart::ConnectHandle });
            }
        }
        if entity.contains(world_pt) {
            return Some(Hit { entity_id: entity.id.clone(), part: HitPart::Body });
        }
    }
    None
}
