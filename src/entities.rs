//! Entity model and the ordered in-memory entity store.
//!
//! Entities are the positioned, labeled nodes on the canvas. Store order is
//! draw order: later entities are drawn above earlier ones and win hit tests.
//!
//! Records arrive from the host's persistence layer and are placed with
//! [`EntityStore::seed`], which lays out unpositioned records on a grid and
//! never overrides a position the user has already changed.

#[cfg(test)]
#[path = "entities_test.rs"]
mod entities_test;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::viewport::Point;

/// Stable identifier of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// A fresh random id for entities created on the canvas.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of an entity. Selects the renderer and styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Project,
    Repository,
    Document,
    /// Free-standing labeled rectangle.
    Rectangle,
    /// Task card on the task board.
    Task,
}

/// A positioned, sized, labeled node in world space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Left edge in world coordinates.
    pub x: f64,
    /// Top edge in world coordinates.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
}

impl Entity {
    /// World-space top-left corner.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// World-space geometric center.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `world` lies inside the bounding box (edges inclusive).
    #[must_use]
    pub fn contains(&self, world: Point) -> bool {
        world.x >= self.x && world.x <= self.x + self.width && world.y >= self.y && world.y <= self.y + self.height
    }
}

/// An entity as supplied by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: EntityId,
    pub label: String,
    pub kind: EntityKind,
    /// Saved world-space top-left, if the record has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
}

/// Grid used to place seeded records that carry no saved position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub origin_x: f64,
    pub origin_y: f64,
    pub spacing_x: f64,
    pub spacing_y: f64,
}

impl GridLayout {
    /// Top-left of slot `index` in a grid sized for `count` records.
    ///
    /// The grid is `ceil(sqrt(count))` columns wide, filled row by row.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn slot(&self, index: usize, count: usize) -> Point {
        let columns = ((count.max(1) as f64).sqrt().ceil() as usize).max(1);
        let col = index % columns;
        let row = index / columns;
        Point::new(
            self.origin_x + col as f64 * self.spacing_x,
            self.origin_y + row as f64 * self.spacing_y,
        )
    }
}

/// Outcome of a [`EntityStore::seed`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    /// Records that created new entities.
    pub added: usize,
    /// Records that refreshed an existing entity's label or kind.
    pub refreshed: usize,
    /// Whether the whole call was skipped by the seed guard.
    pub skipped: bool,
}

/// Ordered store of live entities.
#[derive(Debug, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
    last_seeded: Option<Vec<EntityRecord>>,
}

impl EntityStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity, or replace in place the entity with the same id.
    pub fn add(&mut self, entity: Entity) {
        if let Some(existing) = self.entities.iter_mut().find(|e| e.id == entity.id) {
            *existing = entity;
        } else {
            self.entities.push(entity);
        }
    }

    /// Remove an entity by id, returning it if it was present.
    ///
    /// Edges are not touched here; the engine cascades through the edge store.
    pub fn remove(&mut self, id: &EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| &e.id == id)?;
        Some(self.entities.remove(index))
    }

    /// Set an entity's top-left corner. Returns false if the entity doesn't exist.
    pub fn move_to(&mut self, id: &EntityId, top_left: Point) -> bool {
        let Some(entity) = self.get_mut(id) else {
            return false;
        };
        entity.x = top_left.x;
        entity.y = top_left.y;
        true
    }

    #[must_use]
    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| &e.id == id)
    }

    fn get_mut(&mut self, id: &EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| &e.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &EntityId) -> bool {
        self.get(id).is_some()
    }

    /// All entities in draw order (bottom first).
    #[must_use]
    pub fn list_all(&self) -> &[Entity] {
        &self.entities
    }

    /// The topmost entity whose bounding box contains `world`.
    #[must_use]
    pub fn topmost_at(&self, world: Point) -> Option<&Entity> {
        self.entities.iter().rev().find(|e| e.contains(world))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Merge an externally supplied record set into the store.
    ///
    /// New records are placed at their saved position, or on `layout` by
    /// their index in `records`. Records whose id is already present only
    /// refresh label and kind; the current position is kept. Entities absent
    /// from `records` are kept. An empty set, or a set identical to the
    /// previous seed, is skipped entirely.
    pub fn seed(&mut self, records: &[EntityRecord], layout: &GridLayout, size: (f64, f64)) -> SeedReport {
        if records.is_empty() || self.last_seeded.as_deref() == Some(records) {
            debug!(count = records.len(), "entity seed skipped");
            return SeedReport { skipped: true, ..SeedReport::default() };
        }

        let mut report = SeedReport::default();
        let mut seen: HashSet<&EntityId> = HashSet::new();
        let count = records.len();
        for (index, record) in records.iter().enumerate() {
            if !seen.insert(&record.id) {
                continue;
            }
            if let Some(existing) = self.get_mut(&record.id) {
                existing.label.clone_from(&record.label);
                existing.kind = record.kind;
                report.refreshed += 1;
                continue;
            }
            let origin = record.position.unwrap_or_else(|| layout.slot(index, count));
            self.entities.push(Entity {
                id: record.id.clone(),
                kind: record.kind,
                x: origin.x,
                y: origin.y,
                width: size.0,
                height: size.1,
                label: record.label.clone(),
            });
            report.added += 1;
        }

        self.last_seeded = Some(records.to_vec());
        info!(added = report.added, refreshed = report.refreshed, total = self.entities.len(), "entities seeded");
        report
    }
}
