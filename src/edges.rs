//! Edge model and the deduplicated store of undirected connections.

#[cfg(test)]
#[path = "edges_test.rs"]
mod edges_test;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::entities::{Entity, EntityId, EntityStore};
use crate::viewport::Point;

/// Stable identifier of an edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl EdgeId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<&str> for EdgeId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An undirected connection between two distinct entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub from: EntityId,
    pub to: EntityId,
}

impl Edge {
    /// Whether this edge joins `a` and `b`, in either direction.
    #[must_use]
    pub fn joins(&self, a: &EntityId, b: &EntityId) -> bool {
        (&self.from == a && &self.to == b) || (&self.from == b && &self.to == a)
    }

    /// Whether `id` is one of the endpoints.
    #[must_use]
    pub fn touches(&self, id: &EntityId) -> bool {
        &self.from == id || &self.to == id
    }
}

/// An edge as supplied by the persistence collaborator.
pub type EdgeRecord = Edge;

/// Addresses an edge for [`EdgeStore::disconnect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeRef {
    Id(EdgeId),
    /// Unordered endpoint pair.
    Pair(EntityId, EntityId),
}

/// Where rendered edge segments attach to their nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeAnchor {
    /// Segment joins the two node centers.
    #[default]
    Center,
    /// Segment is clipped to each node's rectangle boundary.
    Boundary,
}

/// A world-space line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldSegment {
    pub start: Point,
    pub end: Point,
}

/// Deduplicated set of undirected edges, in insertion order.
#[derive(Debug, Default)]
pub struct EdgeStore {
    edges: Vec<Edge>,
}

impl EdgeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect two entities.
    ///
    /// Returns the new edge, or `None` when `from == to` or the pair is
    /// already connected in either direction.
    pub fn connect(&mut self, from: &EntityId, to: &EntityId) -> Option<Edge> {
        if from == to || self.contains_pair(from, to) {
            debug!(%from, %to, "connect skipped");
            return None;
        }
        let edge = Edge { id: EdgeId::generate(), from: from.clone(), to: to.clone() };
        self.edges.push(edge.clone());
        debug!(id = %edge.id, %from, %to, "edge connected");
        Some(edge)
    }

    /// Remove one edge by id or by endpoint pair, returning it if present.
    pub fn disconnect(&mut self, target: &EdgeRef) -> Option<Edge> {
        let index = self.edges.iter().position(|e| match target {
            EdgeRef::Id(id) => &e.id == id,
            EdgeRef::Pair(a, b) => e.joins(a, b),
        })?;
        Some(self.edges.remove(index))
    }

    /// Remove every edge with `entity` as an endpoint, returning them.
    pub fn remove_all_touching(&mut self, entity: &EntityId) -> Vec<Edge> {
        let (removed, kept): (Vec<Edge>, Vec<Edge>) = std::mem::take(&mut self.edges)
            .into_iter()
            .partition(|e| e.touches(entity));
        self.edges = kept;
        removed
    }

    /// Load edges from the collaborator. Self-edges, repeated pairs and
    /// repeated ids are dropped. Returns the number of edges added.
    pub fn seed(&mut self, records: &[EdgeRecord]) -> usize {
        let mut ids: HashSet<EdgeId> = self.edges.iter().map(|e| e.id.clone()).collect();
        let mut added = 0;
        for record in records {
            if record.from == record.to || self.contains_pair(&record.from, &record.to) || ids.contains(&record.id) {
                continue;
            }
            ids.insert(record.id.clone());
            self.edges.push(record.clone());
            added += 1;
        }
        info!(added, total = self.edges.len(), "edges seeded");
        added
    }

    /// Whether `a` and `b` are connected, in either direction.
    #[must_use]
    pub fn contains_pair(&self, a: &EntityId, b: &EntityId) -> bool {
        self.edges.iter().any(|e| e.joins(a, b))
    }

    #[must_use]
    pub fn list_all(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// World-space segments for every edge whose endpoints both exist.
    #[must_use]
    pub fn list_for_render(&self, entities: &EntityStore, anchor: EdgeAnchor) -> Vec<WorldSegment> {
        self.edges
            .iter()
            .filter_map(|edge| {
                let from = entities.get(&edge.from)?;
                let to = entities.get(&edge.to)?;
                Some(segment_between(from, to, anchor))
            })
            .collect()
    }
}

/// The segment joining two nodes under the given anchoring.
#[must_use]
pub fn segment_between(from: &Entity, to: &Entity, anchor: EdgeAnchor) -> WorldSegment {
    let a = from.center();
    let b = to.center();
    match anchor {
        EdgeAnchor::Center => WorldSegment { start: a, end: b },
        EdgeAnchor::Boundary => {
            let dx = b.x - a.x;
            let dy = b.y - a.y;
            WorldSegment {
                start: boundary_point(a, dx, dy, from.width / 2.0, from.height / 2.0),
                end: boundary_point(b, -dx, -dy, to.width / 2.0, to.height / 2.0),
            }
        }
    }
}

/// Point where the ray from `center` along `(dx, dy)` leaves a box of the given half extents.
fn boundary_point(center: Point, dx: f64, dy: f64, half_w: f64, half_h: f64) -> Point {
    let reach = (dx.abs() / half_w).max(dy.abs() / half_h);
    if !reach.is_finite() || reach <= 0.0 {
        return center;
    }
    let t = 1.0 / reach;
    Point::new(center.x + dx * t, center.y + dy * t)
}
