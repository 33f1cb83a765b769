#![allow(clippy::float_cmp)]

use super::*;
use crate::entities::EntityKind;

const EPSILON: f64 = 1e-9;

fn point_approx_eq(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

fn id(raw: &str) -> EntityId {
    EntityId::from(raw)
}

fn make_entity(raw: &str, x: f64, y: f64, w: f64, h: f64) -> Entity {
    Entity { id: id(raw), kind: EntityKind::Task, x, y, width: w, height: h, label: raw.to_owned() }
}

fn edge_record(edge_id: &str, from: &str, to: &str) -> EdgeRecord {
    Edge { id: EdgeId::from(edge_id), from: id(from), to: id(to) }
}

// =============================================================
// connect
// =============================================================

#[test]
fn connect_creates_edge() {
    let mut store = EdgeStore::new();
    let edge = store.connect(&id("a"), &id("b")).unwrap();
    assert_eq!(edge.from, id("a"));
    assert_eq!(edge.to, id("b"));
    assert_eq!(store.len(), 1);
}

#[test]
fn connect_twice_is_noop() {
    let mut store = EdgeStore::new();
    store.connect(&id("a"), &id("b"));
    assert!(store.connect(&id("a"), &id("b")).is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn connect_reverse_direction_is_noop() {
    let mut store = EdgeStore::new();
    store.connect(&id("a"), &id("b"));
    assert!(store.connect(&id("b"), &id("a")).is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn connect_self_is_noop() {
    let mut store = EdgeStore::new();
    assert!(store.connect(&id("a"), &id("a")).is_none());
    assert!(store.is_empty());
}

#[test]
fn connect_generates_distinct_ids() {
    let mut store = EdgeStore::new();
    let e1 = store.connect(&id("a"), &id("b")).unwrap();
    let e2 = store.connect(&id("a"), &id("c")).unwrap();
    assert_ne!(e1.id, e2.id);
}

// =============================================================
// disconnect / cascade
// =============================================================

#[test]
fn disconnect_by_id() {
    let mut store = EdgeStore::new();
    let edge = store.connect(&id("a"), &id("b")).unwrap();
    let removed = store.disconnect(&EdgeRef::Id(edge.id.clone())).unwrap();
    assert_eq!(removed, edge);
    assert!(store.is_empty());
}

#[test]
fn disconnect_by_pair_either_order() {
    let mut store = EdgeStore::new();
    store.connect(&id("a"), &id("b"));
    assert!(store.disconnect(&EdgeRef::Pair(id("b"), id("a"))).is_some());
    assert!(store.is_empty());
}

#[test]
fn disconnect_missing_is_noop() {
    let mut store = EdgeStore::new();
    store.connect(&id("a"), &id("b"));
    assert!(store.disconnect(&EdgeRef::Pair(id("a"), id("c"))).is_none());
    assert!(store.disconnect(&EdgeRef::Id(EdgeId::from("nope"))).is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn remove_all_touching_removes_only_incident_edges() {
    let mut store = EdgeStore::new();
    store.connect(&id("a"), &id("b"));
    store.connect(&id("c"), &id("a"));
    store.connect(&id("b"), &id("c"));
    let removed = store.remove_all_touching(&id("a"));
    assert_eq!(removed.len(), 2);
    assert!(removed.iter().all(|e| e.touches(&id("a"))));
    assert_eq!(store.len(), 1);
    assert!(store.contains_pair(&id("b"), &id("c")));
}

#[test]
fn remove_all_touching_unknown_is_empty() {
    let mut store = EdgeStore::new();
    store.connect(&id("a"), &id("b"));
    assert!(store.remove_all_touching(&id("z")).is_empty());
    assert_eq!(store.len(), 1);
}

// =============================================================
// seed
// =============================================================

#[test]
fn seed_drops_self_and_duplicate_pairs() {
    let mut store = EdgeStore::new();
    let added = store.seed(&[
        edge_record("e1", "a", "b"),
        edge_record("e2", "b", "a"),
        edge_record("e3", "c", "c"),
        edge_record("e4", "b", "c"),
    ]);
    assert_eq!(added, 2);
    assert_eq!(store.len(), 2);
}

#[test]
fn seed_twice_does_not_duplicate() {
    let mut store = EdgeStore::new();
    let recs = [edge_record("e1", "a", "b")];
    store.seed(&recs);
    assert_eq!(store.seed(&recs), 0);
    assert_eq!(store.len(), 1);
}

#[test]
fn edge_record_deserializes() {
    let rec: EdgeRecord = serde_json::from_str(r#"{"id":"e1","from":"a","to":"b"}"#).unwrap();
    assert_eq!(rec, edge_record("e1", "a", "b"));
}

// =============================================================
// Render segments
// =============================================================

#[test]
fn center_anchor_joins_centers() {
    let a = make_entity("a", 0.0, 0.0, 100.0, 50.0);
    let b = make_entity("b", 300.0, 0.0, 100.0, 50.0);
    let seg = segment_between(&a, &b, EdgeAnchor::Center);
    assert_eq!(seg.start, Point::new(50.0, 25.0));
    assert_eq!(seg.end, Point::new(350.0, 25.0));
}

#[test]
fn boundary_anchor_horizontal_clips_to_sides() {
    let a = make_entity("a", 0.0, 0.0, 100.0, 50.0);
    let b = make_entity("b", 300.0, 0.0, 100.0, 50.0);
    let seg = segment_between(&a, &b, EdgeAnchor::Boundary);
    assert!(point_approx_eq(seg.start, Point::new(100.0, 25.0)));
    assert!(point_approx_eq(seg.end, Point::new(300.0, 25.0)));
}

#[test]
fn boundary_anchor_vertical_clips_to_top_and_bottom() {
    let a = make_entity("a", 0.0, 0.0, 100.0, 50.0);
    let b = make_entity("b", 0.0, 200.0, 100.0, 50.0);
    let seg = segment_between(&a, &b, EdgeAnchor::Boundary);
    assert!(point_approx_eq(seg.start, Point::new(50.0, 50.0)));
    assert!(point_approx_eq(seg.end, Point::new(50.0, 200.0)));
}

#[test]
fn boundary_anchor_diagonal_uses_dominant_axis() {
    // centers (50, 25) and (450, 125): dx = 400, dy = 100
    let a = make_entity("a", 0.0, 0.0, 100.0, 50.0);
    let b = make_entity("b", 400.0, 100.0, 100.0, 50.0);
    let seg = segment_between(&a, &b, EdgeAnchor::Boundary);
    // max(400/50, 100/25) = 8 -> t = 1/8
    assert!(point_approx_eq(seg.start, Point::new(100.0, 37.5)));
    assert!(point_approx_eq(seg.end, Point::new(400.0, 112.5)));
}

#[test]
fn boundary_anchor_coincident_centers_falls_back_to_center() {
    let a = make_entity("a", 0.0, 0.0, 100.0, 50.0);
    let b = make_entity("b", 0.0, 0.0, 100.0, 50.0);
    let seg = segment_between(&a, &b, EdgeAnchor::Boundary);
    assert_eq!(seg.start, Point::new(50.0, 25.0));
    assert_eq!(seg.end, Point::new(50.0, 25.0));
}

#[test]
fn list_for_render_skips_dangling_edges() {
    let mut entities = EntityStore::new();
    entities.add(make_entity("a", 0.0, 0.0, 100.0, 50.0));
    entities.add(make_entity("b", 300.0, 0.0, 100.0, 50.0));
    let mut store = EdgeStore::new();
    store.connect(&id("a"), &id("b"));
    store.connect(&id("a"), &id("ghost"));
    let segments = store.list_for_render(&entities, EdgeAnchor::Center);
    assert_eq!(segments.len(), 1);
}
