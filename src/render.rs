//! Render projection: maps entities, edges and the viewport to screen-space primitives.
//!
//! This module does not draw. It produces a [`RenderFrame`] that the host's
//! drawing layer consumes. Per-kind visuals come from [`NodeRenderer`]
//! implementations looked up in a [`RendererRegistry`]; the projection itself
//! never branches on kind.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::collections::HashMap;

use serde::Serialize;

use crate::edges::{EdgeAnchor, EdgeStore, WorldSegment};
use crate::entities::{Entity, EntityId, EntityKind, EntityStore};
use crate::input::{Connecting, InputState};
use crate::menu::ContextMenu;
use crate::viewport::{Point, Viewport};

/// Default stroke color for node outlines and edges.
const DEFAULT_STROKE: &str = "#1F1A17";

/// Visual hints for one node, chosen by its renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeStyle {
    /// Fill color as a CSS color string.
    pub fill: String,
    /// Stroke color as a CSS color string.
    pub stroke: String,
    /// Label color as a CSS color string.
    pub text: String,
    /// Corner radius in world units.
    pub corner_radius: f64,
    /// Short tag drawn next to the label (e.g. `"PRJ"`), if any.
    pub badge: Option<String>,
}

/// Capability that supplies the visuals for one entity kind.
pub trait NodeRenderer {
    /// Style hints for `entity`.
    fn style(&self, entity: &Entity) -> NodeStyle;
}

/// Flat card with a colored fill and an optional badge.
#[derive(Debug, Clone)]
pub struct CardRenderer {
    pub fill: &'static str,
    pub corner_radius: f64,
    pub badge: Option<&'static str>,
}

impl NodeRenderer for CardRenderer {
    fn style(&self, _entity: &Entity) -> NodeStyle {
        NodeStyle {
            fill: self.fill.to_owned(),
            stroke: DEFAULT_STROKE.to_owned(),
            text: DEFAULT_STROKE.to_owned(),
            corner_radius: self.corner_radius,
            badge: self.badge.map(str::to_owned),
        }
    }
}

/// Renderers keyed by entity kind, with a fallback for unregistered kinds.
pub struct RendererRegistry {
    renderers: HashMap<EntityKind, Box<dyn NodeRenderer>>,
    fallback: Box<dyn NodeRenderer>,
}

impl Default for RendererRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(EntityKind::Project, CardRenderer { fill: "#F2C14E", corner_radius: 10.0, badge: Some("PRJ") });
        registry.register(
            EntityKind::Repository,
            CardRenderer { fill: "#7FB7BE", corner_radius: 10.0, badge: Some("REPO") },
        );
        registry.register(EntityKind::Document, CardRenderer { fill: "#F7F4EA", corner_radius: 4.0, badge: Some("DOC") });
        registry.register(EntityKind::Rectangle, CardRenderer { fill: "#D94B4B", corner_radius: 0.0, badge: None });
        registry.register(EntityKind::Task, CardRenderer { fill: "#FFFFFF", corner_radius: 8.0, badge: None });
        registry
    }
}

impl RendererRegistry {
    /// A registry with no per-kind renderers; every kind uses the fallback.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
            fallback: Box::new(CardRenderer { fill: "#E6E6E6", corner_radius: 6.0, badge: None }),
        }
    }

    /// Install or replace the renderer for `kind`.
    pub fn register(&mut self, kind: EntityKind, renderer: impl NodeRenderer + 'static) {
        self.renderers.insert(kind, Box::new(renderer));
    }

    /// The renderer responsible for `kind`.
    #[must_use]
    pub fn get(&self, kind: EntityKind) -> &dyn NodeRenderer {
        self.renderers.get(&kind).map_or(&*self.fallback, |r| &**r)
    }
}

/// One node in screen space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodePrimitive {
    pub id: EntityId,
    pub screen_x: f64,
    pub screen_y: f64,
    pub screen_width: f64,
    pub screen_height: f64,
    pub kind: EntityKind,
    pub label: String,
    pub is_selected: bool,
    pub is_connect_source: bool,
    pub style: NodeStyle,
}

/// One edge line in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl EdgeSegment {
    fn project(segment: WorldSegment, viewport: &Viewport) -> Self {
        let start = viewport.world_to_screen(segment.start);
        let end = viewport.world_to_screen(segment.end);
        Self { x1: start.x, y1: start.y, x2: end.x, y2: end.y }
    }
}

/// Everything the host needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    /// Nodes in draw order (bottom first).
    pub nodes: Vec<NodePrimitive>,
    pub edges: Vec<EdgeSegment>,
    /// Rubber-band line of an in-flight connection drag.
    pub preview: Option<EdgeSegment>,
    pub menu: Option<ContextMenu>,
}

/// Read-only inputs to [`project`].
pub struct Scene<'a> {
    pub entities: &'a EntityStore,
    pub edges: &'a EdgeStore,
    pub viewport: &'a Viewport,
    pub mode: &'a InputState,
    pub selected: Option<&'a EntityId>,
    pub menu: Option<ContextMenu>,
    pub anchor: EdgeAnchor,
}

/// Project the scene into screen space.
#[must_use]
pub fn project(scene: &Scene<'_>, registry: &RendererRegistry) -> RenderFrame {
    let viewport = scene.viewport;
    let connect_source = match scene.mode {
        InputState::Connecting(connecting) => connecting.source(),
        _ => None,
    };

    let nodes = scene
        .entities
        .list_all()
        .iter()
        .map(|entity| {
            let (top_left, screen_width, screen_height) = screen_rect(entity, viewport);
            NodePrimitive {
                id: entity.id.clone(),
                screen_x: top_left.x,
                screen_y: top_left.y,
                screen_width,
                screen_height,
                kind: entity.kind,
                label: entity.label.clone(),
                is_selected: scene.selected == Some(&entity.id),
                is_connect_source: connect_source == Some(&entity.id),
                style: registry.get(entity.kind).style(entity),
            }
        })
        .collect();

    let edges = scene
        .edges
        .list_for_render(scene.entities, scene.anchor)
        .into_iter()
        .map(|segment| EdgeSegment::project(segment, viewport))
        .collect();

    let preview = match scene.mode {
        InputState::Connecting(Connecting::Drag { source, preview }) => {
            scene.entities.get(source).map(|entity| {
                EdgeSegment::project(WorldSegment { start: entity.center(), end: *preview }, viewport)
            })
        }
        _ => None,
    };

    RenderFrame { nodes, edges, preview, menu: scene.menu }
}

/// Screen-space rectangle of an entity, for hosts positioning DOM overlays.
#[must_use]
pub fn screen_rect(entity: &Entity, viewport: &Viewport) -> (Point, f64, f64) {
    (
        viewport.world_to_screen(entity.origin()),
        entity.width * viewport.scale,
        entity.height * viewport.scale,
    )
}
