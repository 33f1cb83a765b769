use serde::Serialize;
use tracing::{debug, warn};
use wasm_bindgen::JsValue;
use web_sys::HtmlCanvasElement;

use crate::config::CanvasConfig;
use crate::edges::{Edge, EdgeId, EdgeRecord, EdgeRef, EdgeStore};
use crate::entities::{Entity, EntityId, EntityKind, EntityRecord, EntityStore, SeedReport};
use crate::error::CanvasError;
use crate::hit::{HitPart, hit_test};
use crate::input::{Button, Connecting, InputState, Key, Modifiers, UiState, WheelDelta};
use crate::menu::{ContextMenu, entity_centered_at};
use crate::render::{RenderFrame, RendererRegistry, Scene, project};
use crate::viewport::{Point, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from handlers for the host to process.
///
/// Entity and edge variants are change notifications for the persistence
/// collaborator; the rest are effects on the host surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    EntityCreated { id: EntityId, world_x: f64, world_y: f64, kind: EntityKind, label: String },
    /// Emitted once per completed drag, never per intermediate frame.
    EntityMoved { id: EntityId, world_x: f64, world_y: f64 },
    EntityDeleted { id: EntityId },
    EdgeCreated { id: EdgeId, from: EntityId, to: EntityId },
    EdgeDeleted { id: EdgeId, from: EntityId, to: EntityId },
    CapturePointer,
    ReleasePointer,
    SetCursor { cursor: String },
    MenuOpened(ContextMenu),
    MenuClosed,
    RenderNeeded,
}

impl Action {
    fn edge_created(edge: Edge) -> Self {
        Self::EdgeCreated { id: edge.id, from: edge.from, to: edge.to }
    }

    fn edge_deleted(edge: Edge) -> Self {
        Self::EdgeDeleted { id: edge.id, from: edge.from, to: edge.to }
    }
}

/// Client-space rectangle of the mounted canvas, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Surface {
    /// Convert a client-space point to surface-local screen space.
    #[must_use]
    pub fn to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }

    /// Surface-local center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Engine state and interaction logic, independent of the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub entities: EntityStore,
    pub edges: EdgeStore,
    pub viewport: Viewport,
    pub ui: UiState,
    pub input: InputState,
    pub config: CanvasConfig,
    pub renderers: RendererRegistry,
    surface: Option<Surface>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(CanvasConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine for the given configuration.
    ///
    /// An invalid config is logged with `warn!`, not rejected.
    #[must_use]
    pub fn with_config(config: CanvasConfig) -> Self {
        if let Err(err) = config.validate() {
            warn!(error = %err, code = err.error_code(), "engine created with an invalid config");
        }
        Self {
            entities: EntityStore::new(),
            edges: EdgeStore::new(),
            viewport: config.default_viewport,
            ui: UiState::default(),
            input: InputState::default(),
            renderers: RendererRegistry::default(),
            config,
            surface: None,
        }
    }

    // --- Surface ---

    /// Record the canvas geometry. Must be called before any pointer input.
    pub fn mount_surface(&mut self, surface: Surface) {
        debug!(?surface, "surface mounted");
        self.surface = Some(surface);
    }

    /// Forget the canvas geometry (the element was detached).
    pub fn unmount_surface(&mut self) {
        debug!("surface unmounted");
        self.surface = None;
    }

    #[must_use]
    pub fn surface(&self) -> Option<Surface> {
        self.surface
    }

    fn require_surface(&self) -> Result<Surface, CanvasError> {
        self.surface.ok_or_else(|| {
            warn!("canvas geometry requested before the surface was mounted");
            CanvasError::SurfaceNotMounted
        })
    }

    /// Convert a client-space point to surface-local screen space.
    ///
    /// # Errors
    ///
    /// [`CanvasError::SurfaceNotMounted`] if no surface is mounted.
    pub fn client_to_screen(&self, client: Point) -> Result<Point, CanvasError> {
        Ok(self.require_surface()?.to_local(client))
    }

    /// Convert a surface-local screen point to world space.
    ///
    /// # Errors
    ///
    /// [`CanvasError::SurfaceNotMounted`] if no surface is mounted.
    pub fn screen_to_world(&self, screen: Point) -> Result<Point, CanvasError> {
        self.require_surface()?;
        Ok(self.viewport.screen_to_world(screen))
    }

    // --- Data inputs ---

    /// Seed or refresh entities from the collaborator's records.
    pub fn seed_entities(&mut self, records: &[EntityRecord]) -> SeedReport {
        let size = (self.config.node_width, self.config.node_height);
        self.entities.seed(records, &self.config.layout, size)
    }

    /// Seed edges from the collaborator's records. Returns the number added.
    pub fn seed_edges(&mut self, records: &[EdgeRecord]) -> usize {
        self.edges.seed(records)
    }

    /// Insert an entity supplied by the collaborator. No notification is emitted.
    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.add(entity);
    }

    /// Delete an entity and every edge touching it.
    ///
    /// Unknown ids are a no-op. Selection, connect source, or an in-flight
    /// gesture referring to the entity are cleared.
    pub fn remove_entity(&mut self, id: &EntityId) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.entities.remove(id).is_none() {
            return actions;
        }
        let removed = self.edges.remove_all_touching(id);
        debug!(%id, edges = removed.len(), "entity removed");
        actions.extend(removed.into_iter().map(Action::edge_deleted));
        actions.push(Action::EntityDeleted { id: id.clone() });

        if self.ui.selected_id.as_ref() == Some(id) {
            self.ui.selected_id = None;
        }
        let ends_gesture = match &mut self.input {
            InputState::Connecting(Connecting::Click { source }) => {
                if source.as_ref() == Some(id) {
                    *source = None;
                }
                false
            }
            InputState::DraggingEntity { id: dragged, .. } => dragged == id,
            InputState::Connecting(Connecting::Drag { source, .. }) => source == id,
            InputState::Idle | InputState::Panning { .. } => false,
        };
        if ends_gesture {
            self.input = InputState::Idle;
            actions.push(Action::ReleasePointer);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Create an entity with the default size centered on `world`.
    pub fn create_entity_at(&mut self, world: Point, kind: EntityKind, label: String) -> Vec<Action> {
        let size = (self.config.node_width, self.config.node_height);
        let entity = entity_centered_at(world, kind, label, size);
        debug!(id = %entity.id, ?kind, "entity created");
        let action = Action::EntityCreated {
            id: entity.id.clone(),
            world_x: entity.x,
            world_y: entity.y,
            kind: entity.kind,
            label: entity.label.clone(),
        };
        self.entities.add(entity);
        vec![action, Action::RenderNeeded]
    }

    /// Connect two existing entities. Self-edges, repeated pairs, and unknown ids are no-ops.
    pub fn connect(&mut self, from: &EntityId, to: &EntityId) -> Vec<Action> {
        let mut actions = Vec::new();
        self.connect_into(from, to, &mut actions);
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    fn connect_into(&mut self, from: &EntityId, to: &EntityId, actions: &mut Vec<Action>) {
        if !self.entities.contains(from) || !self.entities.contains(to) {
            return;
        }
        if let Some(edge) = self.edges.connect(from, to) {
            actions.push(Action::edge_created(edge));
        }
    }

    /// Remove one edge by id or endpoint pair.
    pub fn disconnect(&mut self, target: &EdgeRef) -> Vec<Action> {
        match self.edges.disconnect(target) {
            Some(edge) => vec![Action::edge_deleted(edge), Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    // --- Modes / view commands ---

    /// Enter or leave click-to-connect mode.
    ///
    /// Entering is ignored while a pointer gesture is in flight.
    pub fn set_connect_mode(&mut self, active: bool) -> Vec<Action> {
        match (&self.input, active) {
            (InputState::Idle, true) => {
                self.input = InputState::Connecting(Connecting::Click { source: None });
            }
            (InputState::Connecting(Connecting::Click { .. }), false) => {
                self.input = InputState::Idle;
            }
            _ => return Vec::new(),
        }
        debug!(active, "connect mode toggled");
        vec![Action::RenderNeeded]
    }

    /// Restore the configured default viewport.
    pub fn reset_view(&mut self) -> Vec<Action> {
        self.viewport.reset(self.config.default_viewport);
        vec![Action::RenderNeeded]
    }

    /// Zoom in one step around the surface center.
    ///
    /// # Errors
    ///
    /// [`CanvasError::SurfaceNotMounted`] if no surface is mounted.
    pub fn zoom_in(&mut self) -> Result<Vec<Action>, CanvasError> {
        self.zoom_step(self.config.zoom_step)
    }

    /// Zoom out one step around the surface center.
    ///
    /// # Errors
    ///
    /// [`CanvasError::SurfaceNotMounted`] if no surface is mounted.
    pub fn zoom_out(&mut self) -> Result<Vec<Action>, CanvasError> {
        self.zoom_step(1.0 / self.config.zoom_step)
    }

    fn zoom_step(&mut self, factor: f64) -> Result<Vec<Action>, CanvasError> {
        let center = self.require_surface()?.center();
        self.viewport.zoom_by(center, factor, &self.config.zoom_limits());
        Ok(vec![Action::RenderNeeded])
    }

    // --- Input events ---

    /// Handle pointer-down at a client-space point.
    ///
    /// # Errors
    ///
    /// [`CanvasError::SurfaceNotMounted`] if no surface is mounted.
    pub fn on_pointer_down(
        &mut self,
        client: Point,
        button: Button,
        modifiers: Modifiers,
    ) -> Result<Vec<Action>, CanvasError> {
        let screen = self.client_to_screen(client)?;
        let world = self.viewport.screen_to_world(screen);
        let mut actions = Vec::new();

        if let Some(menu) = self.ui.menu {
            if menu.contains(screen) {
                return Ok(actions);
            }
            self.close_menu(&mut actions);
        }

        match &self.input {
            InputState::Idle => {}
            InputState::Connecting(Connecting::Click { .. }) => {
                self.click_connect(world, button, &mut actions);
                return Ok(actions);
            }
            // One gesture at a time; extra pointers are ignored.
            _ => return Ok(actions),
        }

        let hit = hit_test(world, &self.entities, &self.viewport, self.config.drag_to_connect);
        match (button, hit) {
            (Button::Middle, _) => self.start_pan(screen, &mut actions),
            (Button::Secondary, None) => self.open_menu(screen, world, &mut actions),
            (Button::Secondary, Some(_)) => {}
            (Button::Primary, hit) => {
                let pan_modifier = self.ui.pan_key_held || modifiers.alt;
                match hit {
                    Some(hit) if !pan_modifier => match hit.part {
                        HitPart::ConnectHandle => self.start_connect_drag(hit.entity_id, world, &mut actions),
                        HitPart::Body => self.start_drag(hit.entity_id, world, &mut actions),
                    },
                    Some(_) => self.start_pan(screen, &mut actions),
                    None => {
                        if self.ui.selected_id.take().is_some() {
                            actions.push(Action::RenderNeeded);
                        }
                        self.start_pan(screen, &mut actions);
                    }
                }
            }
        }
        Ok(actions)
    }

    /// Handle pointer-move at a client-space point.
    ///
    /// # Errors
    ///
    /// [`CanvasError::SurfaceNotMounted`] if no surface is mounted.
    pub fn on_pointer_move(&mut self, client: Point) -> Result<Vec<Action>, CanvasError> {
        let screen = self.client_to_screen(client)?;
        let world = self.viewport.screen_to_world(screen);
        let mut actions = Vec::new();

        match &mut self.input {
            InputState::Panning { anchor_screen, anchor_offset } => {
                let offset = anchor_offset.add(screen.sub(*anchor_screen));
                self.viewport.offset_x = offset.x;
                self.viewport.offset_y = offset.y;
                actions.push(Action::RenderNeeded);
            }
            InputState::DraggingEntity { id, grab_offset, moved } => {
                let top_left = world.sub(*grab_offset);
                let changed = self.entities.get(id).is_some_and(|e| e.origin() != top_left);
                if changed && self.entities.move_to(id, top_left) {
                    *moved = true;
                    actions.push(Action::RenderNeeded);
                }
            }
            InputState::Connecting(Connecting::Drag { preview, .. }) => {
                *preview = world;
                actions.push(Action::RenderNeeded);
            }
            InputState::Idle | InputState::Connecting(Connecting::Click { .. }) => {
                let cursor = self.hover_cursor(world);
                self.set_cursor(cursor, &mut actions);
            }
        }
        Ok(actions)
    }

    /// Handle pointer-up at a client-space point, ending any gesture.
    ///
    /// The gesture is ended before geometry is consulted, so a lifecycle
    /// error can never leave a mode stuck.
    ///
    /// # Errors
    ///
    /// [`CanvasError::SurfaceNotMounted`] if a connection drag ends while no surface is mounted.
    pub fn on_pointer_up(&mut self, client: Point) -> Result<Vec<Action>, CanvasError> {
        let finished = std::mem::take(&mut self.input);
        let mut actions = Vec::new();
        match finished {
            InputState::Idle => return Ok(actions),
            click @ InputState::Connecting(Connecting::Click { .. }) => {
                self.input = click;
                return Ok(actions);
            }
            InputState::Panning { .. } => {
                debug!(offset_x = self.viewport.offset_x, offset_y = self.viewport.offset_y, "pan finished");
            }
            InputState::DraggingEntity { id, moved, .. } => self.commit_drag(&id, moved, &mut actions),
            InputState::Connecting(Connecting::Drag { source, .. }) => {
                let screen = match self.client_to_screen(client) {
                    Ok(screen) => screen,
                    Err(err) => {
                        self.end_gesture(&mut actions);
                        return Err(err);
                    }
                };
                let world = self.viewport.screen_to_world(screen);
                if let Some(target) = self.entities.topmost_at(world).map(|e| e.id.clone()) {
                    self.connect_into(&source, &target, &mut actions);
                }
                debug!(%source, connected = !actions.is_empty(), "connection drag finished");
            }
        }
        self.end_gesture(&mut actions);
        Ok(actions)
    }

    /// Handle pointer-cancel. Ends any gesture like pointer-up, except that a
    /// cancelled connection drag never creates an edge.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        let finished = std::mem::take(&mut self.input);
        let mut actions = Vec::new();
        match finished {
            InputState::Idle => return actions,
            click @ InputState::Connecting(Connecting::Click { .. }) => {
                self.input = click;
                return actions;
            }
            InputState::DraggingEntity { id, moved, .. } => self.commit_drag(&id, moved, &mut actions),
            InputState::Panning { .. } | InputState::Connecting(Connecting::Drag { .. }) => {}
        }
        debug!("gesture cancelled");
        self.end_gesture(&mut actions);
        actions
    }

    /// Handle a wheel event: zoom around the pointer, in any mode.
    ///
    /// # Errors
    ///
    /// [`CanvasError::SurfaceNotMounted`] if no surface is mounted.
    pub fn on_wheel(&mut self, client: Point, delta: WheelDelta) -> Result<Vec<Action>, CanvasError> {
        let screen = self.client_to_screen(client)?;
        self.viewport.zoom_at(screen, delta.dy, &self.config.zoom_limits());
        // A pan in flight continues from the zoomed view.
        if let InputState::Panning { anchor_screen, anchor_offset } = &mut self.input {
            *anchor_screen = screen;
            *anchor_offset = Point::new(self.viewport.offset_x, self.viewport.offset_y);
        }
        Ok(vec![Action::RenderNeeded])
    }

    /// Handle a context-menu request (right-click or long-press) at a client-space point.
    ///
    /// Opens the menu only over the background and only when no gesture is in flight.
    ///
    /// # Errors
    ///
    /// [`CanvasError::SurfaceNotMounted`] if no surface is mounted.
    pub fn on_context_menu(&mut self, client: Point) -> Result<Vec<Action>, CanvasError> {
        let screen = self.client_to_screen(client)?;
        let world = self.viewport.screen_to_world(screen);
        let mut actions = Vec::new();
        if self.input.is_gesture() || self.entities.topmost_at(world).is_some() {
            return Ok(actions);
        }
        self.open_menu(screen, world, &mut actions);
        Ok(actions)
    }

    /// Handle a key press.
    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        let mut actions = Vec::new();
        if key.is_pan_modifier() {
            self.ui.pan_key_held = true;
            if self.input == InputState::Idle {
                self.set_cursor("grab", &mut actions);
            }
        } else if key.is_escape() {
            self.escape(&mut actions);
        } else if key.is_delete() && self.input == InputState::Idle {
            if let Some(id) = self.ui.selected_id.clone() {
                actions.extend(self.remove_entity(&id));
            }
        }
        actions
    }

    /// Handle a key release.
    pub fn on_key_up(&mut self, key: &Key) -> Vec<Action> {
        let mut actions = Vec::new();
        if key.is_pan_modifier() {
            self.ui.pan_key_held = false;
            if self.input == InputState::Idle {
                self.set_cursor("default", &mut actions);
            }
        }
        actions
    }

    /// Run the menu's "create entity" action at the menu's world point, then close it.
    pub fn create_entity_from_menu(&mut self, kind: EntityKind, label: String) -> Vec<Action> {
        let Some(menu) = self.ui.menu.take() else {
            return Vec::new();
        };
        let mut actions = self.create_entity_at(menu.world, kind, label);
        actions.insert(actions.len() - 1, Action::MenuClosed);
        actions
    }

    // --- Transitions ---

    fn start_pan(&mut self, screen: Point, actions: &mut Vec<Action>) {
        self.input = InputState::Panning {
            anchor_screen: screen,
            anchor_offset: Point::new(self.viewport.offset_x, self.viewport.offset_y),
        };
        debug!(?screen, "pan started");
        actions.push(Action::CapturePointer);
        self.set_cursor("grabbing", actions);
    }

    fn start_drag(&mut self, id: EntityId, world: Point, actions: &mut Vec<Action>) {
        let Some(origin) = self.entities.get(&id).map(Entity::origin) else {
            return;
        };
        debug!(%id, "drag started");
        self.ui.selected_id = Some(id.clone());
        self.input = InputState::DraggingEntity { id, grab_offset: world.sub(origin), moved: false };
        actions.push(Action::CapturePointer);
        self.set_cursor("grabbing", actions);
        actions.push(Action::RenderNeeded);
    }

    fn start_connect_drag(&mut self, source: EntityId, world: Point, actions: &mut Vec<Action>) {
        debug!(%source, "connection drag started");
        self.input = InputState::Connecting(Connecting::Drag { source, preview: world });
        actions.push(Action::CapturePointer);
        self.set_cursor("crosshair", actions);
        actions.push(Action::RenderNeeded);
    }

    fn click_connect(&mut self, world: Point, button: Button, actions: &mut Vec<Action>) {
        if button != Button::Primary {
            return;
        }
        let InputState::Connecting(Connecting::Click { source }) = &self.input else {
            return;
        };
        let current = source.clone();
        let target = self.entities.topmost_at(world).map(|e| e.id.clone());
        let next = match (current, target) {
            (_, None) => None,
            (None, Some(target)) => Some(target),
            (Some(source), Some(target)) if source == target => None,
            (Some(source), Some(target)) => {
                self.connect_into(&source, &target, actions);
                Some(target)
            }
        };
        debug!(source = ?next, "connect source changed");
        self.input = InputState::Connecting(Connecting::Click { source: next });
        actions.push(Action::RenderNeeded);
    }

    fn commit_drag(&self, id: &EntityId, moved: bool, actions: &mut Vec<Action>) {
        if !moved {
            return;
        }
        if let Some(entity) = self.entities.get(id) {
            debug!(%id, x = entity.x, y = entity.y, "drag committed");
            actions.push(Action::EntityMoved { id: id.clone(), world_x: entity.x, world_y: entity.y });
        }
    }

    fn end_gesture(&mut self, actions: &mut Vec<Action>) {
        actions.push(Action::ReleasePointer);
        let cursor = if self.ui.pan_key_held { "grab" } else { "default" };
        self.set_cursor(cursor, actions);
        actions.push(Action::RenderNeeded);
    }

    fn escape(&mut self, actions: &mut Vec<Action>) {
        self.close_menu(actions);
        match &self.input {
            InputState::Connecting(Connecting::Click { .. }) => {
                self.input = InputState::Idle;
            }
            InputState::Connecting(Connecting::Drag { .. }) => {
                self.input = InputState::Idle;
                actions.push(Action::ReleasePointer);
                self.set_cursor("default", actions);
            }
            // Pan and drag run until the pointer is released.
            InputState::Panning { .. } | InputState::DraggingEntity { .. } => {
                if !actions.is_empty() {
                    actions.push(Action::RenderNeeded);
                }
                return;
            }
            InputState::Idle => {}
        }
        self.ui.selected_id = None;
        actions.push(Action::RenderNeeded);
    }

    fn open_menu(&mut self, screen: Point, world: Point, actions: &mut Vec<Action>) {
        let menu = ContextMenu { screen, world };
        debug!(?world, "context menu opened");
        self.ui.menu = Some(menu);
        actions.push(Action::MenuOpened(menu));
        actions.push(Action::RenderNeeded);
    }

    fn close_menu(&mut self, actions: &mut Vec<Action>) {
        if self.ui.menu.take().is_some() {
            actions.push(Action::MenuClosed);
        }
    }

    fn hover_cursor(&self, world: Point) -> &'static str {
        if matches!(self.input, InputState::Connecting(_)) {
            return "crosshair";
        }
        match hit_test(world, &self.entities, &self.viewport, self.config.drag_to_connect) {
            Some(hit) if hit.part == HitPart::ConnectHandle => "crosshair",
            Some(_) => "grab",
            None if self.ui.pan_key_held => "grab",
            None => "default",
        }
    }

    fn set_cursor(&mut self, cursor: &str, actions: &mut Vec<Action>) {
        if self.ui.cursor != cursor {
            self.ui.cursor = cursor.to_owned();
            actions.push(Action::SetCursor { cursor: cursor.to_owned() });
        }
    }

    // --- Render ---

    /// Project the current state into screen-space primitives.
    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        let scene = Scene {
            entities: &self.entities,
            edges: &self.edges,
            viewport: &self.viewport,
            mode: &self.input,
            selected: self.ui.selected_id.as_ref(),
            menu: self.ui.menu,
            anchor: self.config.edge_anchor,
        };
        project(&scene, &self.renderers)
    }

    // --- Queries ---

    /// The currently selected entity, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&EntityId> {
        self.ui.selected_id.as_ref()
    }

    /// The current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Look up an entity by id.
    #[must_use]
    pub fn entity(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// The active interaction mode.
    #[must_use]
    pub fn mode(&self) -> &InputState {
        &self.input
    }

    /// Whether click-to-connect mode is active.
    #[must_use]
    pub fn connect_mode_active(&self) -> bool {
        matches!(self.input, InputState::Connecting(Connecting::Click { .. }))
    }

    /// The source entity of the current connection, if any.
    #[must_use]
    pub fn connect_source(&self) -> Option<&EntityId> {
        match &self.input {
            InputState::Connecting(connecting) => connecting.source(),
            _ => None,
        }
    }

    /// The open context menu, if any.
    #[must_use]
    pub fn context_menu(&self) -> Option<ContextMenu> {
        self.ui.menu
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element,
/// which supplies surface geometry and pointer capture.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, config: CanvasConfig) -> Self {
        Self { canvas, core: EngineCore::with_config(config) }
    }

    /// Read the canvas bounding rect into the core. Call on mount and on every resize.
    ///
    /// # Errors
    ///
    /// [`CanvasError::SurfaceNotMounted`] when the element has no layout box yet.
    pub fn mount(&mut self) -> Result<(), CanvasError> {
        let rect = self.canvas.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            self.core.unmount_surface();
            return Err(CanvasError::SurfaceNotMounted);
        }
        self.core.mount_surface(Surface { left: rect.left(), top: rect.top(), width: rect.width(), height: rect.height() });
        Ok(())
    }

    // --- Input events ---

    /// # Errors
    ///
    /// Propagates core errors and pointer-capture failures.
    pub fn on_pointer_down(
        &mut self,
        client: Point,
        button: Button,
        modifiers: Modifiers,
        pointer_id: i32,
    ) -> Result<Vec<Action>, CanvasError> {
        let actions = self.core.on_pointer_down(client, button, modifiers)?;
        if actions.contains(&Action::CapturePointer) {
            self.canvas.set_pointer_capture(pointer_id).map_err(surface_error)?;
        }
        Ok(actions)
    }

    /// # Errors
    ///
    /// Propagates core errors.
    pub fn on_pointer_move(&mut self, client: Point) -> Result<Vec<Action>, CanvasError> {
        self.core.on_pointer_move(client)
    }

    /// Capture is released even when the core reports an error.
    ///
    /// # Errors
    ///
    /// Propagates core errors and pointer-capture failures.
    pub fn on_pointer_up(&mut self, client: Point, pointer_id: i32) -> Result<Vec<Action>, CanvasError> {
        let result = self.core.on_pointer_up(client);
        self.release_capture(pointer_id)?;
        result
    }

    /// # Errors
    ///
    /// Propagates pointer-capture failures.
    pub fn on_pointer_cancel(&mut self, pointer_id: i32) -> Result<Vec<Action>, CanvasError> {
        let actions = self.core.on_pointer_cancel();
        self.release_capture(pointer_id)?;
        Ok(actions)
    }

    /// # Errors
    ///
    /// Propagates core errors.
    pub fn on_wheel(&mut self, client: Point, delta: WheelDelta) -> Result<Vec<Action>, CanvasError> {
        self.core.on_wheel(client, delta)
    }

    /// # Errors
    ///
    /// Propagates core errors.
    pub fn on_context_menu(&mut self, client: Point) -> Result<Vec<Action>, CanvasError> {
        self.core.on_context_menu(client)
    }

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        self.core.on_key_down(key)
    }

    pub fn on_key_up(&mut self, key: &Key) -> Vec<Action> {
        self.core.on_key_up(key)
    }

    fn release_capture(&self, pointer_id: i32) -> Result<(), CanvasError> {
        if self.canvas.has_pointer_capture(pointer_id) {
            self.canvas.release_pointer_capture(pointer_id).map_err(surface_error)?;
        }
        Ok(())
    }

    // --- Render ---

    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        self.core.frame()
    }
}

fn surface_error(err: JsValue) -> CanvasError {
    CanvasError::Surface(format!("{err:?}"))
}
