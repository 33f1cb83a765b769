//! Input model: modifier keys, mouse buttons, keys, and the interaction mode.
//!
//! `InputState` is the single tagged union holding the active interaction
//! mode. Exactly one variant is live at a time, so a pan can never overlap a
//! drag or a connection gesture. Each gesture variant carries the context
//! needed to compute the next position and to emit final notifications on
//! pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::entities::EntityId;
use crate::menu::ContextMenu;
use crate::viewport::Point;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `PointerEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"Escape"`, `" "`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }

    /// Delete or Backspace.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }

    /// The pan modifier (Space).
    #[must_use]
    pub fn is_pan_modifier(&self) -> bool {
        matches!(self.0.as_str(), " " | "Space" | "Spacebar")
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Transient UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The id of the currently selected entity, if any.
    pub selected_id: Option<EntityId>,
    /// The open context menu, if any.
    pub menu: Option<ContextMenu>,
    /// Whether the pan modifier key is currently held.
    pub pan_key_held: bool,
    /// Last cursor requested from the host.
    pub cursor: String,
}

/// The two ways of authoring an edge.
#[derive(Debug, Clone, PartialEq)]
pub enum Connecting {
    /// Toggle mode: successive clicks on entities chain connections.
    Click {
        /// Entity chosen as the next edge's source, if any.
        source: Option<EntityId>,
    },
    /// One continuous drag from an entity's connect handle.
    Drag {
        /// Entity the drag started on.
        source: EntityId,
        /// World-space end of the rubber-band preview line.
        preview: Point,
    },
}

impl Connecting {
    /// The current source entity, if any.
    #[must_use]
    pub fn source(&self) -> Option<&EntityId> {
        match self {
            Self::Click { source } => source.as_ref(),
            Self::Drag { source, .. } => Some(source),
        }
    }
}

/// The active interaction mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// The user is panning the canvas.
    Panning {
        /// Screen-space pointer position at pan start.
        anchor_screen: Point,
        /// Viewport offset at pan start.
        anchor_offset: Point,
    },
    /// The user is moving an entity.
    DraggingEntity {
        /// Id of the entity being dragged.
        id: EntityId,
        /// World-space vector from the entity origin to the pointer at drag start.
        grab_offset: Point,
        /// Whether any move event changed the position.
        moved: bool,
    },
    /// The user is authoring an edge.
    Connecting(Connecting),
}

impl InputState {
    /// Whether a pointer gesture (pan, drag, connection drag) is in flight.
    #[must_use]
    pub fn is_gesture(&self) -> bool {
        matches!(
            self,
            Self::Panning { .. } | Self::DraggingEntity { .. } | Self::Connecting(Connecting::Drag { .. })
        )
    }
}
