//! Interactive graph canvas engine: pan/zoom viewport, entities, edges, and
//! pointer-driven editing.
//!
//! The crate compiles to WebAssembly and runs in the browser, but all state
//! and interaction logic lives in [`engine::EngineCore`], which has no browser
//! dependency. The host wires DOM events into the engine, applies the
//! returned [`engine::Action`]s (pointer capture, cursor, persistence), and
//! draws each [`render::RenderFrame`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Interaction controller, browser wrapper and testable [`engine::EngineCore`] |
//! | [`viewport`] | Pan/zoom transform and coordinate conversions |
//! | [`entities`] | Entity model, store and seeding |
//! | [`edges`] | Undirected edge store and render segments |
//! | [`input`] | Input event types and the interaction mode |
//! | [`hit`] | Hit-testing entity bodies and connect handles |
//! | [`menu`] | Background context menu |
//! | [`render`] | Screen-space projection and per-kind node renderers |
//! | [`config`] | Presets and JSON overrides |
//! | [`error`] | Error type and stable error codes |
//! | [`consts`] | Shared numeric constants (zoom limits, node sizes, etc.) |

pub mod config;
pub mod consts;
pub mod edges;
pub mod engine;
pub mod entities;
pub mod error;
pub mod hit;
pub mod input;
pub mod menu;
pub mod render;
pub mod viewport;
