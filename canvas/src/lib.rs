//! Layout engine for the kiosk widget canvas.
//!
//! A kiosk canvas is a bounded grid of `rows × cols` cells onto which
//! rectangular widgets are placed, moved, resized and removed. This crate owns
//! the rules: deriving occupancy, validating placements and resizes, evicting
//! widgets when the grid shrinks, running the drag session, and shaping the
//! layout for persistence. It performs no I/O; the host forwards the returned
//! [`engine::Action`]s to its configuration store.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::EngineCore`] and the [`engine::Action`]s it emits |
//! | [`widget`] | Widget types, spans, patches and the palette-ordered registry |
//! | [`grid`] | Grid dimensions, derived occupancy, and out-of-bounds eviction |
//! | [`validate`] | Placement and resize predicates returning [`validate::Verdict`] |
//! | [`input`] | Drop targets, selection, and the drag session state |
//! | [`layout`] | The persisted [`layout::CanvasLayout`] unit |
//! | [`render`] | Plain-text rendering of an occupancy grid |
//! | [`consts`] | Default spans and grid bounds |

pub mod consts;
pub mod engine;
pub mod grid;
pub mod input;
pub mod layout;
pub mod render;
pub mod validate;
pub mod widget;
