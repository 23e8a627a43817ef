//! Input model: drop targets, selection, and the drag session state machine.
//!
//! This module defines the types consumed by the editor engine. `DragState`
//! is the active drag session being tracked between drag-start and drop,
//! carrying the widget being manipulated. `UiState` holds selection for the
//! click-to-place path, which skips the drag entirely.
//!
//! Nothing here depends on a pointer library: hosts translate whatever their
//! gesture layer reports into `DropTarget`s and call the engine directly.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::widget::WidgetId;

/// Where a dragged widget was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// A canvas cell; the widget's top-left goes here.
    Cell {
        row: u32,
        col: u32,
    },
    /// Another palette entry; the dragged widget takes its slot.
    Palette(WidgetId),
    /// Released over nothing the editor recognises.
    Outside,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Widget picked for click-to-place, if any.
    pub selected_id: Option<WidgetId>,
}

/// Internal state for the drag session.
///
/// Only one widget can be in drag at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    /// No drag in progress; waiting for the next drag-start.
    #[default]
    Idle,
    /// The user is carrying a widget.
    Dragging {
        /// Id of the widget being dragged.
        id: WidgetId,
    },
}

impl DragState {
    /// Id of the widget in drag, if any.
    #[must_use]
    pub fn dragged(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Dragging { id } => Some(id),
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}
