//! Persisted layout shape.
//!
//! A `CanvasLayout` is the one unit the editor saves: grid size plus every
//! stored widget position. Saving is always whole-canvas; there is no
//! incremental form.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::grid::GridDimensions;
use crate::widget::{GridPosition, Widget, WidgetId};

/// Grid size and widget positions, saved and loaded as one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasLayout {
    pub grid_size: GridDimensions,
    pub widget_positions: BTreeMap<WidgetId, GridPosition>,
}

impl CanvasLayout {
    /// Snapshot the positions of `widgets` on a grid of size `dims`.
    ///
    /// Disabled widgets keep their stored positions in the snapshot.
    #[must_use]
    pub fn capture(dims: GridDimensions, widgets: &[Widget]) -> Self {
        let widget_positions = widgets
            .iter()
            .filter_map(|w| w.grid_position.map(|pos| (w.id.clone(), pos)))
            .collect();
        Self { grid_size: dims, widget_positions }
    }

    /// Write these positions onto `widgets`. Widgets missing from the map are
    /// returned to the palette; ids with no matching widget are ignored.
    pub fn apply_to(&self, widgets: &mut [Widget]) {
        for widget in widgets {
            widget.grid_position = self.widget_positions.get(&widget.id).copied();
        }
    }

    /// Position stored for a widget, if any.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<&GridPosition> {
        self.widget_positions.get(id)
    }
}
