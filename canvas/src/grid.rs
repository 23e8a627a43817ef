//! Grid occupancy: which widget, if any, owns each cell of the canvas.
//!
//! `Occupancy` is a projection of the widget registry, never an independent
//! store. The engine rebuilds it whenever it needs to answer a question, so
//! "what is occupied" and "what widgets claim to occupy" cannot diverge.
//! Construction is `O(rows·cols)` at worst since spans are clamped to the grid.
//!
//! The dimension handler lives here too: it is the same bounds arithmetic
//! applied to every placed widget at once.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS};
use crate::widget::{GridPosition, Span, Widget, WidgetId};

/// Size of the canvas in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDimensions {
    pub rows: u32,
    pub cols: u32,
}

impl GridDimensions {
    #[must_use]
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Whether a rectangle with top-left `(row, col)` and `span` lies inside the grid.
    #[must_use]
    pub fn fits(&self, row: u32, col: u32, span: Span) -> bool {
        row.saturating_add(span.rows) <= self.rows && col.saturating_add(span.cols) <= self.cols
    }

    /// Whether a stored position lies inside the grid.
    #[must_use]
    pub fn contains(&self, position: &GridPosition) -> bool {
        self.fits(position.row, position.col, position.span())
    }

    fn cell_count(self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_ROWS, DEFAULT_GRID_COLS)
    }
}

/// One cell of the render-ready grid handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    pub occupied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget_id: Option<WidgetId>,
}

/// Row-major map from cell to owning widget id.
#[derive(Debug, Clone)]
pub struct Occupancy<'a> {
    dims: GridDimensions,
    owners: Vec<Option<&'a str>>,
}

impl<'a> Occupancy<'a> {
    /// Derive occupancy from the widget list.
    ///
    /// Only enabled widgets with a position count. Spans are clamped to the
    /// grid; if stored data overlaps, the widget earlier in the list keeps
    /// the contested cells.
    #[must_use]
    pub fn build(dims: GridDimensions, widgets: &'a [Widget]) -> Self {
        let mut owners = vec![None; dims.cell_count()];
        for widget in widgets.iter().filter(|w| w.enabled) {
            let Some(pos) = widget.grid_position else {
                continue;
            };
            let bottom = pos.bottom().min(dims.rows);
            let right = pos.right().min(dims.cols);
            for row in pos.row..bottom {
                for col in pos.col..right {
                    let idx = row as usize * dims.cols as usize + col as usize;
                    if let Some(slot) = owners.get_mut(idx) {
                        if slot.is_none() {
                            *slot = Some(widget.id.as_str());
                        }
                    }
                }
            }
        }
        Self { dims, owners }
    }

    /// Dimensions this occupancy was built for.
    #[must_use]
    pub fn dims(&self) -> GridDimensions {
        self.dims
    }

    /// Id of the widget covering `(row, col)`. `None` for free or out-of-grid cells.
    #[must_use]
    pub fn owner(&self, row: u32, col: u32) -> Option<&'a str> {
        if row >= self.dims.rows || col >= self.dims.cols {
            return None;
        }
        let idx = row as usize * self.dims.cols as usize + col as usize;
        self.owners.get(idx).copied().flatten()
    }

    #[must_use]
    pub fn is_occupied(&self, row: u32, col: u32) -> bool {
        self.owner(row, col).is_some()
    }

    /// First cell owner in the rectangle, row-major, that is not `id`.
    #[must_use]
    pub fn conflict(&self, id: &str, row: u32, col: u32, span: Span) -> Option<&'a str> {
        let bottom = row.saturating_add(span.rows).min(self.dims.rows);
        let right = col.saturating_add(span.cols).min(self.dims.cols);
        (row..bottom)
            .flat_map(|r| (col..right).map(move |c| (r, c)))
            .find_map(|(r, c)| self.owner(r, c).filter(|owner| *owner != id))
    }

    /// Every cell in row-major order, ready to draw.
    #[must_use]
    pub fn cells(&self) -> Vec<GridCell> {
        let mut cells = Vec::with_capacity(self.owners.len());
        for row in 0..self.dims.rows {
            for col in 0..self.dims.cols {
                let owner = self.owner(row, col);
                cells.push(GridCell {
                    row,
                    col,
                    occupied: owner.is_some(),
                    widget_id: owner.map(str::to_string),
                });
            }
        }
        cells
    }

    /// Number of cells owned by some widget.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.owners.iter().filter(|o| o.is_some()).count()
    }
}

/// Ids of every positioned widget that would not fit inside `dims`.
///
/// Disabled widgets with a stored position are included so re-enabling them
/// cannot bring back a rectangle outside the grid.
#[must_use]
pub fn evict_out_of_bounds(widgets: &[Widget], dims: GridDimensions) -> Vec<WidgetId> {
    widgets
        .iter()
        .filter(|w| w.grid_position.is_some_and(|pos| !dims.contains(&pos)))
        .map(|w| w.id.clone())
        .collect()
}
