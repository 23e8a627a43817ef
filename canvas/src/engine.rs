use crate::grid::{self, GridDimensions, Occupancy};
use crate::input::{DragState, DropTarget, UiState};
use crate::layout::CanvasLayout;
use crate::validate::{self, Verdict};
use crate::widget::{GridPosition, Span, Widget, WidgetId, WidgetPatch, WidgetRegistry};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from editor operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    DragStarted { id: WidgetId },
    WidgetPlaced { id: WidgetId, position: GridPosition },
    WidgetResized { id: WidgetId, position: GridPosition },
    WidgetRemoved { id: WidgetId },
    WidgetNotPlaced { id: WidgetId },
    PlacementRejected { id: WidgetId, verdict: Verdict },
    ResizeRejected { id: WidgetId, verdict: Verdict },
    PaletteReordered { order: Vec<WidgetId> },
    GridResized { dims: GridDimensions, evicted: Vec<WidgetId> },
    WidgetToggled { id: WidgetId, enabled: bool, position_cleared: bool },
    LayoutReset,
}

impl Action {
    /// Per-widget patches the host must forward to the configuration store.
    #[must_use]
    pub fn store_updates(&self) -> Vec<(WidgetId, WidgetPatch)> {
        match self {
            Self::WidgetPlaced { id, position } | Self::WidgetResized { id, position } => {
                vec![(id.clone(), WidgetPatch::position(Some(*position)))]
            }
            Self::WidgetRemoved { id } => vec![(id.clone(), WidgetPatch::position(None))],
            Self::GridResized { evicted, .. } => evicted
                .iter()
                .map(|id| (id.clone(), WidgetPatch::position(None)))
                .collect(),
            Self::WidgetToggled { id, enabled, position_cleared } => {
                let mut patch = WidgetPatch::enabled(*enabled);
                if *position_cleared {
                    patch.grid_position = Some(None);
                }
                vec![(id.clone(), patch)]
            }
            _ => Vec::new(),
        }
    }

    /// Whether the action changed the canvas layout.
    #[must_use]
    pub fn changes_layout(&self) -> bool {
        match self {
            Self::WidgetPlaced { .. }
            | Self::WidgetResized { .. }
            | Self::WidgetRemoved { .. }
            | Self::GridResized { .. }
            | Self::LayoutReset => true,
            Self::WidgetToggled { position_cleared, .. } => *position_cleared,
            _ => false,
        }
    }
}

/// Editor state for one kiosk canvas: widgets, grid size, selection and drag session.
///
/// All operations are synchronous and run to completion; the occupancy grid is
/// rebuilt from the registry on every query instead of being stored.
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    pub registry: WidgetRegistry,
    pub grid: GridDimensions,
    pub ui: UiState,
    pub drag: DragState,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty editor on a grid of the given size.
    #[must_use]
    pub fn with_grid(grid: GridDimensions) -> Self {
        Self { grid, ..Self::default() }
    }

    // --- Data inputs ---

    /// Load widgets and grid size from the store.
    ///
    /// Stored positions that fall outside the grid, cover no cells, or overlap a
    /// widget earlier in the list are cleared. Returns the ids that were cleared.
    pub fn hydrate(&mut self, grid: GridDimensions, widgets: Vec<Widget>) -> Vec<WidgetId> {
        self.grid = grid;
        self.registry.load_snapshot(widgets);
        self.ui = UiState::default();
        self.drag = DragState::Idle;

        let mut cleared = grid::evict_out_of_bounds(self.registry.widgets(), grid);
        let empty: Vec<WidgetId> = self
            .registry
            .widgets()
            .iter()
            .filter(|w| w.grid_position.is_some_and(|pos| !pos.span().meets_minimum()))
            .map(|w| w.id.clone())
            .filter(|id| !cleared.contains(id))
            .collect();
        cleared.extend(empty);
        for id in &cleared {
            self.registry.set_position(id, None);
        }

        let mut accepted: Vec<Widget> = Vec::new();
        let mut overlapping = Vec::new();
        for widget in self.registry.widgets().iter().filter(|w| w.occupies_grid()) {
            let Some(pos) = widget.grid_position else {
                continue;
            };
            let occupancy = Occupancy::build(grid, &accepted);
            if occupancy.conflict(&widget.id, pos.row, pos.col, pos.span()).is_some() {
                overlapping.push(widget.id.clone());
            } else {
                accepted.push(widget.clone());
            }
        }
        for id in &overlapping {
            self.registry.set_position(id, None);
        }

        cleared.extend(overlapping);
        cleared
    }

    // --- Queries ---

    /// Current occupancy, derived from the registry.
    #[must_use]
    pub fn occupancy(&self) -> Occupancy<'_> {
        Occupancy::build(self.grid, self.registry.widgets())
    }

    /// Enabled, un-placed widgets in palette order.
    #[must_use]
    pub fn palette(&self) -> Vec<&Widget> {
        self.registry.palette()
    }

    /// Look up a widget by id.
    #[must_use]
    pub fn widget(&self, id: &str) -> Option<&Widget> {
        self.registry.get(id)
    }

    /// The active grid size.
    #[must_use]
    pub fn grid_size(&self) -> GridDimensions {
        self.grid
    }

    /// Snapshot of the whole canvas for saving.
    #[must_use]
    pub fn layout(&self) -> CanvasLayout {
        CanvasLayout::capture(self.grid, self.registry.widgets())
    }

    /// Placement check for a registered widget. `None` if the id is unknown.
    #[must_use]
    pub fn can_place(&self, id: &str, row: u32, col: u32) -> Option<Verdict> {
        let widget = self.registry.get(id)?;
        Some(validate::can_place(&self.occupancy(), widget, row, col))
    }

    /// Resize check for a placed widget. `None` if the id is unknown or un-placed.
    #[must_use]
    pub fn can_resize(&self, id: &str, span: Span) -> Option<Verdict> {
        let pos = self.registry.get(id)?.grid_position?;
        Some(validate::can_resize(&self.occupancy(), id, &pos, span))
    }

    /// First top-left cell, scanning row-major, where a free `span` fits.
    #[must_use]
    pub fn find_free_slot(&self, span: Span) -> Option<(u32, u32)> {
        // The empty id matches no widget, so every owned cell counts.
        self.first_fit("", span)
    }

    fn first_fit(&self, id: &str, span: Span) -> Option<(u32, u32)> {
        let occupancy = self.occupancy();
        (0..self.grid.rows)
            .flat_map(|row| (0..self.grid.cols).map(move |col| (row, col)))
            .find(|&(row, col)| validate::can_place_span(&occupancy, id, span, row, col).is_accepted())
    }

    // --- Drag session ---

    /// Begin dragging a widget. Ignored for unknown or disabled widgets, and
    /// while another drag is already in progress.
    pub fn drag_start(&mut self, id: &str) -> Action {
        if self.drag.is_dragging() {
            return Action::None;
        }
        if !self.registry.get(id).is_some_and(|w| w.enabled) {
            return Action::None;
        }
        self.ui.selected_id = None;
        self.drag = DragState::Dragging { id: id.to_string() };
        Action::DragStarted { id: id.to_string() }
    }

    /// Finish the drag session over `target`. Always ends in `Idle`.
    pub fn drop_on(&mut self, target: DropTarget) -> Action {
        match target {
            DropTarget::Cell { row, col } => self.drop_on_cell(row, col),
            DropTarget::Palette(target_id) => self.drop_on_palette(&target_id),
            DropTarget::Outside => self.cancel_drag(),
        }
    }

    /// Drop the dragged widget with its top-left on `(row, col)`.
    pub fn drop_on_cell(&mut self, row: u32, col: u32) -> Action {
        let DragState::Dragging { id } = std::mem::take(&mut self.drag) else {
            return Action::None;
        };
        self.place(&id, row, col)
    }

    /// Drop the dragged widget on another palette entry, reordering the palette.
    ///
    /// Only applies when both widgets are in the palette; the grid is never touched.
    pub fn drop_on_palette(&mut self, target_id: &str) -> Action {
        let DragState::Dragging { id } = std::mem::take(&mut self.drag) else {
            return Action::None;
        };
        self.reorder_palette(&id, target_id)
    }

    /// Move palette entry `id` into `target_id`'s slot without a drag session.
    ///
    /// Both widgets must be un-placed and `id` enabled. Drag and selection
    /// state are left alone.
    pub fn reorder_palette(&mut self, id: &str, target_id: &str) -> Action {
        if id == target_id {
            return Action::None;
        }
        let movable = self.registry.get(id).is_some_and(|w| w.enabled && !w.is_placed());
        let target_free = self.registry.get(target_id).is_some_and(|w| !w.is_placed());
        if !movable || !target_free || !self.registry.reorder(id, target_id) {
            return Action::None;
        }
        Action::PaletteReordered { order: self.palette().iter().map(|w| w.id.clone()).collect() }
    }

    /// Abandon the drag session without changing anything.
    pub fn cancel_drag(&mut self) -> Action {
        self.drag = DragState::Idle;
        Action::None
    }

    // --- Click-to-place ---

    /// Pick a widget for click-to-place. Returns false for unknown or disabled widgets.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.registry.get(id).is_some_and(|w| w.enabled) {
            return false;
        }
        self.ui.selected_id = Some(id.to_string());
        true
    }

    /// Place the selected widget at `(row, col)` and clear the selection.
    pub fn click_cell(&mut self, row: u32, col: u32) -> Action {
        let Some(id) = self.ui.selected_id.take() else {
            return Action::None;
        };
        self.place(&id, row, col)
    }

    // --- Direct edits ---

    /// Validate and commit a placement. Keeps the widget's span, or gives an
    /// un-placed widget the default span.
    pub fn place(&mut self, id: &str, row: u32, col: u32) -> Action {
        let Some(widget) = self.registry.get(id).filter(|w| w.enabled) else {
            return Action::None;
        };
        let span = widget.span();
        let verdict = validate::can_place(&self.occupancy(), widget, row, col);
        if !verdict.is_accepted() {
            return Action::PlacementRejected { id: id.to_string(), verdict };
        }
        let position = GridPosition::new(row, col, span);
        self.registry.set_position(id, Some(position));
        Action::WidgetPlaced { id: id.to_string(), position }
    }

    /// Place a widget at the first free slot that fits its span.
    pub fn place_anywhere(&mut self, id: &str) -> Action {
        let Some(widget) = self.registry.get(id).filter(|w| w.enabled) else {
            return Action::None;
        };
        let span = widget.span();
        if !span.meets_minimum() {
            return Action::PlacementRejected { id: id.to_string(), verdict: Verdict::RejectedMinSize };
        }
        match self.first_fit(id, span) {
            Some((row, col)) => self.place(id, row, col),
            None => Action::PlacementRejected { id: id.to_string(), verdict: Verdict::RejectedBounds },
        }
    }

    /// Validate and commit a new span with the top-left fixed. No partial resize.
    pub fn resize(&mut self, id: &str, span: Span) -> Action {
        let Some(widget) = self.registry.get(id) else {
            return Action::None;
        };
        let Some(current) = widget.grid_position.filter(|_| widget.enabled) else {
            return Action::WidgetNotPlaced { id: id.to_string() };
        };
        let verdict = validate::can_resize(&self.occupancy(), id, &current, span);
        if !verdict.is_accepted() {
            return Action::ResizeRejected { id: id.to_string(), verdict };
        }
        let position = GridPosition::new(current.row, current.col, span);
        self.registry.set_position(id, Some(position));
        Action::WidgetResized { id: id.to_string(), position }
    }

    /// Take a widget off the canvas and return it to the palette.
    pub fn remove(&mut self, id: &str) -> Action {
        if !self.registry.get(id).is_some_and(Widget::is_placed) {
            return Action::WidgetNotPlaced { id: id.to_string() };
        }
        self.registry.set_position(id, None);
        Action::WidgetRemoved { id: id.to_string() }
    }

    /// Switch to a new grid size, first evicting every widget that no longer fits.
    pub fn set_grid_size(&mut self, dims: GridDimensions) -> Action {
        let evicted = grid::evict_out_of_bounds(self.registry.widgets(), dims);
        for id in &evicted {
            self.registry.set_position(id, None);
        }
        self.grid = dims;
        Action::GridResized { dims, evicted }
    }

    /// Enable or disable a widget.
    ///
    /// A re-enabled widget whose stored position is out of bounds or now
    /// overlaps another widget goes back to the palette.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Action {
        let Some(widget) = self.registry.get(id) else {
            return Action::None;
        };
        let position_cleared = enabled
            && !widget.enabled
            && widget.grid_position.is_some_and(|pos| {
                !validate::can_place_span(&self.occupancy(), id, pos.span(), pos.row, pos.col).is_accepted()
            });

        let mut patch = WidgetPatch::enabled(enabled);
        if position_cleared {
            patch.grid_position = Some(None);
        }
        self.registry.apply_patch(id, &patch);
        if !enabled {
            if self.ui.selected_id.as_deref() == Some(id) {
                self.ui.selected_id = None;
            }
            if self.drag.dragged() == Some(id) {
                self.drag = DragState::Idle;
            }
        }
        Action::WidgetToggled { id: id.to_string(), enabled, position_cleared }
    }

    /// Clear every placement.
    pub fn reset(&mut self) -> Action {
        self.registry.clear_positions();
        self.ui = UiState::default();
        self.drag = DragState::Idle;
        Action::LayoutReset
    }
}
