use super::*;
use crate::widget::WidgetCategory;

fn widget_at(id: &str, row: u32, col: u32, rows: u32, cols: u32) -> Widget {
    let mut widget = Widget::new(id, id, WidgetCategory::Main);
    widget.grid_position = Some(GridPosition::new(row, col, Span::new(rows, cols)));
    widget
}

fn grid() -> GridDimensions {
    GridDimensions::new(8, 12)
}

// =============================================================
// GridDimensions
// =============================================================

#[test]
fn default_dimensions_are_eight_by_twelve() {
    assert_eq!(GridDimensions::default(), GridDimensions::new(8, 12));
}

#[test]
fn fits_accepts_flush_edges() {
    assert!(grid().fits(6, 10, Span::new(2, 2)));
    assert!(!grid().fits(7, 10, Span::new(2, 2)));
    assert!(!grid().fits(6, 11, Span::new(2, 2)));
}

#[test]
fn fits_survives_overflowing_input() {
    assert!(!grid().fits(u32::MAX, 0, Span::new(2, 2)));
}

#[test]
fn dimensions_serialize_plainly() {
    let json = serde_json::to_value(GridDimensions::new(4, 6)).unwrap();
    assert_eq!(json, serde_json::json!({ "rows": 4, "cols": 6 }));
}

// =============================================================
// Occupancy
// =============================================================

#[test]
fn empty_registry_has_no_owners() {
    let occ = Occupancy::build(grid(), &[]);
    assert_eq!(occ.occupied_count(), 0);
    assert!(!occ.is_occupied(0, 0));
}

#[test]
fn placed_widget_covers_its_span() {
    let widgets = vec![widget_at("a", 0, 0, 2, 2)];
    let occ = Occupancy::build(grid(), &widgets);
    for (row, col) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
        assert_eq!(occ.owner(row, col), Some("a"));
    }
    assert_eq!(occ.occupied_count(), 4);
    assert!(!occ.is_occupied(2, 0));
}

#[test]
fn disabled_widget_is_invisible() {
    let mut widget = widget_at("a", 0, 0, 2, 2);
    widget.enabled = false;
    let widgets = vec![widget];
    let occ = Occupancy::build(grid(), &widgets);
    assert_eq!(occ.occupied_count(), 0);
}

#[test]
fn unplaced_widget_is_invisible() {
    let widgets = vec![Widget::new("a", "A", WidgetCategory::Header)];
    let occ = Occupancy::build(grid(), &widgets);
    assert_eq!(occ.occupied_count(), 0);
}

#[test]
fn oversized_span_is_clamped() {
    let widgets = vec![widget_at("a", 6, 10, 5, 5)];
    let occ = Occupancy::build(grid(), &widgets);
    assert_eq!(occ.occupied_count(), 4);
    assert_eq!(occ.owner(7, 11), Some("a"));
}

#[test]
fn zero_span_occupies_nothing() {
    let widgets = vec![widget_at("a", 0, 0, 0, 3)];
    let occ = Occupancy::build(grid(), &widgets);
    assert_eq!(occ.occupied_count(), 0);
}

#[test]
fn earlier_widget_wins_contested_cells() {
    let widgets = vec![widget_at("a", 0, 0, 2, 2), widget_at("b", 1, 1, 2, 2)];
    let occ = Occupancy::build(grid(), &widgets);
    assert_eq!(occ.owner(1, 1), Some("a"));
    assert_eq!(occ.owner(2, 2), Some("b"));
}

#[test]
fn owner_outside_grid_is_none() {
    let widgets = vec![widget_at("a", 0, 0, 2, 2)];
    let occ = Occupancy::build(grid(), &widgets);
    assert_eq!(occ.owner(8, 0), None);
    assert_eq!(occ.owner(0, 12), None);
}

#[test]
fn conflict_ignores_own_cells() {
    let widgets = vec![widget_at("a", 0, 0, 2, 2), widget_at("b", 0, 2, 2, 2)];
    let occ = Occupancy::build(grid(), &widgets);
    assert_eq!(occ.conflict("a", 0, 0, Span::new(2, 2)), None);
    assert_eq!(occ.conflict("a", 0, 1, Span::new(2, 2)), Some("b"));
}

#[test]
fn cells_are_row_major_and_complete() {
    let widgets = vec![widget_at("a", 0, 1, 1, 1)];
    let occ = Occupancy::build(GridDimensions::new(2, 3), &widgets);
    let cells = occ.cells();
    assert_eq!(cells.len(), 6);
    assert_eq!((cells[1].row, cells[1].col), (0, 1));
    assert!(cells[1].occupied);
    assert_eq!(cells[1].widget_id.as_deref(), Some("a"));
    assert!(!cells[3].occupied);
    assert_eq!((cells[3].row, cells[3].col), (1, 0));
}

#[test]
fn grid_cell_serializes_for_host() {
    let cell = GridCell { row: 0, col: 1, occupied: true, widget_id: Some("a".into()) };
    let json = serde_json::to_value(&cell).unwrap();
    assert_eq!(json["widgetId"], "a");
    let free = GridCell { row: 0, col: 2, occupied: false, widget_id: None };
    assert!(serde_json::to_value(&free).unwrap().get("widgetId").is_none());
}

// =============================================================
// Eviction
// =============================================================

#[test]
fn shrinking_rows_evicts_only_overflowing_widgets() {
    let widgets = vec![
        widget_at("top", 0, 0, 2, 2),
        widget_at("flush", 2, 4, 2, 2),
        widget_at("straddle", 3, 0, 2, 2),
        widget_at("bottom", 6, 6, 2, 2),
    ];
    let evicted = evict_out_of_bounds(&widgets, GridDimensions::new(4, 12));
    assert_eq!(evicted, vec!["straddle".to_string(), "bottom".to_string()]);
}

#[test]
fn eviction_includes_disabled_widgets() {
    let mut widget = widget_at("a", 6, 0, 2, 2);
    widget.enabled = false;
    let evicted = evict_out_of_bounds(&[widget], GridDimensions::new(4, 12));
    assert_eq!(evicted, vec!["a".to_string()]);
}

#[test]
fn eviction_uses_default_span_when_unset() {
    let mut widget = Widget::new("a", "A", WidgetCategory::Main);
    widget.grid_position = Some(GridPosition { row: 3, col: 0, row_span: None, col_span: None });
    let evicted = evict_out_of_bounds(&[widget], GridDimensions::new(4, 12));
    assert_eq!(evicted, vec!["a".to_string()]);
}

#[test]
fn growing_grid_evicts_nothing() {
    let widgets = vec![widget_at("a", 6, 10, 2, 2)];
    assert!(evict_out_of_bounds(&widgets, GridDimensions::new(12, 16)).is_empty());
}
