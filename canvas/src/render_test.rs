use super::*;
use crate::grid::GridDimensions;
use crate::widget::{GridPosition, Span, Widget, WidgetCategory};

fn widget_at(id: &str, row: u32, col: u32, rows: u32, cols: u32) -> Widget {
    let mut widget = Widget::new(id, id, WidgetCategory::Main);
    widget.grid_position = Some(GridPosition::new(row, col, Span::new(rows, cols)));
    widget
}

#[test]
fn empty_grid_is_all_dots() {
    let occ = Occupancy::build(GridDimensions::new(2, 3), &[]);
    assert_eq!(to_text(&occ), "...\n...\n");
}

#[test]
fn widgets_get_tags_in_scan_order() {
    let widgets = vec![widget_at("weather", 1, 0, 1, 2), widget_at("clock", 0, 2, 2, 1)];
    let occ = Occupancy::build(GridDimensions::new(2, 3), &widgets);
    assert_eq!(to_text(&occ), "..A\nBBA\nA clock\nB weather\n");
}

#[test]
fn tags_run_out_gracefully() {
    assert_eq!(tag_for(0), 'A');
    assert_eq!(tag_for(TAGS.len() - 1), '9');
    assert_eq!(tag_for(TAGS.len()), OVERFLOW_TAG);
}
