use serde_json::json;

use super::*;

fn make_widget(id: &str) -> Widget {
    Widget::new(id, id.to_uppercase(), WidgetCategory::Main)
}

fn placed(id: &str, row: u32, col: u32) -> Widget {
    let mut widget = make_widget(id);
    widget.grid_position = Some(GridPosition::new(row, col, default_span()));
    widget
}

fn ids(widgets: &[&Widget]) -> Vec<String> {
    widgets.iter().map(|w| w.id.clone()).collect()
}

// =============================================================
// Span policy
// =============================================================

#[test]
fn default_span_is_two_by_two() {
    assert_eq!(default_span(), Span::new(2, 2));
}

#[test]
fn resolve_fills_missing_halves_independently() {
    assert_eq!(Span::resolve(None, None), Span::new(2, 2));
    assert_eq!(Span::resolve(Some(3), None), Span::new(3, 2));
    assert_eq!(Span::resolve(None, Some(5)), Span::new(2, 5));
    assert_eq!(Span::resolve(Some(1), Some(4)), Span::new(1, 4));
}

#[test]
fn minimum_span_is_one_cell_each_way() {
    assert!(Span::new(1, 1).meets_minimum());
    assert!(!Span::new(0, 4).meets_minimum());
    assert!(!Span::resolve(Some(3), Some(0)).meets_minimum());
}

#[test]
fn position_edges_use_resolved_span() {
    let pos = GridPosition { row: 1, col: 3, row_span: None, col_span: Some(4) };
    assert_eq!(pos.bottom(), 3);
    assert_eq!(pos.right(), 7);
}

#[test]
fn position_edges_saturate() {
    let pos = GridPosition { row: u32::MAX, col: 0, row_span: Some(3), col_span: Some(1) };
    assert_eq!(pos.bottom(), u32::MAX);
}

#[test]
fn unplaced_widget_spans_default() {
    assert_eq!(make_widget("clock").span(), default_span());
}

#[test]
fn placed_widget_keeps_its_span() {
    let mut widget = make_widget("clock");
    widget.grid_position = Some(GridPosition::new(0, 0, Span::new(1, 4)));
    assert_eq!(widget.span(), Span::new(1, 4));
}

#[test]
fn disabled_widget_does_not_occupy() {
    let mut widget = placed("clock", 0, 0);
    assert!(widget.occupies_grid());
    widget.enabled = false;
    assert!(widget.is_placed());
    assert!(!widget.occupies_grid());
}

// =============================================================
// Serde
// =============================================================

#[test]
fn widget_serializes_camel_case() {
    let widget = placed("weather", 2, 4);
    let value = serde_json::to_value(&widget).unwrap();
    assert_eq!(value["gridPosition"]["rowSpan"], 2);
    assert_eq!(value["gridPosition"]["colSpan"], 2);
    assert_eq!(value["category"], "main");
}

#[test]
fn unplaced_widget_omits_grid_position() {
    let value = serde_json::to_value(make_widget("weather")).unwrap();
    assert!(value.get("gridPosition").is_none());
}

#[test]
fn widget_deserialize_applies_defaults() {
    let widget: Widget = serde_json::from_value(json!({
        "id": "transit",
        "name": "Transit",
        "category": "sidebar",
        "gridPosition": { "row": 1, "col": 2 }
    }))
    .unwrap();
    assert!(widget.enabled);
    assert_eq!(widget.settings, json!({}));
    assert_eq!(widget.span(), default_span());
}

#[test]
fn category_rejects_unknown_zone() {
    assert!(serde_json::from_str::<WidgetCategory>("\"banner\"").is_err());
}

#[test]
fn patch_distinguishes_null_from_absent() {
    let clear: WidgetPatch = serde_json::from_value(json!({ "gridPosition": null })).unwrap();
    assert_eq!(clear.grid_position, Some(None));

    let untouched: WidgetPatch = serde_json::from_value(json!({ "enabled": false })).unwrap();
    assert_eq!(untouched.grid_position, None);
    assert_eq!(untouched.enabled, Some(false));
}

#[test]
fn patch_serializes_clear_as_null() {
    let value = serde_json::to_value(WidgetPatch::position(None)).unwrap();
    assert_eq!(value, json!({ "gridPosition": null }));
}

// =============================================================
// WidgetRegistry
// =============================================================

#[test]
fn insert_replaces_in_place() {
    let mut reg = WidgetRegistry::new();
    reg.insert(make_widget("a"));
    reg.insert(make_widget("b"));
    let mut replacement = make_widget("a");
    replacement.name = "Renamed".into();
    reg.insert(replacement);

    assert_eq!(reg.len(), 2);
    assert_eq!(reg.widgets()[0].name, "Renamed");
}

#[test]
fn load_snapshot_replaces_everything() {
    let mut reg = WidgetRegistry::new();
    reg.insert(make_widget("old"));
    reg.load_snapshot(vec![make_widget("a"), make_widget("b")]);
    assert!(!reg.contains("old"));
    assert_eq!(reg.len(), 2);
}

#[test]
fn set_position_unknown_returns_false() {
    let mut reg = WidgetRegistry::new();
    assert!(!reg.set_position("ghost", None));
}

#[test]
fn apply_patch_merges_settings() {
    let mut reg = WidgetRegistry::new();
    let mut widget = make_widget("weather");
    widget.settings = json!({ "units": "metric", "city": "Oslo" });
    reg.insert(widget);

    let patch = WidgetPatch { settings: Some(json!({ "city": null, "refresh": 600 })), ..Default::default() };
    assert!(reg.apply_patch("weather", &patch));

    let settings = &reg.get("weather").unwrap().settings;
    assert_eq!(settings["units"], "metric");
    assert_eq!(settings["refresh"], 600);
    assert!(settings.get("city").is_none());
}

#[test]
fn apply_patch_rejects_non_object_settings() {
    let mut reg = WidgetRegistry::new();
    reg.insert(make_widget("weather"));
    let patch = WidgetPatch { settings: Some(json!(5)), ..Default::default() };
    assert!(!reg.apply_patch("weather", &patch));
}

#[test]
fn apply_patch_clears_position() {
    let mut reg = WidgetRegistry::new();
    reg.insert(placed("clock", 0, 0));
    assert!(reg.apply_patch("clock", &WidgetPatch::position(None)));
    assert!(!reg.get("clock").unwrap().is_placed());
}

#[test]
fn reorder_moves_forward_and_back() {
    let mut reg = WidgetRegistry::new();
    reg.load_snapshot(vec![make_widget("a"), make_widget("b"), make_widget("c")]);

    assert!(reg.reorder("a", "c"));
    assert_eq!(ids(&reg.palette()), vec!["b", "c", "a"]);

    assert!(reg.reorder("a", "b"));
    assert_eq!(ids(&reg.palette()), vec!["a", "b", "c"]);
}

#[test]
fn reorder_unknown_is_rejected() {
    let mut reg = WidgetRegistry::new();
    reg.insert(make_widget("a"));
    assert!(!reg.reorder("a", "ghost"));
}

#[test]
fn palette_skips_placed_and_disabled() {
    let mut reg = WidgetRegistry::new();
    let mut disabled = make_widget("c");
    disabled.enabled = false;
    reg.load_snapshot(vec![make_widget("a"), placed("b", 0, 0), disabled, make_widget("d")]);
    assert_eq!(ids(&reg.palette()), vec!["a", "d"]);
}

#[test]
fn clear_positions_empties_canvas() {
    let mut reg = WidgetRegistry::new();
    reg.load_snapshot(vec![placed("a", 0, 0), placed("b", 0, 2)]);
    reg.clear_positions();
    assert!(reg.widgets().iter().all(|w| !w.is_placed()));
}
