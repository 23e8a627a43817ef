//! Widget model: kiosk widgets, their grid positions, and the in-memory registry.
//!
//! This module defines what can be placed on the kiosk canvas (`Widget`,
//! `WidgetCategory`), where a widget sits (`GridPosition`, `Span`), a sparse
//! update type for store-bound edits (`WidgetPatch`), and the runtime registry
//! that owns every known widget in palette order (`WidgetRegistry`).
//!
//! Widgets arrive from the configuration store (JSON deserialization) and are
//! mutated only through the engine's commit paths. The occupancy model reads
//! from `WidgetRegistry::widgets` to derive which cells are taken.

#[cfg(test)]
#[path = "widget_test.rs"]
mod widget_test;

use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::{DEFAULT_COL_SPAN, DEFAULT_ROW_SPAN, MIN_SPAN};

/// Stable identifier for a widget, e.g. its widget type name.
pub type WidgetId = String;

/// The layout zone a widget is designed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetCategory {
    /// Top band: building name, clock, date.
    Header,
    /// Primary content: announcements, maintenance notices.
    Main,
    /// Secondary content: weather, transit, contacts.
    Sidebar,
    /// Bottom band: tickers and footnotes.
    Footer,
}

/// Height and width of a widget in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Number of rows covered.
    pub rows: u32,
    /// Number of columns covered.
    pub cols: u32,
}

impl Span {
    #[must_use]
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Fill in whichever half of a stored span is missing from the default policy.
    #[must_use]
    pub fn resolve(rows: Option<u32>, cols: Option<u32>) -> Self {
        let fallback = default_span();
        Self { rows: rows.unwrap_or(fallback.rows), cols: cols.unwrap_or(fallback.cols) }
    }

    /// Whether the span covers at least one cell in each direction.
    #[must_use]
    pub const fn meets_minimum(self) -> bool {
        self.rows >= MIN_SPAN && self.cols >= MIN_SPAN
    }
}

/// The span a widget takes when nothing else says otherwise.
///
/// Every placement and eviction path resolves unset spans through here.
#[must_use]
pub const fn default_span() -> Span {
    Span::new(DEFAULT_ROW_SPAN, DEFAULT_COL_SPAN)
}

/// Top-left cell and span of a placed widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPosition {
    /// Zero-based top row.
    pub row: u32,
    /// Zero-based left column.
    pub col: u32,
    /// Rows covered; `None` falls back to [`default_span`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,
    /// Columns covered; `None` falls back to [`default_span`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_span: Option<u32>,
}

impl GridPosition {
    /// A position with an explicit span.
    #[must_use]
    pub fn new(row: u32, col: u32, span: Span) -> Self {
        Self { row, col, row_span: Some(span.rows), col_span: Some(span.cols) }
    }

    /// The resolved span of this position.
    #[must_use]
    pub fn span(&self) -> Span {
        Span::resolve(self.row_span, self.col_span)
    }

    /// Exclusive bottom row (`row + rowSpan`), saturating on garbage input.
    #[must_use]
    pub fn bottom(&self) -> u32 {
        self.row.saturating_add(self.span().rows)
    }

    /// Exclusive right column (`col + colSpan`), saturating on garbage input.
    #[must_use]
    pub fn right(&self) -> u32 {
        self.col.saturating_add(self.span().cols)
    }
}

/// A kiosk widget as stored in the registry and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    /// Stable identity.
    pub id: WidgetId,
    /// Display name shown in the palette.
    pub name: String,
    /// Layout zone the widget belongs to.
    pub category: WidgetCategory,
    /// Disabled widgets are never drawn on the canvas.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Where the widget sits; `None` keeps it in the palette.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_position: Option<GridPosition>,
    /// Opaque per-widget configuration owned by the widget itself.
    #[serde(default = "empty_settings")]
    pub settings: serde_json::Value,
}

fn enabled_by_default() -> bool {
    true
}

fn empty_settings() -> serde_json::Value {
    serde_json::json!({})
}

impl Widget {
    /// An enabled, un-placed widget with empty settings.
    #[must_use]
    pub fn new(id: impl Into<WidgetId>, name: impl Into<String>, category: WidgetCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            enabled: true,
            grid_position: None,
            settings: empty_settings(),
        }
    }

    /// Whether the widget has a stored position (enabled or not).
    #[must_use]
    pub fn is_placed(&self) -> bool {
        self.grid_position.is_some()
    }

    /// Whether the widget takes up cells on the canvas.
    #[must_use]
    pub fn occupies_grid(&self) -> bool {
        self.enabled && self.grid_position.is_some()
    }

    /// Span the widget has, or would have if placed now.
    #[must_use]
    pub fn span(&self) -> Span {
        self.grid_position.map_or_else(default_span, |pos| pos.span())
    }

    /// Apply a sparse update. Returns false if the settings patch is not a JSON object.
    pub fn apply_patch(&mut self, patch: &WidgetPatch) -> bool {
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(position) = patch.grid_position {
            self.grid_position = position;
        }
        if let Some(ref settings) = patch.settings {
            let Some(incoming) = settings.as_object() else {
                return false;
            };

            if !self.settings.is_object() {
                self.settings = empty_settings();
            }

            if let Some(existing) = self.settings.as_object_mut() {
                for (k, v) in incoming {
                    if v.is_null() {
                        existing.remove(k);
                    } else {
                        existing.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        true
    }
}

/// Sparse update for a widget. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetPatch {
    /// New enablement flag, if being updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// `Some(Some(_))` places or moves, `Some(None)` clears (sent as `null`).
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present_or_null")]
    pub grid_position: Option<Option<GridPosition>>,
    /// Settings keys to merge or remove (null values delete keys).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<serde_json::Value>,
}

impl WidgetPatch {
    /// Patch that sets (or clears, with `None`) a widget's grid position.
    #[must_use]
    pub fn position(position: Option<GridPosition>) -> Self {
        Self { grid_position: Some(position), ..Default::default() }
    }

    /// Patch that flips a widget's enablement.
    #[must_use]
    pub fn enabled(enabled: bool) -> Self {
        Self { enabled: Some(enabled), ..Default::default() }
    }
}

/// Distinguishes an explicit `null` (clear) from an absent key (leave alone).
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// In-memory registry of widgets, kept in palette order.
#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    widgets: Vec<Widget>,
}

impl WidgetRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { widgets: Vec::new() }
    }

    /// Insert or replace a widget. A widget with the same `id` is replaced in
    /// place; new widgets are appended to the end of the palette.
    pub fn insert(&mut self, widget: Widget) {
        match self.index_of(&widget.id) {
            Some(idx) => self.widgets[idx] = widget,
            None => self.widgets.push(widget),
        }
    }

    /// Replace all widgets with a full snapshot. Later duplicates of an id replace earlier ones.
    pub fn load_snapshot(&mut self, widgets: Vec<Widget>) {
        self.widgets.clear();
        for widget in widgets {
            self.insert(widget);
        }
    }

    /// Return a reference to a widget by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    /// Whether a widget with this id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    /// All widgets in palette order.
    #[must_use]
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Overwrite (or clear) a widget's position. Returns false if the widget doesn't exist.
    pub fn set_position(&mut self, id: &str, position: Option<GridPosition>) -> bool {
        let Some(widget) = self.widgets.iter_mut().find(|w| w.id == id) else {
            return false;
        };
        widget.grid_position = position;
        true
    }

    /// Clear every stored position.
    pub fn clear_positions(&mut self) {
        for widget in &mut self.widgets {
            widget.grid_position = None;
        }
    }

    /// Apply a patch to an existing widget. Returns false if the widget doesn't
    /// exist or the settings patch is not a JSON object.
    pub fn apply_patch(&mut self, id: &str, patch: &WidgetPatch) -> bool {
        self.widgets
            .iter_mut()
            .find(|w| w.id == id)
            .is_some_and(|widget| widget.apply_patch(patch))
    }

    /// Move `active` to the index currently held by `target`, shifting the
    /// widgets in between. Returns false if either id is unknown.
    pub fn reorder(&mut self, active: &str, target: &str) -> bool {
        let (Some(from), Some(to)) = (self.index_of(active), self.index_of(target)) else {
            return false;
        };
        if from != to {
            let widget = self.widgets.remove(from);
            self.widgets.insert(to, widget);
        }
        true
    }

    /// Enabled widgets that are not on the canvas, in palette order.
    #[must_use]
    pub fn palette(&self) -> Vec<&Widget> {
        self.widgets
            .iter()
            .filter(|w| w.enabled && !w.is_placed())
            .collect()
    }

    /// Number of registered widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Returns `true` if no widgets are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.widgets.iter().position(|w| w.id == id)
    }
}
