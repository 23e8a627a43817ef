//! Widget configuration store: where widgets and layouts live between sessions.
//!
//! DESIGN
//! ======
//! The editor treats the store as an external collaborator behind the
//! `WidgetConfigStore` trait. Per-widget edits go through
//! `update_widget_settings`; whole-canvas saves go through `save_config`.
//! Three adapters exist: `MemoryStore` (tests and demos), `FileStore` (a JSON
//! document on disk) and `HttpStore` (the building-management REST backend).
//!
//! ERROR HANDLING
//! ==============
//! Every adapter maps its failures into `StoreError`. Nothing is retried here;
//! callers decide whether to surface or log.

pub mod file;
pub mod http;
pub mod memory;

use std::sync::Arc;

use kiosk_canvas::grid::GridDimensions;
use kiosk_canvas::layout::CanvasLayout;
use kiosk_canvas::widget::{Widget, WidgetPatch};
use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;

pub use file::FileStore;
pub use http::HttpStore;
pub use memory::MemoryStore;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unknown widget: {0}")]
    UnknownWidget(String),
    #[error("invalid settings patch for widget {0}")]
    InvalidPatch(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store responded {status}: {body}")]
    Status { status: u16, body: String },
}

/// Everything the store knows about one building's kiosk canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    #[serde(default)]
    pub grid_size: GridDimensions,
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

impl WidgetConfig {
    /// The layout currently recorded in this config.
    #[must_use]
    pub fn layout(&self) -> CanvasLayout {
        CanvasLayout::capture(self.grid_size, &self.widgets)
    }

    /// Overwrite grid size and every widget position with `layout`.
    pub fn apply_layout(&mut self, layout: &CanvasLayout) {
        self.grid_size = layout.grid_size;
        layout.apply_to(&mut self.widgets);
    }

    /// Apply a per-widget patch.
    ///
    /// # Errors
    ///
    /// Returns `UnknownWidget` if no widget has this id, or `InvalidPatch` if
    /// the settings patch is not a JSON object.
    pub fn apply_patch(&mut self, id: &str, patch: &WidgetPatch) -> Result<(), StoreError> {
        let widget = self
            .widgets
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| StoreError::UnknownWidget(id.to_string()))?;
        if widget.apply_patch(patch) {
            Ok(())
        } else {
            Err(StoreError::InvalidPatch(id.to_string()))
        }
    }

    /// Return every widget to the palette.
    pub fn clear_positions(&mut self) {
        for widget in &mut self.widgets {
            widget.grid_position = None;
        }
    }
}

// =============================================================================
// STORE TRAIT
// =============================================================================

/// Async access to the widget configuration backend. Enables mocking in tests.
#[async_trait::async_trait]
pub trait WidgetConfigStore: Send + Sync {
    /// Fetch the current widgets and grid size.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be read or decoded.
    async fn load(&self) -> Result<WidgetConfig, StoreError>;

    /// Commit a single widget's position, enablement or settings change.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the widget is unknown or the write fails.
    async fn update_widget_settings(&self, id: &str, patch: &WidgetPatch) -> Result<(), StoreError>;

    /// Persist the whole canvas layout as one unit.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the write fails.
    async fn save_config(&self, layout: &CanvasLayout) -> Result<(), StoreError>;

    /// Clear every placement.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the write fails.
    async fn reset_to_default(&self) -> Result<(), StoreError>;
}

/// Build the store selected by configuration.
///
/// # Errors
///
/// Returns a [`StoreError`] if the HTTP client cannot be constructed.
pub fn open(config: &StoreConfig) -> Result<Arc<dyn WidgetConfigStore>, StoreError> {
    Ok(match config {
        StoreConfig::File { path } => Arc::new(FileStore::new(path.clone())),
        StoreConfig::Http(http) => Arc::new(HttpStore::new(http)?),
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
