//! Editor service: one user's editing session over a kiosk canvas.
//!
//! DESIGN
//! ======
//! `EditorSession` owns the synchronous `EngineCore` and acts as its host:
//! every engine call returns an `Action`, which the session forwards to the
//! configuration store (`update_widget_settings` per touched widget) and turns
//! into a user-facing `Notice`. The engine never sees the store and never
//! produces messages; the session never decides layout rules.
//!
//! The grid-size bounds (rows 4..=12, cols 6..=16) are enforced here, at the
//! UI boundary, before the engine is asked to resize.
//!
//! ERROR HANDLING
//! ==============
//! A failed store update is logged and reported as an error notice. The
//! in-memory change stays; a later full save will carry it.

use std::sync::Arc;

use kiosk_canvas::consts::{MAX_GRID_COLS, MAX_GRID_ROWS, MIN_GRID_COLS, MIN_GRID_ROWS};
use kiosk_canvas::engine::{Action, EngineCore};
use kiosk_canvas::grid::GridDimensions;
use kiosk_canvas::input::DropTarget;
use kiosk_canvas::validate::Verdict;
use kiosk_canvas::widget::{Span, WidgetPatch};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::services::persistence::{LayoutPersistence, PersistenceError, SaveStatus};
use crate::store::{StoreError, WidgetConfigStore};

// =============================================================================
// NOTICES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A transient message for the user, e.g. a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// What an editor operation did, and what to tell the user about it.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub action: Action,
    pub notice: Notice,
}

// =============================================================================
// SESSION
// =============================================================================

pub struct EditorSession {
    engine: EngineCore,
    store: Arc<dyn WidgetConfigStore>,
    persistence: LayoutPersistence,
}

impl EditorSession {
    /// Load widgets from the store and start editing.
    ///
    /// Stored positions that break the layout rules are cleared locally and
    /// in the store before the session is handed out.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the config cannot be loaded or a repair
    /// cannot be written back.
    pub async fn open(store: Arc<dyn WidgetConfigStore>) -> Result<Self, StoreError> {
        let config = store.load().await?;
        let mut engine = EngineCore::new();
        let cleared = engine.hydrate(config.grid_size, config.widgets);
        for id in &cleared {
            warn!(widget = %id, "stored position breaks layout rules; returned to palette");
            store.update_widget_settings(id, &WidgetPatch::position(None)).await?;
        }
        info!(
            widgets = engine.registry.len(),
            rows = engine.grid.rows,
            cols = engine.grid.cols,
            "editor session opened"
        );
        let persistence = LayoutPersistence::new(Arc::clone(&store));
        Ok(Self { engine, store, persistence })
    }

    #[must_use]
    pub fn engine(&self) -> &EngineCore {
        &self.engine
    }

    // --- Placement ---

    pub async fn place(&mut self, id: &str, row: u32, col: u32) -> Outcome {
        let action = self.engine.place(id, row, col);
        self.commit(action).await
    }

    pub async fn place_anywhere(&mut self, id: &str) -> Outcome {
        let action = self.engine.place_anywhere(id);
        self.commit(action).await
    }

    pub async fn resize(&mut self, id: &str, rows: u32, cols: u32) -> Outcome {
        let action = self.engine.resize(id, Span::new(rows, cols));
        self.commit(action).await
    }

    pub async fn remove(&mut self, id: &str) -> Outcome {
        let action = self.engine.remove(id);
        self.commit(action).await
    }

    // --- Drag session ---

    pub async fn drag_start(&mut self, id: &str) -> Outcome {
        let action = self.engine.drag_start(id);
        self.commit(action).await
    }

    pub async fn drop_on(&mut self, target: DropTarget) -> Outcome {
        let action = self.engine.drop_on(target);
        self.commit(action).await
    }

    /// Move `id` to `target`'s palette slot. Any drag or selection in progress is kept.
    pub async fn reorder(&mut self, id: &str, target: &str) -> Outcome {
        let action = self.engine.reorder_palette(id, target);
        self.commit(action).await
    }

    // --- Click-to-place ---

    pub fn select(&mut self, id: &str) -> bool {
        self.engine.select(id)
    }

    pub async fn click_cell(&mut self, row: u32, col: u32) -> Outcome {
        let action = self.engine.click_cell(row, col);
        self.commit(action).await
    }

    // --- Canvas-wide ---

    /// Resize the grid, evicting widgets that no longer fit.
    pub async fn set_grid_size(&mut self, rows: u32, cols: u32) -> Outcome {
        if let Err(message) = check_grid_bounds(rows, cols) {
            return Outcome { action: Action::None, notice: Notice::error(message) };
        }
        let action = self.engine.set_grid_size(GridDimensions::new(rows, cols));
        if let Action::GridResized { evicted, .. } = &action {
            if !evicted.is_empty() {
                info!(rows, cols, evicted = ?evicted, "grid resize evicted widgets");
            }
        }
        self.commit(action).await
    }

    pub async fn set_enabled(&mut self, id: &str, enabled: bool) -> Outcome {
        let action = self.engine.set_enabled(id, enabled);
        self.commit(action).await
    }

    pub async fn reset(&mut self) -> Outcome {
        let action = self.engine.reset();
        self.commit(action).await
    }

    // --- Saving ---

    /// Start saving the whole layout in the background.
    pub async fn save(&self) -> JoinHandle<Result<(), PersistenceError>> {
        self.persistence.save(self.engine.layout()).await
    }

    /// Save the whole layout and wait for the result.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the store rejects the layout. The
    /// in-memory layout is kept as-is.
    pub async fn save_now(&self) -> Result<(), PersistenceError> {
        self.persistence.save_now(self.engine.layout()).await
    }

    pub async fn save_status(&self) -> SaveStatus {
        self.persistence.status().await
    }

    async fn commit(&mut self, action: Action) -> Outcome {
        let mut notice = describe(&self.engine, &action);

        let result = if action == Action::LayoutReset {
            self.store.reset_to_default().await
        } else {
            self.push_updates(&action).await
        };
        if let Err(e) = result {
            error!(error = %e, "store update failed; change kept locally");
            notice = Notice::error(format!("{} (not yet saved: {e})", notice.message));
        }

        Outcome { action, notice }
    }

    async fn push_updates(&self, action: &Action) -> Result<(), StoreError> {
        for (id, patch) in action.store_updates() {
            self.store.update_widget_settings(&id, &patch).await?;
        }
        Ok(())
    }
}

// =============================================================================
// MESSAGES
// =============================================================================

fn check_grid_bounds(rows: u32, cols: u32) -> Result<(), String> {
    if !(MIN_GRID_ROWS..=MAX_GRID_ROWS).contains(&rows) {
        return Err(format!("Rows must be between {MIN_GRID_ROWS} and {MAX_GRID_ROWS}"));
    }
    if !(MIN_GRID_COLS..=MAX_GRID_COLS).contains(&cols) {
        return Err(format!("Columns must be between {MIN_GRID_COLS} and {MAX_GRID_COLS}"));
    }
    Ok(())
}

/// The user-facing message for an engine action.
#[must_use]
pub fn describe(engine: &EngineCore, action: &Action) -> Notice {
    let name = |id: &str| engine.widget(id).map_or_else(|| id.to_string(), |w| w.name.clone());
    match action {
        Action::None => Notice::info("Nothing changed"),
        Action::DragStarted { id } => Notice::info(format!("Moving {}", name(id))),
        Action::WidgetPlaced { id, position } => {
            Notice::success(format!("Placed {} at ({}, {})", name(id), position.row, position.col))
        }
        Action::WidgetResized { id, position } => {
            let span = position.span();
            Notice::success(format!("Resized {} to {}x{}", name(id), span.rows, span.cols))
        }
        Action::WidgetRemoved { id } => Notice::success(format!("Moved {} back to the palette", name(id))),
        Action::WidgetNotPlaced { id } => Notice::error(format!("{} is not on the canvas", name(id))),
        Action::PlacementRejected { id, verdict } => Notice::error(match verdict {
            Verdict::RejectedMinSize => format!("Cannot place {}: its size covers no cells", name(id)),
            Verdict::RejectedOverlap { other } => {
                format!("Cannot place {} there: it would overlap {}", name(id), name(other))
            }
            _ => format!("Cannot place {} there: it would extend past the edge of the grid", name(id)),
        }),
        Action::ResizeRejected { id, verdict } => Notice::error(match verdict {
            Verdict::RejectedMinSize => "Widgets must be at least 1 cell tall and 1 cell wide".to_string(),
            Verdict::RejectedOverlap { other } => {
                format!("Cannot resize {}: it would overlap {}", name(id), name(other))
            }
            _ => format!("Cannot resize {}: it would extend past the edge of the grid", name(id)),
        }),
        Action::PaletteReordered { .. } => Notice::success("Palette reordered"),
        Action::GridResized { dims, .. } => Notice::success(format!("Grid is now {}x{}", dims.rows, dims.cols)),
        Action::WidgetToggled { id, enabled, position_cleared } => {
            let state = if *enabled { "enabled" } else { "disabled" };
            let suffix = if *position_cleared { " and returned to the palette" } else { "" };
            Notice::success(format!("{} {state}{suffix}", name(id)))
        }
        Action::LayoutReset => Notice::success("All widgets returned to the palette"),
    }
}

#[cfg(test)]
#[path = "editor_test.rs"]
mod tests;
