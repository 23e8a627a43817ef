//! Persistence service: whole-canvas layout saves.
//!
//! DESIGN
//! ======
//! A save captures the entire `CanvasLayout` and submits it with one
//! `save_config` call; there are no partial or incremental saves. `save`
//! spawns the call and returns immediately so editing can continue while it
//! is in flight. Saves are not sequenced: if two overlap, the store keeps
//! whichever lands last. Each save takes a generation number and only the
//! newest generation is allowed to set the reported status, so a slow older
//! save cannot overwrite the outcome of a newer one.
//!
//! ERROR HANDLING
//! ==============
//! A failed save is logged and reported as `SaveStatus::Failed`. It is not
//! retried and the in-memory layout is not rolled back: the edits stay
//! pending so the user can save again.

use std::sync::Arc;

use kiosk_canvas::layout::CanvasLayout;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::store::{StoreError, WidgetConfigStore};

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("layout save failed: {0}")]
    Store(#[from] StoreError),
}

/// What the host shows next to its save button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Saved,
    Failed(String),
}

#[derive(Debug, Default)]
struct SaveTracker {
    /// Generation of the most recently started save.
    latest: u64,
    status: SaveStatus,
}

#[derive(Clone)]
pub struct LayoutPersistence {
    store: Arc<dyn WidgetConfigStore>,
    tracker: Arc<RwLock<SaveTracker>>,
}

impl LayoutPersistence {
    #[must_use]
    pub fn new(store: Arc<dyn WidgetConfigStore>) -> Self {
        Self { store, tracker: Arc::new(RwLock::new(SaveTracker::default())) }
    }

    /// Status of the newest save.
    pub async fn status(&self) -> SaveStatus {
        self.tracker.read().await.status.clone()
    }

    /// Start a save in the background. The handle may be dropped.
    pub async fn save(&self, layout: CanvasLayout) -> JoinHandle<Result<(), PersistenceError>> {
        let generation = self.begin().await;
        let this = self.clone();
        tokio::spawn(async move { this.run(generation, layout).await })
    }

    /// Save and wait for the store to answer.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the store rejects the layout.
    pub async fn save_now(&self, layout: CanvasLayout) -> Result<(), PersistenceError> {
        let generation = self.begin().await;
        self.run(generation, layout).await
    }

    async fn begin(&self) -> u64 {
        let mut tracker = self.tracker.write().await;
        tracker.latest += 1;
        tracker.status = SaveStatus::Saving;
        tracker.latest
    }

    async fn run(&self, generation: u64, layout: CanvasLayout) -> Result<(), PersistenceError> {
        let result = self.store.save_config(&layout).await;

        let mut tracker = self.tracker.write().await;
        let is_latest = tracker.latest == generation;
        match &result {
            Ok(()) => {
                info!(generation, widgets = layout.widget_positions.len(), "layout saved");
                if is_latest {
                    tracker.status = SaveStatus::Saved;
                }
            }
            Err(e) => {
                error!(error = %e, generation, "layout save failed");
                if is_latest {
                    tracker.status = SaveStatus::Failed(e.to_string());
                }
            }
        }
        if !is_latest {
            debug!(generation, latest = tracker.latest, "superseded save finished");
        }
        result.map_err(Into::into)
    }
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
