use super::*;
use crate::store::{MemoryStore, WidgetConfig};
use kiosk_canvas::grid::GridDimensions;
use kiosk_canvas::widget::{GridPosition, Span, WidgetPatch};
use tokio::sync::Notify;

fn layout(rows: u32) -> CanvasLayout {
    let mut layout = CanvasLayout { grid_size: GridDimensions::new(rows, 12), ..Default::default() };
    layout.widget_positions.insert("clock".into(), GridPosition::new(0, 0, Span::new(1, 4)));
    layout
}

// =============================================================================
// MOCK STORES
// =============================================================================

/// Saves of a 4-row grid wait for `release` and then fail; all others succeed at once.
#[derive(Default)]
struct GatedStore {
    release: Notify,
}

#[async_trait::async_trait]
impl WidgetConfigStore for GatedStore {
    async fn load(&self) -> Result<WidgetConfig, StoreError> {
        Ok(WidgetConfig::default())
    }

    async fn update_widget_settings(&self, _id: &str, _patch: &WidgetPatch) -> Result<(), StoreError> {
        Ok(())
    }

    async fn save_config(&self, layout: &CanvasLayout) -> Result<(), StoreError> {
        if layout.grid_size.rows == 4 {
            self.release.notified().await;
            return Err(StoreError::Status { status: 503, body: "busy".into() });
        }
        Ok(())
    }

    async fn reset_to_default(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

struct DownStore;

#[async_trait::async_trait]
impl WidgetConfigStore for DownStore {
    async fn load(&self) -> Result<WidgetConfig, StoreError> {
        Err(StoreError::Status { status: 500, body: "down".into() })
    }

    async fn update_widget_settings(&self, _id: &str, _patch: &WidgetPatch) -> Result<(), StoreError> {
        Err(StoreError::Status { status: 500, body: "down".into() })
    }

    async fn save_config(&self, _layout: &CanvasLayout) -> Result<(), StoreError> {
        Err(StoreError::Status { status: 500, body: "down".into() })
    }

    async fn reset_to_default(&self) -> Result<(), StoreError> {
        Err(StoreError::Status { status: 500, body: "down".into() })
    }
}

// =============================================================================
// save_now
// =============================================================================

#[tokio::test]
async fn status_starts_idle() {
    let persistence = LayoutPersistence::new(Arc::new(MemoryStore::new(WidgetConfig::default())));
    assert_eq!(persistence.status().await, SaveStatus::Idle);
}

#[tokio::test]
async fn save_now_writes_whole_layout() {
    let store = Arc::new(MemoryStore::new(WidgetConfig::default()));
    let persistence = LayoutPersistence::new(store.clone());

    persistence.save_now(layout(6)).await.unwrap();

    assert_eq!(persistence.status().await, SaveStatus::Saved);
    assert_eq!(store.snapshot().await.grid_size, GridDimensions::new(6, 12));
}

#[tokio::test]
async fn failed_save_reports_failure_without_retry() {
    let persistence = LayoutPersistence::new(Arc::new(DownStore));

    let err = persistence.save_now(layout(6)).await.unwrap_err();

    assert!(matches!(err, PersistenceError::Store(StoreError::Status { status: 500, .. })));
    assert!(matches!(persistence.status().await, SaveStatus::Failed(msg) if msg.contains("500")));
}

// =============================================================================
// save (background)
// =============================================================================

#[tokio::test]
async fn background_save_completes() {
    let store = Arc::new(MemoryStore::new(WidgetConfig::default()));
    let persistence = LayoutPersistence::new(store.clone());

    let handle = persistence.save(layout(10)).await;
    handle.await.unwrap().unwrap();

    assert_eq!(persistence.status().await, SaveStatus::Saved);
    assert_eq!(store.snapshot().await.grid_size.rows, 10);
}

#[tokio::test]
async fn status_is_saving_while_in_flight() {
    let store = Arc::new(GatedStore::default());
    let persistence = LayoutPersistence::new(store.clone());

    let slow = persistence.save(layout(4)).await;
    assert_eq!(persistence.status().await, SaveStatus::Saving);

    store.release.notify_one();
    assert!(slow.await.unwrap().is_err());
    assert!(matches!(persistence.status().await, SaveStatus::Failed(_)));
}

#[tokio::test]
async fn older_save_cannot_overwrite_newer_status() {
    let store = Arc::new(GatedStore::default());
    let persistence = LayoutPersistence::new(store.clone());

    let slow = persistence.save(layout(4)).await;
    persistence.save_now(layout(8)).await.unwrap();
    assert_eq!(persistence.status().await, SaveStatus::Saved);

    store.release.notify_one();
    assert!(slow.await.unwrap().is_err());
    assert_eq!(persistence.status().await, SaveStatus::Saved);
}
