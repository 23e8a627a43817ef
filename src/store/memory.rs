//! In-memory store. Holds one `WidgetConfig` behind a lock.

use kiosk_canvas::layout::CanvasLayout;
use kiosk_canvas::widget::WidgetPatch;
use tokio::sync::RwLock;

use super::{StoreError, WidgetConfig, WidgetConfigStore};

pub struct MemoryStore {
    config: RwLock<WidgetConfig>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(config: WidgetConfig) -> Self {
        Self { config: RwLock::new(config) }
    }

    /// Copy of the current contents.
    pub async fn snapshot(&self) -> WidgetConfig {
        self.config.read().await.clone()
    }
}

#[async_trait::async_trait]
impl WidgetConfigStore for MemoryStore {
    async fn load(&self) -> Result<WidgetConfig, StoreError> {
        Ok(self.snapshot().await)
    }

    async fn update_widget_settings(&self, id: &str, patch: &WidgetPatch) -> Result<(), StoreError> {
        self.config.write().await.apply_patch(id, patch)
    }

    async fn save_config(&self, layout: &CanvasLayout) -> Result<(), StoreError> {
        self.config.write().await.apply_layout(layout);
        Ok(())
    }

    async fn reset_to_default(&self) -> Result<(), StoreError> {
        self.config.write().await.clear_positions();
        Ok(())
    }
}
