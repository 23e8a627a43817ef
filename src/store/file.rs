//! File store: the whole config as one pretty-printed JSON document.
//!
//! DESIGN
//! ======
//! Every operation is read-modify-write of the full document. A process-wide
//! mutex serialises those cycles so two in-flight saves cannot interleave and
//! drop each other's changes; whichever finishes last wins. Writes go to a
//! sibling temp file first and are renamed into place.
//!
//! A missing file reads as the default widget catalog on the default grid.

use std::path::{Path, PathBuf};

use kiosk_canvas::layout::CanvasLayout;
use kiosk_canvas::widget::WidgetPatch;
use tokio::sync::Mutex;
use tracing::debug;

use super::{StoreError, WidgetConfig, WidgetConfigStore};
use crate::catalog;

pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path, lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<WidgetConfig, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "layout file missing; using default catalog");
                Ok(catalog::default_config())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, config: &WidgetConfig) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), widgets = config.widgets.len(), "layout file written");
        Ok(())
    }

    async fn modify<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut WidgetConfig) -> Result<(), StoreError> + Send,
    {
        let _guard = self.lock.lock().await;
        let mut config = self.read().await?;
        f(&mut config)?;
        self.write(&config).await
    }
}

#[async_trait::async_trait]
impl WidgetConfigStore for FileStore {
    async fn load(&self) -> Result<WidgetConfig, StoreError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    async fn update_widget_settings(&self, id: &str, patch: &WidgetPatch) -> Result<(), StoreError> {
        self.modify(|config| config.apply_patch(id, patch)).await
    }

    async fn save_config(&self, layout: &CanvasLayout) -> Result<(), StoreError> {
        self.modify(|config| {
            config.apply_layout(layout);
            Ok(())
        })
        .await
    }

    async fn reset_to_default(&self) -> Result<(), StoreError> {
        self.modify(|config| {
            config.clear_positions();
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
