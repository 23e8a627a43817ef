//! HTTP store: the building-management REST backend.
//!
//! Routes, relative to `{base_url}/buildings/{building_id}/kiosk`:
//!
//! | Call | Method | Path |
//! |------|--------|------|
//! | `load` | GET | `/config` |
//! | `update_widget_settings` | PATCH | `/widgets/{id}` |
//! | `save_config` | PUT | `/layout` |
//! | `reset_to_default` | POST | `/reset` |

use std::time::Duration;

use kiosk_canvas::layout::CanvasLayout;
use kiosk_canvas::widget::WidgetPatch;
use reqwest::{Client, RequestBuilder, Response};

use super::{StoreError, WidgetConfig, WidgetConfigStore};
use crate::config::HttpStoreConfig;

pub struct HttpStore {
    client: Client,
    root: String,
    token: Option<String>,
}

impl HttpStore {
    /// Build a client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Http` if the TLS backend fails to initialise.
    pub fn new(config: &HttpStoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()?;
        Ok(Self { client, root: kiosk_root(&config.base_url, &config.building_id), token: config.token.clone() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.root)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Status { status: status.as_u16(), body })
    }
}

/// `{base}/buildings/{building}/kiosk`, tolerating a trailing slash on `base`.
fn kiosk_root(base_url: &str, building_id: &str) -> String {
    format!("{}/buildings/{building_id}/kiosk", base_url.trim_end_matches('/'))
}

#[async_trait::async_trait]
impl WidgetConfigStore for HttpStore {
    async fn load(&self) -> Result<WidgetConfig, StoreError> {
        let response = self.send(self.client.get(self.url("/config"))).await?;
        Ok(response.json().await?)
    }

    async fn update_widget_settings(&self, id: &str, patch: &WidgetPatch) -> Result<(), StoreError> {
        let url = self.url(&format!("/widgets/{id}"));
        self.send(self.client.patch(url).json(patch)).await?;
        Ok(())
    }

    async fn save_config(&self, layout: &CanvasLayout) -> Result<(), StoreError> {
        self.send(self.client.put(self.url("/layout")).json(layout)).await?;
        Ok(())
    }

    async fn reset_to_default(&self) -> Result<(), StoreError> {
        self.send(self.client.post(self.url("/reset"))).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
