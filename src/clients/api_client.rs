//! # Petstore HTTP Client
//!
//! [`ApiClient`] is the shared plumbing behind [`InventoryClient`](crate::clients::InventoryClient)
//! and [`OrderClient`](crate::clients::OrderClient): it owns one base URL and a
//! `reqwest::Client`, bounds every request by the caller's [`Context`], and maps
//! responses onto [`ServiceError`].

use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::clients::ServiceError;
use crate::context::Context;

/// A cloneable handle to one petstore endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: Url, http: reqwest::Client) -> Self {
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins `path` onto the base URL, keeping any path prefix the base carries.
    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        path: &str,
    ) -> Result<T, ServiceError> {
        let request = self.http.get(self.url(path));
        self.execute(ctx, request).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        ctx: &Context,
        path: &str,
        body: &B,
    ) -> Result<T, ServiceError> {
        let request = self.http.post(self.url(path)).json(body);
        self.execute(ctx, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        mut request: RequestBuilder,
    ) -> Result<T, ServiceError> {
        if let Some(remaining) = ctx.remaining() {
            request = request.timeout(remaining);
        }

        let response = request.send().await.map_err(ServiceError::Transport)?;
        let status = response.status();
        debug!(%status, url = %response.url(), "Received response");

        if status.is_success() {
            return response.json::<T>().await.map_err(ServiceError::Decode);
        }

        let message = error_message(response).await;
        warn!(%status, %message, "Service rejected request");
        Err(ServiceError::Status { status, message })
    }
}

/// Extracts the petstore `ApiResponse.message`, falling back to the raw body.
async fn error_message(response: Response) -> String {
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => return format!("failed reading error body: {e}"),
    };

    serde_json::from_slice::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|v| v.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| String::from_utf8_lossy(&body).to_string())
}
