//! Vultr API client.
//!
//! API Documentation: <https://www.vultr.com/api/>

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{DeployError, DeployResult};
use crate::provision::Provisioner;
use crate::provision::models::{
    AccountResponse, CreateInstanceRequest, InstanceResponse, RegionListResponse,
};

/// Base URL for the Vultr API.
pub const API_BASE_URL: &str = "https://api.vultr.com/v2";

/// Vultr provisioner using the v2 REST API.
///
/// Requests carry no timeout and are never retried.
#[derive(Clone)]
pub struct Vultr {
    client: Client,
    api_key: String,
    base_url: String,
}

impl Vultr {
    #[must_use]
    pub fn new(api_key: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: API_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_key)
    }

    /// Point the client at another API root (a mock server in
    /// tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> DeployResult<T> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    async fn post<T, B>(&self, path: &str, body: &B) -> DeployResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Send an authenticated request and parse a JSON reply.
    ///
    /// A 2xx reply with an empty body parses as `{}`. Any other
    /// status becomes [`DeployError::Api`] carrying the raw body.
    async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> DeployResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let url = format!("{}{path}", self.base_url);
        debug!(method = %method, url = %url, "Vultr API request");

        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), url = %url, "Vultr API response");

        if !status.is_success() {
            return Err(DeployError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let text = if text.trim().is_empty() { "{}" } else { &text };
        serde_json::from_str(text).map_err(|e| {
            warn!(error = %e, body = %text, "Failed to parse Vultr response");
            DeployError::Json(e)
        })
    }
}

#[async_trait]
impl Provisioner for Vultr {
    async fn account(&self) -> DeployResult<AccountResponse> {
        self.get("/account").await
    }

    async fn regions(&self) -> DeployResult<RegionListResponse> {
        self.get("/regions").await
    }

    async fn create_instance(
        &self,
        request: &CreateInstanceRequest,
    ) -> DeployResult<InstanceResponse> {
        self.post("/instances", request).await
    }
}
