//! HTTP implementation of the control API

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::{ApiError, ControlApi};

/// Body of `GET /api/config`. Only the keys of `servers` are used.
#[derive(Debug, Deserialize)]
struct ConfigResponse {
    #[serde(default)]
    servers: Option<Map<String, Value>>,
}

/// Body of `GET /api/runner`, keyed by running server name.
type RunnerResponse = Option<Map<String, Value>>;

/// Control API client talking JSON over HTTP
pub struct HttpControlApi {
    http_client: reqwest::Client,
    base_url: Url,
}

impl HttpControlApi {
    /// Create a client for the daemon listening at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        // reqwest::Client::new() is infallible, fall back to it if the builder fails
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Ok(Self {
            http_client,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL from path segments, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments);
        let body = self.send(Method::GET, url.clone()).await?;
        decode(url.as_str(), &body)
    }

    async fn send(&self, method: Method, url: Url) -> Result<Vec<u8>, ApiError> {
        let endpoint = format!("{} {}", method, url.path());
        trace!("Sending {}", endpoint);

        let response = self
            .http_client
            .request(method, url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl ControlApi for HttpControlApi {
    async fn configured_servers(&self) -> Result<Vec<String>, ApiError> {
        let config: ConfigResponse = self.get_json(&["api", "config"]).await?;
        Ok(server_names(config))
    }

    async fn running_servers(&self) -> Result<HashSet<String>, ApiError> {
        let runners: RunnerResponse = self.get_json(&["api", "runner"]).await?;
        Ok(runners.unwrap_or_default().into_iter().map(|(name, _)| name).collect())
    }

    async fn start_server(&self, name: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "runner", name]);
        self.send(Method::POST, url).await?;
        debug!("Daemon accepted start of '{}'", name);
        Ok(())
    }

    async fn stop_server(&self, name: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "runner", name]);
        self.send(Method::DELETE, url).await?;
        debug!("Daemon accepted stop of '{}'", name);
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Configured server names in the order the daemon serialized them
fn server_names(config: ConfigResponse) -> Vec<String> {
    config
        .servers
        .unwrap_or_default()
        .into_iter()
        .map(|(name, _)| name)
        .collect()
}
