//! Honeycomb API client
//!
//! Paced HTTP client for listing datasets/columns and updating column
//! descriptions. Every request carries the `X-Honeycomb-Team` key header.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::debug;
use url::Url;

use super::types::{Column, ColumnUpdate, Dataset};
use super::SchemaClient;
use crate::error::SyncError;

pub const HONEYCOMB_API_BASE: &str = "https://api.honeycomb.io";
/// `X-Honeycomb-Team`, lower-cased for `HeaderName::from_static`
pub const API_KEY_HEADER: &str = "x-honeycomb-team";
pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 200;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const ERROR_BODY_LIMIT: usize = 200;

pub struct HoneycombClient {
    http: Client,
    base_url: Url,
    update_interval: Duration,
    last_update: Mutex<Instant>,
}

impl HoneycombClient {
    /// Create a client for the public Honeycomb API
    pub fn new(api_key: &str) -> Result<Self, SyncError> {
        Self::with_base_url(api_key, HONEYCOMB_API_BASE)
    }

    /// Create a client against another API host (EU region, proxies, tests)
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, SyncError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(SyncError::BaseUrl(base_url.to_string()));
        }

        let mut key = HeaderValue::from_str(api_key).map_err(|_| SyncError::InvalidApiKey)?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|source| SyncError::Http {
                context: "creating HTTP client".to_string(),
                source,
            })?;

        Ok(Self {
            http,
            base_url,
            update_interval: Duration::from_millis(DEFAULT_UPDATE_INTERVAL_MS),
            last_update: Mutex::new(Instant::now()),
        })
    }

    /// Minimum spacing between column updates
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/seg/seg/...`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Enforce the update interval between PUT requests
    async fn pace_update(&self) {
        let mut last = self.last_update.lock().await;
        let elapsed = last.elapsed();
        if elapsed < self.update_interval {
            sleep(self.update_interval - elapsed).await;
        }
        *last = Instant::now();
    }

    async fn get_json<T>(&self, url: Url, context: &str) -> Result<T, SyncError>
    where
        T: DeserializeOwned,
    {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| http_error(context, source))?;

        let body = read_success_body(response, context).await?;

        serde_json::from_str(&body).map_err(|source| SyncError::Decode {
            context: context.to_string(),
            source,
        })
    }
}

#[async_trait]
impl SchemaClient for HoneycombClient {
    async fn list_datasets(&self) -> Result<Vec<Dataset>, SyncError> {
        self.get_json(self.endpoint(&["1", "datasets"]), "listing datasets")
            .await
    }

    async fn list_columns(&self, dataset: &Dataset) -> Result<Vec<Column>, SyncError> {
        let context = format!("listing columns for dataset {}", dataset.name);
        self.get_json(self.endpoint(&["1", "columns", dataset.url_key()]), &context)
            .await
    }

    async fn update_column(
        &self,
        dataset: &Dataset,
        column: &Column,
        update: &ColumnUpdate,
    ) -> Result<(), SyncError> {
        let context = format!("updating column {}", column.key_name);
        let url = self.endpoint(&["1", "columns", dataset.url_key(), &column.id]);

        self.pace_update().await;

        debug!("PUT {}", url);
        let response = self
            .http
            .put(url)
            .json(update)
            .send()
            .await
            .map_err(|source| http_error(&context, source))?;

        read_success_body(response, &context).await?;
        Ok(())
    }
}

fn http_error(context: &str, source: reqwest::Error) -> SyncError {
    SyncError::Http {
        context: context.to_string(),
        source,
    }
}

/// Read the response body, turning any non-2xx status into `SyncError::Status`
async fn read_success_body(
    response: reqwest::Response,
    context: &str,
) -> Result<String, SyncError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| http_error(context, source))?;

    if !status.is_success() {
        return Err(SyncError::Status {
            status,
            context: context.to_string(),
            body: body.chars().take(ERROR_BODY_LIMIT).collect(),
        });
    }

    Ok(body)
}
