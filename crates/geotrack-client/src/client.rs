//! Remote data client for the tracking server.

use std::time::{Duration, Instant};

use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info, warn};

use geotrack_core::defaults;
use geotrack_core::{DeviceIndex, DeviceRef, Error, ImageRecord, NewImageReport, Result};

use crate::query::ImageQuery;

/// Async client for the record-oriented REST API.
///
/// Every call is a single attempt: transport failures surface as
/// [`Error::Network`], non-2xx responses surface the body text as
/// [`Error::Server`], and the caller decides whether to re-trigger.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, defaults::REQUEST_TIMEOUT_SECS)
    }

    /// Create a client with an explicit request timeout in seconds.
    pub fn with_timeout(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let base_url = base_url.into();
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        info!(base_url = %base_url, timeout_secs, "initializing API client");
        Ok(Self { http, base_url })
    }

    /// Create from environment variables (`GEOTRACK_BASE_URL`,
    /// `GEOTRACK_TIMEOUT_SECS`), falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(defaults::ENV_BASE_URL)
            .unwrap_or_else(|_| defaults::BASE_URL.to_string());
        let timeout = std::env::var(defaults::ENV_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::REQUEST_TIMEOUT_SECS);
        Self::with_timeout(base_url, timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List image reports matching `query`.
    pub async fn list_images(&self, query: &ImageQuery) -> Result<Vec<ImageRecord>> {
        let start = Instant::now();
        let response = self
            .http
            .get(format!("{}/api/images", self.base_url))
            .query(&query.to_pairs())
            .send()
            .await?;
        let records: Vec<ImageRecord> = Self::parse_json(response).await?;

        debug!(
            result_count = records.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "image list fetched"
        );
        Ok(records)
    }

    /// List devices; `all` requests every device instead of only the
    /// session's visible ones.
    pub async fn list_devices(&self, all: bool) -> Result<Vec<DeviceRef>> {
        let response = self
            .http
            .get(format!("{}/api/devices", self.base_url))
            .query(&[("all", all)])
            .send()
            .await?;
        let devices: Vec<DeviceRef> = Self::parse_json(response).await?;

        debug!(result_count = devices.len(), all, "device list fetched");
        Ok(devices)
    }

    /// Fetch devices and index them by id for display-time joins.
    pub async fn device_index(&self, all: bool) -> Result<DeviceIndex> {
        Ok(DeviceIndex::new(self.list_devices(all).await?))
    }

    /// Phase one of the two-phase upload: submit metadata and return the
    /// created record with its server-assigned id.
    pub async fn create_image(&self, metadata: &NewImageReport) -> Result<ImageRecord> {
        let response = self
            .http
            .post(format!("{}/api/images", self.base_url))
            .json(metadata)
            .send()
            .await?;
        let record: ImageRecord = Self::parse_json(response).await?;

        info!(
            record_id = record.id,
            device_id = record.device_id,
            "image metadata created"
        );
        Ok(record)
    }

    /// Phase two of the two-phase upload: attach the binary to a created
    /// record. Must only be called with an id returned by
    /// [`create_image`](Self::create_image).
    pub async fn attach_image(&self, id: i64, bytes: Vec<u8>) -> Result<()> {
        let size = bytes.len();
        let response = self
            .http
            .post(format!("{}/api/images/{}/upload", self.base_url, id))
            .body(bytes)
            .send()
            .await?;
        Self::check_status(response).await?;

        info!(record_id = id, size, "image binary attached");
        Ok(())
    }

    /// Delete an image report, including a created-but-never-attached
    /// orphan abandoned by the upload form.
    pub async fn remove_image(&self, id: i64) -> Result<()> {
        let response = self
            .http
            .delete(format!("{}/api/images/{}", self.base_url, id))
            .send()
            .await?;
        Self::check_status(response).await?;

        info!(record_id = id, "image removed");
        Ok(())
    }

    /// Fetch the attached binary by the record's addressing convention.
    pub async fn fetch_upload(&self, record: &ImageRecord) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, record.upload_path()))
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// Surface a non-success status as a server error carrying the
    /// response body text as its detail.
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), body = %message, "server rejected request");
        Err(Error::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        let status: StatusCode = response.status();
        response.json::<T>().await.map_err(|e| {
            Error::Serialization(format!("failed to parse {status} response: {e}"))
        })
    }
}
