//! HTTP client for the enrichment backend.

use std::time::Duration;

use pillpal_core::ScanResult;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::enrichment::{DrugInfo, EnrichmentRequest};

/// Enrichment client errors.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No medications with both a name and a dosage to submit")]
    NothingToSubmit,
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Client for the backend enrichment service.
pub struct EnrichmentClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl EnrichmentClient {
    /// Create a client for the given backend.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, http })
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Submit a scan for enrichment.
    ///
    /// Only medications with both a name and a dosage are sent.
    pub async fn submit_scan(&self, scan: &ScanResult) -> ClientResult<serde_json::Value> {
        let request = EnrichmentRequest::from_scan(scan);
        if request.is_empty() {
            tracing::warn!(
                found = scan.medications.len(),
                "no medications with a dosage, skipping enrichment"
            );
            return Err(ClientError::NothingToSubmit);
        }

        let url = self.config.endpoint("/medications/scan");
        tracing::info!(url = %url, count = request.medications.len(), "sending medications to backend");

        let response = self.http.post(&url).json(&request).send().await?;
        let response = check_status(response).await?;
        let body = response.json::<serde_json::Value>().await?;

        tracing::info!("received enrichment response");
        Ok(body)
    }

    /// Look up a single drug.
    pub async fn drug_info(&self, name: &str, dosage: Option<&str>) -> ClientResult<DrugInfo> {
        let mut query = vec![("name", name)];
        if let Some(dosage) = dosage.filter(|d| !d.is_empty()) {
            query.push(("dosage", dosage));
        }

        let url = self.config.endpoint("/drug_info");
        tracing::info!(url = %url, name, "fetching drug info");

        let response = self.http.get(&url).query(&query).send().await?;
        let response = check_status(response).await?;
        let info = response.json::<DrugInfo>().await?;

        if let Some(error) = &info.error {
            tracing::warn!(name, error = %error, "drug info lookup failed");
        }
        Ok(info)
    }
}

/// Map a non-success response to [`ClientError::Status`], extracting the
/// backend's `detail` message when there is one.
async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let detail = error_detail(&text).unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    tracing::error!(status = status.as_u16(), detail = %detail, "backend request failed");
    Err(ClientError::Status {
        status: status.as_u16(),
        detail,
    })
}

fn error_detail(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    match json.get("detail") {
        Some(serde_json::Value::String(detail)) => Some(detail.clone()),
        Some(other) => Some(other.to_string()),
        None => Some(json.to_string()),
    }
}
