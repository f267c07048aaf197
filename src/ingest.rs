//! Client for the remote station ingestion endpoint.
//!
//! The endpoint takes one JSON submission, runs its own photo QC, and
//! answers with either `{"analysis": {"summary": ...}}` or `{"error": ...}`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::IngestConfig;
use crate::error::{Result, SabaiError};

/// Body POSTed to the ingestion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestPayload {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub price: f64,
    pub note: Option<String>,
    pub photo_base64: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct IngestResponse {
    #[serde(default)]
    analysis: Option<Analysis>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Analysis {
    #[serde(default)]
    summary: Option<String>,
}

/// Result of a successful ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOutcome {
    pub summary: String,
}

pub struct IngestClient {
    http: reqwest::Client,
    url: url::Url,
}

impl IngestClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let url = url::Url::parse(url)
            .map_err(|e| SabaiError::Config(format!("invalid ingest url {url}: {e}")))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, url })
    }

    /// Build a client when an endpoint is configured; `None` means local fallback.
    pub fn from_config(config: &IngestConfig) -> Result<Option<Self>> {
        match config.url {
            Some(ref u) => Ok(Some(Self::new(
                u,
                Duration::from_secs(config.timeout_secs),
            )?)),
            None => Ok(None),
        }
    }

    pub fn url(&self) -> &url::Url {
        &self.url
    }

    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn submit(&self, payload: &IngestPayload) -> Result<IngestOutcome> {
        let resp = self.http.post(self.url.clone()).json(payload).send().await?;
        let status = resp.status();

        if status.is_success() {
            let body: IngestResponse = resp.json().await?;
            let summary = body
                .analysis
                .and_then(|a| a.summary)
                .unwrap_or_else(|| "OK".to_string());
            debug!(status = status.as_u16(), "ingest accepted");
            Ok(IngestOutcome { summary })
        } else {
            // Error bodies are not always JSON; fall back to the status text.
            let body: IngestResponse = resp.json().await.unwrap_or_default();
            let message = body.error.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });
            warn!(status = status.as_u16(), message = %message, "ingest rejected");
            Err(SabaiError::Ingest {
                status: status.as_u16(),
                message,
            })
        }
    }
}
