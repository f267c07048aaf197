//! User submissions of new stations.
//!
//! A submission goes to the remote ingestion endpoint when one is configured.
//! Otherwise it is stored locally under a timestamp id.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::{Result, SabaiError};
use crate::ingest::{IngestClient, IngestPayload};
use crate::storage::StationStore;
use crate::types::{LocatedPoint, StationRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub price: f64,
    #[serde(default)]
    pub note: Option<String>,
    /// Photo as a `data:` URL, as produced by the browser file reader.
    #[serde(default)]
    pub photo_base64: Option<String>,
}

impl Submission {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SabaiError::Validation("name is required".into()));
        }
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(SabaiError::Validation("lat and lng must be numbers".into()));
        }
        LocatedPoint::new(self.lat, self.lng)
            .map_err(|e| SabaiError::Validation(e.to_string()))?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(SabaiError::Validation(format!(
                "price must be a non-negative number, got {}",
                self.price
            )));
        }
        Ok(())
    }

    fn into_payload(self) -> IngestPayload {
        IngestPayload {
            name: self.name.trim().to_string(),
            lat: self.lat,
            lng: self.lng,
            price: self.price,
            note: self.note,
            photo_base64: self.photo_base64,
        }
    }

    fn into_station(self, id: String) -> StationRecord {
        StationRecord {
            id,
            name: self.name.trim().to_string(),
            location: LocatedPoint {
                lat: self.lat,
                lng: self.lng,
            },
            price: self.price,
            rating: None,
            note: self.note.filter(|n| !n.trim().is_empty()),
            photos: self.photo_base64.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// Accepted by the remote ingestion endpoint.
    #[serde(rename = "remote")]
    Ingested { summary: String },
    /// Stored in the local fallback store.
    #[serde(rename = "local")]
    SavedLocally { station: StationRecord },
}

impl SubmissionOutcome {
    pub fn mode(&self) -> &'static str {
        match self {
            SubmissionOutcome::Ingested { .. } => "remote",
            SubmissionOutcome::SavedLocally { .. } => "local",
        }
    }
}

/// Local ids are `s` followed by the current unix time in milliseconds.
pub fn local_station_id() -> String {
    format!("s{}", chrono::Utc::now().timestamp_millis())
}

#[instrument(skip_all, fields(name = %submission.name))]
pub async fn submit_station(
    submission: Submission,
    ingest: Option<&IngestClient>,
    store: &StationStore,
) -> Result<SubmissionOutcome> {
    submission.validate()?;

    let outcome = match ingest {
        Some(client) => {
            let result = client.submit(&submission.into_payload()).await?;
            SubmissionOutcome::Ingested {
                summary: result.summary,
            }
        }
        None => {
            let id = local_station_id();
            let station = store
                .insert_unique(submission.into_station(id.clone()), &id)
                .await?;
            SubmissionOutcome::SavedLocally { station }
        }
    };

    info!(mode = outcome.mode(), "station submitted");
    Ok(outcome)
}
