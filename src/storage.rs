//! Local fallback persistence for stations.
//!
//! The whole collection lives as one JSON array under [`STATIONS_KEY`] in an
//! object store (local directory, memory, or S3). Mutations are whole-record
//! replacements done as read-modify-write cycles under a single lock.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::config::{StorageBackend, StorageConfig};
use crate::error::{Result, SabaiError};
use crate::source::StationSource;
use crate::types::{LocatedPoint, StationRecord};

/// Fixed storage key of the persisted station array.
pub const STATIONS_KEY: &str = "sabai_stations_v1.json";

#[derive(Clone)]
pub struct StationStore {
    inner: Arc<dyn ObjectStore>,
    key: Path,
    write_lock: Arc<Mutex<()>>,
}

impl StationStore {
    pub fn new(inner: Arc<dyn ObjectStore>) -> Self {
        Self {
            inner,
            key: Path::from(STATIONS_KEY),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// An in-memory store, used by tests and the `memory` backend.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemory::new()))
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        let inner: Arc<dyn ObjectStore> = match config.backend {
            StorageBackend::Memory => Arc::new(InMemory::new()),
            StorageBackend::Local => {
                std::fs::create_dir_all(&config.root)?;
                Arc::new(LocalFileSystem::new_with_prefix(&config.root)?)
            }
            StorageBackend::S3 => {
                let bucket = config.bucket.as_deref().ok_or_else(|| {
                    SabaiError::Config("storage.bucket is required for the s3 backend".into())
                })?;
                let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);
                if let Some(ref region) = config.region {
                    builder = builder.with_region(region);
                }
                if let Some(ref endpoint) = config.endpoint {
                    builder = builder.with_endpoint(endpoint).with_allow_http(true);
                }
                Arc::new(builder.build()?)
            }
        };
        debug!(backend = ?config.backend, "initialized station store");
        Ok(Self::new(inner))
    }

    /// Read the full collection. A missing key reads as empty; so does a
    /// corrupt document, which is logged and left in place until the next save.
    /// Records that fail validation are logged and skipped.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Vec<StationRecord>> {
        let data = match self.inner.get(&self.key).await {
            Ok(result) => result.bytes().await?,
            Err(object_store::Error::NotFound { .. }) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Vec<StationRecord>>(&data) {
            Ok(mut stations) => {
                stations.retain(|s| match s.validate() {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(id = %s.id, error = %e, "skipping invalid stored station");
                        false
                    }
                });
                debug!(count = stations.len(), "loaded stations");
                Ok(stations)
            }
            Err(e) => {
                warn!(error = %e, key = STATIONS_KEY, "stored stations unreadable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Replace the full collection. Nothing is written if any record is invalid.
    pub async fn save(&self, stations: &[StationRecord]) -> Result<()> {
        validate_all(stations)?;
        let _guard = self.write_lock.lock().await;
        self.write(stations).await
    }

    async fn write(&self, stations: &[StationRecord]) -> Result<()> {
        let json = serde_json::to_vec_pretty(stations)?;
        self.inner
            .put(&self.key, PutPayload::from(Bytes::from(json)))
            .await?;
        crate::metrics::STORE_WRITES_TOTAL.inc();
        debug!(count = stations.len(), "saved stations");
        Ok(())
    }

    /// Insert a station, or replace the whole record with the same id.
    #[instrument(skip(self, station), fields(id = %station.id))]
    pub async fn upsert(&self, station: StationRecord) -> Result<()> {
        station.validate()?;
        let _guard = self.write_lock.lock().await;
        let mut stations = self.load().await?;
        match stations.iter_mut().find(|s| s.id == station.id) {
            Some(existing) => *existing = station,
            None => stations.push(station),
        }
        self.write(&stations).await
    }

    /// Insert a station under a fresh id derived from `base_id`. If the id is
    /// taken, `-1`, `-2`, ... are appended until it is free.
    pub async fn insert_unique(
        &self,
        mut station: StationRecord,
        base_id: &str,
    ) -> Result<StationRecord> {
        station.validate()?;
        let _guard = self.write_lock.lock().await;
        let mut stations = self.load().await?;

        let mut id = base_id.to_string();
        let mut n = 0;
        while stations.iter().any(|s| s.id == id) {
            n += 1;
            id = format!("{base_id}-{n}");
        }
        station.id = id;
        stations.push(station.clone());
        self.write(&stations).await?;
        Ok(station)
    }

    /// Remove a station by id. Returns whether anything was removed.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut stations = self.load().await?;
        let before = stations.len();
        stations.retain(|s| s.id != id);
        if stations.len() == before {
            return Ok(false);
        }
        self.write(&stations).await?;
        Ok(true)
    }

    pub async fn get(&self, id: &str) -> Result<StationRecord> {
        self.load()
            .await?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| SabaiError::NotFound { id: id.to_string() })
    }

    /// Write `samples` when the collection is empty. Returns how many were written.
    pub async fn seed_if_empty(&self, samples: &[StationRecord]) -> Result<usize> {
        validate_all(samples)?;
        let _guard = self.write_lock.lock().await;
        if !self.load().await?.is_empty() {
            return Ok(0);
        }
        self.write(samples).await?;
        Ok(samples.len())
    }
}

fn validate_all(stations: &[StationRecord]) -> Result<()> {
    stations.iter().try_for_each(StationRecord::validate)
}

#[async_trait]
impl StationSource for StationStore {
    async fn snapshot(&self) -> Result<Vec<StationRecord>> {
        self.load().await
    }
}

/// The two Chiang Mai sample stations shown on first start.
pub fn sample_stations() -> Vec<StationRecord> {
    vec![
        StationRecord {
            id: "s1".to_string(),
            name: "Sample RO — Moon Muang".to_string(),
            location: LocatedPoint {
                lat: 18.7882,
                lng: 98.9965,
            },
            price: 0.60,
            rating: Some(4.6),
            note: None,
            photos: Vec::new(),
        },
        StationRecord {
            id: "s2".to_string(),
            name: "Sample RO — Ratchadamnoen".to_string(),
            location: LocatedPoint {
                lat: 18.7879,
                lng: 98.9938,
            },
            price: 0.50,
            rating: Some(4.3),
            note: None,
            photos: Vec::new(),
        },
    ]
}
