use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SabaiError};

/// Top-level service configuration.
///
/// Resolution order: built-in defaults, then the TOML file (explicit path or
/// `SABAI_CONFIG`), then `SABAI_*` environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub ingest: IngestConfig,
    pub map: MapConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    /// Submissions carry base64 photos, so this is generous.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Local,
    Memory,
    S3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Root directory for the local backend.
    pub root: PathBuf,
    pub bucket: Option<String>,
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible stores (MinIO, R2).
    pub endpoint: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Local,
            root: PathBuf::from("./data"),
            bucket: None,
            region: None,
            endpoint: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Remote ingestion endpoint. When unset, submissions are saved locally.
    pub url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lng: f64,
    pub radius_m: f64,
    pub max_results: usize,
    pub directions_base_url: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        // Chiang Mai old city, 2 km.
        Self {
            center_lat: 18.7875,
            center_lng: 98.993333,
            radius_m: 2000.0,
            max_results: 200,
            directions_base_url: "https://www.google.com/maps/dir/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "json" or "pretty".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from an optional TOML file plus env overrides.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let path = path
            .map(str::to_string)
            .or_else(|| std::env::var("SABAI_CONFIG").ok());

        let mut config = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(&p)
                    .map_err(|e| SabaiError::Config(format!("failed to read {p}: {e}")))?;
                Self::from_toml(&raw)?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document. Missing sections and fields take defaults.
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| SabaiError::Config(e.to_string()))
    }

    /// Apply `SABAI_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SABAI_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("SABAI_PORT") {
            self.server.port = parse_env("SABAI_PORT", &v)?;
        }
        if let Some(v) = lookup("SABAI_STORAGE_BACKEND") {
            self.storage.backend = match v.as_str() {
                "local" => StorageBackend::Local,
                "memory" => StorageBackend::Memory,
                "s3" => StorageBackend::S3,
                other => {
                    return Err(SabaiError::Config(format!(
                        "unknown storage backend: {other}"
                    )))
                }
            };
        }
        if let Some(v) = lookup("SABAI_STORAGE_ROOT") {
            self.storage.root = PathBuf::from(v);
        }
        if let Some(v) = lookup("SABAI_S3_BUCKET") {
            self.storage.bucket = Some(v);
        }
        if let Some(v) = lookup("SABAI_S3_REGION") {
            self.storage.region = Some(v);
        }
        if let Some(v) = lookup("SABAI_S3_ENDPOINT") {
            self.storage.endpoint = Some(v);
        }
        if let Some(v) = lookup("SABAI_INGEST_URL") {
            self.ingest.url = if v.trim().is_empty() { None } else { Some(v) };
        }
        if let Some(v) = lookup("SABAI_RADIUS_M") {
            self.map.radius_m = parse_env("SABAI_RADIUS_M", &v)?;
        }
        if let Some(v) = lookup("SABAI_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = lookup("SABAI_LOG_FORMAT") {
            self.logging.format = v;
        }
        Ok(())
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.map.center_lat)
            || !(-180.0..=180.0).contains(&self.map.center_lng)
        {
            return Err(SabaiError::Config(format!(
                "map center out of range: {},{}",
                self.map.center_lat, self.map.center_lng
            )));
        }
        if self.map.radius_m.is_nan() || self.map.radius_m < 0.0 {
            return Err(SabaiError::Config(format!(
                "map radius must be non-negative, got {}",
                self.map.radius_m
            )));
        }
        if self.map.max_results == 0 {
            return Err(SabaiError::Config("map.max_results must be > 0".into()));
        }
        if self.storage.backend == StorageBackend::S3 && self.storage.bucket.is_none() {
            return Err(SabaiError::Config(
                "storage.bucket is required for the s3 backend".into(),
            ));
        }
        if let Some(ref u) = self.ingest.url {
            url::Url::parse(u)
                .map_err(|e| SabaiError::Config(format!("invalid ingest url {u}: {e}")))?;
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| SabaiError::Config(format!("invalid value for {key}: {value}")))
}
