//! Station sources.
//!
//! The proximity index never reaches into storage itself; whatever owns the
//! stations hands it a read-only snapshot per call through this trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::StationRecord;

/// Anything that can produce the current set of stations on demand.
#[async_trait]
pub trait StationSource: Send + Sync {
    /// Return the current stations, in their stored order.
    async fn snapshot(&self) -> Result<Vec<StationRecord>>;
}

/// A fixed set of stations, mostly useful in tests and benchmarks.
#[derive(Debug, Clone, Default)]
pub struct StaticSource(pub Vec<StationRecord>);

#[async_trait]
impl StationSource for StaticSource {
    async fn snapshot(&self) -> Result<Vec<StationRecord>> {
        Ok(self.0.clone())
    }
}
