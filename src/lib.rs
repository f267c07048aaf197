//! Sabai: water-refill station locator with proximity search.

pub mod config;
pub mod error;
pub mod ingest;
pub mod metrics;
pub mod proximity;
pub mod route;
pub mod server;
pub mod source;
pub mod storage;
pub mod submission;
pub mod types;
