//! swingstats-core: WSDC points registry client and dancer summaries.
//!
//! - `api`: HTTP client for the public lookup endpoint
//! - `models`: raw placement payloads and the flat `DancerSummary`
//! - `transform`: placement parsing, division progression, region inference
//! - `scan`: sequential id-range scans, offline replay, region survey
//! - `export`: CSV/JSON writers
//! - `snapshot`: raw payload capture for offline runs
//! - `config`: persisted defaults

pub mod api;
pub mod config;
pub mod export;
pub mod models;
pub mod scan;
pub mod snapshot;
pub mod transform;

pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use models::{DancerSummary, Division, LookupResponse, Region};
pub use scan::{RecordSource, ScanOptions, ScanReport};
pub use transform::{summarize, TransformError, DEFAULT_DANCE_STYLE};
