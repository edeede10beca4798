//! Ingestion stages for loading Cricsheet delivery CSV exports into an
//! embedded SQLite database.
//!
//! The pipeline has four sequential stages, each its own module:
//! schema initialization ([`schema`]), bulk CSV loading with per-column type
//! inference ([`loader`] over [`frame`]), secondary indexing ([`indexer`]),
//! and the read-only sanity checks ([`validator`]). [`config`] carries the
//! fixed table/file mapping so test fixtures can be substituted.

pub mod config;
pub mod error;
pub mod frame;
pub mod indexer;
pub mod loader;
pub mod progress;
pub mod schema;
pub mod validator;

pub use config::{PipelineConfig, TableSpec};
pub use error::{IngestError, IngestResult};
pub use loader::{load, LabelMismatch, LoadOutcome};
