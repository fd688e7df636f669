//! semconv-sync
//!
//! Loads OpenTelemetry semantic-convention definitions into a flat
//! name → description map and copies those descriptions onto Honeycomb
//! dataset columns.

#[cfg(feature = "cli")]
pub mod config;
pub mod error;
pub mod honeycomb;
pub mod model;
pub mod sync;

pub use error::{ConfigError, ModelError, SyncError};
pub use model::{load_semantic_models, SemanticAttributes};
pub use sync::{sync_descriptions, truncate_description, SyncOptions, SyncReport};
