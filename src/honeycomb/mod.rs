//! Honeycomb schema integration
//!
//! This module provides:
//! - API types for datasets, columns and column updates
//! - `SchemaClient`, the seam between the sync loop and the remote API
//! - `HoneycombClient`, the reqwest implementation of that seam

pub mod client;
pub mod types;

use async_trait::async_trait;

use crate::error::SyncError;

pub use client::HoneycombClient;
pub use types::{Column, ColumnUpdate, Dataset};

/// Remote schema operations needed by the description sync
#[async_trait]
pub trait SchemaClient: Send + Sync {
    async fn list_datasets(&self) -> Result<Vec<Dataset>, SyncError>;

    async fn list_columns(&self, dataset: &Dataset) -> Result<Vec<Column>, SyncError>;

    /// Replace a column's metadata with `update`
    async fn update_column(
        &self,
        dataset: &Dataset,
        column: &Column,
        update: &ColumnUpdate,
    ) -> Result<(), SyncError>;
}
