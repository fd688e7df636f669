//! Copies semantic-convention descriptions onto remote columns

use tracing::info;

use crate::error::SyncError;
use crate::honeycomb::{Column, ColumnUpdate, Dataset, SchemaClient};
use crate::model::SemanticAttributes;

/// Longest description Honeycomb accepts, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 255;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Overwrite descriptions that are already set
    pub force: bool,
    /// Report what would change without sending updates
    pub dry_run: bool,
}

/// Counters for one sync run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub datasets: usize,
    pub columns_scanned: usize,
    /// Columns updated, or that would have been in dry-run mode
    pub columns_updated: usize,
}

/// Cut `description` to at most `max_chars` characters.
///
/// Counts chars, so multi-byte text is never split mid-character.
pub fn truncate_description(description: &str, max_chars: usize) -> &str {
    match description.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &description[..byte_idx],
        None => description,
    }
}

/// Description to write for `column`, or None when it should be left alone
fn planned_description<'a>(
    column: &Column,
    attributes: &'a SemanticAttributes,
    force: bool,
) -> Option<&'a str> {
    if !column.description.is_empty() && !force {
        return None;
    }
    let full = attributes.get(&column.key_name)?;
    Some(truncate_description(full, MAX_DESCRIPTION_CHARS))
}

/// Walk every dataset and column, updating descriptions from `attributes`.
///
/// The first remote failure aborts the run.
pub async fn sync_descriptions(
    client: &dyn SchemaClient,
    attributes: &SemanticAttributes,
    options: SyncOptions,
) -> Result<SyncReport, SyncError> {
    info!("Updating Honeycomb datasets...");

    let datasets = client.list_datasets().await?;
    info!("Found {} datasets", datasets.len());

    let mut report = SyncReport {
        datasets: datasets.len(),
        ..Default::default()
    };

    for dataset in &datasets {
        sync_dataset(client, dataset, attributes, options, &mut report).await?;
    }

    if options.dry_run {
        info!(
            "Dry run mode enabled. Would have updated {} dataset columns",
            report.columns_updated
        );
    } else {
        info!("Updated {} dataset columns", report.columns_updated);
    }

    Ok(report)
}

async fn sync_dataset(
    client: &dyn SchemaClient,
    dataset: &Dataset,
    attributes: &SemanticAttributes,
    options: SyncOptions,
    report: &mut SyncReport,
) -> Result<(), SyncError> {
    let columns = client
        .list_columns(dataset)
        .await
        .map_err(|source| SyncError::Dataset {
            dataset: dataset.name.clone(),
            source: Box::new(source),
        })?;
    report.columns_scanned += columns.len();

    for column in &columns {
        let Some(description) = planned_description(column, attributes, options.force) else {
            continue;
        };

        info!(
            "Updating column: {} in dataset: {}",
            column.key_name, dataset.name
        );

        if !options.dry_run {
            let update = ColumnUpdate::describe(column, description);
            client
                .update_column(dataset, column, &update)
                .await
                .map_err(|source| SyncError::Column {
                    dataset: dataset.name.clone(),
                    column: column.key_name.clone(),
                    source: Box::new(source),
                })?;
        }
        report.columns_updated += 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory schema with a log of every update request
    #[derive(Default)]
    struct InMemorySchema {
        datasets: Vec<Dataset>,
        columns: HashMap<String, Vec<Column>>,
        fail_update_for: Option<String>,
        updates: Mutex<Vec<(String, String, ColumnUpdate)>>,
    }

    impl InMemorySchema {
        fn with_dataset(mut self, name: &str, columns: Vec<Column>) -> Self {
            self.datasets.push(Dataset {
                name: name.to_string(),
                slug: name.to_string(),
                ..Default::default()
            });
            self.columns.insert(name.to_string(), columns);
            self
        }

        fn updates(&self) -> Vec<(String, String, ColumnUpdate)> {
            self.updates.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SchemaClient for InMemorySchema {
        async fn list_datasets(&self) -> Result<Vec<Dataset>, SyncError> {
            Ok(self.datasets.clone())
        }

        async fn list_columns(&self, dataset: &Dataset) -> Result<Vec<Column>, SyncError> {
            Ok(self.columns.get(&dataset.name).cloned().unwrap_or_default())
        }

        async fn update_column(
            &self,
            dataset: &Dataset,
            column: &Column,
            update: &ColumnUpdate,
        ) -> Result<(), SyncError> {
            if self.fail_update_for.as_deref() == Some(column.key_name.as_str()) {
                return Err(SyncError::Status {
                    status: reqwest::StatusCode::FORBIDDEN,
                    context: format!("updating column {}", column.key_name),
                    body: "forbidden".into(),
                });
            }
            self.updates.lock().unwrap().push((
                dataset.name.clone(),
                column.id.clone(),
                update.clone(),
            ));
            Ok(())
        }
    }

    fn column(id: &str, key_name: &str, description: &str) -> Column {
        Column {
            id: id.into(),
            key_name: key_name.into(),
            description: description.into(),
            column_type: "string".into(),
            ..Default::default()
        }
    }

    fn attributes() -> SemanticAttributes {
        let mut attrs = SemanticAttributes::new();
        attrs.upsert("http.method", "HTTP request method.");
        attrs.upsert("db.system", "DBMS product identifier.");
        attrs
    }

    #[test]
    fn test_truncate_short_and_exact() {
        assert_eq!(truncate_description("short", 255), "short");
        let exact = "a".repeat(255);
        assert_eq!(truncate_description(&exact, 255), exact);
    }

    #[test]
    fn test_truncate_counts_characters() {
        let long = "é".repeat(300);
        let cut = truncate_description(&long, MAX_DESCRIPTION_CHARS);
        assert_eq!(cut.chars().count(), 255);
        assert_eq!(cut.len(), 510);

        let mixed = format!("{}日本語", "x".repeat(254));
        assert_eq!(truncate_description(&mixed, 255), format!("{}日", "x".repeat(254)));
    }

    #[tokio::test]
    async fn test_updates_only_empty_descriptions() {
        let schema = InMemorySchema::default().with_dataset(
            "frontend",
            vec![
                column("c1", "http.method", ""),
                column("c2", "db.system", "Already documented"),
                column("c3", "custom.field", ""),
            ],
        );

        let report = sync_descriptions(&schema, &attributes(), SyncOptions::default())
            .await
            .unwrap();

        assert_eq!(report.datasets, 1);
        assert_eq!(report.columns_scanned, 3);
        assert_eq!(report.columns_updated, 1);

        let updates = schema.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, "frontend");
        assert_eq!(updates[0].1, "c1");
        assert_eq!(updates[0].2.description, "HTTP request method.");
        assert_eq!(updates[0].2.key_name, "http.method");
    }

    #[tokio::test]
    async fn test_force_overwrites_existing() {
        let schema = InMemorySchema::default().with_dataset(
            "backend",
            vec![
                column("c1", "db.system", "Old text"),
                column("c2", "http.method", "HTTP request method."),
                column("c3", "custom.field", "Left alone"),
            ],
        );

        let options = SyncOptions {
            force: true,
            dry_run: false,
        };
        let report = sync_descriptions(&schema, &attributes(), options)
            .await
            .unwrap();

        // Forced updates are sent even when the text already matches
        assert_eq!(report.columns_updated, 2);
        let updates = schema.updates();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].1, "c1");
        assert_eq!(updates[0].2.description, "DBMS product identifier.");
        assert_eq!(updates[1].1, "c2");
        assert_eq!(updates[1].2.description, "HTTP request method.");
    }

    #[tokio::test]
    async fn test_dry_run_sends_nothing() {
        let schema = InMemorySchema::default()
            .with_dataset("a", vec![column("c1", "http.method", "")])
            .with_dataset("b", vec![column("c2", "db.system", "")]);

        let options = SyncOptions {
            force: false,
            dry_run: true,
        };
        let report = sync_descriptions(&schema, &attributes(), options)
            .await
            .unwrap();

        assert_eq!(report.datasets, 2);
        assert_eq!(report.columns_updated, 2);
        assert!(schema.updates().is_empty());
    }

    #[tokio::test]
    async fn test_long_description_is_truncated_before_update() {
        let mut attrs = SemanticAttributes::new();
        attrs.upsert("long.attr", &"ü".repeat(400));
        let schema =
            InMemorySchema::default().with_dataset("ds", vec![column("c1", "long.attr", "")]);

        sync_descriptions(&schema, &attrs, SyncOptions::default())
            .await
            .unwrap();

        let updates = schema.updates();
        assert_eq!(updates[0].2.description.chars().count(), MAX_DESCRIPTION_CHARS);
    }

    #[tokio::test]
    async fn test_update_failure_names_dataset_and_column() {
        let schema = InMemorySchema {
            fail_update_for: Some("db.system".into()),
            ..Default::default()
        }
        .with_dataset(
            "orders",
            vec![
                column("c1", "http.method", ""),
                column("c2", "db.system", ""),
                column("c3", "http.method", ""),
            ],
        );

        let err = sync_descriptions(&schema, &attributes(), SyncOptions::default())
            .await
            .unwrap_err();

        match err {
            SyncError::Column {
                dataset, column, ..
            } => {
                assert_eq!(dataset, "orders");
                assert_eq!(column, "db.system");
            }
            other => panic!("unexpected error: {other}"),
        }
        // Nothing after the failing column is attempted
        assert_eq!(schema.updates().len(), 1);
    }
}
