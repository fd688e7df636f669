//! Honeycomb API types for datasets and columns
//!
//! Reference: https://docs.honeycomb.io/api/

use serde::{Deserialize, Deserializer, Serialize};

/// Decode JSON `null` as the field's default value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A dataset as returned by `GET /1/datasets`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Dataset {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expand_json_depth: i64,
    #[serde(default)]
    pub regular_columns_count: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_written_at: Option<String>,
}

impl Dataset {
    /// Identifier used in column URLs: the slug, or the name when no slug is set
    pub fn url_key(&self) -> &str {
        if self.slug.is_empty() {
            &self.name
        } else {
            &self.slug
        }
    }
}

/// A column as returned by `GET /1/columns/{dataset}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Column {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub key_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hidden: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub column_type: String,
    #[serde(default)]
    pub last_written: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of `PUT /1/columns/{dataset}/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColumnUpdate {
    pub key_name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    pub description: String,
    pub hidden: bool,
}

impl ColumnUpdate {
    /// Update that keeps everything about `column` except its description
    pub fn describe(column: &Column, description: impl Into<String>) -> Self {
        Self {
            key_name: column.key_name.clone(),
            column_type: column.column_type.clone(),
            description: description.into(),
            hidden: column.hidden,
        }
    }
}
