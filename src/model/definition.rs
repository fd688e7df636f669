//! Semantic-convention definition documents
//!
//! Mirrors the layout of the OpenTelemetry `model/*.yaml` files closely enough
//! to pull out names and briefs. Fields whose shape differs between files
//! (`type`, `examples`, `requirement_level`) are kept as raw YAML values.

use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value as YamlValue;

use crate::error::ModelError;

/// Group `type` tag that marks a metric definition
pub const METRIC_GROUP_TYPE: &str = "metric";

/// Root of a definition file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefinitionDocument {
    #[serde(default)]
    pub groups: Vec<Group>,
}

/// One entry of the `groups:` list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub id: Option<String>,

    /// Namespace applied to every attribute id in the group
    #[serde(default)]
    pub prefix: Option<String>,

    #[serde(default, rename = "type")]
    pub group_type: Option<YamlValue>,

    #[serde(default)]
    pub brief: Option<String>,

    #[serde(default)]
    pub metric_name: Option<String>,

    #[serde(default)]
    pub span_kind: Option<String>,

    #[serde(default)]
    pub extends: Option<String>,

    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Group {
    /// True when the group's `type` is the plain string `metric`
    pub fn is_metric(&self) -> bool {
        self.group_type
            .as_ref()
            .and_then(YamlValue::as_str)
            .map(|t| t == METRIC_GROUP_TYPE)
            .unwrap_or(false)
    }

    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or("")
    }

    pub fn brief(&self) -> &str {
        self.brief.as_deref().unwrap_or("")
    }

    pub fn metric_name(&self) -> &str {
        self.metric_name.as_deref().unwrap_or("")
    }
}

/// An attribute inside a group
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attribute {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub brief: Option<String>,

    #[serde(default, rename = "type")]
    pub attr_type: Option<YamlValue>,

    #[serde(default)]
    pub examples: Option<YamlValue>,

    #[serde(default)]
    pub requirement_level: Option<YamlValue>,

    #[serde(default)]
    pub tag: Option<String>,

    #[serde(default)]
    pub note: Option<String>,

    /// Reference to an attribute defined elsewhere
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
}

impl Attribute {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn brief(&self) -> &str {
        self.brief.as_deref().unwrap_or("")
    }
}

impl DefinitionDocument {
    /// Decode a document from YAML text. Empty input gives an empty document.
    ///
    /// Only the first document of a multi-document stream is read.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let Some(first) = serde_yaml::Deserializer::from_str(content).next() else {
            return Ok(Self::default());
        };
        // A file holding only comments or `~` decodes to null
        let doc = Option::<Self>::deserialize(first)?;
        Ok(doc.unwrap_or_default())
    }
}

/// Read and decode one definition file
pub fn parse_definition(path: &Path) -> Result<DefinitionDocument, ModelError> {
    let content = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    DefinitionDocument::from_yaml(&content).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attribute_group() {
        let doc = DefinitionDocument::from_yaml(
            r#"
groups:
  - id: db
    prefix: db
    type: attribute_group
    brief: "Database attributes"
    attributes:
      - id: name
        type: string
        brief: "  Database name  "
        examples: ['customers', 'main']
        requirement_level:
          conditionally_required: If applicable.
      - ref: net.peer.name
"#,
        )
        .unwrap();

        assert_eq!(doc.groups.len(), 1);
        let group = &doc.groups[0];
        assert_eq!(group.prefix(), "db");
        assert!(!group.is_metric());
        assert_eq!(group.attributes.len(), 2);
        assert_eq!(group.attributes[0].id(), "name");
        assert_eq!(group.attributes[0].brief(), "  Database name  ");
        assert_eq!(group.attributes[1].id(), "");
        assert_eq!(
            group.attributes[1].reference.as_deref(),
            Some("net.peer.name")
        );
    }

    #[test]
    fn test_loosely_typed_fields() {
        let doc = DefinitionDocument::from_yaml(
            r#"
groups:
  - id: http.method
    prefix: http
    type:
      allow_custom_values: true
      members:
        - id: get
          value: GET
    attributes:
      - id: flavor
        type:
          members: [{id: http_1_0, value: '1.0'}]
        examples: 42
        requirement_level: recommended
"#,
        )
        .unwrap();

        let group = &doc.groups[0];
        assert!(!group.is_metric());
        assert!(group.attributes[0].attr_type.as_ref().unwrap().is_mapping());
        assert!(group.attributes[0].examples.as_ref().unwrap().is_number());
    }

    #[test]
    fn test_metric_group() {
        let doc = DefinitionDocument::from_yaml(
            r#"
groups:
  - id: metric.http.server.duration
    type: metric
    metric_name: http.server.duration
    brief: " Duration of HTTP requests "
    instrument: histogram
    unit: "s"
"#,
        )
        .unwrap();

        let group = &doc.groups[0];
        assert!(group.is_metric());
        assert_eq!(group.metric_name(), "http.server.duration");
        assert_eq!(group.prefix(), "");
        assert!(group.attributes.is_empty());
    }

    #[test]
    fn test_empty_and_comment_only_documents() {
        assert!(DefinitionDocument::from_yaml("").unwrap().groups.is_empty());
        assert!(DefinitionDocument::from_yaml("# nothing here\n")
            .unwrap()
            .groups
            .is_empty());
        assert!(DefinitionDocument::from_yaml("groups: []")
            .unwrap()
            .groups
            .is_empty());
    }

    #[test]
    fn test_multi_document_reads_first() {
        let doc = DefinitionDocument::from_yaml(
            r#"
groups:
  - id: first
    prefix: first
---
groups:
  - id: second
    prefix: second
  - id: third
"#,
        )
        .unwrap();

        assert_eq!(doc.groups.len(), 1);
        assert_eq!(doc.groups[0].prefix(), "first");
        assert!(DefinitionDocument::from_yaml("groups: []\n---\ngroups: []\n")
            .unwrap()
            .groups
            .is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        assert!(DefinitionDocument::from_yaml("groups: [\n  - id: x\n").is_err());
        assert!(DefinitionDocument::from_yaml("groups: not-a-list").is_err());
    }

    #[test]
    fn test_parse_definition_reports_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("broken.yaml");
        std::fs::write(&path, "groups:\n  - id: [unterminated\n").unwrap();

        let err = parse_definition(&path).unwrap_err();
        assert!(matches!(err, ModelError::Parse { .. }));
        assert_eq!(err.path(), path.as_path());
    }
}
