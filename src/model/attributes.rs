//! Flattening definition documents into a name → description map

use std::collections::{BTreeMap, HashMap};

use super::definition::DefinitionDocument;

/// Separator placed between a group prefix and an attribute id
pub const NAME_SEPARATOR: char = '.';

/// Fully-qualified attribute / metric names mapped to their trimmed briefs.
///
/// Later inserts for the same name overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SemanticAttributes {
    entries: HashMap<String, String>,
}

impl SemanticAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `name`. Empty names and blank descriptions are ignored.
    ///
    /// Returns true when an entry was written.
    pub fn upsert(&mut self, name: &str, description: &str) -> bool {
        let description = description.trim();
        if name.is_empty() || description.is_empty() {
            return false;
        }
        self.entries.insert(name.to_string(), description.to_string());
        true
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Name-ordered view, used for listings
    pub fn sorted(&self) -> BTreeMap<&str, &str> {
        self.iter().collect()
    }

    /// Apply every group of `doc` to the map, in document order.
    ///
    /// Metric groups contribute their `metric_name`; every group, metric or
    /// not, contributes `prefix.id` for each of its attributes.
    pub fn flatten(&mut self, doc: &DefinitionDocument) {
        for group in &doc.groups {
            if group.is_metric() && !group.metric_name().is_empty() {
                self.upsert(group.metric_name(), group.brief());
            }

            let mut prefix = group.prefix().to_string();
            if !prefix.is_empty() {
                prefix.push(NAME_SEPARATOR);
            }

            for attribute in &group.attributes {
                if attribute.id().is_empty() {
                    continue;
                }
                self.upsert(&format!("{}{}", prefix, attribute.id()), attribute.brief());
            }
        }
    }
}
