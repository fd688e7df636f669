//! OpenTelemetry semantic-convention models
//!
//! This module provides:
//! - Definition document types decoded from the `model/*.yaml` files
//! - The flattened name → description map
//! - Recursive directory loading of definition files

pub mod attributes;
pub mod definition;
pub mod walker;

pub use attributes::SemanticAttributes;
pub use definition::{parse_definition, Attribute, DefinitionDocument, Group};
pub use walker::{load_semantic_models, walk_model_root};
