//! Recursive discovery of definition files under the model roots

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::attributes::SemanticAttributes;
use super::definition::parse_definition;
use crate::error::ModelError;

/// File name suffix of semantic-convention definition files
pub const DEFINITION_EXTENSION: &str = ".yaml";

/// Walk every root and build the attribute map.
///
/// Stops at the first unreadable path or malformed file.
pub fn load_semantic_models<P: AsRef<Path>>(roots: &[P]) -> Result<SemanticAttributes, ModelError> {
    let mut attributes = SemanticAttributes::new();

    for root in roots {
        let root = root.as_ref();
        let files = walk_model_root(root, &mut attributes)?;
        info!(
            "Parsed {} definition files from {:?} ({} semantic attributes so far)",
            files,
            root,
            attributes.len()
        );
    }

    Ok(attributes)
}

/// Walk one root into `attributes`, returning the number of files parsed.
///
/// A root that is itself a file is handled like a directory entry.
pub fn walk_model_root(
    root: &Path,
    attributes: &mut SemanticAttributes,
) -> Result<usize, ModelError> {
    let metadata = std::fs::metadata(root).map_err(|source| traversal(root, source))?;

    if metadata.is_dir() {
        walk_dir_recursive(root, attributes)
    } else {
        visit_file(root, attributes)
    }
}

fn walk_dir_recursive(
    dir: &Path,
    attributes: &mut SemanticAttributes,
) -> Result<usize, ModelError> {
    let entries = std::fs::read_dir(dir).map_err(|source| traversal(dir, source))?;
    let mut parsed = 0;

    for entry in entries {
        let entry = entry.map_err(|source| traversal(dir, source))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|source| traversal(&path, source))?;

        if file_type.is_dir() {
            parsed += walk_dir_recursive(&path, attributes)?;
        } else {
            parsed += visit_file(&path, attributes)?;
        }
    }

    Ok(parsed)
}

fn visit_file(path: &Path, attributes: &mut SemanticAttributes) -> Result<usize, ModelError> {
    if !is_definition_file(path) {
        return Ok(0);
    }

    debug!("Parsing {:?}", path);
    let doc = parse_definition(path)?;
    attributes.flatten(&doc);
    Ok(1)
}

fn is_definition_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.ends_with(DEFINITION_EXTENSION))
        .unwrap_or(false)
}

fn traversal(path: &Path, source: std::io::Error) -> ModelError {
    ModelError::Traversal {
        path: PathBuf::from(path),
        source,
    }
}
