//! Layer resolution across candidate directories

use std::collections::BTreeMap;

use crate::error::GenerateError;
use crate::selection::Selection;
use crate::source::{AssetSource, SourceError, SourcePath};

/// A layer together with the most specific directory that provides it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLayer {
    /// Layer directory name, also its stacking key
    pub name: String,
    /// Candidate directory the layer was found in
    pub source: SourcePath,
}

impl ResolvedLayer {
    /// Path of the layer directory itself
    pub fn dir(&self) -> SourcePath {
        self.source.child(&self.name)
    }
}

/// Resolve the layers to draw for a selection
///
/// Candidates are probed from most to least specific and each layer keeps
/// the first candidate it was seen in. The result is sorted by layer name,
/// which is the drawing order.
///
/// A missing candidate directory contributes nothing. A candidate that exists
/// but cannot be read is logged and skipped, except for the asset root which
/// must be readable.
pub fn resolve_layers<S: AssetSource + ?Sized>(
    source: &S,
    selection: &Selection,
    common: &str,
) -> Result<Vec<ResolvedLayer>, GenerateError> {
    let root = SourcePath::root();
    match source.list_subdirectories(&root) {
        Ok(_) => {}
        Err(SourceError::NotFound { .. }) => {
            tracing::debug!("asset root does not exist");
            return Ok(Vec::new());
        }
        Err(err) => return Err(err.into()),
    }

    let mut layers: BTreeMap<String, SourcePath> = BTreeMap::new();

    for candidate in selection.candidate_paths(common) {
        let names = match source.list_subdirectories(&candidate) {
            Ok(names) => names,
            Err(SourceError::NotFound { .. }) => {
                tracing::debug!(candidate = %candidate, "candidate directory not found");
                continue;
            }
            Err(err) if candidate.is_root() => return Err(err.into()),
            Err(err) => {
                tracing::warn!(candidate = %candidate, error = %err, "skipping unreadable candidate directory");
                continue;
            }
        };

        for name in names {
            if !layers.contains_key(&name) {
                tracing::debug!(layer = %name, candidate = %candidate, "layer resolved");
                layers.insert(name, candidate.clone());
            }
        }
    }

    Ok(layers
        .into_iter()
        .map(|(name, source)| ResolvedLayer { name, source })
        .collect())
}
