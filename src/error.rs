//! Error types for avatar generation

use thiserror::Error;

use crate::source::{SourceError, SourcePath};

/// Errors that abort a generation
///
/// Empty layers are not represented here: they are skipped inside the
/// compositor and never reach the caller.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The asset root, a layer directory or a fragment could not be read
    #[error("cannot access assets at {path}: {source}")]
    SourceAccess {
        path: SourcePath,
        #[source]
        source: std::io::Error,
    },

    /// No layer directory matched the selection at any specificity
    #[error("no layers found for the given criteria ({selection})")]
    NoLayers { selection: String },

    /// A chosen fragment has no locatable `<svg>` wrapper
    #[error("malformed fragment {path} in layer '{layer}': {reason}")]
    MalformedFragment {
        layer: String,
        path: SourcePath,
        reason: String,
    },
}

impl GenerateError {
    /// Create a no-layers error for a selection
    pub fn no_layers(selection: impl ToString) -> Self {
        Self::NoLayers {
            selection: selection.to_string(),
        }
    }

    /// Create a malformed fragment error
    pub fn malformed(layer: impl Into<String>, path: SourcePath, reason: impl Into<String>) -> Self {
        Self::MalformedFragment {
            layer: layer.into(),
            path,
            reason: reason.into(),
        }
    }

    /// Get the asset path involved, if any
    pub fn path(&self) -> Option<&SourcePath> {
        match self {
            Self::SourceAccess { path, .. } => Some(path),
            Self::MalformedFragment { path, .. } => Some(path),
            Self::NoLayers { .. } => None,
        }
    }
}

impl From<SourceError> for GenerateError {
    /// Every source failure that escapes the compositor is fatal. A missing
    /// entry at that point means the tree changed under us, which is reported
    /// as an access failure like any other.
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Io { path, source } => Self::SourceAccess { path, source },
            SourceError::NotFound { path } => Self::SourceAccess {
                path,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "entry not found"),
            },
        }
    }
}
