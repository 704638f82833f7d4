//! Asset sources for layer directories and fragment files
//!
//! The compositor never touches the filesystem directly. Everything it needs
//! goes through [`AssetSource`], which is backed by a real directory tree in
//! production ([`FsAssetSource`]) and by an in-memory tree in tests
//! ([`MemoryAssetSource`]).

pub mod fs;
pub mod memory;

use std::fmt;

use thiserror::Error;

pub use fs::FsAssetSource;
pub use memory::MemoryAssetSource;

/// Errors returned by an asset source
#[derive(Debug, Error)]
pub enum SourceError {
    /// The directory or file does not exist
    #[error("not found: {path}")]
    NotFound { path: SourcePath },

    /// The entry exists but could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        path: SourcePath,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    pub fn not_found(path: &SourcePath) -> Self {
        Self::NotFound { path: path.clone() }
    }

    pub fn io(path: &SourcePath, source: std::io::Error) -> Self {
        Self::Io {
            path: path.clone(),
            source,
        }
    }

    /// Check whether this error only signals absence
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// A path relative to the asset root, as an ordered list of segments
///
/// The empty path is the asset root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourcePath(Vec<String>);

impl SourcePath {
    /// The asset root
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Parse a `/`-separated path, ignoring empty segments
    pub fn parse(path: &str) -> Self {
        Self::from_segments(path.split('/').filter(|s| !s.is_empty()))
    }

    /// Return a new path with `segment` appended
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check whether `self` is a strict ancestor of `other`
    pub fn is_ancestor_of(&self, other: &SourcePath) -> bool {
        other.0.len() > self.0.len() && other.0.starts_with(&self.0)
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str(".")
        } else {
            f.write_str(&self.0.join("/"))
        }
    }
}

/// Read-only access to a tree of layer directories and fragment files
///
/// Listings must be returned in a stable order so that seeded generation is
/// reproducible; both bundled implementations sort by name.
pub trait AssetSource {
    /// List the names of the immediate subdirectories of `path`
    fn list_subdirectories(&self, path: &SourcePath) -> Result<Vec<String>, SourceError>;

    /// List the names of the non-directory entries of `path`
    fn list_files(&self, path: &SourcePath) -> Result<Vec<String>, SourceError>;

    /// Read the full contents of the file at `path`
    fn read_file(&self, path: &SourcePath) -> Result<Vec<u8>, SourceError>;
}

impl<S: AssetSource + ?Sized> AssetSource for &S {
    fn list_subdirectories(&self, path: &SourcePath) -> Result<Vec<String>, SourceError> {
        (**self).list_subdirectories(path)
    }

    fn list_files(&self, path: &SourcePath) -> Result<Vec<String>, SourceError> {
        (**self).list_files(path)
    }

    fn read_file(&self, path: &SourcePath) -> Result<Vec<u8>, SourceError> {
        (**self).read_file(path)
    }
}
