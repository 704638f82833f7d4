//! In-memory asset source for tests and embedded asset sets

use std::collections::{BTreeMap, BTreeSet};
use std::io;

use super::{AssetSource, SourceError, SourcePath};

/// An asset tree held entirely in memory
///
/// Directories are implied by the files placed under them; empty
/// directories can be added explicitly with [`MemoryAssetSource::with_dir`].
///
/// # Example
///
/// ```rust
/// use avatar_compositor::source::{AssetSource, MemoryAssetSource, SourcePath};
///
/// let source = MemoryAssetSource::new()
///     .with_file("common/01_face/a.svg", "<svg><circle/></svg>");
///
/// let layers = source.list_subdirectories(&SourcePath::parse("common")).unwrap();
/// assert_eq!(layers, vec!["01_face"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetSource {
    files: BTreeMap<SourcePath, Vec<u8>>,
    dirs: BTreeSet<SourcePath>,
    unreadable: BTreeSet<SourcePath>,
}

impl MemoryAssetSource {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file at a `/`-separated path, creating parent directories
    pub fn with_file(mut self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.insert_file(path, contents);
        self
    }

    /// Add a (possibly empty) directory at a `/`-separated path
    pub fn with_dir(mut self, path: &str) -> Self {
        self.insert_dir(path);
        self
    }

    /// Make every access to `path` fail with a permission error
    pub fn with_unreadable(mut self, path: &str) -> Self {
        self.unreadable.insert(SourcePath::parse(path));
        self
    }

    pub fn insert_file(&mut self, path: &str, contents: impl Into<Vec<u8>>) {
        let path = SourcePath::parse(path);
        self.add_ancestors(&path);
        self.files.insert(path, contents.into());
    }

    pub fn insert_dir(&mut self, path: &str) {
        let path = SourcePath::parse(path);
        self.add_ancestors(&path);
        self.dirs.insert(path);
    }

    fn add_ancestors(&mut self, path: &SourcePath) {
        let segments = path.segments();
        for end in 1..segments.len() {
            self.dirs
                .insert(SourcePath::from_segments(segments[..end].iter().cloned()));
        }
    }

    fn is_dir(&self, path: &SourcePath) -> bool {
        path.is_root() || self.dirs.contains(path)
    }

    fn check_access(&self, path: &SourcePath) -> Result<(), SourceError> {
        if self.unreadable.contains(path) {
            return Err(SourceError::io(
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            ));
        }
        Ok(())
    }

    /// Names of the direct children of `parent` among `paths`
    fn children<'a>(
        parent: &SourcePath,
        paths: impl Iterator<Item = &'a SourcePath>,
    ) -> Vec<String> {
        let depth = parent.len();
        paths
            .filter(|p| p.len() == depth + 1 && parent.is_ancestor_of(p))
            .map(|p| p.segments()[depth].clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl AssetSource for MemoryAssetSource {
    fn list_subdirectories(&self, path: &SourcePath) -> Result<Vec<String>, SourceError> {
        self.check_access(path)?;
        if !self.is_dir(path) {
            return Err(SourceError::not_found(path));
        }
        Ok(Self::children(path, self.dirs.iter()))
    }

    fn list_files(&self, path: &SourcePath) -> Result<Vec<String>, SourceError> {
        self.check_access(path)?;
        if !self.is_dir(path) {
            return Err(SourceError::not_found(path));
        }
        Ok(Self::children(path, self.files.keys()))
    }

    fn read_file(&self, path: &SourcePath) -> Result<Vec<u8>, SourceError> {
        self.check_access(path)?;
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::not_found(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryAssetSource {
        MemoryAssetSource::new()
            .with_file("cn/male/01_hair/a.svg", "<svg>a</svg>")
            .with_file("cn/male/01_hair/b.svg", "<svg>b</svg>")
            .with_file("cn/male/00_bg/bg.svg", "<svg>bg</svg>")
            .with_dir("cn/male/02_empty")
    }

    #[test]
    fn test_implied_directories() {
        let source = sample();
        assert_eq!(
            source.list_subdirectories(&SourcePath::root()).unwrap(),
            vec!["cn"]
        );
        assert_eq!(
            source
                .list_subdirectories(&SourcePath::parse("cn/male"))
                .unwrap(),
            vec!["00_bg", "01_hair", "02_empty"]
        );
    }

    #[test]
    fn test_list_files_only_direct_children() {
        let source = sample();
        assert_eq!(
            source
                .list_files(&SourcePath::parse("cn/male/01_hair"))
                .unwrap(),
            vec!["a.svg", "b.svg"]
        );
        assert!(source
            .list_files(&SourcePath::parse("cn/male"))
            .unwrap()
            .is_empty());
        assert!(source
            .list_files(&SourcePath::parse("cn/male/02_empty"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_missing_paths_are_not_found() {
        let source = sample();
        assert!(source
            .list_subdirectories(&SourcePath::parse("us"))
            .unwrap_err()
            .is_not_found());
        assert!(source
            .list_files(&SourcePath::parse("cn/male/01_hair/a.svg"))
            .unwrap_err()
            .is_not_found());
        assert!(source
            .read_file(&SourcePath::parse("cn/male/01_hair/c.svg"))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_unreadable_path() {
        let source = sample().with_unreadable("cn/male/01_hair");
        let err = source
            .list_files(&SourcePath::parse("cn/male/01_hair"))
            .unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn test_read_file_contents() {
        let source = sample();
        assert_eq!(
            source
                .read_file(&SourcePath::parse("cn/male/00_bg/bg.svg"))
                .unwrap(),
            b"<svg>bg</svg>"
        );
    }
}
