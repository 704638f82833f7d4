//! Filesystem-backed asset source

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{AssetSource, SourceError, SourcePath};

/// Asset source rooted at a directory on disk
#[derive(Debug, Clone)]
pub struct FsAssetSource {
    root: PathBuf,
}

impl FsAssetSource {
    /// Create a source rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the asset root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a source path to a location on disk
    pub fn resolve_path(&self, path: &SourcePath) -> PathBuf {
        path.segments()
            .iter()
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }

    fn list_entries(
        &self,
        path: &SourcePath,
        want_dirs: bool,
    ) -> Result<Vec<String>, SourceError> {
        let dir = self.resolve_path(path);
        let entries = fs::read_dir(&dir).map_err(|e| map_io_error(path, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SourceError::io(path, e))?;
            let file_type = entry.file_type().map_err(|e| SourceError::io(path, e))?;
            if file_type.is_dir() != want_dirs {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => {
                    tracing::debug!(dir = %dir.display(), name = ?raw, "skipping non UTF-8 entry");
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

fn map_io_error(path: &SourcePath, err: io::Error) -> SourceError {
    if err.kind() == io::ErrorKind::NotFound {
        SourceError::not_found(path)
    } else {
        SourceError::io(path, err)
    }
}

impl AssetSource for FsAssetSource {
    fn list_subdirectories(&self, path: &SourcePath) -> Result<Vec<String>, SourceError> {
        self.list_entries(path, true)
    }

    fn list_files(&self, path: &SourcePath) -> Result<Vec<String>, SourceError> {
        self.list_entries(path, false)
    }

    fn read_file(&self, path: &SourcePath) -> Result<Vec<u8>, SourceError> {
        fs::read(self.resolve_path(path)).map_err(|e| map_io_error(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let layer = dir.path().join("cn").join("male").join("01_hair");
        fs::create_dir_all(&layer).unwrap();
        fs::create_dir_all(dir.path().join("cn").join("male").join("00_bg")).unwrap();
        fs::write(layer.join("b.svg"), "<svg><g/></svg>").unwrap();
        fs::write(layer.join("a.svg"), "<svg><rect/></svg>").unwrap();
        fs::create_dir_all(layer.join("nested")).unwrap();
        dir
    }

    #[test]
    fn test_list_subdirectories_sorted() {
        let dir = make_tree();
        let source = FsAssetSource::new(dir.path());
        let names = source
            .list_subdirectories(&SourcePath::parse("cn/male"))
            .unwrap();
        assert_eq!(names, vec!["00_bg", "01_hair"]);
    }

    #[test]
    fn test_list_files_excludes_directories() {
        let dir = make_tree();
        let source = FsAssetSource::new(dir.path());
        let names = source
            .list_files(&SourcePath::parse("cn/male/01_hair"))
            .unwrap();
        assert_eq!(names, vec!["a.svg", "b.svg"]);
    }

    #[test]
    fn test_missing_directory_is_not_found() {
        let dir = make_tree();
        let source = FsAssetSource::new(dir.path());
        let err = source
            .list_subdirectories(&SourcePath::parse("us/female"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_read_file() {
        let dir = make_tree();
        let source = FsAssetSource::new(dir.path());
        let bytes = source
            .read_file(&SourcePath::parse("cn/male/01_hair/a.svg"))
            .unwrap();
        assert_eq!(bytes, b"<svg><rect/></svg>");

        let err = source
            .read_file(&SourcePath::parse("cn/male/01_hair/zzz.svg"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_resolve_path() {
        let source = FsAssetSource::new("assets");
        assert_eq!(source.root(), Path::new("assets"));
        assert_eq!(
            source.resolve_path(&SourcePath::parse("common/male")),
            Path::new("assets").join("common").join("male")
        );
        assert_eq!(source.resolve_path(&SourcePath::root()), Path::new("assets"));
    }
}
