//! File system access used by the picker.
//!
//! The dialog only needs four operations, so they sit behind a small trait.
//! [`StdFileSystem`] is the real implementation; tests swap in fakes to
//! exercise failure paths that are awkward to reproduce on disk.

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A single child of a listed directory.
#[derive(Debug, Clone)]
pub struct FsEntry {
    /// Base name (no parent path)
    pub name: String,
    /// Full path
    pub path: PathBuf,
    /// Whether this entry is a directory (symlinks are followed)
    pub is_dir: bool,
    /// Length in bytes; zero for directories or when metadata is unavailable
    pub size: u64,
    /// Last modified timestamp, when the platform reports one
    pub modified: Option<SystemTime>,
}

/// What a path currently refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Directory,
    File,
    Missing,
}

/// File system operations the picker performs.
pub trait FileSystem {
    /// List the immediate children of `dir`.
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<FsEntry>>;

    /// Absolute form of `path` with `.`/`..` and symlinks resolved.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Create a single directory. The parent must exist.
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Remove a directory and everything below it.
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Probe what `path` refers to.
    fn path_kind(&self, path: &Path) -> PathKind;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<FsEntry>> {
        let mut entries = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            // A child that vanished mid-listing is skipped, not fatal
            let Ok(entry) = entry else {
                continue;
            };

            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follow symlinks so a link to a folder lands in the folder panel
            let metadata = std::fs::metadata(&path).ok();
            let is_dir = metadata.as_ref().map(|m| m.is_dir()).unwrap_or(false);
            let size = metadata
                .as_ref()
                .filter(|m| m.is_file())
                .map(|m| m.len())
                .unwrap_or(0);
            let modified = metadata.as_ref().and_then(|m| m.modified().ok());

            entries.push(FsEntry {
                name,
                path,
                is_dir,
                size,
                modified,
            });
        }

        Ok(entries)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir_all(path)
    }

    fn path_kind(&self, path: &Path) -> PathKind {
        match std::fs::metadata(path) {
            Ok(m) if m.is_dir() => PathKind::Directory,
            Ok(_) => PathKind::File,
            Err(_) => PathKind::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_dir_reports_files_and_folders() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("notes.txt"), b"hello").unwrap();
        std::fs::create_dir(temp.path().join("docs")).unwrap();

        let mut entries = StdFileSystem.read_dir(temp.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "docs");
        assert!(entries[0].is_dir);
        assert_eq!(entries[0].size, 0);
        assert_eq!(entries[1].name, "notes.txt");
        assert!(!entries[1].is_dir);
        assert_eq!(entries[1].size, 5);
        assert!(entries[1].modified.is_some());
        assert_eq!(entries[1].path, temp.path().join("notes.txt"));
    }

    #[test]
    fn test_read_dir_missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = StdFileSystem.read_dir(&temp.path().join("gone"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_path_kind() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.bin");
        std::fs::write(&file, b"x").unwrap();

        assert_eq!(StdFileSystem.path_kind(temp.path()), PathKind::Directory);
        assert_eq!(StdFileSystem.path_kind(&file), PathKind::File);
        assert_eq!(
            StdFileSystem.path_kind(&temp.path().join("nope")),
            PathKind::Missing
        );
    }

    #[test]
    fn test_canonicalize_makes_relative_paths_absolute() {
        let cwd = std::env::current_dir().unwrap();
        let resolved = StdFileSystem.canonicalize(Path::new(".")).unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(resolved, std::fs::canonicalize(cwd).unwrap());

        let temp = TempDir::new().unwrap();
        assert!(StdFileSystem.canonicalize(&temp.path().join("gone")).is_err());
    }

    #[test]
    fn test_create_and_remove_dir_all() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("tree");
        StdFileSystem.create_dir(&dir).unwrap();
        std::fs::create_dir(dir.join("nested")).unwrap();
        std::fs::write(dir.join("nested").join("leaf.txt"), b"leaf").unwrap();

        StdFileSystem.remove_dir_all(&dir).unwrap();
        assert!(!dir.exists());
    }
}
