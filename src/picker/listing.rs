//! Per-frame snapshot of a directory's immediate children.

use crate::error::{Error, Result};
use crate::picker::fs::{FileSystem, FsEntry};
use chrono::{DateTime, Local};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A row in the file panel.
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    pub name: String,
    /// Length in bytes
    pub size: u64,
    /// Extension including the leading dot, or empty
    pub extension: String,
    pub modified: Option<SystemTime>,
}

impl FileEntry {
    pub fn new(name: String, size: u64, modified: Option<SystemTime>) -> Self {
        let extension = Path::new(&name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        Self {
            name,
            size,
            extension,
            modified,
        }
    }

    /// Modified time rendered with a chrono format string, in local time.
    /// Empty when the platform did not report one or `format` is malformed.
    pub fn modified_display(&self, format: &str) -> String {
        let Some(time) = self.modified else {
            return String::new();
        };
        let mut out = String::new();
        if write!(out, "{}", DateTime::<Local>::from(time).format(format)).is_err() {
            out.clear();
        }
        out
    }
}

/// A row in the folder panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    pub name: String,
    pub path: PathBuf,
}

/// Files and subdirectories of one directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryListing {
    /// Files in enumeration order
    pub files: Vec<FileEntry>,
    /// Subdirectories, case-insensitively by name
    pub folders: Vec<FolderEntry>,
}

impl DirectoryListing {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }
}

/// List `dir` and split its children into files and folders.
pub fn list_directory(fs: &dyn FileSystem, dir: &Path) -> Result<DirectoryListing> {
    let entries = fs.read_dir(dir).map_err(|source| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut listing = DirectoryListing::default();
    for FsEntry {
        name,
        path,
        is_dir,
        size,
        modified,
    } in entries
    {
        if is_dir {
            listing.folders.push(FolderEntry { name, path });
        } else {
            listing.files.push(FileEntry::new(name, size, modified));
        }
    }

    listing
        .folders
        .sort_by_cached_key(|folder| folder.name.to_lowercase());

    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::fs::StdFileSystem;
    use tempfile::TempDir;

    #[test]
    fn test_extension_includes_dot() {
        assert_eq!(FileEntry::new("a.txt".into(), 0, None).extension, ".txt");
        assert_eq!(
            FileEntry::new("archive.tar.gz".into(), 0, None).extension,
            ".gz"
        );
        assert_eq!(FileEntry::new("Makefile".into(), 0, None).extension, "");
    }

    #[test]
    fn test_modified_display() {
        let entry = FileEntry::new("a".into(), 0, None);
        assert_eq!(entry.modified_display("%Y-%m-%d %H:%M"), "");

        let now = SystemTime::now();
        let entry = FileEntry::new("a".into(), 0, Some(now));
        let expected = DateTime::<Local>::from(now)
            .format("%Y-%m-%d %H:%M")
            .to_string();
        assert_eq!(entry.modified_display("%Y-%m-%d %H:%M"), expected);
        assert_eq!(expected.len(), "yyyy-MM-dd HH:mm".len());
    }

    #[test]
    fn test_modified_display_malformed_format_is_empty() {
        let entry = FileEntry::new("a".into(), 0, Some(SystemTime::now()));
        assert_eq!(entry.modified_display("%Q"), "");
    }

    #[test]
    fn test_list_directory_separates_files_and_folders() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("zeta")).unwrap();
        std::fs::create_dir(temp.path().join("Alpha")).unwrap();
        std::fs::create_dir(temp.path().join("beta")).unwrap();
        std::fs::write(temp.path().join("readme.md"), b"# hi").unwrap();

        let listing = list_directory(&StdFileSystem, temp.path()).unwrap();

        let folders: Vec<_> = listing.folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(folders, vec!["Alpha", "beta", "zeta"]);
        assert_eq!(listing.folders[0].path, temp.path().join("Alpha"));

        assert_eq!(listing.files.len(), 1);
        assert_eq!(listing.files[0].name, "readme.md");
        assert_eq!(listing.files[0].size, 4);
        assert_eq!(listing.files[0].extension, ".md");
    }

    #[test]
    fn test_list_empty_directory() {
        let temp = TempDir::new().unwrap();
        let listing = list_directory(&StdFileSystem, temp.path()).unwrap();
        assert!(listing.is_empty());
    }

    #[test]
    fn test_list_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("vanished");
        let err = list_directory(&StdFileSystem, &missing).unwrap_err();
        assert!(matches!(err, Error::ReadDir { path, .. } if path == missing));
    }
}
