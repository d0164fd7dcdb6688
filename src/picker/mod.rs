//! In-application file and folder picker.
//!
//! The widget is split into the browser state (all selection, navigation,
//! sorting and popup rules), the directory listing, and the egui renderer
//! that maps clicks onto state transitions once per frame.

mod dialog;
pub mod fs;
mod listing;
mod sort;
mod state;

pub use dialog::FileDialog;
pub use fs::{FileSystem, FsEntry, PathKind, StdFileSystem};
pub use listing::{list_directory, DirectoryListing, FileEntry, FolderEntry};
pub use sort::{SortDirection, SortKey, SortOrder};
pub use state::{BrowserState, DialogMode, Popup};
