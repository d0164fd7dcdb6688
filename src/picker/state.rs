//! Browser state for the file picker.
//!
//! `BrowserState` owns everything the dialog remembers between frames: the
//! directory being browsed, the highlighted entry, the active sort, popup
//! text buffers and error messages. Every user interaction maps to one
//! method here, so the rules can be exercised without a GUI.

use crate::error::Error;
use crate::picker::fs::{FileSystem, PathKind, StdFileSystem};
use crate::picker::listing::{list_directory, DirectoryListing};
use crate::picker::sort::{SortKey, SortOrder};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Dialog Mode
// ─────────────────────────────────────────────────────────────────────────────

/// What the picker must terminate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogMode {
    /// "Choose" requires a highlighted file
    #[default]
    OpenFile,
    /// "Choose" requires a highlighted folder
    SelectFolder,
}

impl DialogMode {
    /// Title of the dialog window.
    pub fn title(&self) -> &'static str {
        match self {
            DialogMode::OpenFile => "Select a file",
            DialogMode::SelectFolder => "Select a folder",
        }
    }

    /// Short label for mode selectors.
    pub fn label(&self) -> &'static str {
        match self {
            DialogMode::OpenFile => "Open file",
            DialogMode::SelectFolder => "Select folder",
        }
    }

    /// Error shown when "Choose" is pressed without the required selection.
    pub fn missing_selection_message(&self) -> &'static str {
        match self {
            DialogMode::OpenFile => "You must select a file!",
            DialogMode::SelectFolder => "You must select a folder!",
        }
    }

    pub fn all() -> &'static [DialogMode] {
        &[DialogMode::OpenFile, DialogMode::SelectFolder]
    }
}

/// Which modal popup is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Popup {
    #[default]
    None,
    CreateFolder,
    DeleteFolder,
}

// ─────────────────────────────────────────────────────────────────────────────
// Browser State
// ─────────────────────────────────────────────────────────────────────────────

/// State of one picker instance.
#[derive(Debug, Clone)]
pub struct BrowserState {
    current_path: PathBuf,
    /// Highlighted folder name; never set together with `highlighted_file`
    highlighted_folder: Option<String>,
    highlighted_file: Option<String>,
    folder_index: usize,
    file_index: usize,
    sort: SortOrder,
    new_folder_name: String,
    new_folder_error: Option<String>,
    dialog_error: Option<String>,
    /// Last listing failure for `current_path`
    listing_error: Option<String>,
    popup: Popup,
    initial_path_applied: bool,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserState {
    /// Start browsing in the process working directory.
    pub fn new() -> Self {
        Self::with_path(working_dir())
    }

    /// Start browsing in `path`. A relative path is resolved against the
    /// working directory.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            current_path: absolutize(&StdFileSystem, &path.into()),
            highlighted_folder: None,
            highlighted_file: None,
            folder_index: 0,
            file_index: 0,
            sort: SortOrder::none(),
            new_folder_name: String::new(),
            new_folder_error: None,
            dialog_error: None,
            listing_error: None,
            popup: Popup::None,
            initial_path_applied: false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    pub fn highlighted_folder(&self) -> Option<&str> {
        self.highlighted_folder.as_deref()
    }

    pub fn highlighted_file(&self) -> Option<&str> {
        self.highlighted_file.as_deref()
    }

    pub fn folder_index(&self) -> usize {
        self.folder_index
    }

    pub fn file_index(&self) -> usize {
        self.file_index
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn popup(&self) -> Popup {
        self.popup
    }

    pub fn new_folder_name(&self) -> &str {
        &self.new_folder_name
    }

    /// Text buffer bound to the Create Folder name field.
    pub fn new_folder_name_mut(&mut self) -> &mut String {
        &mut self.new_folder_name
    }

    pub fn new_folder_error(&self) -> Option<&str> {
        self.new_folder_error.as_deref()
    }

    pub fn dialog_error(&self) -> Option<&str> {
        self.dialog_error.as_deref()
    }

    pub fn listing_error(&self) -> Option<&str> {
        self.listing_error.as_deref()
    }

    pub fn is_initial_path_applied(&self) -> bool {
        self.initial_path_applied
    }

    /// Whether the folder row at `index` is drawn highlighted.
    pub fn is_folder_row_highlighted(&self, index: usize) -> bool {
        self.highlighted_folder.is_some() && self.folder_index == index
    }

    /// Whether the file row at `index` is drawn highlighted.
    pub fn is_file_row_highlighted(&self, index: usize) -> bool {
        self.highlighted_file.is_some() && self.file_index == index
    }

    pub fn can_delete_folder(&self) -> bool {
        self.highlighted_folder.is_some()
    }

    /// Current directory joined with the highlighted folder or file.
    pub fn selected_path(&self) -> PathBuf {
        match self.highlighted_name() {
            Some(name) => self.current_path.join(name),
            None => self.current_path.clone(),
        }
    }

    fn highlighted_name(&self) -> Option<&str> {
        self.highlighted_folder
            .as_deref()
            .or(self.highlighted_file.as_deref())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Seeding and Listing
    // ─────────────────────────────────────────────────────────────────────────

    /// Seed the current directory from the caller's previous result.
    ///
    /// Runs at most once per open/close cycle. An empty seed leaves the
    /// current directory alone and does not consume the one-shot flag.
    pub fn apply_initial_path(&mut self, fs: &dyn FileSystem, seed: &Path) {
        if self.initial_path_applied || seed.as_os_str().is_empty() {
            return;
        }

        self.current_path = match fs.path_kind(seed) {
            PathKind::Directory => absolutize(fs, seed),
            PathKind::File => seed
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(|parent| absolutize(fs, parent))
                .unwrap_or_else(working_dir),
            PathKind::Missing => working_dir(),
        };
        self.initial_path_applied = true;
        debug!(
            "Picker seeded from '{}' -> '{}'",
            seed.display(),
            self.current_path.display()
        );
    }

    /// List the current directory and order its files by the active sort.
    ///
    /// A failed listing yields an empty listing and records the reason in
    /// `listing_error`; the warning is logged once per distinct failure
    /// rather than every frame.
    pub fn refresh_listing(&mut self, fs: &dyn FileSystem) -> DirectoryListing {
        match list_directory(fs, &self.current_path) {
            Ok(mut listing) => {
                self.listing_error = None;
                self.sort.sort_files(&mut listing.files);
                self.sync_indices(&listing);
                listing
            }
            Err(err) => {
                let message = err.to_string();
                if self.listing_error.as_deref() != Some(message.as_str()) {
                    warn!("{}", message);
                }
                self.listing_error = Some(message);
                DirectoryListing::default()
            }
        }
    }

    /// Point the highlight indices at wherever the highlighted names landed
    /// after sorting or an external change to the directory.
    pub fn sync_indices(&mut self, listing: &DirectoryListing) {
        if let Some(name) = &self.highlighted_file {
            if let Some(index) = listing.files.iter().position(|f| &f.name == name) {
                self.file_index = index;
            }
        }
        if let Some(name) = &self.highlighted_folder {
            if let Some(index) = listing.folders.iter().position(|f| &f.name == name) {
                self.folder_index = index;
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection and Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// Single click on a folder row: highlight without navigating.
    pub fn click_folder(&mut self, index: usize, name: &str) {
        self.folder_index = index;
        self.highlighted_folder = Some(name.to_owned());
        self.highlighted_file = None;
    }

    /// Double click on a folder row: browse into it.
    pub fn open_folder(&mut self, path: impl Into<PathBuf>) {
        self.current_path = path.into();
        self.clear_selection();
        debug!("Picker navigated to '{}'", self.current_path.display());
    }

    /// Single click on a file row.
    pub fn click_file(&mut self, index: usize, name: &str) {
        self.file_index = index;
        self.highlighted_file = Some(name.to_owned());
        self.highlighted_folder = None;
    }

    /// Double click on "..". Returns `false` at a filesystem root.
    pub fn go_to_parent(&mut self) -> bool {
        let Some(parent) = self
            .current_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
        else {
            return false;
        };
        self.open_folder(parent);
        true
    }

    /// Click on a file panel column header.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort.toggle(key);
        debug!("Picker sort changed to {:?}", self.sort);
    }

    fn clear_selection(&mut self) {
        self.folder_index = 0;
        self.file_index = 0;
        self.highlighted_folder = None;
        self.highlighted_file = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Create Folder Popup
    // ─────────────────────────────────────────────────────────────────────────

    pub fn open_create_folder_popup(&mut self) {
        self.popup = Popup::CreateFolder;
    }

    /// "Create" in the Create Folder popup.
    ///
    /// Returns the new directory on success. On failure the popup stays open
    /// with `new_folder_error` set.
    pub fn confirm_create_folder(&mut self, fs: &dyn FileSystem) -> Option<PathBuf> {
        let result = self
            .validate_new_folder(fs)
            .and_then(|path| match fs.create_dir(&path) {
                Ok(()) => Ok(path),
                Err(source) => Err(Error::CreateDir { path, source }),
            });

        match result {
            Ok(path) => {
                info!("Created folder: {}", path.display());
                self.new_folder_name.clear();
                self.new_folder_error = None;
                self.popup = Popup::None;
                Some(path)
            }
            Err(err) => {
                if matches!(err, Error::CreateDir { .. }) {
                    warn!("{}", err);
                }
                self.new_folder_error = Some(err.to_string());
                None
            }
        }
    }

    /// "Cancel" in the Create Folder popup.
    pub fn cancel_create_folder(&mut self) {
        self.new_folder_name.clear();
        self.new_folder_error = None;
        self.popup = Popup::None;
    }

    fn validate_new_folder(&self, fs: &dyn FileSystem) -> crate::error::Result<PathBuf> {
        let name = self.new_folder_name.trim();
        if name.is_empty() {
            return Err(Error::InvalidFolderName("Name cannot be empty".to_string()));
        }
        if name.contains(['/', '\\']) {
            return Err(Error::InvalidFolderName(
                "Name cannot contain path separators".to_string(),
            ));
        }
        if name == "." || name == ".." {
            return Err(Error::InvalidFolderName("Invalid folder name".to_string()));
        }

        let path = self.current_path.join(name);
        if fs.path_kind(&path) != PathKind::Missing {
            return Err(Error::InvalidFolderName(
                "A file or folder with this name already exists".to_string(),
            ));
        }
        Ok(path)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Delete Folder Popup
    // ─────────────────────────────────────────────────────────────────────────

    /// Ignored unless a folder is highlighted.
    pub fn open_delete_folder_popup(&mut self) {
        if self.can_delete_folder() {
            self.popup = Popup::DeleteFolder;
        }
    }

    /// "Yes" in the Delete Folder popup: remove the highlighted folder tree.
    ///
    /// The popup closes either way; a failure lands in `dialog_error` and
    /// keeps the folder highlighted.
    pub fn confirm_delete_folder(&mut self, fs: &dyn FileSystem) -> Option<PathBuf> {
        self.popup = Popup::None;
        let path = self.current_path.join(self.highlighted_folder.as_deref()?);

        match fs.remove_dir_all(&path) {
            Ok(()) => {
                info!("Deleted folder: {}", path.display());
                self.highlighted_folder = None;
                Some(path)
            }
            Err(source) => {
                let err = Error::RemoveDir { path, source };
                warn!("{}", err);
                self.dialog_error = Some(err.to_string());
                None
            }
        }
    }

    /// "No" in the Delete Folder popup.
    pub fn cancel_delete_folder(&mut self) {
        self.popup = Popup::None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Terminal Actions
    // ─────────────────────────────────────────────────────────────────────────

    /// Dialog-level "Cancel". `result` is not touched by the caller's API.
    pub fn cancel(&mut self, open: &mut bool) {
        debug!("Picker cancelled");
        self.reset();
        *open = false;
    }

    /// Dialog-level "Choose".
    ///
    /// Returns `true` when `result` was written and the dialog closed.
    pub fn choose(&mut self, mode: DialogMode, open: &mut bool, result: &mut PathBuf) -> bool {
        let name = match mode {
            DialogMode::SelectFolder => self.highlighted_folder.as_deref(),
            DialogMode::OpenFile => self.highlighted_file.as_deref(),
        };

        let Some(name) = name else {
            self.dialog_error = Some(mode.missing_selection_message().to_string());
            return false;
        };

        *result = self.current_path.join(name);
        info!("Picker chose: {}", result.display());
        self.reset();
        *open = false;
        true
    }

    /// Return to defaults after the dialog closes.
    ///
    /// The current directory and the active sort survive, so reopening the
    /// dialog without a seed resumes where the user left off.
    pub fn reset(&mut self) {
        self.clear_selection();
        self.new_folder_name.clear();
        self.new_folder_error = None;
        self.dialog_error = None;
        self.listing_error = None;
        self.popup = Popup::None;
        self.initial_path_applied = false;
    }
}

fn working_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Absolute form of `path`, so ".." always has somewhere to go.
fn absolutize(fs: &dyn FileSystem, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    fs.canonicalize(path)
        .unwrap_or_else(|_| working_dir().join(path))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
