//! filepick - an in-application file and folder picker for egui.
//!
//! ```ignore
//! // Held across frames by the host
//! let mut dialog = FileDialog::new();
//! let mut open = false;
//! let mut path = PathBuf::new();
//!
//! // Every frame
//! dialog.show(ctx, &mut open, &mut path, DialogMode::OpenFile);
//! ```

pub mod config;
pub mod error;
pub mod picker;

pub use error::{Error, Result};
pub use picker::{BrowserState, DialogMode, FileDialog};
