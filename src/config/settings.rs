//! User settings and preferences for filepick
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON persistence.

use crate::picker::DialogMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Available color themes for the host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
    /// Follow the operating system preference
    System,
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Size Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Window dimensions and position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
    /// Window X position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Window Y position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Whether the window was maximized
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            x: None,
            y: None,
            maximized: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Picker Dialog Layout
// ─────────────────────────────────────────────────────────────────────────────

/// Layout and formatting of the picker dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogSettings {
    /// Dialog window width
    pub width: f32,
    /// Dialog window height
    pub height: f32,
    /// Width of the folder panel; the file panel takes the rest
    pub folder_panel_width: f32,
    /// Height of both panels
    pub panel_height: f32,
    /// chrono format string for the Date column
    pub date_format: String,
}

impl Default for DialogSettings {
    fn default() -> Self {
        Self {
            width: 740.0,
            height: 410.0,
            folder_panel_width: 200.0,
            panel_height: 300.0,
            date_format: String::from(DialogSettings::DEFAULT_DATE_FORMAT),
        }
    }
}

impl DialogSettings {
    /// `yyyy-MM-dd HH:mm`
    pub const DEFAULT_DATE_FORMAT: &'static str = "%Y-%m-%d %H:%M";
    /// Minimum dialog dimension.
    pub const MIN_SIZE: f32 = 300.0;
    /// Maximum dialog dimension.
    pub const MAX_SIZE: f32 = 4000.0;
    /// Minimum folder panel width.
    pub const MIN_FOLDER_PANEL_WIDTH: f32 = 80.0;
    /// Minimum panel height.
    pub const MIN_PANEL_HEIGHT: f32 = 100.0;

    /// Width left for the file panel.
    pub fn file_panel_width(&self) -> f32 {
        (self.width - self.folder_panel_width - 24.0).max(100.0)
    }

    /// Clamp dimensions to usable ranges.
    pub fn sanitize(&mut self) {
        self.width = self.width.clamp(Self::MIN_SIZE, Self::MAX_SIZE);
        self.height = self.height.clamp(Self::MIN_SIZE, Self::MAX_SIZE);

        // The folder panel may not eat the whole dialog
        self.folder_panel_width = self
            .folder_panel_width
            .clamp(Self::MIN_FOLDER_PANEL_WIDTH, self.width / 2.0);
        self.panel_height = self
            .panel_height
            .clamp(Self::MIN_PANEL_HEIGHT, self.height);

        if self.date_format.trim().is_empty() {
            self.date_format = String::from(Self::DEFAULT_DATE_FORMAT);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences and application settings.
///
/// This struct is serialized to JSON and persisted to the user's config directory.
/// All fields have sensible defaults via the `Default` trait and `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Color theme (light, dark, or system)
    pub theme: Theme,

    /// Host window size and position
    pub window_size: WindowSize,

    /// Picker dialog layout
    pub dialog: DialogSettings,

    /// Mode the host opens the picker in
    pub dialog_mode: DialogMode,

    /// Last path chosen in the picker; seeds the next session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_selected_path: Option<PathBuf>,
}

impl Settings {
    /// Minimum window dimension.
    pub const MIN_WINDOW_SIZE: f32 = 200.0;
    /// Maximum window dimension.
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values.
    pub fn sanitize(&mut self) {
        // Clamp window size
        self.window_size.width = self
            .window_size
            .width
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        self.window_size.height = self
            .window_size
            .height
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);

        self.dialog.sanitize();

        // An empty path carries no seed
        if self
            .last_selected_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            self.last_selected_path = None;
        }
    }

    /// Load settings and sanitize them to ensure validity.
    ///
    /// This is a convenience method that deserializes and then sanitizes.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
