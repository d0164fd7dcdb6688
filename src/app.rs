//! Demo host application for filepick
//!
//! This module implements the eframe App trait: a small window with a mode
//! selector, a button that opens the picker, and the last chosen path.

use eframe::egui;
use filepick::config::{save_config_silent, Settings, Theme, WindowSize};
use filepick::{DialogMode, FileDialog};
use log::{debug, info};
use std::path::PathBuf;

/// The host application struct that holds all state and implements eframe::App.
pub struct PickerApp {
    /// User settings (persisted on change)
    settings: Settings,
    /// Whether settings changed since the last save
    settings_dirty: bool,
    /// The picker widget, kept across frames
    dialog: FileDialog,
    /// Whether the picker is showing
    dialog_open: bool,
    /// Result slot handed to the picker; also seeds its start directory
    selected_path: PathBuf,
    /// Mode the next picker session runs in
    mode: DialogMode,
    /// Last known window size (for detecting changes)
    last_window_size: Option<egui::Vec2>,
    /// Last known window position (for detecting changes)
    last_window_pos: Option<egui::Pos2>,
    /// Last known maximized flag
    last_maximized: bool,
}

impl PickerApp {
    /// Create the app from loaded settings and apply the saved theme.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        info!("Initializing picker demo");
        apply_theme(&cc.egui_ctx, settings.theme);
        Self::from_settings(settings)
    }

    /// Build the app state without touching any egui context.
    fn from_settings(settings: Settings) -> Self {
        let dialog = FileDialog::new().with_settings(settings.dialog.clone());
        let selected_path = settings.last_selected_path.clone().unwrap_or_default();
        let mode = settings.dialog_mode;
        let window = settings.window_size;

        Self {
            settings,
            settings_dirty: false,
            dialog,
            dialog_open: false,
            selected_path,
            mode,
            last_window_size: Some(egui::vec2(window.width, window.height)),
            last_window_pos: window.x.zip(window.y).map(|(x, y)| egui::pos2(x, y)),
            last_maximized: window.maximized,
        }
    }

    /// Track window size, position and maximized state for persistence.
    ///
    /// Returns `true` if the window state was updated.
    fn update_window_state(&mut self, ctx: &egui::Context) -> bool {
        let (inner, outer, maximized) = ctx.input(|i| {
            let viewport = i.viewport();
            (
                viewport.inner_rect,
                viewport.outer_rect,
                viewport.maximized.unwrap_or(false),
            )
        });

        if maximized != self.last_maximized {
            self.last_maximized = maximized;
            self.settings.window_size.maximized = maximized;
            self.settings_dirty = true;
            debug!("Window maximized: {}", maximized);
            return true;
        }

        // A maximized window keeps the normal geometry for the next launch
        if maximized {
            return false;
        }

        let Some(inner) = inner else {
            return false;
        };
        let current_size = inner.size();
        let current_pos = outer.map(|rect| rect.min);

        let size_changed = self
            .last_window_size
            .map(|s| (s - current_size).length() > 1.0)
            .unwrap_or(true);
        let pos_changed = match (self.last_window_pos, current_pos) {
            (Some(last), Some(pos)) => (last - pos).length() > 1.0,
            (None, Some(_)) => true,
            (_, None) => false,
        };

        if !size_changed && !pos_changed {
            return false;
        }

        self.last_window_size = Some(current_size);
        if current_pos.is_some() {
            self.last_window_pos = current_pos;
        }

        self.settings.window_size = WindowSize {
            width: current_size.x,
            height: current_size.y,
            x: self.last_window_pos.map(|p| p.x),
            y: self.last_window_pos.map(|p| p.y),
            maximized,
        };
        self.settings_dirty = true;

        debug!(
            "Window state updated: {}x{} at {:?}",
            current_size.x, current_size.y, self.last_window_pos
        );
        true
    }

    /// Render the launcher window.
    fn render_launcher(&mut self, ctx: &egui::Context) {
        egui::Window::new("Window")
            .default_size([600.0, 300.0])
            .show(ctx, |ui| {
                ui.add_enabled_ui(!self.dialog_open, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Mode:");
                        for mode in DialogMode::all() {
                            ui.radio_value(&mut self.mode, *mode, mode.label());
                        }
                    });
                });

                if ui.button("Open file dialog").clicked() {
                    debug!("Opening picker in {:?} mode", self.mode);
                    self.dialog_open = true;
                }

                if !self.dialog_open && !self.selected_path.as_os_str().is_empty() {
                    ui.label(format!("Selected path: {}", self.selected_path.display()));
                } else {
                    ui.label("Selected path: ?");
                }
            });
    }

    /// Remember a freshly chosen path and mode for the next session.
    fn record_choice(&mut self) {
        self.settings.last_selected_path = Some(self.selected_path.clone());
        self.settings.dialog_mode = self.mode;
        self.save_settings();
    }

    fn save_settings(&mut self) {
        if save_config_silent(&self.settings) {
            self.settings_dirty = false;
        }
    }
}

impl eframe::App for PickerApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_window_state(ctx);

        egui::CentralPanel::default().show(ctx, |_ui| {});

        self.render_launcher(ctx);

        let previous = self.selected_path.clone();
        self.dialog
            .show(ctx, &mut self.dialog_open, &mut self.selected_path, self.mode);

        if self.selected_path != previous {
            self.record_choice();
        }
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        if self.settings_dirty {
            self.save_settings();
        }
    }

    /// Save persistent state.
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        debug!("Saving application state");
        if self.settings_dirty {
            self.save_settings();
        }
    }
}

/// Apply the configured theme to the egui context.
fn apply_theme(ctx: &egui::Context, theme: Theme) {
    match theme {
        Theme::Light => ctx.set_visuals(egui::Visuals::light()),
        Theme::Dark => ctx.set_visuals(egui::Visuals::dark()),
        // eframe follows the OS preference on its own
        Theme::System => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_restores_last_session() {
        let settings = Settings {
            dialog_mode: DialogMode::SelectFolder,
            last_selected_path: Some(PathBuf::from("/srv/data")),
            ..Settings::default()
        };

        let app = PickerApp::from_settings(settings);

        assert_eq!(app.mode, DialogMode::SelectFolder);
        assert_eq!(app.selected_path, PathBuf::from("/srv/data"));
        assert!(!app.dialog_open);
        assert!(!app.settings_dirty);
    }

    #[test]
    fn test_from_default_settings_starts_empty() {
        let app = PickerApp::from_settings(Settings::default());
        assert_eq!(app.mode, DialogMode::OpenFile);
        assert!(app.selected_path.as_os_str().is_empty());
    }

    #[test]
    fn test_apply_theme() {
        let ctx = egui::Context::default();
        apply_theme(&ctx, Theme::Light);
        assert!(!ctx.style().visuals.dark_mode);
        apply_theme(&ctx, Theme::Dark);
        assert!(ctx.style().visuals.dark_mode);
        apply_theme(&ctx, Theme::System);
        assert!(ctx.style().visuals.dark_mode);
    }

    fn viewport_input(info: egui::ViewportInfo) -> egui::RawInput {
        let mut input = egui::RawInput::default();
        input.viewports.insert(egui::ViewportId::ROOT, info);
        input
    }

    fn track(app: &mut PickerApp, info: egui::ViewportInfo) -> bool {
        let ctx = egui::Context::default();
        let mut changed = false;
        let _ = ctx.run(viewport_input(info), |ctx| {
            changed = app.update_window_state(ctx);
        });
        changed
    }

    fn window_rects(x: f32, y: f32, width: f32, height: f32) -> egui::ViewportInfo {
        egui::ViewportInfo {
            inner_rect: Some(egui::Rect::from_min_size(
                egui::pos2(x, y + 30.0),
                egui::vec2(width, height),
            )),
            outer_rect: Some(egui::Rect::from_min_size(
                egui::pos2(x, y),
                egui::vec2(width, height + 30.0),
            )),
            maximized: Some(false),
            ..Default::default()
        }
    }

    #[test]
    fn test_unchanged_window_does_not_dirty_settings() {
        let settings = Settings {
            window_size: WindowSize {
                width: 1280.0,
                height: 720.0,
                x: Some(40.0),
                y: Some(60.0),
                maximized: false,
            },
            ..Settings::default()
        };
        let mut app = PickerApp::from_settings(settings);

        assert!(!track(&mut app, window_rects(40.0, 60.0, 1280.0, 720.0)));
        assert!(!app.settings_dirty);
    }

    #[test]
    fn test_window_move_and_resize_are_recorded() {
        let mut app = PickerApp::from_settings(Settings::default());

        assert!(track(&mut app, window_rects(100.0, 50.0, 900.0, 600.0)));

        let window = app.settings.window_size;
        assert_eq!(window.width, 900.0);
        assert_eq!(window.height, 600.0);
        assert_eq!(window.x, Some(100.0));
        assert_eq!(window.y, Some(50.0));
        assert!(!window.maximized);
        assert!(app.settings_dirty);
    }

    #[test]
    fn test_maximize_keeps_normal_geometry() {
        let mut app = PickerApp::from_settings(Settings::default());
        track(&mut app, window_rects(100.0, 50.0, 900.0, 600.0));

        let mut maximized = window_rects(0.0, 0.0, 2560.0, 1400.0);
        maximized.maximized = Some(true);
        assert!(track(&mut app, maximized.clone()));
        assert!(!track(&mut app, maximized));

        let window = app.settings.window_size;
        assert!(window.maximized);
        assert_eq!(window.width, 900.0);
        assert_eq!(window.height, 600.0);
        assert_eq!(window.x, Some(100.0));
    }

    #[test]
    fn test_launcher_renders_headless() {
        let ctx = egui::Context::default();
        let mut app = PickerApp::from_settings(Settings::default());
        let _ = ctx.run(egui::RawInput::default(), |ctx| app.render_launcher(ctx));
        assert!(!app.dialog_open);
    }
}
