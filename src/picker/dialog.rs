//! The picker dialog renderer.
//!
//! [`FileDialog::show`] is called once per frame while the dialog is open. It
//! lists the current directory, draws the folder and file panels, and turns
//! clicks into [`BrowserState`] transitions.

use crate::config::DialogSettings;
use crate::picker::fs::{FileSystem, StdFileSystem};
use crate::picker::listing::DirectoryListing;
use crate::picker::sort::{SortDirection, SortKey, SortOrder};
use crate::picker::state::{BrowserState, DialogMode, Popup};
use egui::{Color32, Key};
use std::path::PathBuf;

/// Color for validation and file system errors.
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 80, 80);

/// Terminal buttons of the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogAction {
    Cancel,
    Choose,
}

/// An in-application file/folder picker.
///
/// Keep one instance alive across frames, together with the `open` flag and
/// the result path passed to [`show`](Self::show).
pub struct FileDialog {
    state: BrowserState,
    fs: Box<dyn FileSystem>,
    settings: DialogSettings,
    /// Where each row and button was last drawn
    #[cfg(test)]
    hit_rects: std::collections::HashMap<String, egui::Rect>,
}

impl Default for FileDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl FileDialog {
    /// Picker over the real file system, starting in the working directory.
    pub fn new() -> Self {
        Self {
            state: BrowserState::new(),
            fs: Box::new(StdFileSystem),
            settings: DialogSettings::default(),
            #[cfg(test)]
            hit_rects: std::collections::HashMap::new(),
        }
    }

    pub fn with_settings(mut self, settings: DialogSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_file_system(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    pub fn with_state(mut self, state: BrowserState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn settings(&self) -> &DialogSettings {
        &self.settings
    }

    /// Render one frame of the dialog.
    ///
    /// Does nothing while `open` is false. On "Choose" the chosen path is
    /// written to `result_path` and `open` becomes false; on "Cancel" only
    /// `open` changes. A non-empty `result_path` seeds the starting directory
    /// the first time the dialog is shown after opening.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        open: &mut bool,
        result_path: &mut PathBuf,
        mode: DialogMode,
    ) {
        if !*open {
            return;
        }

        self.state.apply_initial_path(self.fs.as_ref(), result_path);
        let mut listing = self.state.refresh_listing(self.fs.as_ref());

        // Popups are modal: the main window is inert while one is up
        let interactive = self.state.popup() == Popup::None;

        let action = egui::Window::new(mode.title())
            .default_size([self.settings.width, self.settings.height])
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.add_enabled_ui(interactive, |ui| self.render_body(ui, &mut listing))
                    .inner
            })
            .and_then(|response| response.inner)
            .flatten();

        self.show_create_folder_popup(ctx);
        self.show_delete_folder_popup(ctx);

        match action {
            Some(DialogAction::Cancel) => self.state.cancel(open),
            Some(DialogAction::Choose) => {
                self.state.choose(mode, open, result_path);
            }
            None => {}
        }
    }

    fn render_body(
        &mut self,
        ui: &mut egui::Ui,
        listing: &mut DirectoryListing,
    ) -> Option<DialogAction> {
        ui.label(self.state.current_path().display().to_string());

        ui.horizontal_top(|ui| {
            self.folder_panel(ui, listing);
            self.file_panel(ui, listing);
        });

        if let Some(err) = self.state.listing_error() {
            ui.colored_label(ERROR_COLOR, format!("Directory unavailable: {}", err));
        }

        let selected = self.state.selected_path().display().to_string();
        ui.add(
            egui::TextEdit::singleline(&mut selected.as_str())
                .id_source("filepick_selected_path")
                .desired_width(f32::INFINITY),
        );

        ui.add_space(6.0);

        let mut action = None;
        ui.horizontal(|ui| {
            let response = ui.button("New folder");
            self.track("button:New folder", &response);
            if response.clicked() {
                self.state.open_create_folder_popup();
            }

            let response = ui.add_enabled(
                self.state.can_delete_folder(),
                egui::Button::new("Delete folder"),
            );
            self.track("button:Delete folder", &response);
            if response.clicked() {
                self.state.open_delete_folder_popup();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                // Right-to-left: "Choose" ends up rightmost
                let response = ui.button("Choose");
                self.track("button:Choose", &response);
                if response.clicked() {
                    action = Some(DialogAction::Choose);
                }
                let response = ui.button("Cancel");
                self.track("button:Cancel", &response);
                if response.clicked() {
                    action = Some(DialogAction::Cancel);
                }
            });
        });

        if let Some(err) = self.state.dialog_error() {
            ui.colored_label(ERROR_COLOR, err);
        }

        action
    }

    /// ".." plus one row per subdirectory.
    fn folder_panel(&mut self, ui: &mut egui::Ui, listing: &DirectoryListing) {
        let size = egui::vec2(self.settings.folder_panel_width, self.settings.panel_height);

        ui.allocate_ui_with_layout(size, egui::Layout::top_down(egui::Align::LEFT), |ui| {
            ui.set_min_size(size);
            egui::ScrollArea::both()
                .id_source("filepick_folders")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let response = ui.selectable_label(false, "..");
                    self.track("folder:..", &response);
                    if response.double_clicked() {
                        self.state.go_to_parent();
                        return;
                    }

                    for (index, folder) in listing.folders.iter().enumerate() {
                        let highlighted = self.state.is_folder_row_highlighted(index);
                        let response = ui.selectable_label(highlighted, &folder.name);
                        self.track(&format!("folder:{}", folder.name), &response);

                        if response.double_clicked() {
                            self.state.open_folder(folder.path.clone());
                            // The rest of this listing belongs to the old directory
                            break;
                        } else if response.clicked() {
                            self.state.click_folder(index, &folder.name);
                        }
                    }
                });
        });
    }

    /// Sortable header row plus one row per file.
    fn file_panel(&mut self, ui: &mut egui::Ui, listing: &mut DirectoryListing) {
        let size = egui::vec2(self.settings.file_panel_width(), self.settings.panel_height);

        ui.allocate_ui_with_layout(size, egui::Layout::top_down(egui::Align::LEFT), |ui| {
            ui.set_min_size(size);
            egui::ScrollArea::both()
                .id_source("filepick_files")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    egui::Grid::new("filepick_file_grid")
                        .num_columns(SortKey::all().len())
                        .striped(true)
                        .min_col_width(60.0)
                        .show(ui, |ui| {
                            let mut resort = false;
                            for key in SortKey::all() {
                                let sort = self.state.sort();
                                let label = header_label(*key, sort);
                                let response =
                                    ui.selectable_label(sort.key() == Some(*key), label);
                                self.track(&format!("header:{}", key.label()), &response);
                                if response.clicked() {
                                    self.state.toggle_sort(*key);
                                    resort = true;
                                }
                            }
                            ui.end_row();

                            // Apply a header click in the same frame it happened
                            if resort {
                                self.state.sort().sort_files(&mut listing.files);
                                self.state.sync_indices(listing);
                            }

                            for (index, file) in listing.files.iter().enumerate() {
                                let highlighted = self.state.is_file_row_highlighted(index);
                                let response = ui.selectable_label(highlighted, &file.name);
                                self.track(&format!("file:{}", file.name), &response);
                                if response.clicked() {
                                    self.state.click_file(index, &file.name);
                                }
                                ui.label(file.size.to_string());
                                ui.label(&file.extension);
                                ui.label(file.modified_display(&self.settings.date_format));
                                ui.end_row();
                            }
                        });
                });
        });
    }

    /// Remember where a widget landed this frame.
    fn track(&mut self, _key: &str, _response: &egui::Response) {
        #[cfg(test)]
        self.hit_rects.insert(_key.to_owned(), _response.rect);
    }

    fn show_create_folder_popup(&mut self, ctx: &egui::Context) {
        if self.state.popup() != Popup::CreateFolder {
            return;
        }

        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            self.state.cancel_create_folder();
            return;
        }

        egui::Window::new("Create Folder")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(300.0);
                ui.label("Name:");

                let response = ui.add(
                    egui::TextEdit::singleline(self.state.new_folder_name_mut())
                        .hint_text("folder-name")
                        .desired_width(f32::INFINITY),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                if !submitted {
                    response.request_focus();
                }

                ui.horizontal(|ui| {
                    if ui.button("Create").clicked() || submitted {
                        self.state.confirm_create_folder(self.fs.as_ref());
                    }
                    if ui.button("Cancel").clicked() {
                        self.state.cancel_create_folder();
                    }
                });

                if let Some(err) = self.state.new_folder_error() {
                    ui.colored_label(ERROR_COLOR, err);
                }
            });
    }

    fn show_delete_folder_popup(&mut self, ctx: &egui::Context) {
        if self.state.popup() != Popup::DeleteFolder {
            return;
        }

        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            self.state.cancel_delete_folder();
            return;
        }

        let name = self.state.highlighted_folder().unwrap_or_default().to_owned();

        egui::Window::new("Delete Folder")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.colored_label(
                    ERROR_COLOR,
                    format!("Are you sure you want to delete '{}'?", name),
                );
                ui.add_space(4.0);

                ui.horizontal(|ui| {
                    let width = (ui.available_width() - ui.spacing().item_spacing.x) / 2.0;
                    if ui
                        .add(egui::Button::new("Yes").min_size(egui::vec2(width, 0.0)))
                        .clicked()
                    {
                        self.state.confirm_delete_folder(self.fs.as_ref());
                    }
                    if ui
                        .add(egui::Button::new("No").min_size(egui::vec2(width, 0.0)))
                        .clicked()
                    {
                        self.state.cancel_delete_folder();
                    }
                });
            });
    }
}

/// Column header text, with an arrow on the active column.
fn header_label(key: SortKey, sort: SortOrder) -> String {
    match sort.direction_of(key) {
        Some(SortDirection::Ascending) => format!("{} ⏶", key.label()),
        Some(SortDirection::Descending) => format!("{} ⏷", key.label()),
        None => key.label().to_string(),
    }
}
