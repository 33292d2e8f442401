use eframe::egui;
use std::path::Path;

use crate::image_store::is_supported_extension;
use crate::state::{EditorContext, StatusMessage};

/// Loads image files dropped onto the window
#[derive(Debug, Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks up newly dropped files from the UI context.
    /// Returns true if there is anything to process.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files = i.raw.dropped_files.clone();
            }
        });
        !self.dropped_files.is_empty()
    }

    /// Loads the first usable dropped image into the editor.
    ///
    /// Only one document is open at a time, so later files in the same drop are skipped.
    pub fn process_dropped_files(&mut self, context: &mut EditorContext) -> bool {
        for file in std::mem::take(&mut self.dropped_files) {
            let file_name = display_name(&file);
            if !is_image_file(&file) {
                log::warn!("Dropped file is not a supported type: {}", file_name);
                continue;
            }

            let result = if let Some(bytes) = &file.bytes {
                context.load_from_memory(&file_name, bytes)
            } else if let Some(path) = &file.path {
                context.load(path)
            } else {
                log::warn!("Dropped file has no accessible data: {}", file_name);
                continue;
            };

            if result.is_ok() {
                return true;
            }
        }
        false
    }

    /// Dims the window and lists the files while they are dragged over it
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Drop to open:\n".to_owned();
            for file in &i.raw.hovered_files {
                match &file.path {
                    Some(path) => text += &format!("\n{}", path.display()),
                    None => text += "\n(Path not available)",
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }

    /// Reports a drop that contained nothing loadable
    pub fn report_rejected(context: &mut EditorContext) {
        if !context.status().is_error() {
            context.set_status(StatusMessage::error("Dropped file is not a supported image"));
        }
    }
}

fn display_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        file.mime.starts_with("image/")
    } else if let Some(path) = &file.path {
        is_supported_extension(path)
    } else {
        is_supported_extension(Path::new(&file.name))
    }
}
