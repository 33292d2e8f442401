//! The single owning context behind the viewer window.
//!
//! `EditorContext` wires the pieces together in the order events arrive:
//! pointer press/drag/release go to the [`SelectionModel`], every change re-renders
//! the preview through the [`Compositor`], a release commits the rectangle to the
//! [`SelectionHistory`] and cuts a fresh crop, and undo/redo replay snapshots through
//! the same path. Everything runs on the UI thread, one event at a time.
//!
//! # Example
//!
//! ```rust,no_run
//! use eframe_crop::{EditorContext, ViewerConfig};
//! use egui::Pos2;
//!
//! let mut context = EditorContext::new(ViewerConfig::default());
//! context.load(std::path::Path::new("photo.png")).ok();
//! context.pointer_pressed(Pos2::new(100.0, 100.0));
//! context.pointer_dragged(Pos2::new(400.0, 300.0));
//! context.pointer_released(Pos2::new(400.0, 300.0));
//! context.save(std::path::Path::new("cropped.png")).ok();
//! ```

use std::path::{Path, PathBuf};

use egui::Pos2;
use image::Rgb;

use super::StatusMessage;
use crate::command::{SelectionHistory, SelectionSnapshot};
use crate::compositor::Compositor;
use crate::config::ViewerConfig;
use crate::error::{EmptySelectionError, LoadError, SaveError};
use crate::geometry::{HandleSet, SelectionRect};
use crate::image_store::{ImageStore, LoadedImage, RasterImage};
use crate::selection::SelectionModel;

#[derive(Debug)]
pub struct EditorContext {
    config: ViewerConfig,
    store: ImageStore,
    selection: SelectionModel,
    history: SelectionHistory,
    compositor: Compositor,
    /// Masked copy of the display image, `None` while nothing is selected
    preview: Option<RasterImage>,
    /// Source-resolution crop of the last applied selection
    cropped: Option<RasterImage>,
    /// Bumped whenever the canvas image changes so textures can be refreshed
    preview_version: u64,
    status: StatusMessage,
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl EditorContext {
    pub fn new(config: ViewerConfig) -> Self {
        let config = config.sanitized();
        let [r, g, b] = config.overlay_color;
        Self {
            store: ImageStore::new(config.max_display_size),
            selection: SelectionModel::new(config.handle_half_width, config.handle_priority),
            history: SelectionHistory::new(),
            compositor: Compositor::new(config.overlay_alpha, Rgb([r, g, b])),
            preview: None,
            cropped: None,
            preview_version: 0,
            status: StatusMessage::default(),
            config,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.store.current()
    }

    /// What the canvas should show: the masked preview, or the plain display image
    pub fn canvas_image(&self) -> Option<&RasterImage> {
        self.preview
            .as_ref()
            .or_else(|| self.store.current().map(LoadedImage::display))
    }

    pub fn preview(&self) -> Option<&RasterImage> {
        self.preview.as_ref()
    }

    pub fn cropped(&self) -> Option<&RasterImage> {
        self.cropped.as_ref()
    }

    pub fn preview_version(&self) -> u64 {
        self.preview_version
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn selection_rect(&self) -> Option<SelectionRect> {
        self.selection.rect()
    }

    pub fn handles(&self) -> Option<HandleSet> {
        self.selection.handles()
    }

    pub fn history(&self) -> &SelectionHistory {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn status(&self) -> &StatusMessage {
        &self.status
    }

    pub fn set_status(&mut self, status: StatusMessage) {
        if status.is_error() {
            log::warn!("{}", status.text);
        }
        self.status = status;
    }

    /// Loads an image from disk, replacing the current one and resetting selection state.
    ///
    /// On failure the current image and selection are kept and the error is shown.
    pub fn load(&mut self, path: &Path) -> Result<(), LoadError> {
        match self.store.load(path) {
            Ok(loaded) => {
                let summary = describe(loaded);
                self.after_load(summary);
                Ok(())
            }
            Err(err) => {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.load_failed(&name, &err);
                Err(err)
            }
        }
    }

    pub fn load_from_memory(&mut self, name: &str, bytes: &[u8]) -> Result<(), LoadError> {
        match self.store.load_from_memory(name, bytes) {
            Ok(loaded) => {
                let summary = describe(loaded);
                self.after_load(summary);
                Ok(())
            }
            Err(err) => {
                self.load_failed(name, &err);
                Err(err)
            }
        }
    }

    fn load_failed(&mut self, name: &str, err: &LoadError) {
        log::debug!("Load error detail: {}", err);
        self.set_status(StatusMessage::error(format!("Could not open {}: {}", name, err.reason())));
    }

    /// Installs an already decoded image
    pub fn load_image(&mut self, name: &str, image: RasterImage) {
        let summary = describe(self.store.replace(name, image));
        self.after_load(summary);
    }

    fn after_load(&mut self, summary: String) {
        log::info!("Loaded {}", summary);
        self.selection.clear();
        self.history.clear();
        self.preview = None;
        self.cropped = None;
        self.preview_version += 1;
        self.status = StatusMessage::info(format!("Loaded {}", summary));
    }

    /// Keeps pointer coordinates inside the display image
    fn clamp_to_canvas(&self, pos: Pos2) -> Option<Pos2> {
        let (w, h) = self.store.current()?.display().dimensions();
        Some(Pos2::new(
            pos.x.clamp(0.0, w as f32),
            pos.y.clamp(0.0, h as f32),
        ))
    }

    /// Pointer press in canvas coordinates. Ignored until an image is loaded.
    pub fn pointer_pressed(&mut self, pos: Pos2) {
        let Some(pos) = self.clamp_to_canvas(pos) else {
            return;
        };
        self.selection.begin(pos);
        self.refresh_preview();
    }

    pub fn pointer_dragged(&mut self, pos: Pos2) {
        let Some(pos) = self.clamp_to_canvas(pos) else {
            return;
        };
        if self.selection.update(pos) {
            self.refresh_preview();
        }
    }

    /// Pointer release: commits the finished rectangle and cuts the crop
    pub fn pointer_released(&mut self, pos: Pos2) {
        let Some(pos) = self.clamp_to_canvas(pos) else {
            return;
        };
        let Some(rect) = self.selection.end(pos) else {
            return;
        };
        log::info!("Committed selection {:?}", rect);
        self.history.commit(rect);
        self.replay();
        if let Some(summary) = self.selection_summary() {
            self.status = StatusMessage::info(summary);
        }
    }

    /// Drops the drag in progress, restoring the rectangle from before the press
    pub fn cancel_drag(&mut self) {
        if self.selection.is_dragging() {
            self.selection.cancel();
            self.replay();
        }
    }

    /// Removes the selection as an undoable step
    pub fn clear_selection(&mut self) {
        if self.selection.is_dragging() {
            self.cancel_drag();
            return;
        }
        if self.selection.rect().is_none() {
            return;
        }
        self.history.commit(SelectionSnapshot::empty());
        self.selection.clear();
        self.replay();
        self.status = StatusMessage::info("Selection cleared");
    }

    /// Returns false when there was nothing to undo
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        log::info!("Undo to {:?}", snapshot.rect());
        self.selection.set_rect(snapshot.rect());
        self.replay();
        true
    }

    /// Returns false when there was nothing to redo
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        log::info!("Redo to {:?}", snapshot.rect());
        self.selection.set_rect(snapshot.rect());
        self.replay();
        true
    }

    /// Re-renders the preview and the crop from the current rectangle
    pub fn apply_mask(&mut self) -> Result<(), EmptySelectionError> {
        let (Some(image), Some(rect)) = (self.store.current(), self.selection.rect()) else {
            return Err(EmptySelectionError);
        };
        let preview = self.compositor.render_preview(image.display(), &rect);
        let cropped = self
            .compositor
            .crop(image.source(), &image.canvas_to_source(&rect));
        log::debug!("Cropped {}x{}", cropped.width(), cropped.height());
        self.preview = Some(preview);
        self.cropped = Some(cropped);
        self.preview_version += 1;
        Ok(())
    }

    /// Applies the mask, or clears stale output when there is nothing to apply
    fn replay(&mut self) {
        if let Err(err) = self.apply_mask() {
            log::debug!("Nothing to mask: {}", err);
            self.preview = None;
            self.cropped = None;
            self.preview_version += 1;
        }
    }

    /// Preview only, used on every drag tick. The crop waits for the release.
    fn refresh_preview(&mut self) {
        let rendered = match (self.store.current(), self.selection.rect()) {
            (Some(image), Some(rect)) => Some(self.compositor.render_preview(image.display(), &rect)),
            _ => None,
        };
        self.preview = rendered;
        self.preview_version += 1;
    }

    /// Writes the current crop. A path without an extension gets the configured default.
    pub fn save(&mut self, path: &Path) -> Result<PathBuf, SaveError> {
        let result = self.write_crop(path);
        match &result {
            Ok(written) => {
                log::info!("Saved crop to {}", written.display());
                self.status = StatusMessage::info(format!("Saved {}", written.display()));
            }
            Err(err) => self.set_status(StatusMessage::error(err.to_string())),
        }
        result
    }

    fn write_crop(&self, path: &Path) -> Result<PathBuf, SaveError> {
        let cropped = self.cropped.as_ref().ok_or(SaveError::NoCrop)?;
        if cropped.width() == 0 || cropped.height() == 0 {
            return Err(SaveError::EmptyCrop {
                width: cropped.width(),
                height: cropped.height(),
            });
        }
        let path = self.export_path(path);
        cropped.save(&path).map_err(|source| SaveError::Encode {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// `path` with the default export extension appended if it has none
    pub fn export_path(&self, path: &Path) -> PathBuf {
        if path.extension().is_some() {
            path.to_path_buf()
        } else {
            path.with_extension(&self.config.default_export_extension)
        }
    }

    /// Suggested file name for the save dialog
    pub fn suggested_export_name(&self) -> String {
        let stem = self
            .store
            .current()
            .and_then(|image| Path::new(image.name()).file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_owned());
        format!("{}_cropped.{}", stem, self.config.default_export_extension)
    }

    /// e.g. `Selection 300 x 200 at (100, 100)`, from the sorted corners
    pub fn selection_summary(&self) -> Option<String> {
        let rect = self.selection.rect()?;
        let b = rect.sorted();
        Some(format!(
            "Selection {} x {} at ({}, {})",
            rect.width().round(),
            rect.height().round(),
            b.min_x.round(),
            b.min_y.round()
        ))
    }
}

fn describe(image: &LoadedImage) -> String {
    let (w, h) = image.source().dimensions();
    if image.is_downscaled() {
        let (dw, dh) = image.display().dimensions();
        format!("{} ({}x{}, shown at {}x{})", image.name(), w, h, dw, dh)
    } else {
        format!("{} ({}x{})", image.name(), w, h)
    }
}
