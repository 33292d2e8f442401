use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageError, RgbImage};

use crate::error::LoadError;
use crate::geometry::SelectionRect;

/// Extensions offered by the open dialog. Advisory only: decoding is the real check.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// 8-bit RGB pixels, row major
pub type RasterImage = RgbImage;

/// Check if a path looks like an image we can open based on its extension
pub fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// A decoded image plus the buffer actually shown on the canvas
#[derive(Debug, Clone)]
pub struct LoadedImage {
    name: String,
    source: RasterImage,
    display: RasterImage,
}

impl LoadedImage {
    pub fn new(name: impl Into<String>, source: RasterImage, max_display_size: Option<[u32; 2]>) -> Self {
        let display = match max_display_size {
            Some(max) => fit_within(&source, max),
            None => source.clone(),
        };
        Self {
            name: name.into(),
            source,
            display,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full resolution pixels
    pub fn source(&self) -> &RasterImage {
        &self.source
    }

    /// Pixels in canvas space
    pub fn display(&self) -> &RasterImage {
        &self.display
    }

    pub fn is_downscaled(&self) -> bool {
        self.source.dimensions() != self.display.dimensions()
    }

    /// Source pixels per display pixel along x and y
    pub fn scale(&self) -> (f32, f32) {
        let (sw, sh) = self.source.dimensions();
        let (dw, dh) = self.display.dimensions();
        if dw == 0 || dh == 0 {
            return (1.0, 1.0);
        }
        (sw as f32 / dw as f32, sh as f32 / dh as f32)
    }

    /// Maps a canvas rectangle onto source pixel coordinates
    pub fn canvas_to_source(&self, rect: &SelectionRect) -> SelectionRect {
        let (sx, sy) = self.scale();
        rect.scaled(sx, sy)
    }
}

/// Owns the currently loaded image. Loading replaces it wholesale.
#[derive(Debug, Clone, Default)]
pub struct ImageStore {
    current: Option<LoadedImage>,
    max_display_size: Option<[u32; 2]>,
}

impl ImageStore {
    pub fn new(max_display_size: Option<[u32; 2]>) -> Self {
        Self {
            current: None,
            max_display_size,
        }
    }

    pub fn current(&self) -> Option<&LoadedImage> {
        self.current.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// Decodes the file at `path` and converts it to RGB.
    ///
    /// On failure the previously loaded image stays in place.
    pub fn load(&mut self, path: &Path) -> Result<&LoadedImage, LoadError> {
        log::info!("Loading image from {}", path.display());
        let decoded = image::open(path).map_err(|err| match err {
            ImageError::IoError(source) => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
            source => LoadError::Decode {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let loaded = self.prepare(name, decoded);
        Ok(&*self.current.insert(loaded))
    }

    /// Decodes an in-memory file, e.g. one dropped onto the window
    pub fn load_from_memory(&mut self, name: &str, bytes: &[u8]) -> Result<&LoadedImage, LoadError> {
        log::info!("Loading image from memory: {} ({} bytes)", name, bytes.len());
        let decoded = image::load_from_memory(bytes).map_err(|source| LoadError::Memory {
            name: name.to_owned(),
            source,
        })?;
        let loaded = self.prepare(name.to_owned(), decoded);
        Ok(&*self.current.insert(loaded))
    }

    /// Installs an already decoded image
    pub fn replace(&mut self, name: &str, source: RasterImage) -> &LoadedImage {
        self.current.insert(LoadedImage::new(name, source, self.max_display_size))
    }

    fn prepare(&self, name: String, decoded: DynamicImage) -> LoadedImage {
        log::debug!(
            "Decoded {}: {}x{} {:?}",
            name,
            decoded.width(),
            decoded.height(),
            decoded.color()
        );
        LoadedImage::new(name, decoded.to_rgb8(), self.max_display_size)
    }
}

/// Aspect-preserving Lanczos downscale so the image fits in `max`. Never upscales.
fn fit_within(source: &RasterImage, max: [u32; 2]) -> RasterImage {
    let (w, h) = source.dimensions();
    let [max_w, max_h] = max;
    if (w <= max_w && h <= max_h) || w == 0 || h == 0 {
        return source.clone();
    }
    let ratio = (max_w as f64 / w as f64).min(max_h as f64 / h as f64);
    let new_w = ((w as f64 * ratio).round() as u32).max(1);
    let new_h = ((h as f64 * ratio).round() as u32).max(1);
    log::debug!("Downscaling {}x{} to {}x{} for display", w, h, new_w, new_h);
    image::imageops::resize(source, new_w, new_h, FilterType::Lanczos3)
}
