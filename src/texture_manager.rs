use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use thiserror::Error;

use crate::image_store::RasterImage;

/// Errors that can occur during texture generation
#[derive(Error, Debug)]
pub enum TextureGenerationError {
    #[error("Invalid texture dimensions {0}x{1}")]
    InvalidDimensions(u32, u32),
}

/// Converts an RGB buffer into something egui can upload
pub fn color_image_from_raster(image: &RasterImage) -> Result<ColorImage, TextureGenerationError> {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return Err(TextureGenerationError::InvalidDimensions(w, h));
    }
    Ok(ColorImage::from_rgb([w as usize, h as usize], image.as_raw()))
}

/// Keeps the canvas texture in sync with the editor's preview version.
///
/// One GPU texture is reused for the lifetime of the app and only re-uploaded
/// when the version changes.
pub struct TextureManager {
    name: String,
    handle: Option<TextureHandle>,
    version: Option<u64>,
    uploads: u64,
}

impl TextureManager {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handle: None,
            version: None,
            uploads: 0,
        }
    }

    /// Returns the texture for `version`, calling `generator` only when it is stale
    pub fn get_or_update<F>(
        &mut self,
        ctx: &Context,
        version: u64,
        generator: F,
    ) -> Result<TextureId, TextureGenerationError>
    where
        F: FnOnce() -> Result<ColorImage, TextureGenerationError>,
    {
        if self.version == Some(version) {
            if let Some(handle) = &self.handle {
                return Ok(handle.id());
            }
        }

        let image = generator()?;
        log::trace!("Uploading {} v{} ({}x{})", self.name, version, image.size[0], image.size[1]);
        let id = match &mut self.handle {
            Some(handle) => {
                handle.set(image, TextureOptions::LINEAR);
                handle.id()
            }
            None => {
                let handle = ctx.load_texture(&self.name, image, TextureOptions::LINEAR);
                let id = handle.id();
                self.handle = Some(handle);
                id
            }
        };
        self.version = Some(version);
        self.uploads += 1;
        Ok(id)
    }

    /// Drops the texture, e.g. when there is no image to show
    pub fn clear(&mut self) {
        self.handle = None;
        self.version = None;
    }

    /// Number of uploads performed so far
    pub fn uploads(&self) -> u64 {
        self.uploads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    // Mock a texture generation function for testing
    fn mock_texture_generator() -> Result<ColorImage, TextureGenerationError> {
        Ok(ColorImage::new([10, 10], egui::Color32::WHITE))
    }

    #[test]
    fn test_cache_hit() {
        let ctx = Context::default();
        let mut manager = TextureManager::new("canvas");

        let texture_id1 = manager.get_or_update(&ctx, 1, mock_texture_generator).unwrap();
        let texture_id2 = manager.get_or_update(&ctx, 1, mock_texture_generator).unwrap();

        assert_eq!(texture_id1, texture_id2);
        assert_eq!(manager.uploads(), 1);
    }

    #[test]
    fn test_new_version_reuses_handle() {
        let ctx = Context::default();
        let mut manager = TextureManager::new("canvas");

        let first = manager.get_or_update(&ctx, 1, mock_texture_generator).unwrap();
        let second = manager.get_or_update(&ctx, 2, mock_texture_generator).unwrap();

        assert_eq!(first, second);
        assert_eq!(manager.uploads(), 2);
    }

    #[test]
    fn test_empty_raster_is_rejected() {
        let err = color_image_from_raster(&RasterImage::new(0, 5)).unwrap_err();
        assert!(matches!(err, TextureGenerationError::InvalidDimensions(0, 5)));

        let image = color_image_from_raster(&RasterImage::from_pixel(3, 2, Rgb([1, 2, 3]))).unwrap();
        assert_eq!(image.size, [3, 2]);
        assert_eq!(image.pixels[0], egui::Color32::from_rgb(1, 2, 3));
    }
}
