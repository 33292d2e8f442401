#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod compositor;
pub mod config;
pub mod error;
pub mod file_handler;
pub mod geometry;
pub mod image_store;
pub mod input;
pub mod panels;
pub mod selection;
pub mod state;
pub mod texture_manager;
pub mod widgets;

pub use app::CropApp;
pub use command::{Command, SelectionHistory, SelectionSnapshot};
pub use compositor::{Compositor, DEFAULT_OVERLAY_ALPHA};
pub use config::ViewerConfig;
pub use error::{EmptySelectionError, LoadError, SaveError};
pub use geometry::{Handle, HandleSet, SelectionRect};
pub use image_store::{ImageStore, LoadedImage, RasterImage};
pub use input::{InputEvent, InputLocation};
pub use selection::SelectionModel;
pub use state::EditorContext;
