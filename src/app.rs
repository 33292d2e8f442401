use std::path::PathBuf;

use crate::command::Command;
use crate::config::ViewerConfig;
use crate::file_handler::FileHandler;
use crate::image_store::SUPPORTED_EXTENSIONS;
use crate::input::{route_event, InputHandler, Shortcut};
use crate::panels;
use crate::state::EditorContext;
use crate::texture_manager::TextureManager;

/// The viewer window: toolbar, canvas and status bar around an [`EditorContext`]
pub struct CropApp {
    context: EditorContext,
    input: InputHandler,
    textures: TextureManager,
    file_handler: FileHandler,
}

impl Default for CropApp {
    fn default() -> Self {
        Self::with_config(ViewerConfig::default())
    }
}

impl CropApp {
    /// Called once before the first frame.
    ///
    /// Settings come from eframe storage, overridden by the `EFRAME_CROP_CONFIG` file if set.
    pub fn new(cc: &eframe::CreationContext<'_>, initial_image: Option<PathBuf>) -> Self {
        let mut config: ViewerConfig = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        match ViewerConfig::from_env() {
            Some(Ok(from_file)) => config = from_file,
            Some(Err(err)) => log::warn!("Ignoring config file: {}", err),
            None => {}
        }

        let mut app = Self::with_config(config);
        if let Some(path) = initial_image {
            app.execute(Command::Load(path));
        }
        app
    }

    pub fn with_config(config: ViewerConfig) -> Self {
        Self {
            context: EditorContext::new(config),
            input: InputHandler::new(),
            textures: TextureManager::new("canvas"),
            file_handler: FileHandler::new(),
        }
    }

    pub fn context(&self) -> &EditorContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut EditorContext {
        &mut self.context
    }

    pub fn context_and_textures(&mut self) -> (&EditorContext, &mut TextureManager) {
        (&self.context, &mut self.textures)
    }

    pub fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    /// Runs a command; failures are already on the status bar, so they are only logged here
    pub fn execute(&mut self, command: Command) {
        if let Err(err) = command.execute(&mut self.context) {
            log::debug!("{} failed: {}", command.label(), err);
        }
    }

    /// Shortcuts and toolbar buttons that need a file dialog first
    pub fn handle_shortcut(&mut self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::Open => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Image files", &SUPPORTED_EXTENSIONS)
                    .add_filter("All files", &["*"])
                    .pick_file()
                {
                    self.execute(Command::Load(path));
                }
            }
            Shortcut::Save => {
                // Nothing to export: report it without bothering the user with a dialog
                let exportable = self.context.cropped().is_some_and(|c| c.width() > 0 && c.height() > 0);
                if !exportable {
                    self.execute(Command::Save(PathBuf::new()));
                    return;
                }
                let extension = self.context.config().default_export_extension.clone();
                if let Some(path) = rfd::FileDialog::new()
                    .set_file_name(self.context.suggested_export_name())
                    .add_filter("Image", &[extension.as_str()])
                    .add_filter("All files", &["*"])
                    .save_file()
                {
                    self.execute(Command::Save(path));
                }
            }
            Shortcut::Undo => self.execute(Command::Undo),
            Shortcut::Redo => self.execute(Command::Redo),
            Shortcut::Escape => self.execute(Command::ClearSelection),
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        for event in self.input.process_input(ctx) {
            if let Some(shortcut) = route_event(&event, &mut self.context) {
                self.handle_shortcut(shortcut);
            }
        }
    }

    /// Runs one frame of the viewer against `ctx`
    pub fn ui(&mut self, ctx: &egui::Context) {
        if self.file_handler.check_for_dropped_files(ctx)
            && !self.file_handler.process_dropped_files(&mut self.context)
        {
            FileHandler::report_rejected(&mut self.context);
        }

        // Canvas placement is from the previous frame, which is what the user clicked on
        self.handle_input(ctx);

        panels::tools_panel(self, ctx);
        panels::status_bar(self, ctx);
        panels::central_panel(self, ctx);

        self.file_handler.preview_files_being_dropped(ctx);
    }
}

impl eframe::App for CropApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self.context.config());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}
