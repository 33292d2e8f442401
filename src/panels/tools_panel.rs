use crate::CropApp;
use crate::command::Command;
use crate::input::Shortcut;

/// Top toolbar: file actions and undo/redo
pub fn tools_panel(app: &mut CropApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("Open…").on_hover_text("Ctrl+O").clicked() {
                app.handle_shortcut(Shortcut::Open);
            }

            let has_crop = app.context().cropped().is_some_and(|c| c.width() > 0 && c.height() > 0);
            if ui
                .add_enabled(has_crop, egui::Button::new("Save crop…"))
                .on_hover_text("Ctrl+S")
                .clicked()
            {
                app.handle_shortcut(Shortcut::Save);
            }

            ui.separator();

            // Enablement is derived from the history, never stored separately
            let can_undo = app.context().can_undo();
            let can_redo = app.context().can_redo();

            if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                app.execute(Command::Undo);
            }
            if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                app.execute(Command::Redo);
            }

            let has_selection = app.context().selection_rect().is_some();
            if ui.add_enabled(has_selection, egui::Button::new("Clear")).clicked() {
                app.execute(Command::ClearSelection);
            }

            ui.separator();

            let history = app.context().history();
            ui.label(format!(
                "History: {} back, {} forward",
                history.undo_stack().len(),
                history.redo_stack().len()
            ));
        });
    });
}
