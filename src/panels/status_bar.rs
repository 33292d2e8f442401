use crate::CropApp;

pub fn status_bar(app: &CropApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let status = app.context().status();
            if status.is_error() {
                ui.colored_label(ui.visuals().error_fg_color, &status.text);
            } else {
                ui.label(&status.text);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(summary) = app.context().selection_summary() {
                    ui.label(summary);
                }
                if let Some(cropped) = app.context().cropped() {
                    ui.label(format!("Crop {}x{}", cropped.width(), cropped.height()));
                }
            });
        });
    });
}
