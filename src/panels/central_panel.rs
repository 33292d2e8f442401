use crate::CropApp;
use crate::input::{canvas_to_screen, screen_to_canvas};
use crate::texture_manager::color_image_from_raster;
use crate::widgets::paint_selection;

/// The image canvas: the masked preview, the selection outline and its handles
pub fn central_panel(app: &mut CropApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let (context, textures) = app.context_and_textures();
        let Some(image) = context.canvas_image() else {
            textures.clear();
            app.input_mut().clear_canvas();
            ui.centered_and_justified(|ui| {
                ui.label("Open an image (Ctrl+O) or drop one here");
            });
            return;
        };

        let image_size = egui::vec2(image.width() as f32, image.height() as f32);
        let texture = match textures.get_or_update(ctx, context.preview_version(), || {
            color_image_from_raster(image)
        }) {
            Ok(id) => id,
            Err(err) => {
                log::error!("Failed to upload canvas texture: {}", err);
                return;
            }
        };

        egui::ScrollArea::both().auto_shrink(false).drag_to_scroll(false).show(ui, |ui| {
            // One canvas pixel per physical pixel
            let size = image_size / ctx.pixels_per_point();
            let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
            let canvas_rect = response.rect;
            app.input_mut().set_canvas(canvas_rect, ui.clip_rect(), image_size);

            painter.image(
                texture,
                canvas_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );

            let context = app.context();
            if let Some(rect) = context.selection_rect() {
                paint_selection(
                    &painter,
                    &rect,
                    context.selection().active_handle(),
                    context.config().handle_half_width,
                    |p| canvas_to_screen(p, canvas_rect, image_size),
                );
            }

            if let Some(hover) = response.hover_pos() {
                let canvas_pos = screen_to_canvas(hover, canvas_rect, image_size);
                let handle = context
                    .selection()
                    .active_handle()
                    .or_else(|| context.selection().handle_at(canvas_pos));
                ctx.set_cursor_icon(handle.map_or(egui::CursorIcon::Crosshair, |h| h.cursor_icon()));
            }
        });
    });
}
