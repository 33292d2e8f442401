use egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::geometry::{Handle, HandleSet, SelectionRect};

const HANDLE_FILL: Color32 = Color32::from_rgb(30, 120, 255);
const ACTIVE_FILL: Color32 = Color32::from_rgb(255, 170, 30);

/// Visual for one edge handle of the selection, in screen space
pub struct ResizeHandle {
    position: Pos2,
    half_width: f32,
}

impl ResizeHandle {
    pub fn new(position: Pos2, half_width: f32) -> Self {
        Self {
            position,
            half_width,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.position, Vec2::splat(self.half_width * 2.0))
    }

    pub fn paint(&self, painter: &Painter, active: bool) {
        let rect = self.rect();
        painter.rect_filled(rect, 2.0, if active { ACTIVE_FILL } else { HANDLE_FILL });
        painter.rect_stroke(rect, 2.0, Stroke::new(1.0, Color32::WHITE));
    }
}

/// Draws the selection outline and its four handles.
///
/// `to_screen` maps canvas pixels to screen points; `half_width` is in canvas pixels.
pub fn paint_selection(
    painter: &Painter,
    rect: &SelectionRect,
    active: Option<Handle>,
    half_width: f32,
    to_screen: impl Fn(Pos2) -> Pos2,
) {
    let bounds = rect.sorted().to_egui_rect();
    let outline = Rect::from_two_pos(to_screen(bounds.min), to_screen(bounds.max));
    painter.rect_stroke(outline, 0.0, Stroke::new(1.0, Color32::WHITE));

    // Handle zones scale with the image so the drawn square matches the hit zone
    let scale = (to_screen(Pos2::new(half_width, 0.0)) - to_screen(Pos2::ZERO)).x.abs();
    for (handle, center) in HandleSet::from_rect(rect).iter() {
        ResizeHandle::new(to_screen(center), scale).paint(painter, active == Some(handle));
    }
}
