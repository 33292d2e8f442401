use crate::command::Command;
use crate::state::EditorContext;

use super::{InputEvent, Shortcut};

/// Routes input events into the editor context.
///
/// Open and save need a file dialog first, so they are handed back to the caller.
pub fn route_event(event: &InputEvent, context: &mut EditorContext) -> Option<Shortcut> {
    match event {
        InputEvent::PointerDown { location } => context.pointer_pressed(location.canvas),
        InputEvent::PointerMove { location } => context.pointer_dragged(location.canvas),
        InputEvent::PointerUp { location } => context.pointer_released(location.canvas),
        InputEvent::Shortcut(shortcut) => {
            let command = match shortcut {
                Shortcut::Undo => Command::Undo,
                Shortcut::Redo => Command::Redo,
                Shortcut::Escape => Command::ClearSelection,
                Shortcut::Open | Shortcut::Save => return Some(*shortcut),
            };
            if let Err(err) = command.execute(context) {
                log::debug!("{} ignored: {}", command.label(), err);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SelectionRect;
    use crate::input::{InputLocation, PanelKind};
    use egui::Pos2;
    use image::{Rgb, RgbImage};

    fn at(x: f32, y: f32) -> InputLocation {
        InputLocation {
            position: Pos2::new(x, y),
            canvas: Pos2::new(x, y),
            panel: PanelKind::Canvas,
        }
    }

    #[test]
    fn test_pointer_sequence_commits_selection() {
        let mut context = EditorContext::default();
        context.load_image("grey.png", RgbImage::from_pixel(200, 200, Rgb([128, 128, 128])));

        let events = [
            InputEvent::PointerDown { location: at(20.0, 30.0) },
            InputEvent::PointerMove { location: at(60.0, 50.0) },
            InputEvent::PointerUp { location: at(80.0, 90.0) },
        ];
        for event in &events {
            assert_eq!(route_event(event, &mut context), None);
        }

        assert_eq!(context.selection_rect(), Some(SelectionRect::new(20.0, 30.0, 80.0, 90.0)));
        assert!(context.can_undo());

        route_event(&InputEvent::Shortcut(Shortcut::Undo), &mut context);
        assert_eq!(context.selection_rect(), None);
        route_event(&InputEvent::Shortcut(Shortcut::Redo), &mut context);
        assert_eq!(context.selection_rect(), Some(SelectionRect::new(20.0, 30.0, 80.0, 90.0)));
    }

    #[test]
    fn test_dialog_shortcuts_are_returned() {
        let mut context = EditorContext::default();
        assert_eq!(
            route_event(&InputEvent::Shortcut(Shortcut::Open), &mut context),
            Some(Shortcut::Open)
        );
        assert_eq!(
            route_event(&InputEvent::Shortcut(Shortcut::Save), &mut context),
            Some(Shortcut::Save)
        );
    }
}
