use egui::{Context, Key, KeyboardShortcut, Modifiers, PointerButton, Pos2, Rect, Vec2};

mod router;
pub use router::route_event;

/// Represents where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelKind {
    /// Over the displayed image
    Canvas,
    /// Anywhere else in the window
    Global,
}

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in screen coordinates
    pub position: Pos2,
    /// The same position in image pixel coordinates (y down)
    pub canvas: Pos2,
    pub panel: PanelKind,
}

/// Keyboard shortcuts the viewer responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Open,
    Save,
    Undo,
    Redo,
    Escape,
}

const SHORTCUTS: [(KeyboardShortcut, Shortcut); 5] = [
    // Shift variant first: consume_shortcut ignores extra shift
    (KeyboardShortcut::new(Modifiers::COMMAND.plus(Modifiers::SHIFT), Key::Z), Shortcut::Redo),
    (KeyboardShortcut::new(Modifiers::COMMAND, Key::Z), Shortcut::Undo),
    (KeyboardShortcut::new(Modifiers::COMMAND, Key::Y), Shortcut::Redo),
    (KeyboardShortcut::new(Modifiers::COMMAND, Key::O), Shortcut::Open),
    (KeyboardShortcut::new(Modifiers::COMMAND, Key::S), Shortcut::Save),
];

/// Represents different types of input events that can occur in the application
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the canvas
    PointerDown { location: InputLocation },
    /// Pointer moved while a canvas press is held
    PointerMove { location: InputLocation },
    /// Primary button released after a canvas press
    PointerUp { location: InputLocation },
    Shortcut(Shortcut),
}

/// Maps a screen position onto image pixels, given where the image is drawn
pub fn screen_to_canvas(pos: Pos2, canvas_rect: Rect, image_size: Vec2) -> Pos2 {
    let size = canvas_rect.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        return Pos2::ZERO;
    }
    let rel = pos - canvas_rect.min;
    Pos2::new(rel.x * image_size.x / size.x, rel.y * image_size.y / size.y)
}

/// Inverse of [`screen_to_canvas`]
pub fn canvas_to_screen(pos: Pos2, canvas_rect: Rect, image_size: Vec2) -> Pos2 {
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return canvas_rect.min;
    }
    let size = canvas_rect.size();
    canvas_rect.min + Vec2::new(pos.x * size.x / image_size.x, pos.y * size.y / image_size.y)
}

/// Handles converting raw egui input into canvas-space InputEvents
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Option<Rect>,
    /// Part of the canvas actually on screen; presses elsewhere never start a selection
    visible_rect: Option<Rect>,
    image_size: Vec2,
    /// A press started on the canvas and has not been released yet
    dragging: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the image was painted this frame, the clip rect it was painted into,
    /// and its pixel size
    pub fn set_canvas(&mut self, rect: Rect, clip_rect: Rect, image_size: Vec2) {
        self.canvas_rect = Some(rect);
        self.visible_rect = Some(rect.intersect(clip_rect));
        self.image_size = image_size;
    }

    pub fn clear_canvas(&mut self) {
        self.canvas_rect = None;
        self.visible_rect = None;
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn make_location(&self, pos: Pos2) -> InputLocation {
        match (self.canvas_rect, self.visible_rect) {
            (Some(rect), Some(visible)) => InputLocation {
                position: pos,
                canvas: screen_to_canvas(pos, rect, self.image_size),
                panel: if visible.is_positive() && visible.contains(pos) {
                    PanelKind::Canvas
                } else {
                    PanelKind::Global
                },
            },
            _ => InputLocation {
                position: pos,
                canvas: pos,
                panel: PanelKind::Global,
            },
        }
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input_mut(|input| {
            for (shortcut, action) in SHORTCUTS {
                if input.consume_shortcut(&shortcut) {
                    events.push(InputEvent::Shortcut(action));
                }
            }
            if input.key_pressed(Key::Escape) {
                events.push(InputEvent::Shortcut(Shortcut::Escape));
            }
        });

        ctx.input(|input| {
            let pos = input.pointer.latest_pos();

            if input.pointer.button_pressed(PointerButton::Primary) {
                if let Some(pos) = input.pointer.press_origin().or(pos) {
                    let location = self.make_location(pos);
                    if location.panel == PanelKind::Canvas {
                        self.dragging = true;
                        events.push(InputEvent::PointerDown { location });
                    }
                }
            }

            if self.dragging {
                if let Some(pos) = pos {
                    if Some(pos) != self.last_pointer_pos && input.pointer.button_down(PointerButton::Primary) {
                        events.push(InputEvent::PointerMove {
                            location: self.make_location(pos),
                        });
                    }
                }
                if input.pointer.button_released(PointerButton::Primary) {
                    if let Some(pos) = pos.or(self.last_pointer_pos) {
                        events.push(InputEvent::PointerUp {
                            location: self.make_location(pos),
                        });
                    }
                    self.dragging = false;
                }
            }

            if pos.is_some() {
                self.last_pointer_pos = pos;
            }
        });

        events
    }
}
