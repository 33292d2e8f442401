use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

/// A selection rectangle in canvas space, stored exactly as the pointer drew it.
///
/// The start corner is where the drag began and the end corner follows the pointer,
/// so `start_x > end_x` (or `start_y > end_y`) is perfectly valid. Anything that needs
/// an ordered region must go through [`SelectionRect::sorted`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub start_x: f32,
    pub start_y: f32,
    pub end_x: f32,
    pub end_y: f32,
}

/// Corner-sorted view of a [`SelectionRect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortedBounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

/// An integer pixel region clamped to an image, `x0..x1` by `y0..y1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl SelectionRect {
    pub fn new(start_x: f32, start_y: f32, end_x: f32, end_y: f32) -> Self {
        Self {
            start_x,
            start_y,
            end_x,
            end_y,
        }
    }

    /// A zero-sized rectangle anchored at `pos`
    pub fn at_point(pos: Pos2) -> Self {
        Self::new(pos.x, pos.y, pos.x, pos.y)
    }

    /// The one place corners get ordered. Compositing, cropping and status text all use it.
    pub fn sorted(&self) -> SortedBounds {
        SortedBounds {
            min_x: self.start_x.min(self.end_x),
            min_y: self.start_y.min(self.end_y),
            max_x: self.start_x.max(self.end_x),
            max_y: self.start_y.max(self.end_y),
        }
    }

    pub fn width(&self) -> f32 {
        (self.end_x - self.start_x).abs()
    }

    pub fn height(&self) -> f32 {
        (self.end_y - self.start_y).abs()
    }

    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    /// Multiplies every coordinate, used to map display coordinates onto the source image
    pub fn scaled(&self, sx: f32, sy: f32) -> Self {
        Self::new(
            self.start_x * sx,
            self.start_y * sy,
            self.end_x * sx,
            self.end_y * sy,
        )
    }

    /// Rounds the sorted corners to whole pixels and clamps them to a `width` x `height` image.
    pub fn pixel_bounds(&self, width: u32, height: u32) -> PixelBounds {
        let b = self.sorted();
        let clamp = |v: f32, max: u32| -> u32 {
            if v.is_nan() {
                return 0;
            }
            (v.round().max(0.0) as u32).min(max)
        };
        PixelBounds {
            x0: clamp(b.min_x, width),
            y0: clamp(b.min_y, height),
            x1: clamp(b.max_x, width),
            y1: clamp(b.max_y, height),
        }
    }
}

impl SortedBounds {
    pub fn to_egui_rect(&self) -> Rect {
        Rect::from_min_max(
            Pos2::new(self.min_x, self.min_y),
            Pos2::new(self.max_x, self.max_y),
        )
    }
}

impl PixelBounds {
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}
