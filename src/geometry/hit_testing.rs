use egui::{CursorIcon, Pos2};
use serde::{Deserialize, Serialize};

use super::rect::SelectionRect;

/// Half the side length of the square hit zone around each handle midpoint
pub const HANDLE_HALF_WIDTH: f32 = 6.0;

/// One of the four edge-midpoint resize affordances.
///
/// Handles are tied to the stored (unsorted) coordinates: `Top` always drags
/// `start_y` and `Bottom` always drags `end_y`, even when the rectangle was drawn
/// upwards and `Top` is visually the lower edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    Top,
    Bottom,
    Left,
    Right,
}

impl Handle {
    /// Hit-test order. With [`HandlePriority::FirstMatch`] the earliest entry wins.
    pub const ALL: [Handle; 4] = [Handle::Top, Handle::Bottom, Handle::Left, Handle::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Handle::Top => "top",
            Handle::Bottom => "bottom",
            Handle::Left => "left",
            Handle::Right => "right",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            Handle::Top | Handle::Bottom => CursorIcon::ResizeVertical,
            Handle::Left | Handle::Right => CursorIcon::ResizeHorizontal,
        }
    }
}

/// How to break ties when a point falls inside several overlapping handle zones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HandlePriority {
    /// First handle in [`Handle::ALL`] order wins
    #[default]
    FirstMatch,
    /// Handle whose midpoint is closest wins; exact ties fall back to `ALL` order
    Nearest,
}

/// Midpoints of the four edges, recomputed whenever the rectangle changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleSet {
    top: Pos2,
    bottom: Pos2,
    left: Pos2,
    right: Pos2,
}

impl HandleSet {
    pub fn from_rect(rect: &SelectionRect) -> Self {
        let mid_x = (rect.start_x + rect.end_x) / 2.0;
        let mid_y = (rect.start_y + rect.end_y) / 2.0;
        Self {
            top: Pos2::new(mid_x, rect.start_y),
            bottom: Pos2::new(mid_x, rect.end_y),
            left: Pos2::new(rect.start_x, mid_y),
            right: Pos2::new(rect.end_x, mid_y),
        }
    }

    pub fn get(&self, handle: Handle) -> Pos2 {
        match handle {
            Handle::Top => self.top,
            Handle::Bottom => self.bottom,
            Handle::Left => self.left,
            Handle::Right => self.right,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle, Pos2)> + '_ {
        Handle::ALL.into_iter().map(move |h| (h, self.get(h)))
    }

    /// Returns the handle whose square zone (half-width `half_width`) contains `pos`.
    pub fn hit_test(&self, pos: Pos2, half_width: f32, priority: HandlePriority) -> Option<Handle> {
        let mut hits = self.iter().filter(|(_, center)| {
            (pos.x - center.x).abs() <= half_width && (pos.y - center.y).abs() <= half_width
        });

        match priority {
            HandlePriority::FirstMatch => hits.next().map(|(handle, _)| handle),
            HandlePriority::Nearest => hits
                .fold(None, |best: Option<(Handle, f32)>, (handle, center)| {
                    let d = pos.distance_sq(center);
                    match best {
                        Some((_, best_d)) if best_d <= d => best,
                        _ => Some((handle, d)),
                    }
                })
                .map(|(handle, _)| handle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoints_follow_unsorted_edges() {
        let handles = HandleSet::from_rect(&SelectionRect::new(100.0, 300.0, 400.0, 100.0));

        assert_eq!(handles.get(Handle::Top), Pos2::new(250.0, 300.0));
        assert_eq!(handles.get(Handle::Bottom), Pos2::new(250.0, 100.0));
        assert_eq!(handles.get(Handle::Left), Pos2::new(100.0, 200.0));
        assert_eq!(handles.get(Handle::Right), Pos2::new(400.0, 200.0));
    }

    #[test]
    fn test_hit_zone_is_square() {
        let handles = HandleSet::from_rect(&SelectionRect::new(100.0, 100.0, 400.0, 300.0));
        let priority = HandlePriority::FirstMatch;

        // Corner of the square zone still counts, the circle would not
        assert_eq!(
            handles.hit_test(Pos2::new(256.0, 106.0), HANDLE_HALF_WIDTH, priority),
            Some(Handle::Top)
        );
        assert_eq!(
            handles.hit_test(Pos2::new(257.0, 100.0), HANDLE_HALF_WIDTH, priority),
            None
        );
        assert_eq!(
            handles.hit_test(Pos2::new(394.0, 200.0), HANDLE_HALF_WIDTH, priority),
            Some(Handle::Right)
        );
    }

    #[test]
    fn test_overlapping_zones_priority() {
        // 6px tall: top (5,0), bottom (5,6), left (0,3), right (10,3) all contain (5,5)
        let handles = HandleSet::from_rect(&SelectionRect::new(0.0, 0.0, 10.0, 6.0));
        let pos = Pos2::new(5.0, 5.0);

        assert_eq!(
            handles.hit_test(pos, HANDLE_HALF_WIDTH, HandlePriority::FirstMatch),
            Some(Handle::Top)
        );
        assert_eq!(
            handles.hit_test(pos, HANDLE_HALF_WIDTH, HandlePriority::Nearest),
            Some(Handle::Bottom)
        );
    }
}
