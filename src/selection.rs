//! The interactive rectangle selection.
//!
//! A press either grabs one of the four edge handles of the existing rectangle or
//! anchors a brand new one. Drags then move a single edge (handle) or the free
//! corner (new rectangle), and the release hands back the rectangle to commit.
//!
//! ```text
//!            press on handle            release
//!   Idle ─────────────────────► Resizing ───────► Idle
//!     │                                             ▲
//!     └──────────────────────► Creating ────────────┘
//!        press elsewhere                 release
//! ```
use egui::Pos2;

use crate::geometry::{Handle, HandlePriority, HandleSet, SelectionRect, HANDLE_HALF_WIDTH};

/// What the current drag is doing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    /// Dragging out a new rectangle; the start corner is the anchor
    Creating,
    /// Dragging one edge of an existing rectangle
    Resizing {
        handle: Handle,
        /// The rectangle as it was when the handle was grabbed
        origin: SelectionRect,
    },
}

#[derive(Debug, Clone)]
pub struct SelectionModel {
    rect: Option<SelectionRect>,
    state: DragState,
    handle_half_width: f32,
    priority: HandlePriority,
}

impl Default for SelectionModel {
    fn default() -> Self {
        Self::new(HANDLE_HALF_WIDTH, HandlePriority::FirstMatch)
    }
}

impl SelectionModel {
    pub fn new(handle_half_width: f32, priority: HandlePriority) -> Self {
        Self {
            rect: None,
            state: DragState::Idle,
            handle_half_width,
            priority,
        }
    }

    pub fn rect(&self) -> Option<SelectionRect> {
        self.rect
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state != DragState::Idle
    }

    pub fn active_handle(&self) -> Option<Handle> {
        match self.state {
            DragState::Resizing { handle, .. } => Some(handle),
            _ => None,
        }
    }

    /// Handle midpoints of the current rectangle
    pub fn handles(&self) -> Option<HandleSet> {
        self.rect.as_ref().map(HandleSet::from_rect)
    }

    /// Which handle, if any, a press at `pos` would grab
    pub fn handle_at(&self, pos: Pos2) -> Option<Handle> {
        self.handles()?.hit_test(pos, self.handle_half_width, self.priority)
    }

    /// Replaces the rectangle outright, abandoning any drag. Used when replaying history.
    pub fn set_rect(&mut self, rect: Option<SelectionRect>) {
        self.rect = rect;
        self.state = DragState::Idle;
    }

    pub fn clear(&mut self) {
        self.set_rect(None);
    }

    /// Pointer press: grab a handle or start a new zero-sized rectangle
    pub fn begin(&mut self, pos: Pos2) {
        match (self.rect, self.handle_at(pos)) {
            (Some(origin), Some(handle)) => {
                log::debug!("Grabbed {} handle at {:?}", handle.as_str(), pos);
                self.state = DragState::Resizing { handle, origin };
            }
            _ => {
                log::debug!("Starting new selection at {:?}", pos);
                self.rect = Some(SelectionRect::at_point(pos));
                self.state = DragState::Creating;
            }
        }
    }

    /// Pointer drag. Returns false when no drag is in progress and nothing changed.
    pub fn update(&mut self, pos: Pos2) -> bool {
        let Some(rect) = self.rect.as_mut() else {
            return false;
        };
        match self.state {
            DragState::Idle => return false,
            DragState::Creating => {
                rect.end_x = pos.x;
                rect.end_y = pos.y;
            }
            DragState::Resizing { handle, .. } => match handle {
                Handle::Top => rect.start_y = pos.y,
                Handle::Bottom => rect.end_y = pos.y,
                Handle::Left => rect.start_x = pos.x,
                Handle::Right => rect.end_x = pos.x,
            },
        }
        log::trace!("Selection now {:?}", rect);
        true
    }

    /// Pointer release: applies the final position and returns the rectangle to commit
    pub fn end(&mut self, pos: Pos2) -> Option<SelectionRect> {
        if !self.update(pos) {
            return None;
        }
        self.state = DragState::Idle;
        self.rect
    }

    /// Abandons the drag in progress, restoring what was there before the press
    pub fn cancel(&mut self) {
        match self.state {
            DragState::Idle => {}
            DragState::Creating => self.rect = None,
            DragState::Resizing { origin, .. } => self.rect = Some(origin),
        }
        self.state = DragState::Idle;
    }
}
