use crate::geometry::SelectionRect;

/// An immutable record of one selection state. `None` means "no selection".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionSnapshot {
    rect: Option<SelectionRect>,
}

impl SelectionSnapshot {
    pub fn new(rect: Option<SelectionRect>) -> Self {
        Self { rect }
    }

    pub fn empty() -> Self {
        Self { rect: None }
    }

    pub fn rect(&self) -> Option<SelectionRect> {
        self.rect
    }
}

impl From<SelectionRect> for SelectionSnapshot {
    fn from(rect: SelectionRect) -> Self {
        Self::new(Some(rect))
    }
}

/// Linear undo/redo over selection states.
///
/// `undo_stack`, `current` and `redo_stack` together spell out the reachable history:
/// undo pops towards older states, redo towards newer ones, and committing while
/// there is redo history throws that history away.
#[derive(Debug, Clone, Default)]
pub struct SelectionHistory {
    /// Older states, most recent last
    undo_stack: Vec<SelectionSnapshot>,
    /// Undone states, most recently undone last
    redo_stack: Vec<SelectionSnapshot>,
    current: SelectionSnapshot,
}

impl SelectionHistory {
    /// Creates a new empty history whose current state is "no selection"
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> SelectionSnapshot {
        self.current
    }

    /// Records a new state, moving the old current onto the undo stack
    pub fn commit(&mut self, snapshot: impl Into<SelectionSnapshot>) {
        let snapshot = snapshot.into();
        self.undo_stack.push(std::mem::replace(&mut self.current, snapshot));
        if !self.redo_stack.is_empty() {
            log::debug!("Discarding {} redo entries", self.redo_stack.len());
            self.redo_stack.clear();
        }
    }

    /// Steps back one state and returns the new current, or `None` if there is nothing to undo
    pub fn undo(&mut self) -> Option<SelectionSnapshot> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(std::mem::replace(&mut self.current, previous));
        Some(self.current)
    }

    /// Steps forward one state and returns the new current, or `None` if there is nothing to redo
    pub fn redo(&mut self) -> Option<SelectionSnapshot> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(std::mem::replace(&mut self.current, next));
        Some(self.current)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_stack(&self) -> &[SelectionSnapshot] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[SelectionSnapshot] {
        &self.redo_stack
    }

    /// Forgets everything, e.g. when a new image is loaded
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current = SelectionSnapshot::empty();
    }
}
