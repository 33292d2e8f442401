mod history;

use std::path::PathBuf;

use thiserror::Error;

use crate::error::{LoadError, SaveError};
use crate::state::EditorContext;

pub use history::{SelectionHistory, SelectionSnapshot};

/// Result type for command operations
pub type CommandResult = Result<(), CommandError>;

/// Errors that can occur during command execution
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Save(#[from] SaveError),
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
}

/// User-level operations, forwarded from the toolbar, keyboard shortcuts and dialogs
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Open an image file, replacing the current one
    Load(PathBuf),
    /// Export the current crop
    Save(PathBuf),
    Undo,
    Redo,
    /// Drop the current selection (undoable), or abort a drag in progress
    ClearSelection,
}

impl Command {
    /// Execute the command against the editor context
    pub fn execute(&self, ctx: &mut EditorContext) -> CommandResult {
        log::debug!("Executing {:?}", self);
        match self {
            Command::Load(path) => ctx.load(path)?,
            Command::Save(path) => {
                ctx.save(path)?;
            }
            Command::Undo => {
                if !ctx.undo() {
                    return Err(CommandError::NothingToUndo);
                }
            }
            Command::Redo => {
                if !ctx.redo() {
                    return Err(CommandError::NothingToRedo);
                }
            }
            Command::ClearSelection => ctx.clear_selection(),
        }
        Ok(())
    }

    /// Name shown in menus and logs
    pub fn label(&self) -> &'static str {
        match self {
            Command::Load(_) => "Open",
            Command::Save(_) => "Save",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::ClearSelection => "Clear selection",
        }
    }
}
