//! Command error types.

use thiserror::Error;

use crate::core::{EntityId, HistoryError};

/// Result type for building a command's edits.
pub type CommandResult<T> = Result<T, CommandError>;

/// Reasons a command is skipped.
///
/// None of these reach callers of the command methods: they are reported
/// through the log and the command returns `false` without touching the
/// scene or the history.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CommandError {
    #[error("{0} not found")]
    EntityNotFound(EntityId),
    #[error("{0} is already selected")]
    AlreadySelected(EntityId),
    #[error("Nothing is selected")]
    NothingSelected,
    #[error("{0} is not a creature")]
    NotACreature(EntityId),
    #[error("Grid cannot go past {0} cells")]
    GridLimit(u32),
    #[error("{0} cannot move further")]
    PositionLimit(EntityId),
    #[error("Factor {factor} must be {expected}")]
    FactorOutOfRange {
        factor: f64,
        expected: &'static str,
    },
    #[error(transparent)]
    History(#[from] HistoryError),
}

impl CommandError {
    /// Log the skipped command.
    pub fn report(&self, command: &str) {
        match self {
            CommandError::FactorOutOfRange { .. } => {
                log::warn!("{} skipped: {}", command, self)
            }
            _ => log::info!("{} skipped: {}", command, self),
        }
    }
}
