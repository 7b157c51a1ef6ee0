//! Undoable encounter commands.
//!
//! Every command is a method on [`Encounter`](crate::core::Encounter) that
//! checks its preconditions, captures the current values it is about to
//! change and submits a forward/reverse pair of [`Edit`]s to the history.
//! A command whose preconditions fail is logged and skipped; it never
//! returns an error to the caller.

mod command;
mod edit;
mod entity_commands;
mod scene_commands;
mod transform_commands;

pub use command::{CommandError, CommandResult};
pub use edit::Edit;
