//! Linear undo/redo history of paired forward/reverse edits.
//!
//! Every change to an encounter is recorded as a [`Memento`]: the edit that
//! performs it and the edit that exactly reverts it, both captured as plain
//! values when the change is made. Submitting applies the forward edit
//! immediately. Undo and redo walk the two stacks; any fresh submission
//! discards the redo stack.

use thiserror::Error;

/// State that can apply edits of type `E`.
pub trait Apply<E> {
    /// Apply one edit, returning whether any observable state changed.
    fn apply(&mut self, edit: &E) -> bool;
}

/// One undoable change.
#[derive(Clone, Debug, PartialEq)]
pub struct Memento<E> {
    /// Name of the command that produced it
    pub label: &'static str,
    pub forward: E,
    pub reverse: E,
}

impl<E> Memento<E> {
    pub fn new(label: &'static str, forward: E, reverse: E) -> Self {
        Self {
            label,
            forward,
            reverse,
        }
    }
}

/// Raised when walking an empty stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("Nothing to undo")]
    EmptyUndo,
    #[error("Nothing to redo")]
    EmptyRedo,
}

/// Result of submitting, undoing or redoing one memento.
#[derive(Debug)]
pub struct Applied<'a, E> {
    pub memento: &'a Memento<E>,
    /// Whether the applied edit changed observable state
    pub changed: bool,
}

/// Undo/redo stacks.
#[derive(Clone, Debug)]
pub struct History<E> {
    /// Undoable mementos, most recent last
    past: Vec<Memento<E>>,
    /// Redoable mementos, most recently undone last
    future: Vec<Memento<E>>,
    /// Oldest entries are dropped past this length
    max_len: Option<usize>,
    /// Whether anything was applied since the last save
    dirty: bool,
}

impl<E> Default for History<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> History<E> {
    /// Unbounded history.
    pub fn new() -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            max_len: None,
            dirty: false,
        }
    }

    /// History that keeps at most `max_len` undoable entries.
    pub fn with_limit(max_len: usize) -> Self {
        Self {
            max_len: Some(max_len.max(1)),
            ..Self::new()
        }
    }

    /// Apply the forward edit and record the memento.
    pub fn submit<T: Apply<E>>(&mut self, target: &mut T, memento: Memento<E>) -> Applied<'_, E> {
        let changed = target.apply(&memento.forward);
        self.future.clear();
        self.past.push(memento);
        if let Some(max_len) = self.max_len {
            if self.past.len() > max_len {
                let excess = self.past.len() - max_len;
                self.past.drain(..excess);
            }
        }
        self.dirty = true;
        Applied {
            memento: self.last_past(),
            changed,
        }
    }

    /// Revert the most recent memento and move it to the redo stack.
    pub fn undo<T: Apply<E>>(&mut self, target: &mut T) -> Result<Applied<'_, E>, HistoryError> {
        let memento = self.past.pop().ok_or(HistoryError::EmptyUndo)?;
        let changed = target.apply(&memento.reverse);
        self.future.push(memento);
        self.dirty = true;
        Ok(Applied {
            memento: self.last_future(),
            changed,
        })
    }

    /// Re-apply the most recently undone memento.
    pub fn redo<T: Apply<E>>(&mut self, target: &mut T) -> Result<Applied<'_, E>, HistoryError> {
        let memento = self.future.pop().ok_or(HistoryError::EmptyRedo)?;
        let changed = target.apply(&memento.forward);
        self.past.push(memento);
        self.dirty = true;
        Ok(Applied {
            memento: self.last_past(),
            changed,
        })
    }

    pub fn undoable_count(&self) -> usize {
        self.past.len()
    }

    pub fn redoable_count(&self) -> usize {
        self.future.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Label of the memento `undo` would revert.
    pub fn undo_label(&self) -> Option<&'static str> {
        self.past.last().map(|m| m.label)
    }

    /// Label of the memento `redo` would re-apply.
    pub fn redo_label(&self) -> Option<&'static str> {
        self.future.last().map(|m| m.label)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.dirty = false;
    }

    fn last_past(&self) -> &Memento<E> {
        // only called right after a push
        &self.past[self.past.len() - 1]
    }

    fn last_future(&self) -> &Memento<E> {
        &self.future[self.future.len() - 1]
    }
}
