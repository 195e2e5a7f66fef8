//! Undo log of coalesced paint operations.

use crate::grid::{CellIndex, CellState, HexGrid};
use crate::tools::ToolKind;
use std::collections::VecDeque;

/// Maximum number of operations kept by default.
pub const MAX_UNDO_HISTORY: usize = 20;

/// A single cell change and the state it replaced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edit {
    pub cell: CellIndex,
    pub previous: CellState,
}

/// A group of edits undone as one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    tool: ToolKind,
    edits: Vec<Edit>,
}

impl Operation {
    /// Open an empty operation for the given tool.
    pub fn new(tool: ToolKind) -> Self {
        Self {
            tool,
            edits: Vec::new(),
        }
    }

    /// Record that `cell` held `previous` before this operation touched it.
    pub fn record(&mut self, cell: CellIndex, previous: CellState) {
        self.edits.push(Edit { cell, previous });
    }

    /// Tool active when the operation was opened.
    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Restore every touched cell to its state before the operation.
    ///
    /// Edits are replayed newest first so a cell touched twice ends up in
    /// the state recorded by its first edit.
    pub fn revert(&self, grid: &mut HexGrid) {
        for edit in self.edits.iter().rev() {
            grid.set_paint(edit.cell, edit.previous);
        }
    }
}

/// Bounded LIFO of operations; the oldest entry is dropped on overflow.
#[derive(Debug, Clone)]
pub struct UndoLog {
    entries: VecDeque<Operation>,
    capacity: usize,
}

impl Default for UndoLog {
    fn default() -> Self {
        Self::new(MAX_UNDO_HISTORY)
    }
}

impl UndoLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Store a finished operation. Empty operations are discarded.
    /// Returns true if the operation was stored.
    pub fn push(&mut self, operation: Operation) -> bool {
        if operation.is_empty() {
            return false;
        }
        self.entries.push_back(operation);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            log::debug!("Undo log full, dropped oldest operation");
        }
        true
    }

    /// Revert the most recent operation.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self, grid: &mut HexGrid) -> bool {
        match self.entries.pop_back() {
            Some(operation) => {
                operation.revert(grid);
                log::info!(
                    "Undid {:?} operation ({} edits)",
                    operation.tool(),
                    operation.len()
                );
                true
            }
            None => false,
        }
    }

    /// The operation `undo` would revert next.
    pub fn peek(&self) -> Option<&Operation> {
        self.entries.back()
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
