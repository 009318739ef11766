//! History module: Undo/redo list and save-point tracking.
//!
//! The history is an arena of [`Action`]s whose vector order is the link
//! order: the action before id `i` is `i - 1`, the one after is `i + 1`.
//! `current` names the last applied action (`None` when every action has
//! been undone).
//!
//! ```text
//!   [A0] <-> [A1] <-> [A2] <-> [A3]
//!                      ^current  ^redo branch
//! ```
//!
//! Recording a new action truncates the redo branch. Cleanliness is tracked
//! by remembering which position was current at the last save, so undoing
//! past a save and redoing back to it reads clean again.

mod action;

pub use action::{split_lines, Action};

use crate::error::HistoryError;

/// Index of an action in the history arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActionId(usize);

impl ActionId {
    /// Position in the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Where the document last matched what is on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavePoint {
    /// Saved while `current` was this value.
    At(Option<ActionId>),
    /// Never saved, or the saved state was discarded by a new edit.
    Unreachable,
}

/// Linear undo/redo history for one document.
#[derive(Debug, Clone)]
pub struct UndoRedoList {
    actions: Vec<Action>,
    current: Option<ActionId>,
    saved: SavePoint,
}

impl Default for UndoRedoList {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoRedoList {
    /// Create an empty history that is clean.
    pub const fn new() -> Self {
        Self {
            actions: Vec::new(),
            current: None,
            saved: SavePoint::At(None),
        }
    }

    /// Number of actions stored, including the redo branch.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The last applied action.
    pub const fn current(&self) -> Option<ActionId> {
        self.current
    }

    /// The recorded save point.
    pub const fn save_point(&self) -> SavePoint {
        self.saved
    }

    /// Look up an action.
    pub fn get(&self, id: ActionId) -> Option<&Action> {
        self.actions.get(id.0)
    }

    /// Action before `id`.
    pub fn prev(&self, id: ActionId) -> Option<ActionId> {
        id.0.checked_sub(1).map(ActionId)
    }

    /// Action after `id`.
    pub fn next(&self, id: ActionId) -> Option<ActionId> {
        let next = id.0 + 1;
        (next < self.actions.len()).then_some(ActionId(next))
    }

    /// Id of the first action that `redo` would apply.
    fn redo_slot(&self) -> usize {
        self.current.map_or(0, |id| id.0 + 1)
    }

    /// Record a new applied action after `current`.
    ///
    /// Every action after `current` is discarded first, so a redo is no
    /// longer possible once a new edit follows an undo.
    pub fn record(&mut self, action: Action) -> ActionId {
        let slot = self.redo_slot();
        if let SavePoint::At(Some(saved)) = self.saved {
            if saved.0 >= slot {
                self.saved = SavePoint::Unreachable;
            }
        }
        let discarded = self.actions.len() - slot;
        self.actions.truncate(slot);
        self.actions.push(action);

        let id = ActionId(slot);
        self.current = Some(id);
        tracing::trace!(id = slot, discarded, "action recorded");
        id
    }

    /// The action `undo` would revert, without moving.
    pub fn peek_undo(&self) -> Option<&Action> {
        self.current.and_then(|id| self.actions.get(id.0))
    }

    /// The action `redo` would reapply, without moving.
    pub fn peek_redo(&self) -> Option<&Action> {
        self.actions.get(self.redo_slot())
    }

    /// Step back over the current action and return it.
    ///
    /// The caller applies the returned action's inverse to the document.
    pub fn undo(&mut self) -> Result<&Action, HistoryError> {
        let id = self.current.ok_or(HistoryError::AtOldest)?;
        self.current = self.prev(id);
        tracing::trace!(id = id.0, "undo");
        Ok(&self.actions[id.0])
    }

    /// Step forward to the next action and return it.
    ///
    /// The caller applies the returned action to the document.
    pub fn redo(&mut self) -> Result<&Action, HistoryError> {
        let slot = self.redo_slot();
        if slot >= self.actions.len() {
            return Err(HistoryError::AtNewest);
        }
        self.current = Some(ActionId(slot));
        tracing::trace!(id = slot, "redo");
        Ok(&self.actions[slot])
    }

    /// Remember the current position as matching the file on disk.
    pub fn mark_saved(&mut self) {
        self.saved = SavePoint::At(self.current);
    }

    /// Forget any save point; the document reads dirty until saved.
    pub fn mark_unsaved(&mut self) {
        self.saved = SavePoint::Unreachable;
    }

    /// Whether the document matches its last save.
    pub fn is_clean(&self) -> bool {
        self.saved == SavePoint::At(self.current)
    }

    /// Drop all actions and start clean at the current document state.
    pub fn clear(&mut self) {
        self.actions.clear();
        self.current = None;
        self.saved = SavePoint::At(None);
    }
}
