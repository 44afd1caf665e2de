//! Undo history for scene edits
//!
//! Each completed batch of object edits is recorded as one [`UndoStep`], no
//! matter how many objects it touched, so a whole batch undoes as a single
//! step. Steps hold full snapshots of the edited objects' transform and
//! data; undo and redo swap the snapshot with the live state.

use std::mem;

use crate::scene::{ObjectData, ObjectId, SceneObject};
use crate::transform::Transform3D;

/// Undo steps kept before the oldest is discarded
const DEFAULT_LIMIT: usize = 32;

/// Snapshot of one object's mutable state
#[derive(Debug, Clone)]
pub struct ObjectState {
    pub transform: Transform3D,
    pub data: ObjectData,
}

/// One undoable edit: a label and the prior state of every touched object
#[derive(Debug, Clone)]
pub struct UndoStep {
    label: String,
    entries: Vec<(ObjectId, ObjectState)>,
}

impl UndoStep {
    /// Create an empty step
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            entries: Vec::new(),
        }
    }

    /// Record an object's prior state; later records for the same id are
    /// ignored so the step always restores the state before the batch
    pub fn record(&mut self, id: ObjectId, state: ObjectState) {
        if !self.entries.iter().any(|(entry_id, _)| *entry_id == id) {
            self.entries.push((id, state));
        }
    }

    /// Human-readable label for this step
    pub fn label(&self) -> &str {
        &self.label
    }

    /// True when no object state has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of objects this step covers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Exchange recorded state with the live objects, turning an undo step
    /// into the matching redo step (and vice versa)
    pub(crate) fn swap_with(&mut self, objects: &mut [SceneObject]) {
        for (id, state) in &mut self.entries {
            if let Some(object) = objects.get_mut(id.index()) {
                mem::swap(&mut object.transform, &mut state.transform);
                mem::swap(&mut object.data, &mut state.data);
            }
        }
    }
}

/// Bounded undo/redo stacks
#[derive(Debug, Clone)]
pub struct History {
    undo: Vec<UndoStep>,
    redo: Vec<UndoStep>,
    limit: usize,
}

impl History {
    /// Record a fresh edit; clears any redo steps
    pub(crate) fn record(&mut self, step: UndoStep) {
        self.redo.clear();
        self.undo.push(step);
        if self.undo.len() > self.limit {
            self.undo.remove(0);
        }
    }

    pub(crate) fn pop_undo(&mut self) -> Option<UndoStep> {
        self.undo.pop()
    }

    pub(crate) fn pop_redo(&mut self) -> Option<UndoStep> {
        self.redo.pop()
    }

    /// Re-shelve a step that undo just applied
    pub(crate) fn stash_redo(&mut self, step: UndoStep) {
        self.redo.push(step);
    }

    /// Re-shelve a step that redo just applied; does not clear redo
    pub(crate) fn stash_undo(&mut self, step: UndoStep) {
        self.undo.push(step);
    }

    /// Number of steps that can be undone
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of steps that can be redone
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            limit: DEFAULT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::TriangleMesh;

    fn state() -> ObjectState {
        ObjectState {
            transform: Transform3D::identity(),
            data: ObjectData::Mesh(TriangleMesh::new()),
        }
    }

    #[test]
    fn step_records_each_object_once() {
        let mut step = UndoStep::new("edit");
        let id = ObjectId::new(0);

        step.record(id, state());
        step.record(id, state());

        assert_eq!(step.len(), 1);
    }

    #[test]
    fn recording_clears_redo() {
        let mut history = History::default();
        history.record(UndoStep::new("a"));

        let step = history.pop_undo().unwrap();
        history.stash_redo(step);
        assert_eq!(history.redo_depth(), 1);

        history.record(UndoStep::new("b"));
        assert_eq!(history.redo_depth(), 0);
        assert_eq!(history.undo_depth(), 1);
    }

    #[test]
    fn history_discards_oldest_beyond_limit() {
        let mut history = History::default();
        for i in 0..DEFAULT_LIMIT + 4 {
            history.record(UndoStep::new(format!("edit {i}")));
        }

        assert_eq!(history.undo_depth(), DEFAULT_LIMIT);
        let newest = history.pop_undo().unwrap();
        assert_eq!(newest.label(), format!("edit {}", DEFAULT_LIMIT + 3));
    }
}
