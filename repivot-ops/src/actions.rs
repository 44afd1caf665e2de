//! Named action registry
//!
//! Front ends address the origin operations through stable string ids
//! rather than calling the batch functions directly. Each registered
//! action pairs an id with its [`OriginMode`] and borrows the mode's
//! label for menus and undo steps.

use repivot_core::{Result, Scene};

use crate::origin::{relocate_origins, BatchReport, OriginMode};

/// A registered batch action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    /// Stable identifier, e.g. `origin-to-bottom`
    pub id: &'static str,
    pub mode: OriginMode,
}

impl Action {
    /// Human-readable label for menus
    pub fn label(&self) -> &'static str {
        self.mode.label()
    }

    /// Run this action against `scene`
    pub fn run(&self, scene: &mut Scene) -> Result<BatchReport> {
        relocate_origins(scene, self.mode)
    }
}

/// Every registered action, in menu order
pub const ACTIONS: &[Action] = &[
    Action {
        id: "origin-to-bottom",
        mode: OriginMode::Bottom,
    },
    Action {
        id: "origin-to-top",
        mode: OriginMode::Top,
    },
];

/// Look up an action by its id
pub fn find(id: &str) -> Option<&'static Action> {
    ACTIONS.iter().find(|action| action.id == id)
}

/// The action that runs `mode`
pub fn for_mode(mode: OriginMode) -> &'static Action {
    match mode {
        OriginMode::Bottom => &ACTIONS[0],
        OriginMode::Top => &ACTIONS[1],
    }
}
