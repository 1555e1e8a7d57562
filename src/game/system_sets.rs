//! System organization using SystemSets
//!
//! Defines execution order for game systems. Input intents are drained before
//! the clock tick commits, so a move's ledger update and side-switch are never
//! interleaved with a tick on the same frame.

use bevy::prelude::*;

/// System execution order for game logic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum GameSystems {
    /// Intent handling (square clicks, drops, undo/reset, clock controls)
    Input,

    /// Time-driven state updates (clock tick, flag fall)
    Execution,
}
