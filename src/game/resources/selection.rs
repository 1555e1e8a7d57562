//! Selection resource for tracking the selected square

use crate::game::engine::MoveTarget;
use bevy::prelude::*;
use shakmaty::Square;

/// Resource storing the currently selected square and its legal targets.
///
/// At most one square is selected at a time; `targets` drives the
/// move-highlight display and is always derived from the selected square.
#[derive(Resource, Debug, Default)]
pub struct Selection {
    pub selected: Option<Square>,
    pub targets: Vec<MoveTarget>,
}

impl Selection {
    pub fn select(&mut self, square: Square, targets: Vec<MoveTarget>) {
        self.selected = Some(square);
        self.targets = targets;
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.targets.clear();
    }

    pub fn is_selected(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_target(&self, square: Square) -> bool {
        self.targets.iter().any(|t| t.to == square)
    }
}
