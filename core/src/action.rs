use serde::{Deserialize, Serialize};

use crate::*;

/// A player request against a board, the same for local and remote input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Reveal { x: SignedCoord, y: SignedCoord },
    Flag { x: SignedCoord, y: SignedCoord },
}

impl Action {
    pub const fn reveal((x, y): Point) -> Self {
        Self::Reveal { x, y }
    }

    pub const fn flag((x, y): Point) -> Self {
        Self::Flag { x, y }
    }

    pub const fn point(self) -> Point {
        match self {
            Self::Reveal { x, y } | Self::Flag { x, y } => (x, y),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    Reveal(RevealOutcome),
    Flag(MarkOutcome),
}

impl ActionOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Reveal(outcome) => outcome.has_update(),
            Self::Flag(outcome) => outcome.has_update(),
        }
    }
}

impl Board {
    pub fn apply(&mut self, action: Action) -> ActionOutcome {
        match action {
            Action::Reveal { x, y } => ActionOutcome::Reveal(self.reveal((x, y))),
            Action::Flag { x, y } => ActionOutcome::Flag(self.toggle_flag((x, y))),
        }
    }
}
