use serde::{Deserialize, Serialize};

use crate::Coord2;

/// Category of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    /// No cell, returned for coordinates off the board. Never stored in the grid.
    Invalid,
    Empty,
    Number,
    Mine,
    Castle,
}

impl Default for CellKind {
    fn default() -> Self {
        Self::Invalid
    }
}

/// Owner of one of the two corner castles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleOwner {
    /// Castle at the origin corner `(0, 0)`.
    First,
    /// Castle at the far corner `(width - 1, height - 1)`.
    Second,
}

impl CastleOwner {
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    /// Owner of the castle at `coords`, if that coordinate is a castle corner.
    ///
    /// On a 1x1 board both corners coincide and the origin owner wins.
    pub fn at(coords: Coord2, (size_x, size_y): Coord2) -> Option<Self> {
        if coords == (0, 0) {
            Some(Self::First)
        } else if Some(coords) == size_x.checked_sub(1).zip(size_y.checked_sub(1)) {
            Some(Self::Second)
        } else {
            None
        }
    }
}

/// Full state of one grid position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub position: Coord2,
    pub kind: CellKind,
    /// Only meaningful for [`CellKind::Number`], zero otherwise.
    pub adjacent_mines: u8,
    pub exploded: bool,
    pub revealed: bool,
    pub flagged: bool,
    pub castle: Option<CastleOwner>,
}

impl Cell {
    /// Sentinel handed out for off-board queries.
    pub const INVALID: Self = Self {
        position: (0, 0),
        kind: CellKind::Invalid,
        adjacent_mines: 0,
        exploded: false,
        revealed: false,
        flagged: false,
        castle: None,
    };

    pub(crate) fn seeded(position: Coord2, castle: Option<CastleOwner>) -> Self {
        Self {
            position,
            kind: if castle.is_some() {
                CellKind::Castle
            } else {
                CellKind::Empty
            },
            castle,
            ..Self::INVALID
        }
    }

    pub const fn is_valid(&self) -> bool {
        !matches!(self.kind, CellKind::Invalid)
    }

    pub const fn is_mine(&self) -> bool {
        matches!(self.kind, CellKind::Mine)
    }

    pub const fn is_castle_marker(&self) -> bool {
        self.castle.is_some()
    }

    pub fn castle_owner_index(&self) -> Option<usize> {
        self.castle.map(CastleOwner::index)
    }
}
