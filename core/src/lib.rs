#![no_std]

extern crate alloc;

use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use action::*;
pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod action;
mod board;
mod cell;
mod error;
mod generator;
mod types;

/// Whether mine placement may land on the corner castles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CastlePolicy {
    /// Castles never hold mines, placement scans past them.
    Guarded,
    /// Placement may turn a castle into a mine, the castle marker stays on the cell.
    Overwritable,
}

impl Default for CastlePolicy {
    fn default() -> Self {
        Self::Guarded
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
    #[serde(default)]
    pub castle_policy: CastlePolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((24, 24), 48)
    }
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self {
            size,
            mines,
            castle_policy: CastlePolicy::Guarded,
        }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// Clamps the size to at least one cell per axis and the mines to what fits.
    pub fn clamped((size_x, size_y): Coord2, mines: CellCount) -> Self {
        let mut config = Self::new_unchecked((size_x.max(1), size_y.max(1)), 0);
        config.mines = mines.min(config.capacity());
        config
    }

    pub fn with_castle_policy(mut self, castle_policy: CastlePolicy) -> Result<Self> {
        self.castle_policy = castle_policy;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        if self.mines > self.capacity() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Number of distinct castle cells, the corners coincide on a 1x1 board.
    pub const fn castle_cells(&self) -> CellCount {
        match self.total_cells() {
            0 => 0,
            1 => 1,
            _ => 2,
        }
    }

    /// Number of cells mine placement may use.
    pub const fn capacity(&self) -> CellCount {
        match self.castle_policy {
            CastlePolicy::Guarded => self.total_cells().saturating_sub(self.castle_cells()),
            CastlePolicy::Overwritable => self.total_cells(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
    castle_policy: CastlePolicy,
}

impl MineLayout {
    /// Empty layout for `config`, mines are placed by a [`MinefieldGenerator`].
    pub fn empty(config: &GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            mine_mask: Array2::default(config.size.to_nd_index()),
            mine_count: 0,
            castle_policy: config.castle_policy,
        })
    }

    pub fn from_mine_coords(
        size: Coord2,
        mine_coords: &[Coord2],
        castle_policy: CastlePolicy,
    ) -> Result<Self> {
        let config = GameConfig::new_unchecked(size, 0).with_castle_policy(castle_policy)?;
        let mut layout = Self::empty(&config)?;

        for &coords in mine_coords {
            let coords = layout.validate_coords(coords)?;
            if layout[coords] {
                continue;
            }
            if !layout.can_hold_mine(coords) {
                return Err(GameError::TooManyMines);
            }
            layout.place_mine(coords);
        }

        Ok(layout)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            size: self.size(),
            mines: self.mine_count,
            castle_policy: self.castle_policy,
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.mine_mask.dim();
        (
            x.try_into().unwrap_or(Coord::MAX),
            y.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn castle_policy(&self) -> CastlePolicy {
        self.castle_policy
    }

    pub fn castle_at(&self, coords: Coord2) -> Option<CastleOwner> {
        CastleOwner::at(coords, self.size())
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        let (x, y) = self.size();
        mult(x, y)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Whether placement may put a mine at `coords` under this layout's castle policy.
    pub fn can_hold_mine(&self, coords: Coord2) -> bool {
        if self[coords] {
            return false;
        }
        match self.castle_policy {
            CastlePolicy::Guarded => self.castle_at(coords).is_none(),
            CastlePolicy::Overwritable => true,
        }
    }

    pub(crate) fn place_mine(&mut self, coords: Coord2) {
        if !self[coords] {
            self[coords] = true;
            self.mine_count += 1;
        }
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbours
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.mine_mask[(x as usize, y as usize)]
    }
}

impl IndexMut<Coord2> for MineLayout {
    fn index_mut(&mut self, (x, y): Coord2) -> &mut Self::Output {
        &mut self.mine_mask[(x as usize, y as usize)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
