use alloc::vec::Vec;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Ready,
    Active,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Ready
    }
}

/// The board engine: owns every cell and resolves reveal and flag actions.
///
/// Off-board coordinates never fail, they read as [`Cell::INVALID`] and make actions no-ops.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: GameConfig,
    cells: Array2<Cell>,
    revealed_safe: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Starts a fresh game on a randomly generated board.
    pub fn new_game(config: GameConfig, seed: u64) -> Result<Self> {
        Self::generate(config, ScanMinefieldGenerator::new(seed))
    }

    pub fn generate(config: GameConfig, generator: impl MinefieldGenerator) -> Result<Self> {
        Ok(Self::new(generator.generate(config)?))
    }

    /// Seeds cells for `mine_layout` and computes adjacency counts.
    pub fn new(mine_layout: MineLayout) -> Self {
        let config = mine_layout.game_config();
        let cells = Array2::from_shape_fn(config.size.to_nd_index(), |(x, y)| {
            // both fit in Coord since they come from a Coord2 shape
            let coords = (x as Coord, y as Coord);
            let mut cell = Cell::seeded(coords, mine_layout.castle_at(coords));
            if mine_layout.contains_mine(coords) {
                cell.kind = CellKind::Mine;
            } else if cell.kind != CellKind::Castle {
                let count = mine_layout.adjacent_mine_count(coords);
                if count > 0 {
                    cell.kind = CellKind::Number;
                    cell.adjacent_mines = count;
                }
            }
            cell
        });

        log::debug!(
            "New {}x{} board with {} mines",
            config.size.0,
            config.size.1,
            config.mines
        );

        Self {
            config,
            cells,
            revealed_safe: Saturating(0),
            flagged_count: Saturating(0),
            status: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flagged_count.0 as isize)
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe.0
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Full state at `point`, or [`Cell::INVALID`] when it lies off the board.
    pub fn cell(&self, point: Point) -> Cell {
        self.resolve(point)
            .map_or(Cell::INVALID, |coords| self.cells[coords.to_nd_index()])
    }

    pub(crate) fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    /// Every cell on the board, in storage order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// Castle cell of `owner`. Both owners share the only cell of a 1x1 board.
    pub fn castle(&self, owner: CastleOwner) -> Cell {
        let (size_x, size_y) = self.size();
        let coords = match owner {
            CastleOwner::First => (0, 0),
            CastleOwner::Second => (size_x - 1, size_y - 1),
        };
        self.cell_at(coords)
    }

    pub fn toggle_flag(&mut self, point: Point) -> MarkOutcome {
        let Some(coords) = self.resolve(point) else {
            return MarkOutcome::NoChange;
        };
        if self.is_game_over() {
            return MarkOutcome::NoChange;
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.revealed {
            return MarkOutcome::NoChange;
        }

        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        self.mark_started();
        MarkOutcome::Changed
    }

    pub fn reveal(&mut self, point: Point) -> RevealOutcome {
        let Some(coords) = self.resolve(point) else {
            return RevealOutcome::NoChange;
        };
        if self.is_game_over() {
            return RevealOutcome::NoChange;
        }

        let cell = self.cells[coords.to_nd_index()];
        if cell.revealed || cell.flagged {
            return RevealOutcome::NoChange;
        }

        match cell.kind {
            CellKind::Mine => {
                self.explode(coords);
                return RevealOutcome::HitMine;
            }
            CellKind::Empty => self.flood_reveal(coords),
            _ => self.reveal_cell(coords),
        }

        if self.check_win() {
            RevealOutcome::Won
        } else {
            self.mark_started();
            RevealOutcome::Revealed
        }
    }

    fn reveal_cell(&mut self, coords: Coord2) {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.revealed {
            return;
        }
        cell.revealed = true;
        if !cell.is_mine() {
            self.revealed_safe += 1;
        }
    }

    /// Reveals the contiguous empty region around `start` plus its bordering cells.
    ///
    /// Walks orthogonal neighbours depth first with an explicit stack. Revealed cells and mines
    /// stop the walk, only empty cells spread it.
    fn flood_reveal(&mut self, start: Coord2) {
        let mut to_visit = Vec::from([start]);
        let mut visited: CellCount = 0;

        while let Some(coords) = to_visit.pop() {
            let cell = self.cells[coords.to_nd_index()];
            if cell.revealed || cell.is_mine() {
                continue;
            }

            self.reveal_cell(coords);
            visited += 1;

            if cell.kind == CellKind::Empty {
                let first = to_visit.len();
                to_visit.extend(self.cells.iter_orthogonal(coords));
                // popped in neighbour order
                to_visit[first..].reverse();
            }
        }

        log::debug!("Flood from {:?} revealed {} cells", start, visited);
    }

    fn explode(&mut self, coords: Coord2) {
        let cell = &mut self.cells[coords.to_nd_index()];
        cell.exploded = true;
        cell.revealed = true;
        self.triggered_mine = Some(coords);

        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine()) {
            cell.revealed = true;
        }

        self.end_game(false);
    }

    /// Ends the game once every safe cell is open, flagging all mines.
    fn check_win(&mut self) -> bool {
        if self.revealed_safe.0 < self.config.total_cells() - self.config.mines {
            return false;
        }

        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine()) {
            if !cell.flagged {
                cell.flagged = true;
                self.flagged_count += 1;
            }
        }

        self.end_game(true);
        true
    }

    fn mark_started(&mut self) {
        if self.status.is_ready() {
            self.status = GameStatus::Active;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.status.is_finished() {
            return;
        }

        self.status = if won {
            log::info!("Board cleared, game won");
            GameStatus::Won
        } else {
            log::info!("Mine hit at {:?}, game over", self.triggered_mine);
            GameStatus::Lost
        };
    }

    fn resolve(&self, point: Point) -> Option<Coord2> {
        resolve_point(point, self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::new(MineLayout::from_mine_coords(size, mines, CastlePolicy::Guarded).unwrap())
    }

    fn revealed(board: &Board) -> usize {
        board.cells().filter(|cell| cell.revealed).count()
    }

    #[test]
    fn seeds_castles_numbers_and_empties() {
        let board = board((4, 3), &[(1, 1)]);

        let origin = board.cell((0, 0));
        assert_eq!(origin.kind, CellKind::Castle);
        assert_eq!(origin.castle_owner_index(), Some(0));
        assert_eq!(origin.adjacent_mines, 0);

        let far = board.castle(CastleOwner::Second);
        assert_eq!(far.position, (3, 2));
        assert_eq!(far.kind, CellKind::Castle);
        assert_eq!(far.castle_owner_index(), Some(1));

        assert_eq!(board.cell((2, 2)).kind, CellKind::Number);
        assert_eq!(board.cell((2, 2)).adjacent_mines, 1);
        assert_eq!(board.cell((3, 0)).kind, CellKind::Empty);
        assert_eq!(board.cell((1, 1)).kind, CellKind::Mine);
        assert!(board.cells().all(|cell| !cell.revealed && !cell.flagged));
    }

    #[test]
    fn off_board_reads_invalid_and_ignores_actions() {
        let mut board = board((3, 3), &[(1, 1)]);

        assert_eq!(board.cell((-1, 0)), Cell::INVALID);
        assert_eq!(board.cell((0, 3)), Cell::INVALID);
        assert_eq!(board.reveal((3, 3)), RevealOutcome::NoChange);
        assert_eq!(board.toggle_flag((-5, 1)), MarkOutcome::NoChange);
        assert_eq!(board.status(), GameStatus::Ready);
    }

    #[test]
    fn reveal_number_opens_single_cell() {
        let mut board = board((3, 3), &[(1, 1)]);

        assert_eq!(board.reveal((1, 0)), RevealOutcome::Revealed);
        assert_eq!(revealed(&board), 1);
        assert_eq!(board.status(), GameStatus::Active);
    }

    #[test]
    fn reveal_mine_explodes_and_shows_all_mines() {
        let mut board = board((4, 4), &[(1, 1), (2, 2), (3, 0)]);

        assert_eq!(board.reveal((2, 2)), RevealOutcome::HitMine);
        assert!(board.is_game_over());
        assert_eq!(board.status(), GameStatus::Lost);
        assert_eq!(board.triggered_mine(), Some((2, 2)));

        let hit = board.cell((2, 2));
        assert!(hit.exploded && hit.revealed);
        assert!(!board.cell((1, 1)).exploded);
        assert!(
            board
                .cells()
                .filter(|cell| cell.is_mine())
                .all(|cell| cell.revealed)
        );
        assert!(!board.cell((0, 1)).revealed);
    }

    #[test]
    fn actions_after_game_over_are_ignored() {
        let mut board = board((3, 3), &[(1, 1)]);
        board.reveal((1, 1));

        assert_eq!(board.reveal((1, 0)), RevealOutcome::NoChange);
        assert_eq!(board.toggle_flag((1, 0)), MarkOutcome::NoChange);
        assert!(!board.cell((1, 0)).revealed);
    }

    #[test]
    fn empty_board_floods_everything_and_wins() {
        let mut board = board((3, 3), &[]);

        assert_eq!(board.reveal((1, 1)), RevealOutcome::Won);
        assert_eq!(revealed(&board), 9);
        assert!(board.is_game_over());
    }

    #[test]
    fn flood_stops_at_numbers_and_skips_mines() {
        let mut board = board((6, 1), &[(2, 0)]);

        assert_eq!(board.reveal((4, 0)), RevealOutcome::Revealed);
        assert!(board.cell((5, 0)).revealed);
        assert!(board.cell((4, 0)).revealed);
        assert!(board.cell((3, 0)).revealed);
        assert!(!board.cell((2, 0)).revealed);
        assert!(!board.cell((1, 0)).revealed);
        assert!(!board.cell((0, 0)).revealed);
    }

    #[test]
    fn flood_does_not_spread_diagonally() {
        // (1, 1) and (2, 2) are both empty but only touch at a corner
        let mut board = board((4, 4), &[(3, 0), (0, 3)]);
        assert_eq!(board.cell((2, 2)).kind, CellKind::Empty);

        assert_eq!(board.reveal((1, 1)), RevealOutcome::Revealed);
        assert!(board.cell((0, 0)).revealed);
        assert!(board.cell((2, 1)).revealed);
        assert!(board.cell((1, 2)).revealed);
        assert!(!board.cell((2, 2)).revealed);
        assert!(!board.cell((3, 1)).revealed);
    }

    #[test]
    fn flood_reveals_flagged_cells_and_keeps_the_flag() {
        let mut board = board((6, 1), &[(4, 0)]);
        board.toggle_flag((2, 0));
        assert_eq!(board.mines_left(), 0);

        assert_eq!(board.reveal((1, 0)), RevealOutcome::Revealed);
        let cell = board.cell((2, 0));
        assert!(cell.revealed && cell.flagged);
        assert!(board.cell((3, 0)).revealed);
        assert!(!board.cell((4, 0)).revealed);
        assert_eq!(board.mines_left(), 0);
        assert_eq!(board.toggle_flag((2, 0)), MarkOutcome::NoChange);
    }

    #[test]
    fn castle_is_revealed_but_does_not_spread_the_flood() {
        let mut board = board((4, 4), &[(2, 2)]);
        assert_eq!(board.cell((0, 1)).kind, CellKind::Empty);

        assert_eq!(board.reveal((1, 0)), RevealOutcome::Revealed);
        assert!(board.cell((0, 0)).revealed);
        assert!(board.cell((1, 1)).revealed);
        assert!(!board.cell((0, 1)).revealed);
        assert!(!board.cell((0, 2)).revealed);
    }

    #[test]
    fn reveal_twice_changes_nothing() {
        let mut board = board((5, 5), &[(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)]);
        assert_eq!(board.reveal((0, 2)), RevealOutcome::Revealed);
        let snapshot = board.clone();

        assert_eq!(board.reveal((0, 2)), RevealOutcome::NoChange);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn win_flags_every_mine() {
        let mut board = board((3, 1), &[(1, 0)]);

        assert_eq!(board.reveal((0, 0)), RevealOutcome::Revealed);
        assert!(!board.is_game_over());
        assert_eq!(board.reveal((2, 0)), RevealOutcome::Won);
        assert_eq!(board.status(), GameStatus::Won);
        assert!(board.cell((1, 0)).flagged);
        assert!(!board.cell((1, 0)).revealed);
        assert_eq!(board.mines_left(), 0);
    }

    #[test]
    fn one_safe_cell_missing_is_not_a_win() {
        let mut board = board((4, 1), &[(1, 0)]);

        board.reveal((0, 0));
        board.reveal((3, 0));
        assert_eq!(board.revealed_safe_count(), 2);
        assert!(!board.is_game_over());
        assert!(!board.cell((1, 0)).flagged);
    }

    #[test]
    fn flag_blocks_reveal_until_toggled_back() {
        let mut board = board((3, 3), &[(1, 1)]);

        assert_eq!(board.toggle_flag((1, 0)), MarkOutcome::Changed);
        assert_eq!(board.reveal((1, 0)), RevealOutcome::NoChange);
        let cell = board.cell((1, 0));
        assert!(cell.flagged && !cell.revealed);

        assert_eq!(board.toggle_flag((1, 0)), MarkOutcome::Changed);
        assert_eq!(board.reveal((1, 0)), RevealOutcome::Revealed);
        assert!(board.cell((1, 0)).revealed);
    }

    #[test]
    fn revealed_cells_cannot_be_flagged() {
        let mut board = board((3, 3), &[(1, 1)]);
        board.reveal((2, 1));

        assert_eq!(board.toggle_flag((2, 1)), MarkOutcome::NoChange);
        assert!(!board.cell((2, 1)).flagged);
    }

    #[test]
    fn single_cell_board_is_one_castle() {
        let mut board = board((1, 1), &[]);
        let cell = board.cell((0, 0));
        assert_eq!(cell.kind, CellKind::Castle);
        assert_eq!(cell.castle, Some(CastleOwner::First));

        assert_eq!(board.reveal((0, 0)), RevealOutcome::Won);
    }

    #[test]
    fn single_cell_mine_only_fits_overwritable_castles() {
        let config = GameConfig::new_unchecked((1, 1), 1);
        assert_eq!(Board::new_game(config, 0), Err(GameError::TooManyMines));

        let config = config.with_castle_policy(CastlePolicy::Overwritable).unwrap();
        let mut board = Board::new_game(config, 0).unwrap();
        let cell = board.cell((0, 0));
        assert_eq!(cell.kind, CellKind::Mine);
        assert_eq!(cell.castle, Some(CastleOwner::First));

        assert_eq!(board.reveal((0, 0)), RevealOutcome::HitMine);
    }

    #[test]
    fn new_game_is_seeded_and_playable() {
        let config = GameConfig::new((8, 8), 10).unwrap();
        let board = Board::new_game(config, 42).unwrap();

        assert_eq!(board, Board::new_game(config, 42).unwrap());
        assert_eq!(board.cells().filter(|cell| cell.is_mine()).count(), 10);
        assert_eq!(board.mines_left(), 10);
        assert!(!board.is_game_over());
    }
}
