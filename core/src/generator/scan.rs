use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::*;

/// Drops each mine on a uniformly random cell, scanning forward in row-major order when that cell
/// is already taken. Whether castles count as taken depends on the config's [`CastlePolicy`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScanMinefieldGenerator {
    seed: u64,
}

impl ScanMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for ScanMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        let mut layout = MineLayout::empty(&config)?;
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let (size_x, size_y) = config.size;
        let total_cells = config.total_cells();

        for _ in 0..config.mines {
            let mut coords = (rng.random_range(0..size_x), rng.random_range(0..size_y));
            let mut scanned: CellCount = 0;
            while !layout.can_hold_mine(coords) && scanned < total_cells {
                coords = next_row_major(coords, config.size);
                scanned += 1;
            }
            if scanned == total_cells {
                log::warn!("No free cell left for mine, stopping placement early");
                break;
            }
            layout.place_mine(coords);
        }

        // double check mine count
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        log::debug!(
            "Generated {}x{} minefield with {} mines",
            size_x,
            size_y,
            layout.mine_count()
        );
        Ok(layout)
    }
}
