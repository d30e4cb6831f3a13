use crate::*;
pub use scan::*;

mod scan;

pub trait MinefieldGenerator {
    /// Places `config.mines` mines, failing only when `config` itself is invalid.
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}
