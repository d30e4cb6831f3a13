use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board size, width and height must be at least 1")]
    InvalidSize,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines")]
    TooManyMines,
}

pub type Result<T> = core::result::Result<T, GameError>;
