use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Star and rock placed on the same cell")]
    OverlappingCells,
    #[error("Unknown difficulty, expected one of easy, medium or hard")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;
