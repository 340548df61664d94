use crate::{Coord, Dimensions};
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Height and width must both be at least 1.
    #[error("invalid grid dimensions {height}x{width}: both must be at least 1")]
    InvalidDimension { height: usize, width: usize },
    /// A coordinate fell outside of the grid.
    #[error("coordinate {coord} is out of bounds for a {dimensions} grid")]
    OutOfBounds { coord: Coord, dimensions: Dimensions },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Returned when a [`Strategy`](crate::Strategy) name is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown strategy {0:?}, expected \"dense\" or \"sparse\"")]
pub struct ParseStrategyError(pub String);
