use crate::{Error, MooreNeighbors, Result};
use boolinator::Boolinator;
use itertools::iproduct;
use std::fmt;

/// The state of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    Dead,
    Alive,
}

impl Cell {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// The character used for this cell in text dumps.
    #[inline]
    pub fn glyph(self) -> char {
        match self {
            Cell::Dead => '.',
            Cell::Alive => '#',
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Dead
    }
}

impl From<bool> for Cell {
    #[inline]
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

/// A `(row, col)` position. Orders row-major.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    #[inline]
    fn from((row, col): (usize, usize)) -> Self {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The bounds of a grid. Both sides are at least 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    height: usize,
    width: usize,
}

impl Dimensions {
    /// Fails with [`Error::InvalidDimension`] if either side is zero.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        (height >= 1 && width >= 1)
            .as_result(
                Dimensions { height, width },
                Error::InvalidDimension { height, width },
            )
    }

    #[inline]
    pub fn height(self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(self) -> usize {
        self.width
    }

    /// Number of cells.
    #[inline]
    pub fn size(self) -> usize {
        self.height * self.width
    }

    #[inline]
    pub fn contains(self, coord: Coord) -> bool {
        coord.row < self.height && coord.col < self.width
    }

    /// Check that `coord` lies inside these bounds.
    #[inline]
    pub fn check(self, coord: Coord) -> Result<Coord> {
        self.contains(coord).as_result(
            coord,
            Error::OutOfBounds {
                coord,
                dimensions: self,
            },
        )
    }

    /// Move `coord` by `(row, col)` deltas, returning `None` if that leaves the grid.
    #[inline]
    pub fn offset(self, coord: Coord, (dr, dc): (isize, isize)) -> Option<Coord> {
        let row = coord.row as isize + dr;
        let col = coord.col as isize + dc;
        (row >= 0 && col >= 0).and_option_from(|| {
            let moved = Coord::new(row as usize, col as usize);
            self.contains(moved).as_some(moved)
        })
    }

    /// The in-bounds neighbors of `coord`. Corners have 3, edges 5 and the interior 8.
    #[inline]
    pub fn neighbors(self, coord: Coord) -> MooreNeighbors {
        MooreNeighbors::new(self, coord)
    }

    /// Every coordinate in row-major order.
    pub fn coords(self) -> impl Iterator<Item = Coord> {
        iproduct!(0..self.height, 0..self.width).map(Coord::from)
    }

    /// Row-major index of an in-bounds coordinate.
    #[inline]
    pub(crate) fn index(self, coord: Coord) -> usize {
        coord.row * self.width + coord.col
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

/// Dense cell storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    dimensions: Dimensions,
    live: usize,
}

impl Grid {
    /// Make a new all dead grid. Fails with [`Error::InvalidDimension`] if either side is zero.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        Dimensions::new(height, width).map(Self::with_dimensions)
    }

    pub fn with_dimensions(dimensions: Dimensions) -> Self {
        Grid {
            cells: vec![Cell::Dead; dimensions.size()],
            dimensions,
            live: 0,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn try_get(&self, coord: Coord) -> Result<Cell> {
        let coord = self.dimensions.check(coord)?;
        Ok(self.cells[self.dimensions.index(coord)])
    }

    /// Get a cell. Panics if out of bounds.
    #[inline]
    pub fn get(&self, coord: Coord) -> Cell {
        self.try_get(coord).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Set a cell, returning its previous state.
    pub fn try_set(&mut self, coord: Coord, cell: Cell) -> Result<Cell> {
        let coord = self.dimensions.check(coord)?;
        let slot = &mut self.cells[self.dimensions.index(coord)];
        let previous = std::mem::replace(slot, cell);
        match (previous, cell) {
            (Cell::Dead, Cell::Alive) => self.live += 1,
            (Cell::Alive, Cell::Dead) => self.live -= 1,
            _ => {}
        }
        Ok(previous)
    }

    /// Set a cell, returning its previous state. Panics if out of bounds.
    #[inline]
    pub fn set(&mut self, coord: Coord, cell: Cell) -> Cell {
        self.try_set(coord, cell).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Number of alive cells.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Every coordinate whose cell is in `state`, row-major.
    pub fn cells_in(&self, state: Cell) -> impl Iterator<Item = Coord> + '_ {
        self.dimensions
            .coords()
            .zip(self.cells.iter())
            .filter(move |&(_, &cell)| cell == state)
            .map(|(coord, _)| coord)
    }

    pub fn live_cells(&self) -> Vec<Coord> {
        self.cells_in(Cell::Alive).collect()
    }

    pub fn dead_cells(&self) -> Vec<Coord> {
        self.cells_in(Cell::Dead).collect()
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::Dead;
        }
        self.live = 0;
    }

    /// Get the grid's cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells[..]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, self.dimensions, |coord| self.get(coord).glyph())
    }
}

/// Write one line per row with a character per cell.
pub(crate) fn write_rows<F>(
    f: &mut fmt::Formatter<'_>,
    dimensions: Dimensions,
    glyph: F,
) -> fmt::Result
where
    F: Fn(Coord) -> char,
{
    for row in 0..dimensions.height() {
        let line: String = (0..dimensions.width())
            .map(|col| glyph(Coord::new(row, col)))
            .collect();
        writeln!(f, "{}", line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            Grid::new(0, 0),
            Err(Error::InvalidDimension {
                height: 0,
                width: 0
            })
        );
        assert!(Grid::new(3, 0).is_err());
        assert!(Grid::new(0, 3).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn new_grid_is_dead() {
        let grid = Grid::new(2, 3).unwrap();
        assert_eq!(grid.live_count(), 0);
        assert_eq!(grid.dead_cells().len(), 6);
        assert!(grid.cells().iter().all(|&c| c == Cell::Dead));
    }

    #[test]
    fn set_tracks_live_count() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert_eq!(grid.set(Coord::new(0, 1), Cell::Alive), Cell::Dead);
        assert_eq!(grid.set(Coord::new(0, 1), Cell::Alive), Cell::Alive);
        grid.set(Coord::new(1, 1), Cell::Alive);
        assert_eq!(grid.live_count(), 2);
        assert_eq!(grid.live_cells(), vec![Coord::new(0, 1), Coord::new(1, 1)]);
        grid.set(Coord::new(0, 1), Cell::Dead);
        assert_eq!(grid.live_count(), 1);
        grid.clear();
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let mut grid = Grid::new(2, 2).unwrap();
        let coord = Coord::new(2, 0);
        let err = Error::OutOfBounds {
            coord,
            dimensions: grid.dimensions(),
        };
        assert_eq!(grid.try_get(coord), Err(err));
        assert_eq!(grid.try_set(coord, Cell::Alive), Err(err));
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_panics_out_of_bounds() {
        Grid::new(2, 2).unwrap().get(Coord::new(0, 2));
    }

    #[test]
    fn offset_stops_at_the_edge() {
        let dims = Dimensions::new(3, 3).unwrap();
        assert_eq!(dims.offset(Coord::new(0, 0), (-1, 0)), None);
        assert_eq!(dims.offset(Coord::new(2, 2), (0, 1)), None);
        assert_eq!(dims.offset(Coord::new(1, 1), (1, -1)), Some(Coord::new(2, 0)));
    }

    #[test]
    fn dump() {
        let mut grid = Grid::new(2, 3).unwrap();
        grid.set(Coord::new(0, 0), Cell::Alive);
        grid.set(Coord::new(1, 2), Cell::Alive);
        assert_eq!(grid.to_string(), "#..\n..#\n");
    }
}
