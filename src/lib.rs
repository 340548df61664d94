//! Lifesim runs Conway's Game of Life on a bounded rectangular grid.
//!
//! A board is any type implementing [`Universe`]. Two are provided: [`DenseUniverse`], which keeps
//! a live-neighbor counter beside every cell and updates it on each birth and death, and
//! [`SparseUniverse`], which only stores live cells and tallies neighbor counts once per
//! generation. Both produce identical generations for identical inputs, and [`Game`] drives
//! either one.
//!
//! The grid edge is hard: cells beyond it do not exist and never contribute to a count.

mod dense;
mod direction;
mod error;
mod game;
mod grid;
mod moore;
pub mod rule;
mod sparse;

pub use dense::*;
pub use direction::*;
pub use error::*;
pub use game::*;
pub use grid::*;
pub use moore::*;
pub use sparse::*;

/// Storage for the cells of one simulation together with their neighbor accounting.
///
/// The generation step is split the same way for every implementor. First the board is observed
/// immutably through [`Universe::for_each_candidate`], and only once every decision has been made
/// are the results written back through [`Universe::birth`] and [`Universe::kill`]. This keeps the
/// update order from leaking into the simulation.
pub trait Universe {
    /// Make an empty (all dead) universe with the given bounds.
    fn empty(dimensions: Dimensions) -> Self
    where
        Self: Sized;

    /// The bounds of this universe.
    fn dimensions(&self) -> Dimensions;

    /// The state of a cell. Panics if `coord` is out of bounds.
    fn cell(&self, coord: Coord) -> Cell;

    /// Number of currently alive cells.
    fn live_count(&self) -> usize;

    /// All alive coordinates in row-major order.
    fn live_cells(&self) -> Vec<Coord>;

    /// All dead coordinates in row-major order.
    fn dead_cells(&self) -> Vec<Coord>;

    /// Kill every cell.
    fn clear(&mut self);

    /// Bring every listed cell to life in bulk. Coordinates that are already alive are ignored.
    ///
    /// Neighbor accounting is rebuilt once at the end instead of per cell.
    fn populate(&mut self, coords: &[Coord]);

    /// Visit every cell that could change state this generation with its current state and live
    /// neighbor count. Cells that are skipped must be dead with a neighbor count other than 3.
    fn for_each_candidate<F>(&self, f: F)
    where
        F: FnMut(Coord, Cell, u8);

    /// Mark a dead cell alive and account for it. Does nothing if the cell is already alive.
    fn birth(&mut self, coord: Coord);

    /// Mark a live cell dead and account for it. Does nothing if the cell is already dead.
    fn kill(&mut self, coord: Coord);
}
