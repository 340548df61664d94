use crate::{grid::write_rows, Cell, Coord, Dimensions, Grid, Universe};
use std::fmt;

/// A [`Grid`] with a parallel grid of live-neighbor counters.
///
/// Between generation steps every counter equals the number of live cells adjacent to it. The
/// counters are adjusted on every single birth and death, so they are never recomputed from
/// scratch except by [`DenseUniverse::reinitialize`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DenseUniverse {
    grid: Grid,
    counts: Vec<u8>,
}

impl DenseUniverse {
    pub fn new(dimensions: Dimensions) -> Self {
        DenseUniverse {
            grid: Grid::with_dimensions(dimensions),
            counts: vec![0; dimensions.size()],
        }
    }

    /// The underlying cell grid.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Live-neighbor count of a cell, in `0..=8`. Panics if out of bounds.
    #[inline]
    pub fn count_at(&self, coord: Coord) -> u8 {
        let dimensions = self.grid.dimensions();
        let coord = dimensions.check(coord).unwrap_or_else(|e| panic!("{}", e));
        self.counts[dimensions.index(coord)]
    }

    /// Account for `coord` having become alive.
    #[inline]
    pub fn on_birth(&mut self, coord: Coord) {
        let dimensions = self.grid.dimensions();
        for n in dimensions.neighbors(coord) {
            self.counts[dimensions.index(n)] += 1;
        }
    }

    /// Account for `coord` having died.
    #[inline]
    pub fn on_death(&mut self, coord: Coord) {
        let dimensions = self.grid.dimensions();
        for n in dimensions.neighbors(coord) {
            self.counts[dimensions.index(n)] -= 1;
        }
    }

    /// Zero every counter and rebuild them from the live cells.
    pub fn reinitialize(&mut self) {
        for count in &mut self.counts {
            *count = 0;
        }
        for coord in self.grid.live_cells() {
            self.on_birth(coord);
        }
    }

    /// Recount every cell's live neighbors from scratch and compare against the counters.
    ///
    /// Returns the first coordinate whose counter disagrees.
    pub fn verify_counts(&self) -> Result<(), Coord> {
        let dimensions = self.grid.dimensions();
        for coord in dimensions.coords() {
            let actual = dimensions
                .neighbors(coord)
                .filter(|&n| self.grid.get(n).is_alive())
                .count();
            if usize::from(self.counts[dimensions.index(coord)]) != actual {
                return Err(coord);
            }
        }
        Ok(())
    }

    /// Text dump of the counter grid, one digit per cell.
    pub fn counts(&self) -> Counts<'_> {
        Counts(self)
    }
}

/// Displays the live-neighbor counters of a [`DenseUniverse`].
#[derive(Copy, Clone, Debug)]
pub struct Counts<'a>(&'a DenseUniverse);

impl fmt::Display for Counts<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, self.0.dimensions(), |coord| {
            char::from(b'0' + self.0.count_at(coord))
        })
    }
}

impl Universe for DenseUniverse {
    fn empty(dimensions: Dimensions) -> Self {
        Self::new(dimensions)
    }

    #[inline]
    fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    #[inline]
    fn cell(&self, coord: Coord) -> Cell {
        self.grid.get(coord)
    }

    #[inline]
    fn live_count(&self) -> usize {
        self.grid.live_count()
    }

    fn live_cells(&self) -> Vec<Coord> {
        self.grid.live_cells()
    }

    fn dead_cells(&self) -> Vec<Coord> {
        self.grid.dead_cells()
    }

    fn clear(&mut self) {
        self.grid.clear();
        for count in &mut self.counts {
            *count = 0;
        }
    }

    fn populate(&mut self, coords: &[Coord]) {
        for &coord in coords {
            self.grid.set(coord, Cell::Alive);
        }
        self.reinitialize();
    }

    fn for_each_candidate<F>(&self, mut f: F)
    where
        F: FnMut(Coord, Cell, u8),
    {
        for ((coord, &cell), &count) in self
            .grid
            .dimensions()
            .coords()
            .zip(self.grid.cells())
            .zip(&self.counts)
        {
            f(coord, cell, count);
        }
    }

    /// A cell that is already alive is left alone, so its neighbors are never counted twice.
    fn birth(&mut self, coord: Coord) {
        if self.grid.set(coord, Cell::Alive) == Cell::Dead {
            self.on_birth(coord);
        }
    }

    fn kill(&mut self, coord: Coord) {
        if self.grid.set(coord, Cell::Dead) == Cell::Alive {
            self.on_death(coord);
        }
    }
}

impl fmt::Display for DenseUniverse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}
