use crate::{grid::write_rows, Cell, Coord, Dimensions, Universe};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Only the live cells, with neighbor counts tallied fresh every generation.
///
/// Worth it when the board is large and mostly dead, since the work per generation scales with
/// the population rather than the area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseUniverse {
    dimensions: Dimensions,
    live: BTreeSet<Coord>,
}

impl SparseUniverse {
    pub fn new(dimensions: Dimensions) -> Self {
        SparseUniverse {
            dimensions,
            live: BTreeSet::new(),
        }
    }

    /// Tally, for every cell with at least one live neighbor, how many live neighbors it has.
    ///
    /// Neighbors are bounds-filtered before they are tallied, so every key is on the grid. Cells
    /// missing from the map have a count of 0.
    pub fn compute_counts(&self) -> HashMap<Coord, u8> {
        let mut counts = HashMap::with_capacity(self.live.len() * 8);
        for &coord in &self.live {
            for n in self.dimensions.neighbors(coord) {
                *counts.entry(n).or_insert(0) += 1;
            }
        }
        counts
    }

    fn check(&self, coord: Coord) -> Coord {
        self.dimensions
            .check(coord)
            .unwrap_or_else(|e| panic!("{}", e))
    }
}

impl Universe for SparseUniverse {
    fn empty(dimensions: Dimensions) -> Self {
        Self::new(dimensions)
    }

    #[inline]
    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn cell(&self, coord: Coord) -> Cell {
        Cell::from(self.live.contains(&self.check(coord)))
    }

    #[inline]
    fn live_count(&self) -> usize {
        self.live.len()
    }

    fn live_cells(&self) -> Vec<Coord> {
        self.live.iter().copied().collect()
    }

    fn dead_cells(&self) -> Vec<Coord> {
        self.dimensions
            .coords()
            .filter(|coord| !self.live.contains(coord))
            .collect()
    }

    fn clear(&mut self) {
        self.live.clear();
    }

    fn populate(&mut self, coords: &[Coord]) {
        for &coord in coords {
            let coord = self.check(coord);
            self.live.insert(coord);
        }
    }

    fn for_each_candidate<F>(&self, mut f: F)
    where
        F: FnMut(Coord, Cell, u8),
    {
        let counts = self.compute_counts();
        for &coord in &self.live {
            f(coord, Cell::Alive, counts.get(&coord).copied().unwrap_or(0));
        }
        for (&coord, &count) in &counts {
            if !self.live.contains(&coord) {
                f(coord, Cell::Dead, count);
            }
        }
    }

    fn birth(&mut self, coord: Coord) {
        let coord = self.check(coord);
        self.live.insert(coord);
    }

    fn kill(&mut self, coord: Coord) {
        self.live.remove(&coord);
    }
}

impl fmt::Display for SparseUniverse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, self.dimensions, |coord| self.cell(coord).glyph())
    }
}
