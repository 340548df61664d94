//! The Game of Life transition rule and the generation step built on it.

use crate::{Cell, Coord, Universe};
use log::trace;
use std::collections::HashSet;

/// Why a cell ends up in the state it does.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Reason {
    /// A live cell with fewer than 2 live neighbors dies.
    Underpopulation,
    /// A live cell with 2 or 3 live neighbors lives on.
    Survival,
    /// A live cell with more than 3 live neighbors dies.
    Overpopulation,
    /// A dead cell with exactly 3 live neighbors comes to life.
    Reproduction,
    /// A dead cell stays dead.
    Stasis,
}

/// The next state of a cell given its current state and live-neighbor count.
#[inline]
pub fn next_state(cell: Cell, neighbors: u8) -> (Cell, Reason) {
    match (cell, neighbors) {
        (Cell::Alive, 0..=1) => (Cell::Dead, Reason::Underpopulation),
        (Cell::Alive, 2..=3) => (Cell::Alive, Reason::Survival),
        (Cell::Alive, _) => (Cell::Dead, Reason::Overpopulation),
        (Cell::Dead, 3) => (Cell::Alive, Reason::Reproduction),
        (Cell::Dead, _) => (Cell::Dead, Reason::Stasis),
    }
}

/// Every change one generation makes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transition {
    pub births: Vec<Coord>,
    pub deaths: Vec<Coord>,
}

impl Transition {
    /// Classify every candidate cell of `universe` without touching it.
    pub fn compute<U: Universe>(universe: &U) -> Self {
        let mut transition = Transition::default();
        universe.for_each_candidate(|coord, cell, neighbors| {
            let (next, reason) = next_state(cell, neighbors);
            match (cell, next) {
                (Cell::Dead, Cell::Alive) => transition.births.push(coord),
                (Cell::Alive, Cell::Dead) => transition.deaths.push(coord),
                _ => return,
            }
            trace!("{} with {} neighbors: {:?}", coord, neighbors, reason);
        });
        transition
    }

    /// True if nothing changes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.births.is_empty() && self.deaths.is_empty()
    }

    /// Number of cells that change state.
    #[inline]
    pub fn len(&self) -> usize {
        self.births.len() + self.deaths.len()
    }

    /// True if no cell is both born and killed.
    pub fn is_disjoint(&self) -> bool {
        let births: HashSet<_> = self.births.iter().collect();
        !self.deaths.iter().any(|coord| births.contains(coord))
    }

    /// Write this transition into `universe`.
    pub fn apply<U: Universe>(&self, universe: &mut U) {
        for &coord in &self.births {
            universe.birth(coord);
        }
        for &coord in &self.deaths {
            universe.kill(coord);
        }
    }
}

/// Step `universe` forward one generation.
///
/// All cells are classified against the current generation before any of them is changed.
/// Returns what changed.
pub fn advance<U: Universe>(universe: &mut U) -> Transition {
    let transition = Transition::compute(universe);
    debug_assert!(transition.is_disjoint());
    transition.apply(universe);
    transition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DenseUniverse, Dimensions};

    #[test]
    fn rule_table() {
        for n in 0..=8 {
            let alive = next_state(Cell::Alive, n);
            let dead = next_state(Cell::Dead, n);
            assert_eq!(alive.0.is_alive(), n == 2 || n == 3, "alive with {}", n);
            assert_eq!(dead.0.is_alive(), n == 3, "dead with {}", n);
        }
        assert_eq!(next_state(Cell::Alive, 1).1, Reason::Underpopulation);
        assert_eq!(next_state(Cell::Alive, 4).1, Reason::Overpopulation);
        assert_eq!(next_state(Cell::Dead, 3).1, Reason::Reproduction);
        assert_eq!(next_state(Cell::Dead, 2).1, Reason::Stasis);
    }

    #[test]
    fn compute_leaves_the_board_alone() {
        let mut u = DenseUniverse::new(Dimensions::new(3, 3).unwrap());
        u.populate(&[Coord::new(1, 0), Coord::new(1, 1), Coord::new(1, 2)]);
        let before = u.clone();
        let mut t = Transition::compute(&u);
        assert_eq!(u, before);
        t.births.sort();
        t.deaths.sort();
        assert_eq!(t.births, vec![Coord::new(0, 1), Coord::new(2, 1)]);
        assert_eq!(t.deaths, vec![Coord::new(1, 0), Coord::new(1, 2)]);
        t.apply(&mut u);
        assert_eq!(u.live_count(), 3);
        assert_eq!(u.verify_counts(), Ok(()));
    }

    #[test]
    fn disjointness() {
        let mut t = Transition {
            births: vec![Coord::new(0, 0)],
            deaths: vec![Coord::new(0, 1)],
        };
        assert!(t.is_disjoint());
        t.deaths.push(Coord::new(0, 0));
        assert!(!t.is_disjoint());
        assert_eq!(t.len(), 3);
    }
}
