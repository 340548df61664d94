use crate::rule::{self, Transition};
use crate::{
    Cell, Coord, Counts, DenseUniverse, Dimensions, ParseStrategyError, Result, SparseUniverse,
    Universe,
};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;
use std::str::FromStr;

/// Which neighbor accounting to simulate with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// [`DenseUniverse`]
    Dense,
    /// [`SparseUniverse`]
    Sparse,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Dense
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dense" => Ok(Strategy::Dense),
            "sparse" => Ok(Strategy::Sparse),
            _ => Err(ParseStrategyError(s.to_owned())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Dense => "dense",
            Strategy::Sparse => "sparse",
        })
    }
}

/// Settings for a [`Game`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    pub height: usize,
    pub width: usize,
    /// Only consulted by [`Simulation::new`]; a [`Game`] is already tied to its universe type.
    pub strategy: Strategy,
    /// [`Game::tick`] stops with [`Status::MaxGenerationsReached`] after this many generations.
    pub max_generations: Option<u64>,
    /// Seed for the random number generator used by [`Game::seed`]. Drawn from entropy if unset.
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            height: 4,
            width: 4,
            strategy: Strategy::Dense,
            max_generations: Some(50),
            rng_seed: None,
        }
    }
}

impl Config {
    pub fn dimensions(&self) -> Result<Dimensions> {
        Dimensions::new(self.height, self.width)
    }
}

/// Where a game stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Running,
    /// Every cell is dead.
    Extinct,
    /// The last generation changed nothing.
    SteadyState,
    /// The configured generation cap was hit while still running.
    MaxGenerationsReached,
}

impl Status {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Status::Running
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Running => "running",
            Status::Extinct => "all cells are dead",
            Status::SteadyState => "reached a steady state",
            Status::MaxGenerationsReached => "reached the generation limit",
        })
    }
}

/// Drives a [`Universe`] from generation to generation.
///
/// Period-1 fixed points are detected as [`Status::SteadyState`]. Longer oscillators are not, and
/// run until the generation cap.
#[derive(Clone, Debug)]
pub struct Game<U> {
    universe: U,
    rng: StdRng,
    generation: u64,
    /// Generation at which the board was last seeded; the cap counts from here.
    seeded_at: u64,
    max_generations: Option<u64>,
    status: Status,
}

pub type DenseGame = Game<DenseUniverse>;
pub type SparseGame = Game<SparseUniverse>;

impl<U: Universe> Game<U> {
    /// Make an all dead game. Fails with [`Error::InvalidDimension`](crate::Error) if either side
    /// is zero.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        Self::with_config(&Config {
            height,
            width,
            ..Config::default()
        })
    }

    pub fn with_config(config: &Config) -> Result<Self> {
        let dimensions = config.dimensions()?;
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Game {
            universe: U::empty(dimensions),
            rng,
            generation: 0,
            seeded_at: 0,
            max_generations: config.max_generations,
            status: Status::Running,
        })
    }

    /// Bring up to `count` randomly chosen dead cells to life.
    ///
    /// If fewer than `count` cells are dead, all of them are seeded. Returns the number of cells
    /// that were brought to life.
    pub fn seed(&mut self, count: usize) -> usize {
        let dead = self.universe.dead_cells();
        let chosen: Vec<Coord> = dead
            .choose_multiple(&mut self.rng, count)
            .copied()
            .collect();
        trace!(
            "seeding {} of {} requested cells from {} dead",
            chosen.len(),
            count,
            dead.len()
        );
        self.universe.populate(&chosen);
        self.restart();
        chosen.len()
    }

    /// Bring the listed cells to life. Fails with [`Error::OutOfBounds`](crate::Error) without
    /// changing anything if any of them is off the grid.
    pub fn seed_cells(&mut self, coords: &[Coord]) -> Result<()> {
        let dimensions = self.universe.dimensions();
        for &coord in coords {
            dimensions.check(coord)?;
        }
        self.universe.populate(coords);
        self.restart();
        Ok(())
    }

    /// Kill every cell and reset the generation counter.
    pub fn zero_out(&mut self) {
        self.universe.clear();
        self.generation = 0;
        self.restart();
    }

    /// Resume ticking with a fresh generation budget.
    fn restart(&mut self) {
        self.seeded_at = self.generation;
        self.status = Status::Running;
    }

    #[inline]
    pub fn live_cell_count(&self) -> usize {
        self.universe.live_count()
    }

    /// Step one generation and return what changed.
    pub fn step(&mut self) -> Transition {
        let transition = rule::advance(&mut self.universe);
        self.generation += 1;
        debug!(
            "generation {}: {} births, {} deaths, {} alive",
            self.generation,
            transition.births.len(),
            transition.deaths.len(),
            self.universe.live_count()
        );
        transition
    }

    /// Step one generation. Returns true if any cell changed state.
    #[inline]
    pub fn advance(&mut self) -> bool {
        !self.step().is_empty()
    }

    /// Run one tick of the termination state machine.
    ///
    /// Terminal states are sticky until the board is reseeded or zeroed out. The generation cap
    /// counts generations since the last reseed.
    pub fn tick(&mut self) -> Status {
        if self.status.is_terminal() {
            return self.status;
        }
        self.status = if self.universe.live_count() == 0 {
            Status::Extinct
        } else if self
            .max_generations
            .map_or(false, |max| self.generation - self.seeded_at >= max)
        {
            Status::MaxGenerationsReached
        } else if !self.advance() {
            Status::SteadyState
        } else {
            Status::Running
        };
        if self.status.is_terminal() {
            info!(
                "stopped after {} generations: {}",
                self.generation, self.status
            );
        }
        self.status
    }

    /// Tick until a terminal status. Never returns on an oscillator without a generation cap.
    pub fn run(&mut self) -> Status {
        loop {
            let status = self.tick();
            if status.is_terminal() {
                return status;
            }
        }
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Generations stepped since creation or the last [`Game::zero_out`].
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.universe.dimensions()
    }

    /// The state of a cell. Panics if out of bounds.
    #[inline]
    pub fn cell_state_at(&self, coord: Coord) -> Cell {
        self.universe.cell(coord)
    }

    /// All live coordinates in row-major order.
    pub fn live_cells(&self) -> Vec<Coord> {
        self.universe.live_cells()
    }

    /// Read-only access to the board.
    #[inline]
    pub fn universe(&self) -> &U {
        &self.universe
    }
}

impl<U: fmt::Display> fmt::Display for Game<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.universe, f)
    }
}

/// A game whose neighbor accounting was picked at runtime from a [`Config`].
#[derive(Clone, Debug)]
pub enum Simulation {
    Dense(DenseGame),
    Sparse(SparseGame),
}

macro_rules! dispatch {
    ($self:expr, $game:ident => $body:expr) => {
        match $self {
            Simulation::Dense($game) => $body,
            Simulation::Sparse($game) => $body,
        }
    };
}

impl Simulation {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(match config.strategy {
            Strategy::Dense => Simulation::Dense(Game::with_config(config)?),
            Strategy::Sparse => Simulation::Sparse(Game::with_config(config)?),
        })
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Simulation::Dense(_) => Strategy::Dense,
            Simulation::Sparse(_) => Strategy::Sparse,
        }
    }

    pub fn seed(&mut self, count: usize) -> usize {
        dispatch!(self, game => game.seed(count))
    }

    pub fn seed_cells(&mut self, coords: &[Coord]) -> Result<()> {
        dispatch!(self, game => game.seed_cells(coords))
    }

    pub fn zero_out(&mut self) {
        dispatch!(self, game => game.zero_out())
    }

    pub fn live_cell_count(&self) -> usize {
        dispatch!(self, game => game.live_cell_count())
    }

    pub fn advance(&mut self) -> bool {
        dispatch!(self, game => game.advance())
    }

    pub fn tick(&mut self) -> Status {
        dispatch!(self, game => game.tick())
    }

    pub fn run(&mut self) -> Status {
        dispatch!(self, game => game.run())
    }

    pub fn status(&self) -> Status {
        dispatch!(self, game => game.status())
    }

    pub fn generation(&self) -> u64 {
        dispatch!(self, game => game.generation())
    }

    pub fn cell_state_at(&self, coord: Coord) -> Cell {
        dispatch!(self, game => game.cell_state_at(coord))
    }

    pub fn live_cells(&self) -> Vec<Coord> {
        dispatch!(self, game => game.live_cells())
    }

    /// The neighbor counter grid, if this simulation keeps one.
    pub fn neighbor_counts(&self) -> Option<Counts<'_>> {
        match self {
            Simulation::Dense(game) => Some(game.universe().counts()),
            Simulation::Sparse(_) => None,
        }
    }
}

impl fmt::Display for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, game => fmt::Display::fmt(game, f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn config(height: usize, width: usize) -> Config {
        Config {
            height,
            width,
            rng_seed: Some(7),
            ..Config::default()
        }
    }

    #[test]
    fn rejects_empty_board() {
        assert_eq!(
            DenseGame::new(0, 0).unwrap_err(),
            Error::InvalidDimension {
                height: 0,
                width: 0
            }
        );
        assert!(SparseGame::new(1, 0).is_err());
        assert!(Simulation::new(&config(0, 4)).is_err());
    }

    #[test]
    fn seed_is_best_effort() {
        let mut game = DenseGame::with_config(&config(2, 2)).unwrap();
        assert_eq!(game.seed(3), 3);
        assert_eq!(game.seed(3), 1);
        assert_eq!(game.live_cell_count(), 4);
        assert_eq!(game.seed(1), 0);
    }

    #[test]
    fn seed_is_reproducible() {
        let mut a = SparseGame::with_config(&config(8, 8)).unwrap();
        let mut b = SparseGame::with_config(&config(8, 8)).unwrap();
        a.seed(20);
        b.seed(20);
        assert_eq!(a.live_cells(), b.live_cells());
    }

    #[test]
    fn seed_cells_checks_bounds_first() {
        let mut game = DenseGame::new(2, 2).unwrap();
        let err = game
            .seed_cells(&[Coord::new(0, 0), Coord::new(2, 2)])
            .unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { .. }));
        assert_eq!(game.live_cell_count(), 0);
    }

    #[test]
    fn zero_out() {
        let mut game = DenseGame::with_config(&config(2, 2)).unwrap();
        game.zero_out();
        assert_eq!(game.live_cell_count(), 0);
        game.seed(2);
        assert_ne!(game.live_cell_count(), 0);
        game.zero_out();
        assert_eq!(game.live_cell_count(), 0);
        assert_eq!(game.generation(), 0);
    }

    #[test]
    fn extinct_before_stepping() {
        let mut game = DenseGame::new(3, 3).unwrap();
        assert_eq!(game.tick(), Status::Extinct);
        assert_eq!(game.generation(), 0);
        assert_eq!(game.tick(), Status::Extinct);
    }

    #[test]
    fn steady_block() {
        let mut game = SparseGame::new(4, 4).unwrap();
        game.seed_cells(&[
            Coord::new(1, 1),
            Coord::new(1, 2),
            Coord::new(2, 1),
            Coord::new(2, 2),
        ])
        .unwrap();
        assert_eq!(game.run(), Status::SteadyState);
        assert_eq!(game.generation(), 1);
        assert_eq!(game.live_cell_count(), 4);
    }

    #[test]
    fn blinker_hits_generation_cap() {
        let mut game = DenseGame::with_config(&Config {
            height: 5,
            width: 5,
            max_generations: Some(6),
            ..Config::default()
        })
        .unwrap();
        game.seed_cells(&[Coord::new(2, 1), Coord::new(2, 2), Coord::new(2, 3)])
            .unwrap();
        assert_eq!(game.run(), Status::MaxGenerationsReached);
        assert_eq!(game.generation(), 6);
        assert_eq!(game.live_cell_count(), 3);
        assert_eq!(game.cell_state_at(Coord::new(2, 1)), Cell::Alive);
    }

    #[test]
    fn reseeding_restarts_a_capped_game() {
        let mut game = DenseGame::with_config(&Config {
            height: 5,
            width: 5,
            max_generations: Some(2),
            rng_seed: Some(11),
            ..Config::default()
        })
        .unwrap();
        game.seed_cells(&[Coord::new(2, 1), Coord::new(2, 2), Coord::new(2, 3)])
            .unwrap();
        assert_eq!(game.run(), Status::MaxGenerationsReached);
        assert_eq!(game.generation(), 2);
        assert_eq!(game.tick(), Status::MaxGenerationsReached);

        // The blinker's center is always alive, so this only restarts the clock.
        game.seed_cells(&[Coord::new(2, 2)]).unwrap();
        assert_eq!(game.tick(), Status::Running);
        assert_eq!(game.generation(), 3);
        assert_eq!(game.run(), Status::MaxGenerationsReached);
        assert_eq!(game.generation(), 4);

        game.seed(0);
        assert_eq!(game.tick(), Status::Running);
        assert_eq!(game.generation(), 5);
    }

    #[test]
    fn simulation_dispatches_on_strategy() {
        let mut cfg = config(3, 3);
        cfg.strategy = Strategy::Sparse;
        let mut sim = Simulation::new(&cfg).unwrap();
        assert_eq!(sim.strategy(), Strategy::Sparse);
        sim.seed_cells(&[Coord::new(1, 0), Coord::new(1, 1), Coord::new(1, 2)])
            .unwrap();
        assert!(sim.advance());
        assert_eq!(
            sim.live_cells(),
            vec![Coord::new(0, 1), Coord::new(1, 1), Coord::new(2, 1)]
        );
        assert_eq!(sim.to_string(), ".#.\n.#.\n.#.\n");
        assert!(sim.neighbor_counts().is_none());

        cfg.strategy = Strategy::Dense;
        let mut sim = Simulation::new(&cfg).unwrap();
        sim.seed_cells(&[Coord::new(1, 1)]).unwrap();
        assert_eq!(
            sim.neighbor_counts().map(|c| c.to_string()),
            Some("111\n101\n111\n".to_owned())
        );
    }

    #[test]
    fn strategy_names() {
        assert_eq!("Sparse".parse::<Strategy>(), Ok(Strategy::Sparse));
        assert_eq!(Strategy::Dense.to_string().parse::<Strategy>(), Ok(Strategy::Dense));
        assert!("torus".parse::<Strategy>().is_err());
    }
}
