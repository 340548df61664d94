use crate::{Coord, Dimensions, Direction};
use enum_iterator::IntoEnumIterator;
use MooreDirection::*;

/// The 8 directions of the Moore neighborhood, counter-clockwise from `Right`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IntoEnumIterator)]
pub enum MooreDirection {
    Right,
    UpRight,
    Up,
    UpLeft,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl Direction for MooreDirection {
    type Directions = <MooreDirection as IntoEnumIterator>::Iterator;

    #[inline]
    fn directions() -> Self::Directions {
        MooreDirection::into_enum_iter()
    }

    #[inline]
    fn delta(self) -> (isize, isize) {
        match self {
            Right => (0, 1),
            UpRight => (-1, 1),
            Up => (-1, 0),
            UpLeft => (-1, -1),
            Left => (0, -1),
            DownLeft => (1, -1),
            Down => (1, 0),
            DownRight => (1, 1),
        }
    }

    #[inline]
    fn total() -> usize {
        MooreDirection::VARIANT_COUNT
    }
}

impl From<usize> for MooreDirection {
    fn from(n: usize) -> Self {
        match n {
            0 => Right,
            1 => UpRight,
            2 => Up,
            3 => UpLeft,
            4 => Left,
            5 => DownLeft,
            6 => Down,
            7 => DownRight,
            _ => panic!("invalid integer conversion to MooreDirection"),
        }
    }
}

impl From<MooreDirection> for usize {
    fn from(dir: MooreDirection) -> usize {
        match dir {
            Right => 0,
            UpRight => 1,
            Up => 2,
            UpLeft => 3,
            Left => 4,
            DownLeft => 5,
            Down => 6,
            DownRight => 7,
        }
    }
}

/// Iterator over the in-bounds Moore neighbors of a cell.
///
/// Offsets that would leave the grid are skipped, so nothing ever wraps around.
#[derive(Clone, Debug)]
pub struct MooreNeighbors {
    dimensions: Dimensions,
    center: Coord,
    next: usize,
}

impl MooreNeighbors {
    #[inline]
    pub fn new(dimensions: Dimensions, center: Coord) -> Self {
        MooreNeighbors {
            dimensions,
            center,
            next: 0,
        }
    }
}

impl Iterator for MooreNeighbors {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Coord> {
        while self.next < MooreDirection::total() {
            let dir = MooreDirection::from(self.next);
            self.next += 1;
            if let Some(coord) = self.dimensions.offset(self.center, dir.delta()) {
                return Some(coord);
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(MooreDirection::total() - self.next))
    }
}
