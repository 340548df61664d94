/// One of the fixed relative offsets that make up a neighborhood.
///
/// Directions are numbered from `0` to `total() - 1` going counter-clockwise.
pub trait Direction: Copy + Sized + From<usize> + Into<usize> {
    type Directions: Iterator<Item = Self>;

    /// Every direction, in counter-clockwise order.
    fn directions() -> Self::Directions;

    /// The `(row, col)` offset this direction points to. Never `(0, 0)`.
    fn delta(self) -> (isize, isize);

    /// How many directions there are.
    #[inline]
    fn total() -> usize {
        Self::directions().count()
    }
}
