use crate::Direction;

/// A `Neighborhood` contains all of your neighbors, which are each in their own `Direction`.
pub trait Neighborhood<T>: Sized {
    type Direction: Direction;
    type Iter: Iterator<Item = T>;
    type DirIter: Iterator<Item = (Self::Direction, T)>;

    fn new<F: FnMut(Self::Direction) -> T>(dir_map: F) -> Self;

    /// Iterate over all neighbor cells.
    fn iter(self) -> Self::Iter;
    /// Iterate over all neighbor cells with their directions.
    fn dir_iter(self) -> Self::DirIter;

    /// Count the neighbors matching `pred`.
    #[inline]
    fn count_by<P: FnMut(&T) -> bool>(self, mut pred: P) -> usize {
        self.iter().filter(|t| pred(t)).count()
    }
}
