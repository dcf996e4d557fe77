use crate::{Coordinate, Direction, Neighborhood};
use enum_iterator::IntoEnumIterator;
use std::iter::{once, Chain, Once};
use std::ops::{Index, IndexMut};
use NeumannDirection::*;

/// The four orthogonal directions of the von Neumann neighborhood.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IntoEnumIterator)]
pub enum NeumannDirection {
    Right,
    Up,
    Left,
    Down,
}

impl Direction for NeumannDirection {
    type Directions = <NeumannDirection as IntoEnumIterator>::Iterator;

    #[inline]
    fn directions() -> Self::Directions {
        NeumannDirection::into_enum_iter()
    }

    #[inline]
    fn delta(self) -> Coordinate {
        match self {
            Right => Coordinate::new(1, 0),
            Up => Coordinate::new(0, -1),
            Left => Coordinate::new(-1, 0),
            Down => Coordinate::new(0, 1),
        }
    }
}

impl From<usize> for NeumannDirection {
    fn from(n: usize) -> Self {
        match n {
            0 => Right,
            1 => Up,
            2 => Left,
            3 => Down,
            _ => panic!("invalid integer conversion to NeumannDirection"),
        }
    }
}

impl From<NeumannDirection> for usize {
    fn from(dir: NeumannDirection) -> usize {
        match dir {
            Right => 0,
            Up => 1,
            Left => 2,
            Down => 3,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NeumannNeighbors<T> {
    pub right: T,
    pub up: T,
    pub left: T,
    pub down: T,
}

impl<T> NeumannNeighbors<T> {
    pub fn as_ref(&self) -> NeumannNeighbors<&T> {
        NeumannNeighbors {
            right: &self.right,
            up: &self.up,
            left: &self.left,
            down: &self.down,
        }
    }
}

impl<T> Index<NeumannDirection> for NeumannNeighbors<T> {
    type Output = T;

    #[inline]
    fn index(&self, ix: NeumannDirection) -> &T {
        match ix {
            Right => &self.right,
            Up => &self.up,
            Left => &self.left,
            Down => &self.down,
        }
    }
}

impl<T> IndexMut<NeumannDirection> for NeumannNeighbors<T> {
    #[inline]
    fn index_mut(&mut self, ix: NeumannDirection) -> &mut T {
        match ix {
            Right => &mut self.right,
            Up => &mut self.up,
            Left => &mut self.left,
            Down => &mut self.down,
        }
    }
}

type NeighborhoodIter<T> = Chain<Chain<Chain<Once<T>, Once<T>>, Once<T>>, Once<T>>;

impl<T> Neighborhood<T> for NeumannNeighbors<T> {
    type Direction = NeumannDirection;
    type Iter = NeighborhoodIter<T>;
    type DirIter = NeighborhoodIter<(NeumannDirection, T)>;

    #[inline]
    fn new<F: FnMut(NeumannDirection) -> T>(mut f: F) -> NeumannNeighbors<T> {
        Self {
            right: f(Right),
            up: f(Up),
            left: f(Left),
            down: f(Down),
        }
    }

    #[inline]
    fn iter(self) -> Self::Iter {
        once(self.right)
            .chain(once(self.up))
            .chain(once(self.left))
            .chain(once(self.down))
    }

    #[inline]
    fn dir_iter(self) -> Self::DirIter {
        once((Right, self.right))
            .chain(once((Up, self.up)))
            .chain(once((Left, self.left)))
            .chain(once((Down, self.down)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_is_opposite() {
        assert_eq!(Right.inv(), Left);
        assert_eq!(Up.inv(), Down);
        assert_eq!(Down.turn_counterclockwise(), Right);
        assert_eq!(Right.turn_clockwise(), Down);
    }

    #[test]
    fn index_matches_fields() {
        let n = NeumannNeighbors::new(|dir| dir.delta());
        assert_eq!(n[Up], Coordinate::new(0, -1));
        assert_eq!(n.as_ref().left, &Coordinate::new(-1, 0));
        assert_eq!(n.iter().count(), 4);
    }
}
