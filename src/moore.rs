use crate::{Coordinate, Direction, Neighborhood};
use enum_iterator::IntoEnumIterator;
use std::iter::Zip;
use std::ops::{Index, IndexMut};
use MooreDirection::*;

/// The eight directions of the Moore neighborhood, counter-clockwise from `Right`.
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
    fn delta(self) -> Coordinate {
        let (x, y) = match self {
            Right => (1, 0),
            UpRight => (1, -1),
            Up => (0, -1),
            UpLeft => (-1, -1),
            Left => (-1, 0),
            DownLeft => (-1, 1),
            Down => (0, 1),
            DownRight => (1, 1),
        };
        Coordinate::new(x, y)
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
        dir as usize
    }
}

/// One value per Moore direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MooreNeighbors<T>(pub [T; 8]);

impl<T> MooreNeighbors<T> {
    pub fn as_ref(&self) -> MooreNeighbors<&T> {
        MooreNeighbors::new(|dir| &self[dir])
    }
}

impl<T> Index<MooreDirection> for MooreNeighbors<T> {
    type Output = T;

    #[inline]
    fn index(&self, dir: MooreDirection) -> &T {
        &self.0[usize::from(dir)]
    }
}

impl<T> IndexMut<MooreDirection> for MooreNeighbors<T> {
    #[inline]
    fn index_mut(&mut self, dir: MooreDirection) -> &mut T {
        &mut self.0[usize::from(dir)]
    }
}

impl<T> Neighborhood<T> for MooreNeighbors<T> {
    type Direction = MooreDirection;
    type Iter = std::array::IntoIter<T, 8>;
    type DirIter = Zip<<MooreDirection as IntoEnumIterator>::Iterator, std::array::IntoIter<T, 8>>;

    #[inline]
    fn new<F: FnMut(MooreDirection) -> T>(mut f: F) -> Self {
        MooreNeighbors(std::array::from_fn(|ix| f(MooreDirection::from(ix))))
    }

    #[inline]
    fn iter(self) -> Self::Iter {
        self.0.into_iter()
    }

    #[inline]
    fn dir_iter(self) -> Self::DirIter {
        MooreDirection::into_enum_iter().zip(self.0)
    }
}
