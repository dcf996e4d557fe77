use crate::{Error, Result};
use boolinator::Boolinator;
use itertools::iproduct;
use std::ops::{Add, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The position of a cell, `x` growing to the right and `y` growing down.
///
/// Coordinates are signed so that relative offsets (and coordinates that a caller
/// got wrong) can be expressed with the same type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    pub x: isize,
    pub y: isize,
}

impl Coordinate {
    #[inline]
    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }
}

impl From<(isize, isize)> for Coordinate {
    #[inline]
    fn from((x, y): (isize, isize)) -> Self {
        Self { x, y }
    }
}

impl Add for Coordinate {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Coordinate {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Coordinate {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// How the edges of a grid behave when counting neighbors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Topology {
    /// Opposite edges are glued together.
    Torus,
    /// Neighbors across an edge do not exist.
    Bounded,
}

impl Default for Topology {
    fn default() -> Self {
        Topology::Torus
    }
}

impl Topology {
    /// Resolve the neighbor of `origin` at `offset`, or `None` if the neighbor lies
    /// across an edge this topology does not glue.
    #[inline]
    pub fn neighbor(self, size: Size, origin: Coordinate, offset: Coordinate) -> Option<Coordinate> {
        let (target, wrapped) = size.resolve(origin, offset);
        (!wrapped || self == Topology::Torus).as_some(target)
    }
}

/// The dimensions of a grid. They are fixed once a grid is built.
///
/// A size is valid when both dimensions are non-negative and the cell count fits in
/// an `isize`. Deserialized sizes are checked the same way.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSize"))]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawSize {
    width: usize,
    height: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSize> for Size {
    type Error = Error;

    fn try_from(raw: RawSize) -> Result<Self> {
        Size {
            width: raw.width,
            height: raw.height,
        }
        .validate()
    }
}

impl Size {
    /// Validate a signed width and height.
    pub fn new(width: isize, height: isize) -> Result<Self> {
        (width >= 0 && height >= 0 && width.checked_mul(height).is_some()).as_result(
            Self {
                width: width as usize,
                height: height as usize,
            },
            Error::InvalidSize { width, height },
        )
    }

    /// Check a size that was built from its fields rather than through `new`.
    pub fn validate(self) -> Result<Self> {
        match (isize::try_from(self.width), isize::try_from(self.height)) {
            (Ok(width), Ok(height)) => Size::new(width, height),
            _ => Err(Error::InvalidSize {
                width: isize::try_from(self.width).unwrap_or(isize::MAX),
                height: isize::try_from(self.height).unwrap_or(isize::MAX),
            }),
        }
    }

    /// The number of cells in a grid of this size.
    #[inline]
    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells() == 0
    }

    #[inline]
    pub fn contains(&self, c: Coordinate) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as usize) < self.width && (c.y as usize) < self.height
    }

    /// Pass `c` through if it is inside the grid.
    #[inline]
    pub fn check(&self, c: Coordinate) -> Result<Coordinate> {
        self.contains(c)
            .as_result(c, Error::OutOfBounds { coordinate: c })
    }

    /// Pass `area` through if it is ordered and both corners are inside the grid.
    pub fn check_area(&self, area: Area) -> Result<Area> {
        if area.from.x > area.to.x || area.from.y > area.to.y {
            return Err(Error::InvalidArea { area });
        }
        self.check(area.from)?;
        self.check(area.to)?;
        Ok(area)
    }

    /// Row-major index of an in-bounds coordinate.
    #[inline]
    pub(crate) fn index(&self, c: Coordinate) -> usize {
        c.y as usize * self.width + c.x as usize
    }

    /// Inverse of `index`.
    #[inline]
    pub(crate) fn coordinate(&self, ix: usize) -> Coordinate {
        Coordinate::new((ix % self.width) as isize, (ix / self.width) as isize)
    }

    /// Every coordinate of the grid in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        iproduct!(0..self.height as isize, 0..self.width as isize).map(|(y, x)| Coordinate::new(x, y))
    }

    /// Offset `origin` by `offset`, wrapping around the edges of the torus.
    ///
    /// The second element is `true` if the target had to be wrapped back into the grid,
    /// which lets rules that should not see across edges ignore that neighbor.
    /// `origin` must be inside the grid; offsets may be arbitrarily large.
    pub fn resolve(&self, origin: Coordinate, offset: Coordinate) -> (Coordinate, bool) {
        debug_assert!(self.contains(origin), "origin {:?} outside of {:?}", origin, self);
        if self.is_empty() {
            return (origin, true);
        }
        let (x, wrapped_x) = wrap_axis(origin.x, offset.x, self.width);
        let (y, wrapped_y) = wrap_axis(origin.y, offset.y, self.height);
        (Coordinate::new(x, y), wrapped_x || wrapped_y)
    }
}

/// Move `origin` by `offset` along an axis of length `len`, modulo `len`.
///
/// The sum is taken in `usize`, where it cannot overflow for an in-bounds origin.
#[inline]
fn wrap_axis(origin: isize, offset: isize, len: usize) -> (isize, bool) {
    let inside = origin
        .checked_add(offset)
        .map_or(false, |t| t >= 0 && (t as usize) < len);
    let step = offset.rem_euclid(len as isize) as usize;
    (((origin as usize + step) % len) as isize, !inside)
}

/// An inclusive rectangle of cells between two corners.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Area {
    pub from: Coordinate,
    pub to: Coordinate,
}

impl Area {
    #[inline]
    pub fn new(from: Coordinate, to: Coordinate) -> Self {
        Self { from, to }
    }

    /// Only meaningful for areas that passed `Size::check_area`.
    #[inline]
    pub fn width(&self) -> usize {
        (self.to.x - self.from.x + 1) as usize
    }

    /// Only meaningful for areas that passed `Size::check_area`.
    #[inline]
    pub fn height(&self) -> usize {
        (self.to.y - self.from.y + 1) as usize
    }

    /// Every coordinate of the area in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        iproduct!(self.from.y..=self.to.y, self.from.x..=self.to.x).map(|(y, x)| Coordinate::new(x, y))
    }
}
