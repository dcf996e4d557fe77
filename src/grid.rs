use crate::{Adjacent, Area, Coordinate, Error, Result, Rule, Size};
use rayon::iter::IndexedParallelIterator;
use rayon::iter::IntoParallelRefIterator;
use rayon::iter::ParallelIterator;
use std::ops::{Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A `width x height` matrix of cells stored in row-major order.
///
/// `Grid` is a plain value: it does no locking of its own. The engines wrap one in a
/// lock and only hand out copies or short-lived borrows of it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawGrid<T>", bound(deserialize = "T: Deserialize<'de>"))
)]
pub struct Grid<T> {
    size: Size,
    cells: Vec<T>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawGrid<T> {
    size: Size,
    cells: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = Error;

    fn try_from(raw: RawGrid<T>) -> Result<Self> {
        Grid::new_iter(raw.size, raw.cells)
    }
}

impl<T> Grid<T> {
    /// Make a new grid by cloning an initial cell.
    pub fn new(size: Size, initial: T) -> Self
    where
        T: Clone,
    {
        Grid {
            size,
            cells: vec![initial; size.cells()],
        }
    }

    /// Make a new grid using the cell's `Default` impl.
    pub fn new_default(size: Size) -> Self
    where
        T: Default,
    {
        Self::new_coord_map(size, |_| T::default())
    }

    /// Make a new grid directly from row-major cells.
    ///
    /// The iterator must yield exactly `size.cells()` cells.
    pub fn new_iter<I>(size: Size, iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let size = size.validate()?;
        let cells: Vec<T> = iter.into_iter().collect();
        if cells.len() != size.cells() {
            return Err(Error::SeedMismatch {
                expected: size.cells(),
                found: cells.len(),
            });
        }
        Ok(Grid { size, cells })
    }

    /// Make a grid from a matrix of rows, `rows[y][x]`.
    ///
    /// Rows must be non-empty and all the same length. An empty matrix is an empty grid.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some(row) = rows.iter().find(|row| row.is_empty() || row.len() != width) {
            return Err(Error::SeedMismatch {
                expected: width.max(1),
                found: row.len(),
            });
        }
        Ok(Grid {
            size: Size { width, height },
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Make a grid by evaluating each coordinate to a cell with a closure.
    pub fn new_coord_map<F>(size: Size, coord_map: F) -> Self
    where
        F: FnMut(Coordinate) -> T,
    {
        Grid {
            size,
            cells: size.coordinates().map(coord_map).collect(),
        }
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn get(&self, c: Coordinate) -> Result<&T> {
        let c = self.size.check(c)?;
        Ok(&self[c])
    }

    pub fn get_mut(&mut self, c: Coordinate) -> Result<&mut T> {
        let c = self.size.check(c)?;
        Ok(&mut self[c])
    }

    /// Replace the cell at `c`, returning the old one.
    pub fn set(&mut self, c: Coordinate, cell: T) -> Result<T> {
        Ok(std::mem::replace(self.get_mut(c)?, cell))
    }

    /// Get the grid's cell slice in row-major order.
    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells[..]
    }

    /// Iterate over the rows of the grid. There are always `height` of them.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        let width = self.size.width;
        (0..self.size.height).map(move |y| &self.cells[y * width..(y + 1) * width])
    }

    /// Every cell with its coordinate, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &T)> {
        self.size.coordinates().zip(self.cells.iter())
    }

    /// Every cell of `area` with its coordinate, in row-major order.
    pub fn iter_area(&self, area: Area) -> Result<impl Iterator<Item = (Coordinate, &T)>> {
        let area = self.size.check_area(area)?;
        Ok(area.coordinates().map(move |c| (c, &self[c])))
    }

    /// Copy `area` out into a grid of its own. The copy's origin is `area.from`.
    pub fn sub_grid(&self, area: Area) -> Result<Grid<T>>
    where
        T: Clone,
    {
        let cells = self.iter_area(area)?.map(|(_, cell)| cell.clone()).collect();
        Ok(Grid {
            size: Size {
                width: area.width(),
                height: area.height(),
            },
            cells,
        })
    }

    /// Overwrite every cell with `initial`.
    pub fn fill(&mut self, initial: &T)
    where
        T: Clone,
    {
        for cell in &mut self.cells {
            cell.clone_from(initial);
        }
    }

    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            size: self.size,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// Compute the next generation into a fresh grid.
    ///
    /// Every cell is produced from this (old) grid only, so the order cells are visited
    /// in cannot change the result and the work is spread over the rayon pool.
    pub fn step<R>(&self, rule: &R) -> Grid<T>
    where
        R: Rule<T> + ?Sized,
        T: Send + Sync,
    {
        let cells = self
            .cells
            .par_iter()
            .enumerate()
            .map(|(ix, cell)| {
                let c = self.size.coordinate(ix);
                rule.next(c, cell, &Adjacent::new(self, c))
            })
            .collect();
        Grid {
            size: self.size,
            cells,
        }
    }
}

/// Panics if `c` is out of bounds.
impl<T> Index<Coordinate> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, c: Coordinate) -> &T {
        assert!(self.size.contains(c), "coordinate {:?} outside of grid", c);
        &self.cells[self.size.index(c)]
    }
}

/// Panics if `c` is out of bounds.
impl<T> IndexMut<Coordinate> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, c: Coordinate) -> &mut T {
        assert!(self.size.contains(c), "coordinate {:?} outside of grid", c);
        let ix = self.size.index(c);
        &mut self.cells[ix]
    }
}
