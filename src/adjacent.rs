use crate::{
    Coordinate, Direction, Grid, MooreNeighbors, Neighborhood, NeumannNeighbors, Topology,
};

/// A read-only view of the neighbors of one cell.
///
/// Rules receive one of these while the next generation is computed. It always reads
/// the generation being replaced, never the one being built.
#[derive(Debug)]
pub struct Adjacent<'a, T> {
    grid: &'a Grid<T>,
    origin: Coordinate,
}

impl<'a, T> Clone for Adjacent<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Adjacent<'a, T> {}

impl<'a, T> Adjacent<'a, T> {
    /// `origin` must be inside `grid`.
    #[inline]
    pub fn new(grid: &'a Grid<T>, origin: Coordinate) -> Self {
        Adjacent { grid, origin }
    }

    #[inline]
    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    /// The cell at `offset` from the origin and whether reaching it crossed an edge.
    #[inline]
    pub fn get(&self, offset: Coordinate) -> (&'a T, bool) {
        let (target, wrapped) = self.grid.size().resolve(self.origin, offset);
        (&self.grid[target], wrapped)
    }

    #[inline]
    pub fn toward<D: Direction>(&self, dir: D) -> (&'a T, bool) {
        self.get(dir.delta())
    }

    pub fn moore(&self) -> MooreNeighbors<(&'a T, bool)> {
        MooreNeighbors::new(|dir| self.toward(dir))
    }

    pub fn neumann(&self) -> NeumannNeighbors<(&'a T, bool)> {
        NeumannNeighbors::new(|dir| self.toward(dir))
    }

    /// Count the Moore neighbors matching `pred`, skipping the ones `topology` does not
    /// connect.
    pub fn live_count_by<P>(&self, topology: Topology, mut pred: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        self.moore()
            .count_by(|&(cell, wrapped)| (!wrapped || topology == Topology::Torus) && pred(cell))
    }
}
