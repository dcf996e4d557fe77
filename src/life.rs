use crate::guard::Guard;
use crate::{Area, Coordinate, Direction, Grid, LifeRule, MooreDirection, Result, Size, Topology};
use boolinator::Boolinator;
use rayon::iter::IndexedParallelIterator;
use rayon::iter::IntoParallelRefIterator;
use rayon::iter::ParallelIterator;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A cell of a Life-like automaton: the alive flag plus whatever the caller wants to
/// keep alongside it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LifeCell<M = ()> {
    pub alive: bool,
    pub meta: M,
}

impl<M> LifeCell<M> {
    pub fn new(alive: bool, meta: M) -> Self {
        LifeCell { alive, meta }
    }
}

/// How many cells were born and how many died in one generation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Transitions {
    pub births: usize,
    pub deaths: usize,
}

/// A grid of `LifeCell`s that keeps, for every cell, the number of live cells in its
/// Moore neighborhood.
///
/// The counts are a cache of the alive flags: every change of a flag adjusts the eight
/// surrounding counts in the same call, so a generation can be classified without
/// looking at any neighbors. Under `Topology::Torus` a neighbor is counted once per
/// offset that reaches it, so on grids narrower than three cells a cell may count
/// another (or itself) more than once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifeGrid<M = ()> {
    cells: Grid<LifeCell<M>>,
    counts: Vec<u8>,
    topology: Topology,
}

impl<M> LifeGrid<M> {
    /// An all-dead grid whose cells carry `meta`.
    pub fn new(size: Size, topology: Topology, meta: M) -> Self
    where
        M: Clone,
    {
        LifeGrid {
            cells: Grid::new(size, LifeCell::new(false, meta)),
            counts: vec![0; size.cells()],
            topology,
        }
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.cells.size()
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    #[inline]
    pub fn cells(&self) -> &Grid<LifeCell<M>> {
        &self.cells
    }

    pub fn get(&self, c: Coordinate) -> Result<&LifeCell<M>> {
        self.cells.get(c)
    }

    /// The cached number of live neighbors of `c`.
    pub fn live_neighbors(&self, c: Coordinate) -> Result<u8> {
        let c = self.size().check(c)?;
        Ok(self.counts[self.size().index(c)])
    }

    /// Set the alive flag of `c`, returning whether it changed.
    pub fn set_alive(&mut self, c: Coordinate, alive: bool) -> Result<bool> {
        let c = self.size().check(c)?;
        Ok(self.flip(c, alive))
    }

    /// Replace the meta of `c`, returning the old one. Counts are untouched.
    pub fn set_meta(&mut self, c: Coordinate, meta: M) -> Result<M> {
        Ok(std::mem::replace(&mut self.cells.get_mut(c)?.meta, meta))
    }

    /// Replace the whole cell at `c`.
    pub fn set_cell(&mut self, c: Coordinate, cell: LifeCell<M>) -> Result<()> {
        let c = self.size().check(c)?;
        self.flip(c, cell.alive);
        self.cells[c].meta = cell.meta;
        Ok(())
    }

    /// Kill every cell, give it `meta` and zero the counts.
    pub fn reset(&mut self, meta: &M)
    where
        M: Clone,
    {
        self.cells.fill(&LifeCell::new(false, meta.clone()));
        self.counts.iter_mut().for_each(|n| *n = 0);
    }

    fn flip(&mut self, c: Coordinate, alive: bool) -> bool {
        let cell = &mut self.cells[c];
        if cell.alive == alive {
            return false;
        }
        cell.alive = alive;
        self.adjust_neighbors(c, alive);
        true
    }

    fn adjust_neighbors(&mut self, c: Coordinate, alive: bool) {
        let size = self.size();
        for dir in MooreDirection::directions() {
            if let Some(n) = self.topology.neighbor(size, c, dir.delta()) {
                let count = &mut self.counts[size.index(n)];
                if alive {
                    *count += 1;
                } else {
                    *count -= 1;
                }
            }
        }
    }

    /// Advance one generation.
    ///
    /// Every cell is classified from its flag and cached count first; only then are the
    /// deaths and after them the births applied, so no transition can see another one
    /// from the same generation.
    pub fn step<B, D>(&mut self, birth: B, death: D) -> Transitions
    where
        B: Fn(u8, Coordinate, &M) -> bool + Sync,
        D: Fn(u8, Coordinate, &M) -> bool + Sync,
        M: Send + Sync,
    {
        let size = self.size();
        let flips: Vec<(Coordinate, bool)> = self
            .cells
            .cells()
            .par_iter()
            .zip(self.counts.par_iter())
            .enumerate()
            .filter_map(|(ix, (cell, &n))| {
                let c = size.coordinate(ix);
                if cell.alive {
                    death(n, c, &cell.meta).as_some((c, false))
                } else {
                    birth(n, c, &cell.meta).as_some((c, true))
                }
            })
            .collect();

        let mut transitions = Transitions::default();
        for &(c, _) in flips.iter().filter(|&&(_, alive)| !alive) {
            self.flip(c, false);
            transitions.deaths += 1;
        }
        for &(c, _) in flips.iter().filter(|&&(_, alive)| alive) {
            self.flip(c, true);
            transitions.births += 1;
        }
        transitions
    }
}

/// Decides from `(live neighbor count, coordinate, meta)` whether a cell flips.
pub type Predicate<M> = Box<dyn Fn(u8, Coordinate, &M) -> bool + Send + Sync>;

fn predicate<M, F>(f: F) -> Predicate<M>
where
    F: Fn(u8, Coordinate, &M) -> bool + Send + Sync + 'static,
{
    Box::new(f)
}

struct LifeState<M> {
    grid: LifeGrid<M>,
    generation: u64,
    birth: Predicate<M>,
    death: Predicate<M>,
}

/// A Life-like automaton advanced by incremental neighbor counting.
///
/// Defaults to Conway's rules (B3/S23) on a torus. The birth and death predicates can be
/// replaced between advances; the neighborhood is always the radius 1 Moore
/// neighborhood. Locking works as for `Engine`.
pub struct Life<M = ()> {
    initial: M,
    state: Guard<LifeState<M>>,
}

impl Life<()> {
    /// An all-dead torus. Fails with `InvalidSize` if either dimension is negative.
    pub fn new(width: isize, height: isize) -> Result<Self> {
        Self::with_topology(width, height, Topology::Torus)
    }

    pub fn with_topology(width: isize, height: isize, topology: Topology) -> Result<Self> {
        Ok(Self::with_meta(Size::new(width, height)?, topology, ()))
    }

    /// Build a game from a matrix of alive flags, `rows[y][x]`.
    pub fn from_matrix(rows: &[Vec<bool>], topology: Topology) -> Result<Self> {
        let seed = Grid::from_rows(rows.to_vec())?;
        let life = Self::with_meta(seed.size(), topology, ());
        {
            let mut state = life.state.write();
            for (c, &alive) in seed.iter() {
                state.grid.flip(c, alive);
            }
        }
        Ok(life)
    }
}

impl<M> Life<M>
where
    M: Clone + Send + Sync + 'static,
{
    /// An all-dead grid whose cells carry `meta`. `reset` returns to this state.
    pub fn with_meta(size: Size, topology: Topology, meta: M) -> Self {
        debug!(
            width = size.width,
            height = size.height,
            ?topology,
            "created life"
        );
        Life {
            state: Guard::new(LifeState {
                grid: LifeGrid::new(size, topology, meta.clone()),
                generation: 0,
                birth: predicate(|n, _, _| LifeRule::CONWAY.is_birth(n)),
                death: predicate(|n, _, _| LifeRule::CONWAY.is_death(n)),
            }),
            initial: meta,
        }
    }

    /// Replace both predicates, builder style.
    pub fn with_rule(self, rule: LifeRule) -> Self {
        self.set_rule(rule);
        self
    }

    /// Replace both predicates with the counts of a Life-like rule.
    pub fn set_rule(&self, rule: LifeRule) {
        let mut state = self.state.write();
        state.birth = predicate(move |n, _, _| rule.is_birth(n));
        state.death = predicate(move |n, _, _| rule.is_death(n));
        debug!(%rule, "replaced life rule");
    }

    /// Replace the predicate deciding whether a dead cell comes alive.
    pub fn set_birth_rule<F>(&self, f: F)
    where
        F: Fn(u8, Coordinate, &M) -> bool + Send + Sync + 'static,
    {
        self.state.write().birth = predicate(f);
        debug!("replaced birth rule");
    }

    /// Replace the predicate deciding whether a live cell dies.
    pub fn set_death_rule<F>(&self, f: F)
    where
        F: Fn(u8, Coordinate, &M) -> bool + Send + Sync + 'static,
    {
        self.state.write().death = predicate(f);
        debug!("replaced death rule");
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.state.read().grid.size()
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.state.read().grid.topology()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.state.read().generation
    }

    pub fn get(&self, c: Coordinate) -> Result<LifeCell<M>> {
        self.state.read().grid.get(c).cloned()
    }

    pub fn is_alive(&self, c: Coordinate) -> Result<bool> {
        self.state.read().grid.get(c).map(|cell| cell.alive)
    }

    pub fn live_neighbors(&self, c: Coordinate) -> Result<u8> {
        self.state.read().grid.live_neighbors(c)
    }

    pub fn set(&self, c: Coordinate, alive: bool) -> Result<()> {
        self.state.write().grid.set_alive(c, alive).map(drop)
    }

    #[inline]
    pub fn revive(&self, c: Coordinate) -> Result<()> {
        self.set(c, true)
    }

    #[inline]
    pub fn kill(&self, c: Coordinate) -> Result<()> {
        self.set(c, false)
    }

    pub fn set_cell(&self, c: Coordinate, cell: LifeCell<M>) -> Result<()> {
        self.state.write().grid.set_cell(c, cell)
    }

    pub fn set_meta(&self, c: Coordinate, meta: M) -> Result<()> {
        self.state.write().grid.set_meta(c, meta).map(drop)
    }

    /// Set many cells at once. If any coordinate is outside the grid nothing is set.
    pub fn plant_seed(&self, seed: &[(Coordinate, bool)]) -> Result<()> {
        let mut state = self.state.write();
        let size = state.grid.size();
        for &(c, _) in seed {
            size.check(c)?;
        }
        for &(c, alive) in seed {
            state.grid.set_alive(c, alive)?;
        }
        debug!(cells = seed.len(), "planted seed");
        Ok(())
    }

    /// Advance every cell by one generation.
    pub fn advance(&self) {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let Transitions { births, deaths } = state.grid.step(&state.birth, &state.death);
        state.generation += 1;
        trace!(generation = state.generation, births, deaths, "advanced");
    }

    /// Kill every cell and restore the initial meta.
    pub fn reset(&self) {
        let mut state = self.state.write();
        state.grid.reset(&self.initial);
        state.generation = 0;
        debug!("reset life");
    }

    /// Visit every cell in row-major order.
    pub fn iterate<F>(&self, mut f: F)
    where
        F: FnMut(Coordinate, &LifeCell<M>),
    {
        let state = self.state.read();
        for (c, cell) in state.grid.cells().iter() {
            f(c, cell);
        }
    }

    /// Visit the cells of `area` in row-major order.
    pub fn iterate_area<F>(&self, area: Area, mut f: F) -> Result<()>
    where
        F: FnMut(Coordinate, &LifeCell<M>),
    {
        let state = self.state.read();
        for (c, cell) in state.grid.cells().iter_area(area)? {
            f(c, cell);
        }
        Ok(())
    }

    /// The alive flags as a matrix, `map[y][x]`.
    pub fn alive_map(&self) -> Vec<Vec<bool>> {
        self.state
            .read()
            .grid
            .cells()
            .rows()
            .map(|row| row.iter().map(|cell| cell.alive).collect())
            .collect()
    }

    /// The coordinates of every live cell in row-major order.
    pub fn alive_cells(&self) -> Vec<Coordinate> {
        self.state
            .read()
            .grid
            .cells()
            .iter()
            .filter_map(|(c, cell)| cell.alive.as_some(c))
            .collect()
    }

    pub fn population(&self) -> usize {
        self.state
            .read()
            .grid
            .cells()
            .cells()
            .iter()
            .filter(|cell| cell.alive)
            .count()
    }

    /// A copy of the current generation.
    pub fn snapshot(&self) -> Grid<LifeCell<M>> {
        self.state.read().grid.cells().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn c(x: isize, y: isize) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn setting_a_cell_counts_it_once() {
        let life = Life::new(5, 5).unwrap();
        life.revive(c(2, 2)).unwrap();
        life.revive(c(2, 2)).unwrap();
        assert_eq!(life.live_neighbors(c(1, 1)), Ok(1));
        assert_eq!(life.live_neighbors(c(3, 2)), Ok(1));
        assert_eq!(life.live_neighbors(c(2, 2)), Ok(0));
        assert_eq!(life.live_neighbors(c(0, 0)), Ok(0));

        life.kill(c(2, 2)).unwrap();
        life.kill(c(2, 2)).unwrap();
        assert_eq!(life.live_neighbors(c(1, 1)), Ok(0));
    }

    #[test]
    fn corner_counts_follow_topology() {
        let torus = Life::new(4, 4).unwrap();
        let bounded = Life::with_topology(4, 4, Topology::Bounded).unwrap();
        for life in [&torus, &bounded] {
            life.revive(c(0, 0)).unwrap();
        }
        assert_eq!(torus.live_neighbors(c(3, 3)), Ok(1));
        assert_eq!(bounded.live_neighbors(c(3, 3)), Ok(0));
        assert_eq!(bounded.live_neighbors(c(1, 1)), Ok(1));
    }

    #[test]
    fn single_cell_torus_neighbors_itself() {
        let life = Life::new(1, 1).unwrap();
        life.revive(c(0, 0)).unwrap();
        assert_eq!(life.live_neighbors(c(0, 0)), Ok(8));
        life.advance();
        assert_eq!(life.is_alive(c(0, 0)), Ok(false));
        assert_eq!(life.live_neighbors(c(0, 0)), Ok(0));
    }

    #[test]
    fn seed_is_all_or_nothing() {
        let life = Life::new(2, 2).unwrap();
        let err = life
            .plant_seed(&[(c(0, 0), true), (c(3, 0), true)])
            .unwrap_err();
        assert_eq!(err, Error::OutOfBounds { coordinate: c(3, 0) });
        assert_eq!(life.population(), 0);

        life.plant_seed(&[(c(0, 0), true), (c(1, 1), true)]).unwrap();
        assert_eq!(life.alive_cells(), vec![c(0, 0), c(1, 1)]);
    }

    #[test]
    fn empty_rows_are_rejected() {
        let err = Life::from_matrix(&[vec![], vec![]], Topology::Torus)
            .err()
            .unwrap();
        assert_eq!(
            err,
            Error::SeedMismatch {
                expected: 1,
                found: 0
            }
        );

        let thin = Life::new(0, 2).unwrap();
        assert_eq!(thin.alive_map(), vec![Vec::<bool>::new(); 2]);
    }

    #[test]
    fn ragged_matrix_is_rejected() {
        let err = Life::from_matrix(&[vec![true, false], vec![true]], Topology::Torus)
            .err()
            .unwrap();
        assert_eq!(
            err,
            Error::SeedMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn custom_birth_rule_revives_everything() {
        let life = Life::new(3, 3).unwrap();
        life.set_birth_rule(|_, _, _| true);
        life.advance();
        assert_eq!(life.population(), 9);
    }

    #[test]
    fn custom_death_rule_kills_everything() {
        let life = Life::from_matrix(&[vec![true; 3], vec![true; 3], vec![true; 3]], Topology::Torus)
            .unwrap();
        life.set_death_rule(|_, _, _| true);
        life.advance();
        assert_eq!(life.population(), 0);
        assert_eq!(life.alive_map(), vec![vec![false; 3]; 3]);
    }

    #[test]
    fn predicates_see_meta_and_meta_survives_advance() {
        // Only cells tagged as fertile may be born.
        let life = Life::with_meta(Size { width: 5, height: 5 }, Topology::Torus, false);
        life.set_birth_rule(|n, _, &fertile| fertile && n == 3);
        life.set_meta(c(2, 1), true).unwrap();
        life.plant_seed(&[(c(1, 2), true), (c(2, 2), true), (c(3, 2), true)])
            .unwrap();
        life.advance();

        // The blinker would normally grow (2, 1) and (2, 3); only the fertile one is born.
        assert_eq!(life.alive_cells(), vec![c(2, 1), c(2, 2)]);
        assert_eq!(life.get(c(2, 1)), Ok(LifeCell::new(true, true)));
        assert_eq!(life.get(c(2, 3)), Ok(LifeCell::new(false, false)));
    }

    #[test]
    fn reset_clears_cells_counts_and_meta() {
        let life = Life::with_meta(Size { width: 3, height: 3 }, Topology::Torus, 0u8);
        life.set_cell(c(1, 1), LifeCell::new(true, 9)).unwrap();
        life.advance();
        life.reset();
        assert_eq!(life.generation(), 0);
        life.iterate(|_, cell| assert_eq!(*cell, LifeCell::new(false, 0)));
        assert_eq!(life.live_neighbors(c(0, 0)), Ok(0));
    }

    #[test]
    fn rulestring_rules_apply() {
        // B2/S: a lone pair of neighbors seeds four new cells and dies itself.
        let life = Life::new(6, 6).unwrap().with_rule(LifeRule::SEEDS);
        life.plant_seed(&[(c(2, 2), true), (c(3, 2), true)]).unwrap();
        life.advance();
        assert_eq!(
            life.alive_cells(),
            vec![c(2, 1), c(3, 1), c(2, 3), c(3, 3)]
        );
    }
}
