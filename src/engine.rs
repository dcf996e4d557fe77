use crate::guard::Guard;
use crate::{Area, Coordinate, Grid, Identity, Result, Rule, Size};
use tracing::{debug, trace};

struct State<T> {
    grid: Grid<T>,
    generation: u64,
    rule: Box<dyn Rule<T>>,
}

/// A toroidal grid of arbitrary cells advanced by a swappable `Rule`.
///
/// Every generation is computed into a separate buffer from the previous generation
/// only, then swapped in, so all cells transition simultaneously. Any number of threads
/// may read at once; `set`, `advance`, `reset` and `set_rule` each hold the write lock for
/// their whole call.
///
/// The callbacks given to `iterate` and `iterate_area` run with the read lock held and
/// must not call back into a writing method of the same engine.
pub struct Engine<T> {
    initial: T,
    state: Guard<State<T>>,
}

impl<T> Engine<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Make an engine whose cells all start as `initial`.
    ///
    /// Fails with `InvalidSize` if either dimension is negative or the cell count
    /// does not fit in an `isize`.
    pub fn new(width: isize, height: isize, initial: T) -> Result<Self> {
        Ok(Self::with_size(Size::new(width, height)?, initial))
    }

    pub fn with_size(size: Size, initial: T) -> Self {
        Self::from_grid(Grid::new(size, initial.clone()), initial)
    }

    /// Start from an already seeded grid. `reset` still returns every cell to `initial`.
    pub fn from_grid(grid: Grid<T>, initial: T) -> Self {
        let size = grid.size();
        debug!(width = size.width, height = size.height, "created engine");
        Engine {
            initial,
            state: Guard::new(State {
                grid,
                generation: 0,
                rule: Box::new(Identity),
            }),
        }
    }

    /// Replace the rule, builder style.
    pub fn with_rule<R: Rule<T> + 'static>(self, rule: R) -> Self {
        self.set_rule(rule);
        self
    }

    /// Replace the rule used by later calls to `advance`.
    pub fn set_rule<R: Rule<T> + 'static>(&self, rule: R) {
        self.state.write().rule = Box::new(rule);
        debug!("replaced transition rule");
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.state.read().grid.size()
    }

    /// The number of generations advanced since construction or the last reset.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.state.read().generation
    }

    pub fn get(&self, c: Coordinate) -> Result<T> {
        self.state.read().grid.get(c).cloned()
    }

    /// Copy out the cells of `area`.
    pub fn get_area(&self, area: Area) -> Result<Grid<T>> {
        self.state.read().grid.sub_grid(area)
    }

    pub fn set(&self, c: Coordinate, cell: T) -> Result<()> {
        self.state.write().grid.set(c, cell).map(drop)
    }

    /// Advance every cell by one generation.
    pub fn advance(&self) {
        let mut state = self.state.write();
        let next = state.grid.step(&*state.rule);
        state.grid = next;
        state.generation += 1;
        trace!(generation = state.generation, "advanced");
    }

    /// Return every cell to the initial cell and the generation count to zero.
    pub fn reset(&self) {
        let mut state = self.state.write();
        state.grid = Grid::new(state.grid.size(), self.initial.clone());
        state.generation = 0;
        debug!("reset engine");
    }

    /// Visit every cell in row-major order.
    pub fn iterate<F>(&self, mut f: F)
    where
        F: FnMut(Coordinate, &T),
    {
        let state = self.state.read();
        for (c, cell) in state.grid.iter() {
            f(c, cell);
        }
    }

    /// Visit the cells of `area` in row-major order.
    pub fn iterate_area<F>(&self, area: Area, mut f: F) -> Result<()>
    where
        F: FnMut(Coordinate, &T),
    {
        let state = self.state.read();
        for (c, cell) in state.grid.iter_area(area)? {
            f(c, cell);
        }
        Ok(())
    }

    /// A copy of the current generation.
    pub fn snapshot(&self) -> Grid<T> {
        self.state.read().grid.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Adjacent, Error};

    #[test]
    fn invalid_size_builds_nothing() {
        assert_eq!(
            Engine::new(-2, 4, 0u8).err(),
            Some(Error::InvalidSize {
                width: -2,
                height: 4
            })
        );
        assert_eq!(
            Engine::new(isize::MAX, 4, 0u8).err(),
            Some(Error::InvalidSize {
                width: isize::MAX,
                height: 4
            })
        );
    }

    #[test]
    fn default_rule_keeps_cells() {
        let engine = Engine::new(3, 2, 'a').unwrap();
        engine.set(Coordinate::new(1, 1), 'b').unwrap();
        engine.advance();
        assert_eq!(engine.get(Coordinate::new(1, 1)), Ok('b'));
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn out_of_bounds_leaves_grid_alone() {
        let engine = Engine::new(2, 2, 0u8).unwrap();
        let before = engine.snapshot();
        for c in [(-1, 0), (0, -1), (2, 0), (0, 2)] {
            let c = Coordinate::from(c);
            assert_eq!(
                engine.set(c, 7),
                Err(Error::OutOfBounds { coordinate: c })
            );
            assert_eq!(engine.get(c), Err(Error::OutOfBounds { coordinate: c }));
        }
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn reset_restores_initial_cells() {
        let engine = Engine::new(3, 3, 0u32)
            .unwrap()
            .with_rule(|_: Coordinate, &n: &u32, _: &Adjacent<'_, u32>| n + 1);
        engine.set(Coordinate::new(2, 2), 40).unwrap();
        engine.advance();
        engine.advance();
        assert_eq!(engine.get(Coordinate::new(2, 2)), Ok(42));

        engine.reset();
        assert_eq!(engine.generation(), 0);
        engine.iterate(|_, &n| assert_eq!(n, 0));
    }

    #[test]
    fn rules_can_be_swapped_between_advances() {
        let engine = Engine::new(2, 1, 1i32).unwrap();
        engine.set_rule(|_: Coordinate, &n: &i32, _: &Adjacent<'_, i32>| n * 10);
        engine.advance();
        engine.set_rule(|_: Coordinate, &n: &i32, _: &Adjacent<'_, i32>| n - 1);
        engine.advance();
        assert_eq!(engine.snapshot().cells(), &[9, 9]);
    }

    #[test]
    fn area_operations_validate_the_area() {
        let engine = Engine::with_size(Size { width: 4, height: 4 }, 0u8);
        let inverted = Area::new(Coordinate::new(2, 2), Coordinate::new(1, 3));
        assert_eq!(
            engine.iterate_area(inverted, |_, _| {}),
            Err(Error::InvalidArea { area: inverted })
        );

        let mut seen = Vec::new();
        engine
            .iterate_area(
                Area::new(Coordinate::new(1, 2), Coordinate::new(2, 3)),
                |c, _| seen.push(c),
            )
            .unwrap();
        assert_eq!(
            seen,
            vec![
                Coordinate::new(1, 2),
                Coordinate::new(2, 2),
                Coordinate::new(1, 3),
                Coordinate::new(2, 3),
            ]
        );
        assert_eq!(
            engine
                .get_area(Area::new(Coordinate::new(0, 0), Coordinate::new(3, 0)))
                .map(|g| g.size()),
            Ok(Size { width: 4, height: 1 })
        );
    }
}
