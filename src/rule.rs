use crate::{Adjacent, Coordinate, Topology};

/// A transition rule: produces the next state of one cell.
///
/// This enforces a rule in that all new cells are only produced from old grid state.
/// This prevents the update order from breaking the simulation. Rules are run from
/// several threads at once and must not reach around the `Adjacent` view to mutate
/// cells; anything from `cell` the next state should keep must be carried over by the
/// rule itself.
///
/// Any `Fn(Coordinate, &T, &Adjacent<T>) -> T` closure that is `Send + Sync` is a rule.
pub trait Rule<T>: Send + Sync {
    fn next(&self, coordinate: Coordinate, cell: &T, adjacent: &Adjacent<'_, T>) -> T;
}

impl<T, F> Rule<T> for F
where
    F: Fn(Coordinate, &T, &Adjacent<'_, T>) -> T + Send + Sync,
{
    #[inline]
    fn next(&self, coordinate: Coordinate, cell: &T, adjacent: &Adjacent<'_, T>) -> T {
        self(coordinate, cell, adjacent)
    }
}

/// Leaves every cell as it is. Engines start out with this rule.
#[derive(Copy, Clone, Debug, Default)]
pub struct Identity;

impl<T: Clone> Rule<T> for Identity {
    #[inline]
    fn next(&self, _: Coordinate, cell: &T, _: &Adjacent<'_, T>) -> T {
        cell.clone()
    }
}

/// Conway's Game of Life (B3/S23) evaluated by scanning all eight neighbors.
#[derive(Copy, Clone, Debug, Default)]
pub struct Conway {
    pub topology: Topology,
}

impl Conway {
    pub fn new(topology: Topology) -> Self {
        Conway { topology }
    }
}

impl Rule<bool> for Conway {
    fn next(&self, _: Coordinate, &alive: &bool, adjacent: &Adjacent<'_, bool>) -> bool {
        let n = adjacent.live_count_by(self.topology, |&c| c);
        if alive {
            (2..=3).contains(&n)
        } else {
            n == 3
        }
    }
}
