//! Toroid is a library for running cellular automata on toroidal grids.
//!
//! Two engines are provided. [`Engine`] holds cells of any type and advances them with a
//! caller-supplied [`Rule`] that can look at any neighbor through an [`Adjacent`] view;
//! the whole next generation is computed (in parallel) from the previous one and then
//! swapped in. [`Life`] is specialized to alive/dead cells and keeps a cached live
//! neighbor count for every cell, so a generation only touches the neighbors of the
//! cells that actually flip.
//!
//! Both engines are safe to share between threads: reads run concurrently, while `set`,
//! `advance` and `reset` exclude everything else for the duration of the call.
//!
//! ```
//! use toroid::{Conway, Coordinate, Engine, Topology};
//!
//! let engine = Engine::new(5, 5, false)?.with_rule(Conway::new(Topology::Torus));
//! for x in 1..=3 {
//!     engine.set(Coordinate::new(x, 2), true)?;
//! }
//! engine.advance();
//! assert_eq!(engine.get(Coordinate::new(2, 1))?, true);
//! assert_eq!(engine.get(Coordinate::new(1, 2))?, false);
//! # Ok::<(), toroid::Error>(())
//! ```

mod adjacent;
mod coord;
mod direction;
mod engine;
mod error;
mod grid;
mod guard;
mod life;
mod moore;
mod neighborhood;
mod neumann;
mod rule;
pub mod rulestring;

pub use adjacent::*;
pub use coord::*;
pub use direction::*;
pub use engine::*;
pub use error::*;
pub use grid::*;
pub use life::*;
pub use moore::*;
pub use neighborhood::*;
pub use neumann::*;
pub use rule::*;
pub use rulestring::LifeRule;
