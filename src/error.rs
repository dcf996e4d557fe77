use crate::{Area, Coordinate};
use thiserror::Error;

/// Everything that can go wrong when driving a grid.
///
/// None of these leave the grid partially modified: every operation validates its
/// input before it writes anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A grid was requested with a negative width or height.
    #[error("the grid size ({width} x {height}) is not valid")]
    InvalidSize { width: isize, height: isize },

    /// A coordinate does not lie within `[0, width) x [0, height)`.
    #[error("coordinate ({}, {}) is outside the grid", .coordinate.x, .coordinate.y)]
    OutOfBounds { coordinate: Coordinate },

    /// An area whose `from` corner is not componentwise `<=` its `to` corner.
    #[error(
        "area ({}, {})..=({}, {}) is not valid",
        .area.from.x,
        .area.from.y,
        .area.to.x,
        .area.to.y
    )]
    InvalidArea { area: Area },

    /// A seed does not have the shape of the grid it seeds: `found` cells were given
    /// where `expected` were needed (per row for matrices, in total otherwise).
    #[error("the seed does not match the grid: expected {expected} cells, found {found}")]
    SeedMismatch { expected: usize, found: usize },

    /// A Life-like rulestring could not be parsed.
    #[error("invalid rule {rule:?}: {reason}")]
    InvalidRule { rule: String, reason: &'static str },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
