//! Life-like rules in `B.../S...` notation.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The live-neighbor counts (0 through 8) at which a dead cell is born and a live cell
/// survives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct LifeRule {
    birth: [bool; 9],
    survive: [bool; 9],
}

impl LifeRule {
    /// Conway's Game of Life.
    pub const CONWAY: LifeRule = LifeRule::from_counts(&[3], &[2, 3]);
    /// Like Life, with a replicator.
    pub const HIGH_LIFE: LifeRule = LifeRule::from_counts(&[3, 6], &[2, 3]);
    /// Every live cell dies; explosive growth.
    pub const SEEDS: LifeRule = LifeRule::from_counts(&[2], &[]);
    /// Symmetric under swapping live and dead cells.
    pub const DAY_AND_NIGHT: LifeRule = LifeRule::from_counts(&[3, 6, 7, 8], &[3, 4, 6, 7, 8]);
    /// Grows maze-like corridors.
    pub const MAZE: LifeRule = LifeRule::from_counts(&[3], &[1, 2, 3, 4, 5]);
    /// Every pattern is eventually replicated.
    pub const REPLICATOR: LifeRule = LifeRule::from_counts(&[1, 3, 5, 7], &[1, 3, 5, 7]);

    const fn from_counts(birth: &[u8], survive: &[u8]) -> Self {
        let mut rule = LifeRule {
            birth: [false; 9],
            survive: [false; 9],
        };
        let mut i = 0;
        while i < birth.len() {
            rule.birth[birth[i] as usize] = true;
            i += 1;
        }
        let mut i = 0;
        while i < survive.len() {
            rule.survive[survive[i] as usize] = true;
            i += 1;
        }
        rule
    }

    /// Build a rule from birth and survival counts, each at most 8.
    pub fn new(birth: &[u8], survive: &[u8]) -> Result<Self> {
        if birth.iter().chain(survive).any(|&n| n > 8) {
            return Err(Error::InvalidRule {
                rule: format!("B{:?}/S{:?}", birth, survive),
                reason: "neighbor counts must be at most 8",
            });
        }
        Ok(Self::from_counts(birth, survive))
    }

    /// Does a dead cell with `n` live neighbors come alive?
    #[inline]
    pub fn is_birth(&self, n: u8) -> bool {
        self.birth.get(n as usize).copied().unwrap_or(false)
    }

    /// Does a live cell with `n` live neighbors stay alive?
    #[inline]
    pub fn survives(&self, n: u8) -> bool {
        self.survive.get(n as usize).copied().unwrap_or(false)
    }

    #[inline]
    pub fn is_death(&self, n: u8) -> bool {
        !self.survives(n)
    }
}

impl Default for LifeRule {
    fn default() -> Self {
        LifeRule::CONWAY
    }
}

fn parse_counts(digits: &str, rule: &str) -> Result<[bool; 9]> {
    let mut counts = [false; 9];
    for ch in digits.chars() {
        match ch.to_digit(10) {
            Some(n) if n <= 8 => counts[n as usize] = true,
            _ => {
                return Err(Error::InvalidRule {
                    rule: rule.to_owned(),
                    reason: "neighbor counts must be digits from 0 to 8",
                })
            }
        }
    }
    Ok(counts)
}

impl FromStr for LifeRule {
    type Err = Error;

    /// Parses `B3/S23` style rules. The halves may come in either order and the
    /// letters are case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason| Error::InvalidRule {
            rule: s.to_owned(),
            reason,
        };
        let (first, second) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| invalid("expected two halves separated by '/'"))?;

        let mut birth = None;
        let mut survive = None;
        for half in [first, second] {
            let mut chars = half.chars();
            let slot = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => &mut birth,
                Some('S') => &mut survive,
                _ => return Err(invalid("each half must start with 'B' or 'S'")),
            };
            if slot.is_some() {
                return Err(invalid("the same half appears twice"));
            }
            *slot = Some(parse_counts(chars.as_str(), s)?);
        }

        match (birth, survive) {
            (Some(birth), Some(survive)) => Ok(LifeRule { birth, survive }),
            _ => Err(invalid("expected one 'B' half and one 'S' half")),
        }
    }
}

impl TryFrom<String> for LifeRule {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for LifeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |counts: &[bool; 9]| -> String {
            (0..9)
                .filter(|&n| counts[n])
                .map(|n| char::from(b'0' + n as u8))
                .collect()
        };
        write!(f, "B{}/S{}", digits(&self.birth), digits(&self.survive))
    }
}

impl From<LifeRule> for String {
    fn from(rule: LifeRule) -> String {
        rule.to_string()
    }
}
