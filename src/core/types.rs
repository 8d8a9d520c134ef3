//! Strongly-typed wrappers for game concepts
//!
//! `Side` names one of the two participants, and `Sided<T>` holds one value
//! per side so per-player data can't be indexed by anything else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the two game participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    SideA,
    SideB,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::SideA, Side::SideB];

    pub fn opponent(self) -> Side {
        match self {
            Side::SideA => Side::SideB,
            Side::SideB => Side::SideA,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::SideA => "side_a",
            Side::SideB => "side_b",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "side_a" | "a" => Ok(Side::SideA),
            "side_b" | "b" => Ok(Side::SideB),
            _ => Err(format!("invalid side '{s}' (expected: side_a, side_b)")),
        }
    }
}

/// One value per side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sided<T> {
    pub side_a: T,
    pub side_b: T,
}

impl<T> Sided<T> {
    pub fn new(side_a: T, side_b: T) -> Self {
        Sided { side_a, side_b }
    }

    /// Build both values from a function of the side
    pub fn from_fn(mut f: impl FnMut(Side) -> T) -> Self {
        Sided {
            side_a: f(Side::SideA),
            side_b: f(Side::SideB),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::SideA, &self.side_a), (Side::SideB, &self.side_b)].into_iter()
    }

    pub fn map<U>(self, mut f: impl FnMut(Side, T) -> U) -> Sided<U> {
        Sided {
            side_a: f(Side::SideA, self.side_a),
            side_b: f(Side::SideB, self.side_b),
        }
    }
}

impl<T> Index<Side> for Sided<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::SideA => &self.side_a,
            Side::SideB => &self.side_b,
        }
    }
}

impl<T> IndexMut<Side> for Sided<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::SideA => &mut self.side_a,
            Side::SideB => &mut self.side_b,
        }
    }
}
