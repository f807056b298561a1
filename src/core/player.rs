//! Side identification and per-side data storage.
//!
//! ## Side
//!
//! The game always has exactly two sides, Blue and Red. Blue moves first.
//!
//! ## SideMap
//!
//! Per-side storage with O(1) access, indexable by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Moves first.
    Blue,
    /// Moves second.
    Red,
}

impl Side {
    /// Both sides in turn order.
    pub const ALL: [Side; 2] = [Side::Blue, Side::Red];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Blue => Side::Red,
            Side::Red => Side::Blue,
        }
    }

    /// Lowercase name, as used by renderers ("blue" / "red").
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Side::Blue => "blue",
            Side::Red => "red",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-side data storage.
///
/// ## Example
///
/// ```
/// use rust_hexnet::core::{Side, SideMap};
///
/// let mut energy: SideMap<u32> = SideMap::with_value(10);
/// energy[Side::Red] -= 2;
///
/// assert_eq!(energy[Side::Blue], 10);
/// assert_eq!(energy[Side::Red], 8);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    blue: T,
    red: T,
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(mut factory: impl FnMut(Side) -> T) -> Self {
        Self {
            blue: factory(Side::Blue),
            red: factory(Side::Red),
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            blue: value.clone(),
            red: value,
        }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Blue => &self.blue,
            Side::Red => &self.red,
        }
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Blue => &mut self.blue,
            Side::Red => &mut self.red,
        }
    }

    /// Borrow a side's data mutably together with the opponent's data.
    pub fn split_mut(&mut self, side: Side) -> (&mut T, &mut T) {
        match side {
            Side::Blue => (&mut self.blue, &mut self.red),
            Side::Red => (&mut self.red, &mut self.blue),
        }
    }

    /// Iterate over (Side, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::Blue, &self.blue), (Side::Red, &self.red)].into_iter()
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
