//! Cube coordinates on the hex grid.
//!
//! Every cell satisfies `x + y + z == 0`. Two cells are adjacent when they
//! differ by one of the six unit offsets in [`HEX_OFFSETS`].

use serde::{Deserialize, Serialize};

/// The six unit steps between adjacent cells.
pub const HEX_OFFSETS: [(i32, i32, i32); 6] = [
    (1, -1, 0),
    (-1, 1, 0),
    (1, 0, -1),
    (-1, 0, 1),
    (0, 1, -1),
    (0, -1, 1),
];

/// A hex cell in cube coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cube {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cube {
    /// The center cell.
    pub const ORIGIN: Cube = Cube { x: 0, y: 0, z: 0 };

    /// Create a cube coordinate, returning `None` unless `x + y + z == 0`.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Option<Self> {
        if x + y + z == 0 {
            Some(Self { x, y, z })
        } else {
            None
        }
    }

    /// Create a cube coordinate from its first two components.
    #[must_use]
    pub const fn from_xy(x: i32, y: i32) -> Self {
        Self { x, y, z: -x - y }
    }

    /// Number of steps between two cells.
    #[must_use]
    pub const fn distance(self, other: Cube) -> u32 {
        ((self.x - other.x).unsigned_abs()
            + (self.y - other.y).unsigned_abs()
            + (self.z - other.z).unsigned_abs())
            / 2
    }

    /// Distance from the center, i.e. the ring this cell lies on.
    #[must_use]
    pub const fn ring(self) -> u32 {
        self.distance(Self::ORIGIN)
    }

    /// The cell one unit offset away.
    #[must_use]
    pub const fn offset(self, (dx, dy, dz): (i32, i32, i32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// All six adjacent cells, in [`HEX_OFFSETS`] order.
    pub fn neighbors(self) -> impl Iterator<Item = Cube> {
        HEX_OFFSETS.into_iter().map(move |step| self.offset(step))
    }
}

impl std::fmt::Display for Cube {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_enforces_plane() {
        assert!(Cube::new(1, -1, 0).is_some());
        assert!(Cube::new(1, 1, 0).is_none());
        assert_eq!(Cube::from_xy(2, -3), Cube { x: 2, y: -3, z: 1 });
    }

    #[test]
    fn test_distance() {
        let a = Cube::from_xy(0, 3);
        let b = Cube::from_xy(0, -3);

        assert_eq!(a.distance(b), 6);
        assert_eq!(a.ring(), 3);
        assert_eq!(Cube::ORIGIN.ring(), 0);
    }

    #[test]
    fn test_neighbors_are_adjacent() {
        let center = Cube::from_xy(1, -2);
        let neighbors: Vec<_> = center.neighbors().collect();

        assert_eq!(neighbors.len(), 6);
        for n in neighbors {
            assert_eq!(n.x + n.y + n.z, 0);
            assert_eq!(center.distance(n), 1);
        }
    }
}
