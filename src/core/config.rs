//! Game configuration.
//!
//! A `GameConfig` is handed to the engine at construction and never changes
//! afterwards. Every field has a default, so partial configurations
//! deserialize cleanly:
//!
//! ```
//! use rust_hexnet::core::GameConfig;
//!
//! let config = GameConfig::default().with_path_cost(3).with_radius(4);
//! assert_eq!(config.path_cost, 3);
//! assert_eq!(config.factory_cost, 5);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// Static game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Energy spent per path edge.
    pub path_cost: u32,

    /// Energy spent per factory.
    pub factory_cost: u32,

    /// Energy each side starts with.
    pub starting_energy: u32,

    /// Board radius in rings. Radius 3 yields 37 vertices and 90 edges.
    pub radius: u32,

    /// Maximum number of parent links a lineage walk may follow before
    /// the tree is considered corrupt.
    ///
    /// Must cover the longest possible network, one link per board vertex
    /// beyond the root.
    pub max_lineage_depth: usize,

    /// Starting roots begin as factories.
    pub root_is_factory: bool,

    /// Moves stay legal after a side has won.
    ///
    /// When false the engine rejects every move except reset once a winner
    /// exists.
    pub play_after_win: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            path_cost: 2,
            factory_cost: 5,
            starting_energy: 10,
            radius: 3,
            max_lineage_depth: 100,
            root_is_factory: false,
            play_after_win: false,
        }
    }
}

impl GameConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cost of one path edge.
    #[must_use]
    pub fn with_path_cost(mut self, cost: u32) -> Self {
        self.path_cost = cost;
        self
    }

    /// Set the cost of one factory.
    #[must_use]
    pub fn with_factory_cost(mut self, cost: u32) -> Self {
        self.factory_cost = cost;
        self
    }

    /// Set the starting energy of both sides.
    #[must_use]
    pub fn with_starting_energy(mut self, energy: u32) -> Self {
        self.starting_energy = energy;
        self
    }

    /// Set the board radius.
    #[must_use]
    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the lineage safety bound.
    #[must_use]
    pub fn with_max_lineage_depth(mut self, depth: usize) -> Self {
        self.max_lineage_depth = depth;
        self
    }

    /// Start both roots as factories.
    #[must_use]
    pub fn with_factory_roots(mut self) -> Self {
        self.root_is_factory = true;
        self
    }

    /// Keep accepting moves after a win.
    #[must_use]
    pub fn with_play_after_win(mut self) -> Self {
        self.play_after_win = true;
        self
    }

    /// Check that the configuration describes a playable game.
    pub fn validate(&self) -> Result<()> {
        if self.radius == 0 {
            return Err(Error::InvalidConfiguration {
                message: "radius must be at least 1 so the starting vertices differ".to_string(),
            });
        }
        let longest = self.board_vertices() - 1;
        if (self.max_lineage_depth as u64) < longest {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "max_lineage_depth {} is below {longest}, the longest network a radius-{} board allows",
                    self.max_lineage_depth, self.radius
                ),
            });
        }
        Ok(())
    }

    /// Number of vertices on the configured board: 3r² + 3r + 1.
    #[must_use]
    pub fn board_vertices(&self) -> u64 {
        let r = u64::from(self.radius);
        3 * r * r + 3 * r + 1
    }
}
