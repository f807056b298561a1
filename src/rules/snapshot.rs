//! Read-only view of the game for renderers.
//!
//! A renderer never touches engine state; it draws whatever the latest
//! `RenderSnapshot` says. Edge owners are resolved from the networks
//! themselves, so a snapshot always shows the true tree structure.

use serde::{Deserialize, Serialize};

use super::engine::GameEngine;
use crate::board::{Cube, EdgeId, VertexId};
use crate::core::{Side, SideMap};

/// One vertex as a renderer sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexView {
    pub id: VertexId,
    pub cube: Cube,
    /// Which sides have claimed the vertex.
    pub claimed: SideMap<bool>,
    /// Which sides have a factory on the vertex.
    pub factory: SideMap<bool>,
}

impl VertexView {
    /// Side whose factory marker to draw. Red wins when both have one.
    #[must_use]
    pub fn factory_owner(&self) -> Option<Side> {
        if self.factory[Side::Red] {
            Some(Side::Red)
        } else if self.factory[Side::Blue] {
            Some(Side::Blue)
        } else {
            None
        }
    }
}

/// One edge as a renderer sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeView {
    pub id: EdgeId,
    pub a: VertexId,
    pub b: VertexId,
    pub owner: Option<Side>,
}

/// Complete read view of the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub radius: u32,
    pub vertices: Vec<VertexView>,
    pub edges: Vec<EdgeView>,
    pub current_player: Side,
    /// Energy of the side to move.
    pub energy: u32,
    pub energies: SideMap<u32>,
    pub turn: u32,
    pub winner: Option<Side>,
}

impl RenderSnapshot {
    /// Capture the current state of an engine.
    #[must_use]
    pub fn capture(engine: &GameEngine) -> Self {
        let board = engine.board();
        let networks = SideMap::new(|side| engine.network(side));

        let vertices = board
            .vertices()
            .iter()
            .map(|v| VertexView {
                id: v.id,
                cube: v.cube,
                claimed: SideMap::new(|side| networks[side].contains(v.id)),
                factory: SideMap::new(|side| networks[side].is_factory(v.id)),
            })
            .collect();

        let edges = board
            .edges()
            .iter()
            .map(|e| EdgeView {
                id: e.id,
                a: e.a,
                b: e.b,
                owner: Side::ALL
                    .into_iter()
                    .find(|&side| networks[side].is_parent_child(e.a, e.b)),
            })
            .collect();

        let current_player = engine.current_player();
        Self {
            radius: board.radius(),
            vertices,
            edges,
            current_player,
            energy: engine.energy(current_player),
            energies: SideMap::new(|side| engine.energy(side)),
            turn: engine.turn(),
            winner: engine.winner(),
        }
    }

    /// Get a vertex view by id.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&VertexView> {
        self.vertices.get(id.raw() as usize)
    }

    /// Get an edge view by id.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&EdgeView> {
        self.edges.get(id.raw() as usize)
    }

    /// Status line in the form "blue's turn - Energy: 10".
    #[must_use]
    pub fn status_line(&self) -> String {
        format!("{}'s turn - Energy: {}", self.current_player, self.energy)
    }
}
