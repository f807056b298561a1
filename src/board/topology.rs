//! Board topology: the fixed vertex and edge set of a hexagonal board.
//!
//! A board of radius `r` contains every cube coordinate with all components
//! in `-r..=r`, which is `3r² + 3r + 1` vertices arranged in rings around the
//! center. Each pair of adjacent vertices is joined by exactly one edge.
//!
//! Ids are assigned in generation order and never change for the lifetime of
//! the board. Only the edge owners are mutable.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::coord::{Cube, HEX_OFFSETS};
use crate::core::{Error, Result, Side};

/// Board-assigned vertex identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub u32);

impl VertexId {
    /// Create a new vertex ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Vertex({})", self.0)
    }
}

/// Board-assigned edge identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// Create a new edge ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Edge({})", self.0)
    }
}

/// A board vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    pub cube: Cube,
}

/// An undirected edge between two adjacent vertices.
///
/// `a` always has the smaller id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub a: VertexId,
    pub b: VertexId,
    /// Side whose network runs along this edge, if any.
    pub owner: Option<Side>,
}

impl Edge {
    /// Check if `vertex` is one of the endpoints.
    #[must_use]
    pub fn touches(&self, vertex: VertexId) -> bool {
        self.a == vertex || self.b == vertex
    }
}

/// The vertex and edge set of one game.
#[derive(Clone, Debug)]
pub struct Board {
    radius: u32,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    by_cube: FxHashMap<Cube, VertexId>,
    by_pair: FxHashMap<(VertexId, VertexId), EdgeId>,
}

impl Board {
    /// Generate the board for the given radius.
    ///
    /// Deterministic: the same radius always yields the same ids.
    #[must_use]
    pub fn generate(radius: u32) -> Self {
        let r = radius as i32;

        let mut vertices = Vec::new();
        let mut by_cube = FxHashMap::default();
        for x in -r..=r {
            for y in (-r).max(-x - r)..=r.min(-x + r) {
                let id = VertexId::new(vertices.len() as u32);
                let cube = Cube::from_xy(x, y);
                vertices.push(Vertex { id, cube });
                by_cube.insert(cube, id);
            }
        }

        let mut edges = Vec::new();
        let mut by_pair = FxHashMap::default();
        for vertex in &vertices {
            for step in HEX_OFFSETS {
                let Some(&other) = by_cube.get(&vertex.cube.offset(step)) else {
                    continue;
                };
                // Each unordered pair is visited twice; keep the first.
                if vertex.id < other {
                    let id = EdgeId::new(edges.len() as u32);
                    edges.push(Edge {
                        id,
                        a: vertex.id,
                        b: other,
                        owner: None,
                    });
                    by_pair.insert((vertex.id, other), id);
                }
            }
        }

        Self {
            radius,
            vertices,
            edges,
            by_cube,
            by_pair,
        }
    }

    /// Board radius.
    #[must_use]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// All vertices in id order.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All edges in id order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get a vertex by id.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    /// Get an edge by id.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// Vertex at a cube coordinate, if it lies on the board.
    #[must_use]
    pub fn vertex_at(&self, cube: Cube) -> Option<VertexId> {
        self.by_cube.get(&cube).copied()
    }

    /// Edge joining two vertices, in either order.
    #[must_use]
    pub fn edge_between(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        let key = if a < b { (a, b) } else { (b, a) };
        self.by_pair.get(&key).copied()
    }

    /// Vertices adjacent to `id`.
    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.vertex(id)
            .into_iter()
            .flat_map(|v| v.cube.neighbors())
            .filter_map(|cube| self.vertex_at(cube))
    }

    /// Starting vertex of a side: the two extremes of the y axis.
    ///
    /// Blue starts at `(0, r, -r)`, Red at `(0, -r, r)`.
    #[must_use]
    pub fn start_vertex(&self, side: Side) -> Option<VertexId> {
        let r = self.radius as i32;
        let cube = match side {
            Side::Blue => Cube::from_xy(0, r),
            Side::Red => Cube::from_xy(0, -r),
        };
        self.vertex_at(cube)
    }

    /// Set the owner of an edge.
    pub fn set_owner(&mut self, id: EdgeId, owner: Option<Side>) -> Result<()> {
        let edge = self.edges.get_mut(id.index()).ok_or(Error::UnknownEdge(id))?;
        edge.owner = owner;
        Ok(())
    }

    /// Clear the owner of every edge held by `side` for which `keep` is false.
    ///
    /// Returns the number of edges released.
    pub fn release_owned(&mut self, side: Side, mut keep: impl FnMut(&Edge) -> bool) -> usize {
        let mut released = 0;
        for edge in &mut self.edges {
            if edge.owner == Some(side) && !keep(edge) {
                edge.owner = None;
                released += 1;
            }
        }
        released
    }
}
