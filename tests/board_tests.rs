//! Board topology tests.

use std::collections::HashSet;

use proptest::prelude::*;

use rust_hexnet::board::{Board, Cube, HEX_OFFSETS};
use rust_hexnet::core::Side;

#[test]
fn test_default_board_shape() {
    let board = Board::generate(3);

    assert_eq!(board.vertices().len(), 37);
    // Every adjacent pair once: 3r(3r + 1).
    assert_eq!(board.edges().len(), 90);
    assert!(board.edges().iter().all(|e| e.owner.is_none()));
}

#[test]
fn test_start_vertices_are_opposite_corners() {
    let board = Board::generate(3);
    let blue = board.start_vertex(Side::Blue).unwrap();
    let red = board.start_vertex(Side::Red).unwrap();

    assert_eq!(board.vertex(blue).unwrap().cube, Cube::from_xy(0, 3));
    assert_eq!(board.vertex(red).unwrap().cube, Cube::from_xy(0, -3));
    assert_eq!(board.neighbors(blue).count(), 3);
    assert_eq!(board.neighbors(red).count(), 3);
}

#[test]
fn test_neighbor_offsets_match_edges() {
    let board = Board::generate(2);
    let center = board.vertex_at(Cube::ORIGIN).unwrap();

    for offset in HEX_OFFSETS {
        let cube = Cube::ORIGIN.offset(offset);
        let other = board.vertex_at(cube).unwrap();
        assert!(board.edge_between(center, other).is_some(), "{cube}");
        assert!(board.edge_between(other, center).is_some());
    }
}

proptest! {
    #[test]
    fn prop_board_counts(radius in 1u32..8) {
        let board = Board::generate(radius);
        let r = radius as usize;

        prop_assert_eq!(board.vertices().len(), 3 * r * r + 3 * r + 1);
        prop_assert_eq!(board.edges().len(), 3 * r * (3 * r + 1));
    }

    #[test]
    fn prop_edges_join_adjacent_cells(radius in 1u32..8) {
        let board = Board::generate(radius);
        let mut pairs = HashSet::new();

        for edge in board.edges() {
            let a = board.vertex(edge.a).unwrap().cube;
            let b = board.vertex(edge.b).unwrap().cube;
            prop_assert_eq!(a.distance(b), 1);
            let key = if edge.a < edge.b { (edge.a, edge.b) } else { (edge.b, edge.a) };
            prop_assert!(pairs.insert(key), "duplicate edge {:?}", key);
        }
    }

    #[test]
    fn prop_vertices_inside_radius(radius in 1u32..8) {
        let board = Board::generate(radius);
        let mut seen = HashSet::new();

        for vertex in board.vertices() {
            prop_assert!(vertex.cube.distance(Cube::ORIGIN) <= radius);
            prop_assert!(seen.insert(vertex.cube));
            prop_assert_eq!(board.vertex_at(vertex.cube), Some(vertex.id));
        }
    }
}
