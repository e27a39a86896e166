// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Invariant tests for the walkway graph
//!
//! These tests verify critical invariants:
//! 1. Symmetry - status and toggles look the same from both endpoints
//! 2. Toggle pairs - closing and reopening restores the original state
//! 3. Routing agreement - Dijkstra, BFS and Prim agree on reachability

use campus_compass::graph::{CampusGraph, Reach};
use campus_compass::types::{EdgeStatus, Vertex, Weight};
use proptest::prelude::*;
use std::collections::HashSet;

// =============================================================================
// Strategies
// =============================================================================

fn edges() -> impl Strategy<Value = Vec<(Vertex, Vertex, Weight)>> {
    prop::collection::vec((0..12i64, 0..12i64, 0..50u32), 0..40)
}

fn toggles() -> impl Strategy<Value = Vec<(Vertex, Vertex)>> {
    prop::collection::vec((0..12i64, 0..12i64), 0..20)
}

fn build(edges: &[(Vertex, Vertex, Weight)], toggles: &[(Vertex, Vertex)]) -> CampusGraph {
    let mut graph = CampusGraph::new();
    for &(u, v, w) in edges {
        graph.add_edge(u, v, w);
    }
    for &(u, v) in toggles {
        graph.toggle_edge(u, v);
    }
    graph
}

// =============================================================================
// Symmetry
// =============================================================================

proptest! {
    #[test]
    fn prop_edge_status_symmetric(edges in edges(), toggles in toggles()) {
        let graph = build(&edges, &toggles);
        for u in 0..12 {
            for v in 0..12 {
                prop_assert_eq!(graph.edge_status(u, v), graph.edge_status(v, u));
            }
        }
    }

    #[test]
    fn prop_added_edge_exists(edges in edges()) {
        let graph = build(&edges, &[]);
        for &(u, v, _) in &edges {
            prop_assert_eq!(graph.edge_status(u, v), EdgeStatus::Open);
        }
    }

    #[test]
    fn prop_double_toggle_restores(edges in edges(), toggles in toggles(), u in 0..12i64, v in 0..12i64) {
        let mut graph = build(&edges, &toggles);
        let before = graph.edge_status(u, v);
        let open_before = graph.open_edge_count();

        graph.toggle_edge(u, v);
        graph.toggle_edge(v, u);

        prop_assert_eq!(graph.edge_status(u, v), before);
        prop_assert_eq!(graph.open_edge_count(), open_before);
    }

    #[test]
    fn prop_connected_is_symmetric(edges in edges(), toggles in toggles(), u in 0..12i64, v in 0..12i64) {
        let graph = build(&edges, &toggles);
        prop_assert_eq!(graph.is_connected(u, v), graph.is_connected(v, u));
    }
}

// =============================================================================
// Routing Agreement
// =============================================================================

proptest! {
    #[test]
    fn prop_source_distance_zero(edges in edges(), toggles in toggles(), s in 0..15i64) {
        let graph = build(&edges, &toggles);
        let tree = graph.shortest_paths(s);

        prop_assert_eq!(tree.distance(s), Some(0));
        prop_assert_eq!(tree.predecessor(s), None);
        prop_assert!(graph.is_connected(s, s));
    }

    #[test]
    fn prop_every_vertex_listed(edges in edges(), toggles in toggles(), s in 0..12i64) {
        let graph = build(&edges, &toggles);
        let tree = graph.shortest_paths(s);

        for vertex in graph.vertices() {
            prop_assert_ne!(tree.reach(vertex), Reach::Unknown);
            prop_assert!(tree.predecessors().contains_key(&vertex));
        }
    }

    #[test]
    fn prop_dijkstra_matches_bfs(edges in edges(), toggles in toggles(), s in 0..12i64) {
        let graph = build(&edges, &toggles);
        let tree = graph.shortest_paths(s);

        for vertex in graph.vertices() {
            prop_assert_eq!(tree.distance(vertex).is_some(), graph.is_connected(s, vertex));
        }
    }

    #[test]
    fn prop_paths_use_open_edges(edges in edges(), toggles in toggles(), s in 0..12i64) {
        let graph = build(&edges, &toggles);
        let tree = graph.shortest_paths(s);

        for vertex in graph.vertices() {
            let Some(path) = tree.path_to(vertex) else { continue };
            prop_assert_eq!(path.first().copied(), Some(s));
            prop_assert_eq!(path.last().copied(), Some(vertex));
            for hop in path.windows(2) {
                prop_assert!(graph.edge_status(hop[0], hop[1]).exists());
            }
        }
    }

    #[test]
    fn prop_triangle_inequality(edges in edges(), toggles in toggles(), s in 0..12i64) {
        let graph = build(&edges, &toggles);
        let tree = graph.shortest_paths(s);

        for (u, v, walkway) in graph.walkways() {
            if walkway.closed {
                continue;
            }
            if let (Some(du), Some(dv)) = (tree.distance(u), tree.distance(v)) {
                prop_assert!(dv <= du + u64::from(walkway.minutes));
                prop_assert!(du <= dv + u64::from(walkway.minutes));
            }
        }
    }

    #[test]
    fn prop_mst_spans_start_component(edges in edges(), toggles in toggles(), subset in prop::collection::vec(0..12i64, 1..8)) {
        let graph = build(&edges, &toggles);
        let tree = graph.minimum_spanning_tree(&subset);
        let distinct: HashSet<_> = subset.iter().copied().collect();

        prop_assert_eq!(tree.requested, distinct.len());
        prop_assert!(tree.spanned >= 1);
        prop_assert!(tree.spanned <= tree.requested);
        if tree.spanned == 1 {
            prop_assert_eq!(tree.cost, 0);
        }
    }
}

// =============================================================================
// Fixed Scenarios
// =============================================================================

#[test]
fn test_order_independent_mst_cost() {
    let mut graph = CampusGraph::new();
    graph.add_edge(1, 2, 5);
    graph.add_edge(2, 3, 5);
    graph.add_edge(1, 3, 20);
    graph.add_edge(3, 4, 1);

    let subsets: [[Vertex; 4]; 3] = [[1, 2, 3, 4], [4, 3, 2, 1], [2, 4, 1, 3]];
    let costs: HashSet<_> = subsets
        .iter()
        .map(|subset| graph.minimum_spanning_tree_cost(subset))
        .collect();

    assert_eq!(costs.len(), 1);
    assert!(costs.contains(&11));
}

#[test]
fn test_closing_every_path_edge_disconnects() {
    let mut graph = CampusGraph::new();
    graph.add_edge(1, 2, 3);
    graph.add_edge(2, 3, 3);
    graph.add_edge(3, 4, 3);

    for (u, v) in [(1, 2), (2, 3), (3, 4)] {
        graph.toggle_edge(u, v);
    }

    assert!(!graph.is_connected(1, 4));
    assert_eq!(graph.shortest_paths(1).reach(4), Reach::Unreachable);
    assert_eq!(graph.minimum_spanning_tree_cost(&[1, 2, 3, 4]), 0);
}
