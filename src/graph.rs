// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Walkway graph and routing algorithms
//!
//! Every walkway is stored exactly once in a petgraph edge arena and is
//! reachable from both of its endpoints, so closing a walkway is a single
//! mutation seen in both directions. Closed walkways stay in the graph but
//! are skipped by reachability, shortest paths and spanning trees.

use crate::types::{Cost, EdgeStatus, Vertex, Weight};
use petgraph::graph::{EdgeIndex, EdgeReference, NodeIndex, UnGraph};
use petgraph::visit::{EdgeRef, VisitMap, Visitable};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, VecDeque};
use tracing::{debug, trace};

/// A single walkway between two locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walkway {
    /// Walking time in minutes
    pub minutes: Weight,
    /// Whether the walkway is currently blocked
    pub closed: bool,
}

impl Walkway {
    /// Current open/closed state
    #[must_use]
    pub fn status(&self) -> EdgeStatus {
        if self.closed {
            EdgeStatus::Closed
        } else {
            EdgeStatus::Open
        }
    }
}

/// Undirected weighted graph of campus walkways
#[derive(Debug, Clone, Default)]
pub struct CampusGraph {
    /// Edge arena; node weights are the location ids
    graph: UnGraph<Vertex, Walkway>,
    /// Map from location id to node index
    node_indices: HashMap<Vertex, NodeIndex>,
    /// Optional human-readable location names
    labels: HashMap<Vertex, String>,
}

impl CampusGraph {
    /// Create a new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_vertex(&mut self, vertex: Vertex) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(&vertex) {
            return idx;
        }
        let idx = self.graph.add_node(vertex);
        self.node_indices.insert(vertex, idx);
        idx
    }

    /// Add an open walkway between `u` and `v`, creating either location if absent.
    ///
    /// Parallel walkways are kept; lookups by endpoint pair resolve to the one
    /// inserted first.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex, minutes: Weight) {
        let a = self.ensure_vertex(u);
        let b = self.ensure_vertex(v);
        self.graph.add_edge(a, b, Walkway { minutes, closed: false });
        trace!(u, v, minutes, "added walkway");
    }

    /// Attach a display name to a location. The first name recorded wins.
    pub fn set_label(&mut self, vertex: Vertex, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        self.labels
            .entry(vertex)
            .or_insert_with(|| name.to_string());
    }

    /// Display name of a location, if one was recorded
    #[must_use]
    pub fn label(&self, vertex: Vertex) -> Option<&str> {
        self.labels.get(&vertex).map(String::as_str)
    }

    /// First-inserted walkway joining `u` and `v`
    fn find_edge(&self, u: Vertex, v: Vertex) -> Option<EdgeIndex> {
        let a = *self.node_indices.get(&u)?;
        let b = *self.node_indices.get(&v)?;
        self.graph
            .edges(a)
            .filter(|e| opposite(*e, a) == b)
            .map(|e| e.id())
            .min()
    }

    /// Flip the walkway between `u` and `v` between open and closed.
    ///
    /// Returns `false` and changes nothing when no such walkway exists.
    pub fn toggle_edge(&mut self, u: Vertex, v: Vertex) -> bool {
        let Some(idx) = self.find_edge(u, v) else {
            debug!(u, v, "toggle ignored, no walkway");
            return false;
        };
        match self.graph.edge_weight_mut(idx) {
            Some(walkway) => {
                walkway.closed = !walkway.closed;
                debug!(u, v, closed = walkway.closed, "toggled walkway");
                true
            }
            None => false,
        }
    }

    /// Report whether the walkway between `u` and `v` is open, closed, or missing
    #[must_use]
    pub fn edge_status(&self, u: Vertex, v: Vertex) -> EdgeStatus {
        self.find_edge(u, v)
            .and_then(|idx| self.graph.edge_weight(idx))
            .map_or(EdgeStatus::DoesNotExist, Walkway::status)
    }

    /// Open walkways incident to a node
    fn open_edges(&self, node: NodeIndex) -> impl Iterator<Item = EdgeReference<'_, Walkway>> {
        self.graph.edges(node).filter(|e| !e.weight().closed)
    }

    /// Breadth-first reachability over open walkways.
    ///
    /// A location is always connected to itself, even if unknown.
    #[must_use]
    pub fn is_connected(&self, start: Vertex, goal: Vertex) -> bool {
        if start == goal {
            return true;
        }
        let (Some(&from), Some(&to)) = (self.node_indices.get(&start), self.node_indices.get(&goal))
        else {
            return false;
        };

        let mut visited = self.graph.visit_map();
        visited.visit(from);
        let mut queue = VecDeque::from([from]);

        while let Some(node) = queue.pop_front() {
            for edge in self.open_edges(node) {
                let next = opposite(edge, node);
                if next == to {
                    return true;
                }
                if visited.visit(next) {
                    queue.push_back(next);
                }
            }
        }
        false
    }

    /// Single-source Dijkstra over open walkways.
    ///
    /// The heap is keyed by `(distance, vertex)`, so among equal distances the
    /// lower location id is settled first and supplies the predecessor.
    #[must_use]
    pub fn shortest_paths(&self, source: Vertex) -> ShortestPathTree {
        let count = self.graph.node_count();
        let mut dist: Vec<Option<Cost>> = vec![None; count];
        let mut pred: Vec<Option<NodeIndex>> = vec![None; count];

        if let Some(&start) = self.node_indices.get(&source) {
            dist[start.index()] = Some(0);
            let mut heap = BinaryHeap::new();
            heap.push(Reverse((0, source, start)));

            while let Some(Reverse((d, _, node))) = heap.pop() {
                if dist[node.index()].is_some_and(|best| d > best) {
                    continue;
                }
                for edge in self.open_edges(node) {
                    let next = opposite(edge, node);
                    let candidate = d + Cost::from(edge.weight().minutes);
                    if dist[next.index()].map_or(true, |current| candidate < current) {
                        dist[next.index()] = Some(candidate);
                        pred[next.index()] = Some(node);
                        heap.push(Reverse((candidate, self.graph[next], next)));
                    }
                }
            }
        }

        let mut distances = BTreeMap::new();
        let mut predecessors = BTreeMap::new();
        for node in self.graph.node_indices() {
            let vertex = self.graph[node];
            distances.insert(vertex, dist[node.index()]);
            predecessors.insert(vertex, pred[node.index()].map(|p| self.graph[p]));
        }
        // An unknown source is an isolated location: it still reaches itself.
        distances.entry(source).or_insert(Some(0));
        predecessors.entry(source).or_insert(None);

        trace!(source, reachable = distances.values().filter(|d| d.is_some()).count(), "dijkstra done");

        ShortestPathTree {
            source,
            distances,
            predecessors,
        }
    }

    /// Prim's spanning tree over the subgraph induced by `subset`.
    ///
    /// Only open walkways with both endpoints in `subset` are used, and the
    /// tree grows from `subset[0]`. When the induced subgraph is disconnected
    /// only the component of the first location is spanned; the returned
    /// [`SpanningTree`] reports how many locations that covered.
    #[must_use]
    pub fn minimum_spanning_tree(&self, subset: &[Vertex]) -> SpanningTree {
        let requested: HashSet<Vertex> = subset.iter().copied().collect();
        let Some(&first) = subset.first() else {
            return SpanningTree::default();
        };

        let mut tree = SpanningTree {
            cost: 0,
            spanned: 1,
            requested: requested.len(),
        };
        let Some(&root) = self.node_indices.get(&first) else {
            return tree;
        };

        let members: HashSet<NodeIndex> = requested
            .iter()
            .filter_map(|v| self.node_indices.get(v).copied())
            .collect();

        let mut in_tree = self.graph.visit_map();
        in_tree.visit(root);
        let mut frontier = BinaryHeap::new();
        self.extend_frontier(root, &members, &in_tree, &mut frontier);

        while tree.spanned < members.len() {
            let Some(Reverse((minutes, _, node))) = frontier.pop() else {
                break;
            };
            if !in_tree.visit(node) {
                continue;
            }
            tree.cost += Cost::from(minutes);
            tree.spanned += 1;
            self.extend_frontier(node, &members, &in_tree, &mut frontier);
        }

        if !tree.is_complete() {
            debug!(spanned = tree.spanned, requested = tree.requested, "partial spanning tree");
        }
        tree
    }

    fn extend_frontier<M: VisitMap<NodeIndex>>(
        &self,
        node: NodeIndex,
        members: &HashSet<NodeIndex>,
        in_tree: &M,
        frontier: &mut BinaryHeap<Reverse<(Weight, Vertex, NodeIndex)>>,
    ) {
        for edge in self.open_edges(node) {
            let next = opposite(edge, node);
            if members.contains(&next) && !in_tree.is_visited(&next) {
                frontier.push(Reverse((edge.weight().minutes, self.graph[next], next)));
            }
        }
    }

    /// Total cost of the spanning tree built by [`Self::minimum_spanning_tree`]
    #[must_use]
    pub fn minimum_spanning_tree_cost(&self, subset: &[Vertex]) -> Cost {
        self.minimum_spanning_tree(subset).cost
    }

    /// All known locations in ascending order
    #[must_use]
    pub fn vertices(&self) -> Vec<Vertex> {
        let mut vertices: Vec<Vertex> = self.node_indices.keys().copied().collect();
        vertices.sort_unstable();
        vertices
    }

    /// All walkways in insertion order
    pub fn walkways(&self) -> impl Iterator<Item = (Vertex, Vertex, Walkway)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (self.graph[e.source()], self.graph[e.target()], *e.weight()))
    }

    /// Get location count
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get walkway count, parallel walkways included
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Get count of walkways currently open
    #[must_use]
    pub fn open_edge_count(&self) -> usize {
        self.graph.edge_weights().filter(|w| !w.closed).count()
    }

    /// Check if the graph is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

/// Endpoint of `edge` that is not `from`
fn opposite(edge: EdgeReference<'_, Walkway>, from: NodeIndex) -> NodeIndex {
    if edge.source() == from {
        edge.target()
    } else {
        edge.source()
    }
}

/// How a location relates to the source of a [`ShortestPathTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    /// The location is not part of the graph
    Unknown,
    /// The location exists but no open path leads to it
    Unreachable,
    /// Shortest walking time from the source
    Reachable(Cost),
}

/// Result of a single-source shortest path search
///
/// Every location known to the graph has an entry in both maps; unreachable
/// locations map to `None` in each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPathTree {
    source: Vertex,
    distances: BTreeMap<Vertex, Option<Cost>>,
    predecessors: BTreeMap<Vertex, Option<Vertex>>,
}

impl ShortestPathTree {
    /// Classify a location relative to the source
    #[must_use]
    pub fn reach(&self, vertex: Vertex) -> Reach {
        match self.distances.get(&vertex) {
            None => Reach::Unknown,
            Some(None) => Reach::Unreachable,
            Some(Some(d)) => Reach::Reachable(*d),
        }
    }

    /// Shortest walking time to a location, `None` if unknown or unreachable
    #[must_use]
    pub fn distance(&self, vertex: Vertex) -> Option<Cost> {
        self.distances.get(&vertex).copied().flatten()
    }

    /// Previous location on the shortest path, `None` for the source and
    /// for unreachable or unknown locations
    #[must_use]
    pub fn predecessor(&self, vertex: Vertex) -> Option<Vertex> {
        self.predecessors.get(&vertex).copied().flatten()
    }

    /// Distance map, including unreachable locations
    #[must_use]
    pub fn distances(&self) -> &BTreeMap<Vertex, Option<Cost>> {
        &self.distances
    }

    /// Predecessor map, including unreachable locations
    #[must_use]
    pub fn predecessors(&self) -> &BTreeMap<Vertex, Option<Vertex>> {
        &self.predecessors
    }

    /// Locations on the shortest path from the source to `target`, both ends included
    #[must_use]
    pub fn path_to(&self, target: Vertex) -> Option<Vec<Vertex>> {
        self.distance(target)?;
        let mut path = vec![target];
        let mut current = target;
        while let Some(prev) = self.predecessor(current) {
            if path.len() > self.distances.len() {
                return None;
            }
            path.push(prev);
            current = prev;
        }
        if current != self.source {
            return None;
        }
        path.reverse();
        Some(path)
    }

    /// Add every location on the path to `target` into `visited`.
    ///
    /// The walk stops at the first location already present, so overlapping
    /// paths are only walked once. Unreachable targets add nothing.
    pub fn trace_into(&self, target: Vertex, visited: &mut BTreeSet<Vertex>) {
        if self.distance(target).is_none() {
            return;
        }
        let mut current = Some(target);
        while let Some(vertex) = current {
            if !visited.insert(vertex) {
                break;
            }
            current = self.predecessor(vertex);
        }
    }
}

/// Outcome of a spanning tree computation over a subset of locations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanningTree {
    /// Sum of the chosen walkway times
    pub cost: Cost,
    /// Locations covered by the tree, the start included
    pub spanned: usize,
    /// Distinct locations that were requested
    pub requested: usize,
}

impl SpanningTree {
    /// Whether every requested location was reached
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.spanned == self.requested
    }
}
