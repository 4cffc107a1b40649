//! `ConstraintGraph`: a directed graph on atoms, with SCC/condensation, WCC,
//! and a functorial `map`.
//!
//! Built on `petgraph`'s `DiGraph`, paired with a label-to-index `HashMap` so
//! callers can add and query nodes by their own labels instead of opaque
//! indices.

use std::collections::HashMap;
use std::hash::Hash;

use petgraph::algo::{condensation, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

/// A directed graph whose nodes carry labels of type `N` and whose edges
/// carry no data — an edge `u -> v` denotes `u <: v`.
#[derive(Debug, Clone)]
pub struct ConstraintGraph<N: Eq + Hash + Clone> {
    graph: DiGraph<N, ()>,
    index: HashMap<N, NodeIndex>,
}

impl<N: Eq + Hash + Clone> Default for ConstraintGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Eq + Hash + Clone> ConstraintGraph<N> {
    /// An empty graph.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Build a graph directly from a list of `src <: dst` edges.
    pub fn from_edges(edges: impl IntoIterator<Item = (N, N)>) -> Self {
        let mut g = Self::new();
        for (src, dst) in edges {
            g.add_edge(src, dst);
        }
        g
    }

    /// Ensure `n` is present as a node (with no edges) and return its index.
    pub fn add_node(&mut self, n: N) -> NodeIndex {
        self.ensure_node(n)
    }

    fn ensure_node(&mut self, n: N) -> NodeIndex {
        if let Some(&idx) = self.index.get(&n) {
            idx
        } else {
            let idx = self.graph.add_node(n.clone());
            self.index.insert(n, idx);
            idx
        }
    }

    /// Add the edge `src <: dst`, creating either endpoint if new. A
    /// duplicate edge is a no-op — edges form a set, not a multiset.
    pub fn add_edge(&mut self, src: N, dst: N) {
        let s = self.ensure_node(src);
        let d = self.ensure_node(dst);
        if self.graph.find_edge(s, d).is_none() {
            self.graph.add_edge(s, d, ());
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Every node label.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.graph.node_weights()
    }

    /// Whether `n` is a node of this graph.
    pub fn contains(&self, n: &N) -> bool {
        self.index.contains_key(n)
    }

    /// The successors of `n` (nodes `d` such that `n <: d`), or empty if `n`
    /// is not a node.
    pub fn successors(&self, n: &N) -> Vec<N> {
        self.directed_neighbors(n, Direction::Outgoing)
    }

    /// The predecessors of `n` (nodes `s` such that `s <: n`), or empty if
    /// `n` is not a node.
    pub fn predecessors(&self, n: &N) -> Vec<N> {
        self.directed_neighbors(n, Direction::Incoming)
    }

    fn directed_neighbors(&self, n: &N, dir: Direction) -> Vec<N> {
        match self.index.get(n) {
            Some(&idx) => self
                .graph
                .neighbors_directed(idx, dir)
                .map(|i| self.graph[i].clone())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Strongly connected components, each as the set of original node
    /// labels it contains (order matches `petgraph::algo::tarjan_scc`:
    /// reverse topological order of the condensation).
    pub fn sccs(&self) -> Vec<Vec<N>> {
        tarjan_scc(&self.graph)
            .into_iter()
            .map(|component| component.into_iter().map(|idx| self.graph[idx].clone()).collect())
            .collect()
    }

    /// The condensation: each strongly connected component collapsed into a
    /// single node carrying the set of original nodes, with inter-component
    /// edges preserved. The result is always acyclic.
    pub fn condensation(&self) -> ConstraintGraph<Vec<N>> {
        let condensed = condensation(self.graph.clone(), true);
        let mut out = ConstraintGraph::new();
        for idx in condensed.node_indices() {
            out.ensure_node(condensed[idx].clone());
        }
        for edge in condensed.edge_references() {
            let src = condensed[edge.source()].clone();
            let dst = condensed[edge.target()].clone();
            out.add_edge(src, dst);
        }
        out
    }

    /// Weakly connected components: maximal sets of nodes connected when
    /// edge direction is ignored.
    pub fn wccs(&self) -> Vec<Vec<N>> {
        let mut visited = vec![false; self.graph.node_count()];
        let mut components = Vec::new();
        for start in self.graph.node_indices() {
            if visited[start.index()] {
                continue;
            }
            let mut stack = vec![start];
            let mut component = Vec::new();
            visited[start.index()] = true;
            while let Some(idx) = stack.pop() {
                component.push(self.graph[idx].clone());
                for neighbor in self.graph.neighbors_undirected(idx) {
                    if !visited[neighbor.index()] {
                        visited[neighbor.index()] = true;
                        stack.push(neighbor);
                    }
                }
            }
            components.push(component);
        }
        components
    }

    /// Transform every node label with `f`, preserving edges. Labels that
    /// collide under `f` are merged into one node, and their edges are
    /// unioned.
    pub fn map<M: Eq + Hash + Clone>(&self, f: impl Fn(&N) -> M) -> ConstraintGraph<M> {
        let mut out = ConstraintGraph::new();
        for idx in self.graph.node_indices() {
            out.ensure_node(f(&self.graph[idx]));
        }
        for edge in self.graph.edge_references() {
            let src = f(&self.graph[edge.source()]);
            let dst = f(&self.graph[edge.target()]);
            out.add_edge(src, dst);
        }
        out
    }
}
