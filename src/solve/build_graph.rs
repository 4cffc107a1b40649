//! Stage 3 — BuildGraph.
//!
//! Projects the atomic subtype pairs from stage 2 into a directed graph:
//! nodes are every atom mentioned, edges are exactly the atomic pairs.

use tracing::debug;

use crate::constraint::AtomicSub;
use crate::graph::ConstraintGraph;
use crate::types::{Atom, Base};

/// Build the stage-3 constraint graph from the atomic pairs stage 2 produced.
pub fn build_graph<B: Base>(atomic: Vec<AtomicSub<B>>) -> ConstraintGraph<Atom<B>> {
    debug!(count = atomic.len(), "stage 3 (BuildGraph): projecting atomic pairs");
    ConstraintGraph::from_edges(atomic)
}
