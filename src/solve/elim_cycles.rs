//! Stage 4 — ElimCycles.
//!
//! A directed cycle in the subtype graph forces mutual subtyping, hence
//! equality. For each strongly connected component, unify the wrapped types
//! of all its atoms; a component that mixes incompatible base atoms fails
//! with [`SolveError::NoUnify`]. The representative chosen for each
//! component is the first atom `petgraph`'s Tarjan implementation reports for
//! it — any deterministic choice is equally correct, and Tarjan's traversal
//! order is itself a deterministic function of the graph's (equally
//! deterministic) insertion order.

use std::collections::HashMap;

use tracing::debug;

use crate::error::SolveResult;
use crate::graph::ConstraintGraph;
use crate::substitution::Substitution;
use crate::types::{Atom, Base};
use crate::unify::equate_atoms;

/// The condensed graph plus the substitution collapsing each cycle.
pub struct Condensed<B: Base> {
    pub graph: ConstraintGraph<Atom<B>>,
    pub theta_cyc: Substitution<B>,
}

/// Collapse every strongly connected component of `graph` by unifying its
/// atoms, yielding a DAG plus the accumulated substitution.
pub fn elim_cycles<B: Base>(graph: ConstraintGraph<Atom<B>>) -> SolveResult<Condensed<B>> {
    let sccs = graph.sccs();
    debug!(count = sccs.len(), "stage 4 (ElimCycles): collapsing strongly connected components");

    let mut theta_cyc: Substitution<B> = Substitution::empty();
    let mut representative_of: HashMap<Atom<B>, Atom<B>> = HashMap::new();

    for scc in &sccs {
        debug_assert!(
            !scc.is_empty(),
            "Tarjan never reports an empty component"
        );
        let representative = scc[0].clone();

        let step = equate_atoms(scc)?;
        theta_cyc = step.compose_after(&theta_cyc);

        for atom in scc {
            representative_of.insert(atom.clone(), representative.clone());
        }
    }

    let condensed = graph.map(|atom| {
        representative_of
            .get(atom)
            .cloned()
            .unwrap_or_else(|| atom.clone())
    });

    Ok(Condensed {
        graph: condensed,
        theta_cyc,
    })
}
