//! Stage 6 — UnifyWCC.
//!
//! After stage 5, any graph nodes left unresolved are purely-variable
//! components (no base bound ever reached them). Collapsing each weakly
//! connected component to a single variable eliminates residual subtype
//! chains among variables that never met a base constraint — sound (any
//! solution of the collapsed form solves the original) and yields cleaner
//! inferred types (`∀a. a -> a` rather than a qualified `∀a b. (a <: b) =>
//! a -> b`).

use tracing::debug;

use crate::graph::ConstraintGraph;
use crate::substitution::SubstAtom;
use crate::types::{Atom, Base};

/// Collapse every weakly connected component of the residual (post-stage-5)
/// graph to its first member.
pub fn unify_wcc<B: Base>(graph: &ConstraintGraph<Atom<B>>) -> SubstAtom<B> {
    let wccs = graph.wccs();
    debug!(count = wccs.len(), "stage 6 (UnifyWCC): collapsing residual components");

    let mut theta_wcc = SubstAtom::empty();
    for component in wccs {
        debug_assert!(
            component.iter().all(Atom::is_var),
            "stage 5 resolves every variable touching a base atom; a residual \
             component containing a base atom would mean stage 5 left work undone"
        );
        let Some((representative, rest)) = component.split_first() else {
            continue;
        };
        for atom in rest {
            if let Atom::Var(v) = atom {
                theta_wcc.insert(*v, representative.clone());
            }
        }
    }
    theta_wcc
}
