//! The six-stage solving pipeline.
//!
//! Each stage consumes the previous stage's output and a growing
//! accumulated substitution. [`solve_constraints`] is the crate's sole
//! public entry point.

mod build_graph;
mod elim_cycles;
mod simplify;
mod solve_graph;
mod unify_wcc;
mod weak_unify;

pub use build_graph::build_graph;
pub use elim_cycles::{elim_cycles, Condensed};
pub use simplify::{simplify, Simplified};
pub use solve_graph::solve_graph;
pub use unify_wcc::unify_wcc;
pub use weak_unify::weak_unify;

use tracing::{debug, instrument};

use crate::constraint::Constraint;
use crate::error::SolveResult;
use crate::graph::ConstraintGraph;
use crate::oracle::Oracle;
use crate::substitution::Substitution;
use crate::types::{Atom, Base};

/// Run the full six-stage pipeline over `constraints`, using `oracle` for
/// every query the stages need (arities, variances, base-type ordering).
///
/// Returns the composed substitution `θ_sol ∘ θ_cyc ∘ θ_simp`, where `θ_sol`
/// here denotes the combination of stage 5's base-type assignments and stage
/// 6's weakly-connected-component collapse — both produce atom-valued
/// substitutions over the same post-cycle-elimination graph, so they are
/// composed together before being folded into the stages before them.
#[instrument(level = "debug", skip_all, fields(constraints = constraints.len()))]
pub fn solve_constraints<B: Base, O: Oracle<B>>(
    constraints: Vec<Constraint<B>>,
    oracle: &O,
) -> SolveResult<Substitution<B>> {
    weak_unify(&constraints)?;

    let Simplified { atomic, theta_simp } = simplify(constraints, oracle)?;

    let graph = build_graph(atomic);

    let Condensed {
        graph: dag,
        theta_cyc,
    } = elim_cycles(graph)?;

    let theta_sol = solve_graph(&dag, oracle)?;
    let residual = residual_graph(&dag, &theta_sol);
    let theta_wcc = unify_wcc(&residual);

    let sol_and_wcc = theta_wcc
        .into_substitution()
        .compose_after(&theta_sol.into_substitution());
    let simp_then_cyc = theta_cyc.compose_after(&theta_simp);
    let total = sol_and_wcc.compose_after(&simp_then_cyc);

    debug!("solve_constraints: pipeline complete");
    Ok(total)
}

/// The subgraph of `dag` restricted to atoms stage 5 left unresolved — the
/// pure-variable weakly connected components stage 6 then collapses.
fn residual_graph<B: Base>(
    dag: &ConstraintGraph<Atom<B>>,
    theta_sol: &crate::substitution::SubstAtom<B>,
) -> ConstraintGraph<Atom<B>> {
    let is_unresolved = |atom: &Atom<B>| match atom {
        Atom::Var(v) => !theta_sol.contains(*v),
        Atom::Base(_) => false,
    };

    let mut residual = ConstraintGraph::new();
    for node in dag.nodes() {
        if !is_unresolved(node) {
            continue;
        }
        residual.add_node(node.clone());
        for succ in dag.successors(node) {
            if is_unresolved(&succ) {
                residual.add_edge(node.clone(), succ);
            }
        }
    }
    residual
}
