//! Stage 5 — SolveGraph.
//!
//! Iteratively assigns base types to variables using predecessors (lower
//! bounds) and successors (upper bounds). Resolution is strictly sequential:
//! parallel assignment of two candidates whose constraints transitively
//! relate can yield inconsistent choices, so each assignment is substituted
//! into the remaining bound sets before the next candidate is picked.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, trace};

use crate::error::{SolveError, SolveResult};
use crate::graph::ConstraintGraph;
use crate::oracle::Oracle;
use crate::substitution::SubstAtom;
use crate::types::{Atom, Base, VarId};

/// Assign base types to every variable reachable from a base-type bound,
/// producing `θ_sol : S'[Atom]`.
pub fn solve_graph<B: Base, O: Oracle<B>>(
    graph: &ConstraintGraph<Atom<B>>,
    oracle: &O,
) -> SolveResult<SubstAtom<B>> {
    let mut succ: BTreeMap<VarId, HashSet<Atom<B>>> = BTreeMap::new();
    let mut pred: BTreeMap<VarId, HashSet<Atom<B>>> = BTreeMap::new();

    for node in graph.nodes() {
        if let Atom::Var(v) = node {
            succ.entry(*v).or_default().extend(graph.successors(node));
            pred.entry(*v).or_default().extend(graph.predecessors(node));
        }
    }

    debug!(variables = succ.len(), "stage 5 (SolveGraph): resolving variable bounds");
    let mut theta_sol: SubstAtom<B> = SubstAtom::empty();

    loop {
        let candidate = succ
            .keys()
            .copied()
            .find(|v| has_base(&succ[v]) || has_base(&pred[v]));
        let Some(v) = candidate else { break };
        trace!(var = v, "stage 5 (SolveGraph): resolving candidate");

        let upper: Vec<B> = succ[&v].iter().filter_map(Atom::as_base).cloned().collect();
        let lower: Vec<B> = pred[&v].iter().filter_map(Atom::as_base).cloned().collect();

        let assigned = match (lower.is_empty(), upper.is_empty()) {
            (true, false) => oracle.inf(&upper).ok_or_else(|| {
                SolveError::no_unify(format!(
                    "no greatest lower bound among upper bounds {upper:?} for variable {v}"
                ))
            })?,
            (false, true) => oracle.sup(&lower).ok_or_else(|| {
                SolveError::no_unify(format!(
                    "no least upper bound among lower bounds {lower:?} for variable {v}"
                ))
            })?,
            (false, false) => {
                let ub = oracle.inf(&upper).ok_or_else(|| {
                    SolveError::no_unify(format!(
                        "no greatest lower bound among upper bounds {upper:?} for variable {v}"
                    ))
                })?;
                let lb = oracle.sup(&lower).ok_or_else(|| {
                    SolveError::no_unify(format!(
                        "no least upper bound among lower bounds {lower:?} for variable {v}"
                    ))
                })?;
                if !oracle.is_sub(&lb, &ub) {
                    return Err(SolveError::no_unify(format!(
                        "incompatible bounds for variable {v}: lower bound {lb:?} does not subtype upper bound {ub:?}"
                    )));
                }
                // Prefer the lower/"simpler" end of the interval. Not forced
                // by correctness, kept for determinism.
                lb
            }
            (true, true) => {
                unreachable!("candidate selection guarantees a base atom on at least one side")
            }
        };

        let assigned_atom = Atom::Base(assigned);
        theta_sol.insert(v, assigned_atom.clone());

        succ.remove(&v);
        pred.remove(&v);
        for set in succ.values_mut().chain(pred.values_mut()) {
            if set.remove(&Atom::Var(v)) {
                set.insert(assigned_atom.clone());
            }
        }
    }

    Ok(theta_sol)
}

fn has_base<B: Base>(atoms: &HashSet<Atom<B>>) -> bool {
    atoms.iter().any(Atom::is_base)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlatOracle;

    fn singleton_or_agree(atoms: &[&'static str]) -> Option<&'static str> {
        let first = *atoms.first()?;
        atoms.iter().all(|a| *a == first).then_some(first)
    }

    impl Oracle<&'static str> for FlatOracle {
        fn arity(&self, _name: &str) -> Option<&[crate::types::Variance]> {
            None
        }
        fn is_sub(&self, lhs: &&'static str, rhs: &&'static str) -> bool {
            lhs == rhs || (*lhs == "Z" && *rhs == "N")
        }
        fn sup(&self, atoms: &[&'static str]) -> Option<&'static str> {
            singleton_or_agree(atoms)
        }
        fn inf(&self, atoms: &[&'static str]) -> Option<&'static str> {
            singleton_or_agree(atoms)
        }
    }

    #[test]
    fn sequential_dependency_assigns_a_consistent_base_atom() {
        // The classic `\x. x + 1` graph: Z -> a3, a1 -> a3, a3 -> N.
        let a1 = 1;
        let a3 = 3;
        let g: ConstraintGraph<Atom<&'static str>> = ConstraintGraph::from_edges([
            (Atom::Base("Z"), Atom::Var(a3)),
            (Atom::Var(a1), Atom::Var(a3)),
            (Atom::Var(a3), Atom::Base("N")),
        ]);
        let theta = solve_graph(&g, &FlatOracle).unwrap();
        // Both a1 and a3 must resolve to the same base atom, reflecting a1 <: a3.
        let resolved_a1 = theta.clone().into_substitution().apply(&crate::types::Type::Var(a1));
        let resolved_a3 = theta.into_substitution().apply(&crate::types::Type::Var(a3));
        assert_eq!(resolved_a1, resolved_a3);
    }

    #[test]
    fn incompatible_bounds_fail() {
        let v = 0;
        let g: ConstraintGraph<Atom<&'static str>> = ConstraintGraph::from_edges([
            (Atom::Base("N"), Atom::Var(v)),
            (Atom::Var(v), Atom::Base("Z")),
        ]);
        assert!(solve_graph(&g, &FlatOracle).is_err());
    }

    #[test]
    fn graph_with_no_base_bounds_resolves_to_the_identity() {
        let g: ConstraintGraph<Atom<&'static str>> =
            ConstraintGraph::from_edges([(Atom::Var(0), Atom::Var(1))]);
        let theta = solve_graph(&g, &FlatOracle).unwrap();
        assert!(theta.is_empty());
    }
}
