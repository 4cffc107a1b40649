//! Standard first-order unification, shared by weak unification (stage 1),
//! equality simplification (stage 2), and cycle collapsing (stage 4).
//!
//! A classic worklist unifier over the `Type` grammar: the substitution is
//! `Substitution<B>` rather than a string-keyed map, and there are no
//! variance or assignability concerns here — this module only ever produces
//! equalities, never subtype edges.

use std::collections::VecDeque;

use tracing::trace;

use crate::error::{SolveError, SolveResult};
use crate::substitution::Substitution;
use crate::types::{Atom, Base, Type, VarId};

/// Unify a list of equations, returning the most general unifier or
/// [`SolveError::NoUnify`] on a structural clash or occurs-check failure.
///
/// This is ordinary first-order unification over the `Type` grammar; unlike
/// `Oracle::is_sub`, it needs no lattice information, so it takes no oracle
/// parameter.
pub fn unify<B: Base>(eqs: &[(Type<B>, Type<B>)]) -> SolveResult<Substitution<B>> {
    trace!(count = eqs.len(), "unify: starting worklist");
    let mut subst = Substitution::empty();
    let mut worklist: VecDeque<(Type<B>, Type<B>)> = eqs.iter().cloned().collect();

    while let Some((l, r)) = worklist.pop_front() {
        let l = subst.apply(&l);
        let r = subst.apply(&r);
        match (l, r) {
            (Type::Var(a), Type::Var(b)) if a == b => {}

            (Type::Var(a), t) | (t, Type::Var(a)) => {
                if occurs(a, &t) {
                    return Err(SolveError::no_unify(format!(
                        "occurs check: variable {a} occurs in {t:?}"
                    )));
                }
                let step = Substitution::singleton(a, t);
                worklist = worklist
                    .into_iter()
                    .map(|(x, y)| (step.apply(&x), step.apply(&y)))
                    .collect();
                subst = step.compose_after(&subst);
            }

            (Type::Atom(b1), Type::Atom(b2)) => {
                if b1 != b2 {
                    return Err(SolveError::no_unify(format!(
                        "base type mismatch: {b1:?} vs {b2:?}"
                    )));
                }
            }

            (Type::Cons(c1, args1), Type::Cons(c2, args2)) => {
                if c1 != c2 || args1.len() != args2.len() {
                    return Err(SolveError::no_unify(format!(
                        "constructor mismatch: {c1}/{} vs {c2}/{}",
                        args1.len(),
                        args2.len()
                    )));
                }
                for pair in args1.into_iter().zip(args2) {
                    worklist.push_back(pair);
                }
            }

            (l, r) => {
                return Err(SolveError::no_unify(format!(
                    "cannot unify {l:?} with {r:?}"
                )));
            }
        }
    }

    Ok(subst)
}

fn occurs<B: Base>(var: VarId, ty: &Type<B>) -> bool {
    match ty {
        Type::Var(v) => *v == var,
        Type::Atom(_) => false,
        Type::Cons(_, args) => args.iter().any(|a| occurs(var, a)),
    }
}

/// Unify an arbitrary non-empty list of types simultaneously, used to
/// collapse a strongly connected component's atoms down to one.
///
/// Implemented by anchoring on the first type and unifying every other type
/// against it in turn; this is equivalent to pairwise unification for an
/// equality (as opposed to subtype) relation since `=` is transitive.
pub fn equate<B: Base>(types: &[Type<B>]) -> SolveResult<Substitution<B>> {
    let Some((anchor, rest)) = types.split_first() else {
        return Ok(Substitution::empty());
    };
    let eqs: Vec<_> = rest.iter().map(|t| (anchor.clone(), t.clone())).collect();
    unify(&eqs)
}

/// Unify a list of atoms by embedding them as types first.
pub fn equate_atoms<B: Base>(atoms: &[Atom<B>]) -> SolveResult<Substitution<B>> {
    let types: Vec<Type<B>> = atoms.iter().cloned().map(Atom::into_type).collect();
    equate(&types)
}
