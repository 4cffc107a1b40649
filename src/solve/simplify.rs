//! Stage 2 — Simplify.
//!
//! Reduces the constraint list to atomic subtype pairs plus an equality
//! substitution `θ_simp`, by repeatedly applying one of five rules to a
//! worklist until none apply. Fresh variables generated while expanding a
//! `Var <: Cons` (or `Cons <: Var`) constraint are drawn from a [`VarGen`]
//! seeded past every variable visible in the initial constraint set, so they
//! never collide with a variable the caller already introduced.

use std::collections::{BTreeSet, VecDeque};

use tracing::trace;

use crate::constraint::{AtomicSub, Constraint};
use crate::error::{SolveError, SolveResult};
use crate::oracle::Oracle;
use crate::substitution::Substitution;
use crate::types::{Base, Type, VarGen, Variance};
use crate::unify::unify;

/// The result of simplification: the atomic subtype pairs that survived, and
/// the equality substitution accumulated while getting there.
pub struct Simplified<B: Base> {
    pub atomic: Vec<AtomicSub<B>>,
    pub theta_simp: Substitution<B>,
}

/// Run the stage-2 fixpoint loop.
pub fn simplify<B: Base, O: Oracle<B>>(
    constraints: Vec<Constraint<B>>,
    oracle: &O,
) -> SolveResult<Simplified<B>> {
    let mut used = BTreeSet::new();
    for c in &constraints {
        let (l, r) = c.sides();
        l.free_vars_into(&mut used);
        r.free_vars_into(&mut used);
    }
    let mut vargen = VarGen::past(used);

    let mut theta_simp: Substitution<B> = Substitution::empty();
    let mut worklist: VecDeque<Constraint<B>> = constraints.into_iter().collect();
    let mut atomic: Vec<AtomicSub<B>> = Vec::new();

    while let Some(c) = worklist.pop_front() {
        trace!(constraint = ?c, "stage 2 (Simplify): processing");
        match c {
            Constraint::Eq(a, b) => {
                let step = unify(&[(a, b)])?;
                worklist = worklist
                    .into_iter()
                    .map(|c| apply_constraint(&step, c))
                    .collect();
                theta_simp = step.compose_after(&theta_simp);
            }

            Constraint::Sub(Type::Cons(c1, args1), Type::Cons(c2, args2)) => {
                if c1 != c2 {
                    return Err(SolveError::no_unify(format!(
                        "constructor mismatch under subtyping: {c1} vs {c2}"
                    )));
                }
                let variances = oracle.arity(&c1).ok_or_else(|| {
                    SolveError::no_unify(format!("unknown constructor: {c1}"))
                })?;
                if variances.len() != args1.len() || args1.len() != args2.len() {
                    return Err(SolveError::no_unify(format!(
                        "arity mismatch for constructor {c1}"
                    )));
                }
                for ((t1, t2), variance) in args1.into_iter().zip(args2).zip(variances.iter()) {
                    let decomposed = match variance {
                        Variance::Co => Constraint::Sub(t1, t2),
                        Variance::Contra => Constraint::Sub(t2, t1),
                    };
                    worklist.push_front(decomposed);
                }
            }

            Constraint::Sub(Type::Var(v), Type::Cons(name, args)) => {
                let step = expand_var(v, &name, args.len(), oracle, &mut vargen)?;
                let reinserted = apply_constraint(
                    &step,
                    Constraint::Sub(Type::Var(v), Type::Cons(name, args)),
                );
                worklist = worklist
                    .into_iter()
                    .map(|c| apply_constraint(&step, c))
                    .collect();
                worklist.push_front(reinserted);
                theta_simp = step.compose_after(&theta_simp);
            }

            Constraint::Sub(Type::Cons(name, args), Type::Var(v)) => {
                let step = expand_var(v, &name, args.len(), oracle, &mut vargen)?;
                let reinserted = apply_constraint(
                    &step,
                    Constraint::Sub(Type::Cons(name, args), Type::Var(v)),
                );
                worklist = worklist
                    .into_iter()
                    .map(|c| apply_constraint(&step, c))
                    .collect();
                worklist.push_front(reinserted);
                theta_simp = step.compose_after(&theta_simp);
            }

            Constraint::Sub(Type::Atom(b1), Type::Atom(b2)) => {
                if !oracle.is_sub(&b1, &b2) {
                    return Err(SolveError::no_unify(format!(
                        "base subtype failed: {b1:?} <: {b2:?} does not hold"
                    )));
                }
            }

            Constraint::Sub(l, r) if l.is_atom() && r.is_atom() => {
                let (Some(la), Some(ra)) = (l.as_atom(), r.as_atom()) else {
                    unreachable!("l and r are atoms by the guard above");
                };
                atomic.push((la, ra));
            }

            // A constructor applied to a bare base atom (or vice versa): no
            // rule subsumes this shape, since a concrete base type has no
            // constructor structure to decompose against.
            Constraint::Sub(l, r) => {
                return Err(SolveError::no_unify(format!(
                    "incompatible shapes under subtyping: {l:?} <: {r:?}"
                )))
            }
        }
    }

    Ok(Simplified { atomic, theta_simp })
}

/// Expand a type variable `v` constrained against constructor `name/arity`
/// into `Cons(name, [fresh; arity])`, binding `v` to the expansion.
fn expand_var<B: Base, O: Oracle<B>>(
    v: crate::types::VarId,
    name: &str,
    arity_hint: usize,
    oracle: &O,
    vargen: &mut VarGen,
) -> SolveResult<Substitution<B>> {
    let variances = oracle
        .arity(name)
        .ok_or_else(|| SolveError::no_unify(format!("unknown constructor: {name}")))?;
    if variances.len() != arity_hint {
        return Err(SolveError::no_unify(format!(
            "arity mismatch for constructor {name}"
        )));
    }
    let fresh_args: Vec<Type<B>> = variances.iter().map(|_| Type::Var(vargen.fresh())).collect();
    let expansion = Type::Cons(name.to_string(), fresh_args);
    Ok(Substitution::singleton(v, expansion))
}

fn apply_constraint<B: Base>(s: &Substitution<B>, c: Constraint<B>) -> Constraint<B> {
    match c {
        Constraint::Eq(a, b) => Constraint::Eq(s.apply(&a), s.apply(&b)),
        Constraint::Sub(a, b) => Constraint::Sub(s.apply(&a), s.apply(&b)),
    }
}
