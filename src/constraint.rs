//! The two constraint shapes the solver accepts, and the atomic form they
//! are reduced to by [`crate::solve::simplify`].

use serde::{Deserialize, Serialize};

use crate::types::{Atom, Base, Type};

/// A constraint between two types: either equality or a subtype relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint<B: Base> {
    /// `t1` and `t2` must be equal.
    Eq(Type<B>, Type<B>),
    /// `t1 <: t2`.
    Sub(Type<B>, Type<B>),
}

impl<B: Base> Constraint<B> {
    /// The left- and right-hand sides, irrespective of constraint kind.
    pub fn sides(&self) -> (&Type<B>, &Type<B>) {
        match self {
            Constraint::Eq(l, r) | Constraint::Sub(l, r) => (l, r),
        }
    }

    /// Relax this constraint into an equation by forgetting the
    /// subtype/equality distinction, as stage 1 ([`crate::solve::weak_unify`])
    /// does for every constraint in the input.
    pub fn as_equation(&self) -> (Type<B>, Type<B>) {
        let (l, r) = self.sides();
        (l.clone(), r.clone())
    }
}

/// An atomic subtype constraint `a1 <: a2`, the normal form every
/// [`Constraint`] is reduced to by the end of [`crate::solve::simplify`].
pub type AtomicSub<B> = (Atom<B>, Atom<B>);
