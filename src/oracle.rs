//! The type-structure oracle: the one collaborator the solver requires from
//! its caller.
//!
//! The solver never hard-codes a base-type lattice or a variance table — it
//! asks the oracle, the same way a typechecker takes its symbol and type
//! tables as collaborators rather than owning them; here the collaborator is
//! smaller and entirely pure.

use crate::types::{Base, Variance};

/// Arities, variances, and base-type ordering, supplied by the caller.
///
/// Implementations must be pure and must make `is_sub` reflexive and
/// transitive — the solver's soundness argument assumes both and does not
/// check them itself.
pub trait Oracle<B: Base> {
    /// The positional variance list for constructor `name`, or `None` if the
    /// constructor is unknown to the oracle. The list's length is the
    /// constructor's arity.
    fn arity(&self, name: &str) -> Option<&[Variance]>;

    /// Whether `lhs <: rhs` holds directly between two base atoms.
    fn is_sub(&self, lhs: &B, rhs: &B) -> bool;

    /// The least upper bound of a non-empty set of base atoms, if one exists
    /// in the lattice.
    fn sup(&self, atoms: &[B]) -> Option<B>;

    /// The greatest lower bound of a non-empty set of base atoms, if one
    /// exists in the lattice.
    fn inf(&self, atoms: &[B]) -> Option<B>;
}
