//! A constraint solver for Hindley-Milner type inference extended with
//! coercive subtyping.
//!
//! Implements the algorithm of Traytel, Berghofer, and Nipkow (2011): given a
//! list of equality and subtyping constraints over structured types
//! containing type variables, [`solve_constraints`] either produces a
//! substitution that simultaneously satisfies all of them, or reports that
//! no solution exists.
//!
//! The solver is a strict, single-threaded, synchronous pipeline of six
//! stages (see [`solve`] for the stage-by-stage breakdown):
//!
//! 1. `WeakUnify` — relax every constraint to an equation and check a
//!    unifier exists at all.
//! 2. `Simplify` — decompose structured subtype constraints down to atomic
//!    `α <: β`, `α <: b`, `b <: α` pairs.
//! 3. `BuildGraph` — project the atomic pairs into a directed graph.
//! 4. `ElimCycles` — collapse each strongly connected component by
//!    unification.
//! 5. `SolveGraph` — assign base types to variables from their bounds.
//! 6. `UnifyWCC` — collapse any remaining pure-variable components.
//!
//! The solver has no opinion about what the constraints came from: the
//! parser, elaborator, evaluator, and surface language are all external
//! collaborators. The one collaborator it does require is the
//! [`Oracle`] — arities, variances, and the base-type lattice.

pub mod constraint;
pub mod error;
pub mod graph;
pub mod oracle;
pub mod solve;
pub mod substitution;
pub mod types;
pub mod unify;

pub use constraint::Constraint;
pub use error::{SolveError, SolveResult};
pub use graph::ConstraintGraph;
pub use oracle::Oracle;
pub use solve::solve_constraints;
pub use substitution::{SubstAtom, Substitution};
pub use types::{Atom, Base, Type, VarGen, VarId, Variance};
