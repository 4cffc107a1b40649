//! The solver's error taxonomy.
//!
//! Exactly two kinds: [`SolveError::NoWeakUnifier`] (the equational relaxation
//! in stage 1 has no unifier at all) and [`SolveError::NoUnify`] (a later
//! stage finds a structural clash once subtyping is taken into account). Both
//! carry a `detail` string for diagnostics, but the two kinds are the whole
//! contract — callers should match on the variant, not parse `detail`.

use thiserror::Error;

/// Why [`crate::solve_constraints`] failed to produce a substitution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// Stage 1 (weak unification) found that the equational relaxation of
    /// the input constraints has no unifier: a structural clash (different
    /// head constructors forced equal) or an occurs-check violation.
    #[error("no weak unifier: {detail}")]
    NoWeakUnifier {
        /// Human-readable description of the clash.
        detail: String,
    },

    /// A later stage found the constraints unsatisfiable: a constructor
    /// mismatch under a subtype constraint, an equality that fails to unify,
    /// a base/base subtype that `is_sub` rejects, a strongly connected
    /// component whose atoms cannot be equated, or a variable whose bounds
    /// are missing or incompatible.
    #[error("unsatisfiable constraints: {detail}")]
    NoUnify {
        /// Human-readable description of the offending constraint or bound.
        detail: String,
    },
}

impl SolveError {
    pub(crate) fn no_unify(detail: impl Into<String>) -> Self {
        SolveError::NoUnify {
            detail: detail.into(),
        }
    }

    pub(crate) fn no_weak_unifier(detail: impl Into<String>) -> Self {
        SolveError::NoWeakUnifier {
            detail: detail.into(),
        }
    }
}

/// Convenience alias used throughout the solver stages.
pub type SolveResult<T> = Result<T, SolveError>;
