//! Stage 1 — WeakUnify.
//!
//! Treats every constraint as an equation (forgets `Eq`/`Sub`) and attempts
//! standard first-order unification. A cheap necessary condition: any
//! solution of the subtype constraints implies a unifier exists for the
//! equational relaxation, because subtyping between constructed types
//! requires identical head constructors and recurses structurally. If no
//! weak unifier exists, later stages could diverge or misreport, so we
//! short-circuit with [`SolveError::NoWeakUnifier`].

use tracing::{debug, warn};

use crate::constraint::Constraint;
use crate::error::{SolveError, SolveResult};
use crate::types::Base;
use crate::unify::unify;

/// Check that the equational relaxation of `constraints` has a unifier.
/// The unifier itself is discarded — this stage reports success or failure
/// only.
pub fn weak_unify<B: Base>(constraints: &[Constraint<B>]) -> SolveResult<()> {
    debug!(count = constraints.len(), "stage 1 (WeakUnify): relaxing constraints to equations");
    let eqs: Vec<_> = constraints.iter().map(Constraint::as_equation).collect();
    unify(&eqs).map(|_| ()).map_err(|err| {
        let detail = match err {
            SolveError::NoUnify { detail } => detail,
            other => other.to_string(),
        };
        warn!(%detail, "stage 1 (WeakUnify): no weak unifier exists");
        SolveError::no_weak_unifier(detail)
    })
}
