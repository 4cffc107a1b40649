//! Substitutions: finite, idempotent, composable maps from variable
//! identities to types.
//!
//! Kept as a standalone value rather than bundled into a stateful engine,
//! since each solver stage produces its own substitution and the top level
//! composes them explicitly.

use std::collections::HashMap;

use crate::types::{Atom, Base, Type, VarId};

/// A finite mapping from variable identities to types.
///
/// No variable in the mapping's range may appear (even transitively) in its
/// own domain — [`Substitution::apply`] fully resolves chains, so a
/// `Substitution` built only through [`Substitution::compose_after`] and
/// [`Substitution::singleton`] is idempotent by construction.
#[derive(Debug, Clone)]
pub struct Substitution<B: Base> {
    map: HashMap<VarId, Type<B>>,
}

impl<B: Base> Default for Substitution<B> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<B: Base> Substitution<B> {
    /// The empty (identity) substitution.
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// A substitution binding exactly one variable.
    pub fn singleton(var: VarId, ty: Type<B>) -> Self {
        let mut map = HashMap::new();
        map.insert(var, ty);
        Self { map }
    }

    /// Whether this substitution binds no variables.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The binding for `var`, if any (not resolved through chains — see
    /// [`Substitution::apply`] for that).
    pub fn get(&self, var: VarId) -> Option<&Type<B>> {
        self.map.get(&var)
    }

    /// Insert or overwrite the binding for `var`.
    pub fn insert(&mut self, var: VarId, ty: Type<B>) {
        self.map.insert(var, ty);
    }

    /// Iterate over the bindings.
    pub fn iter(&self) -> impl Iterator<Item = (VarId, &Type<B>)> {
        self.map.iter().map(|(v, t)| (*v, t))
    }

    /// Fully apply this substitution to `ty`, following variable chains to a
    /// fixpoint.
    pub fn apply(&self, ty: &Type<B>) -> Type<B> {
        match ty {
            Type::Var(v) => match self.map.get(v) {
                Some(bound) => self.apply(bound),
                None => ty.clone(),
            },
            Type::Atom(_) => ty.clone(),
            Type::Cons(name, args) => {
                Type::Cons(name.clone(), args.iter().map(|a| self.apply(a)).collect())
            }
        }
    }

    /// Apply this substitution to an atom, which may resolve to a compound
    /// type if the bound variable was expanded by stage 2 — callers that
    /// need the result to stay atomic should check [`Type::as_atom`].
    pub fn apply_atom(&self, atom: &Atom<B>) -> Type<B> {
        self.apply(&atom.clone().into_type())
    }

    /// Compose so that `self` is applied *after* `first`: for every type
    /// `t`, `self.compose_after(first).apply(t) == self.apply(&first.apply(t))`.
    pub fn compose_after(&self, first: &Self) -> Self {
        let mut map: HashMap<VarId, Type<B>> = first
            .map
            .iter()
            .map(|(v, t)| (*v, self.apply(t)))
            .collect();
        for (v, t) in &self.map {
            map.entry(*v).or_insert_with(|| t.clone());
        }
        Self { map }
    }
}

/// A substitution specialized to map variables to [`Atom`]s, used by the
/// cycle-elimination and WCC-collapse stages, which only ever produce
/// atom-to-atom renamings.
#[derive(Debug, Clone, Default)]
pub struct SubstAtom<B: Base> {
    map: HashMap<VarId, Atom<B>>,
}

impl<B: Base> SubstAtom<B> {
    /// The empty substitution.
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bind `var` to `atom`.
    pub fn insert(&mut self, var: VarId, atom: Atom<B>) {
        self.map.insert(var, atom);
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether there are no bindings.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Whether `var` is in this substitution's domain.
    pub fn contains(&self, var: VarId) -> bool {
        self.map.contains_key(&var)
    }

    /// Embed this atom-substitution into a full [`Substitution`] by wrapping
    /// each bound atom as a [`Type`].
    pub fn into_substitution(self) -> Substitution<B> {
        let map = self
            .map
            .into_iter()
            .map(|(v, a)| (v, a.into_type()))
            .collect();
        Substitution { map }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_follows_chains_to_a_fixpoint() {
        let mut s: Substitution<&'static str> = Substitution::empty();
        s.insert(0, Type::Var(1));
        s.insert(1, Type::Atom("Nat"));
        assert_eq!(s.apply(&Type::Var(0)), Type::Atom("Nat"));
    }

    #[test]
    fn compose_after_applies_first_then_self() {
        let s1: Substitution<&'static str> = Substitution::singleton(0, Type::Var(1));
        let s2: Substitution<&'static str> = Substitution::singleton(1, Type::Atom("Nat"));
        let composed = s2.compose_after(&s1);
        assert_eq!(composed.apply(&Type::Var(0)), Type::Atom("Nat"));
        assert_eq!(composed.apply(&Type::Var(1)), Type::Atom("Nat"));
    }

    #[test]
    fn idempotence_of_substitution() {
        let mut s: Substitution<&'static str> = Substitution::empty();
        s.insert(0, Type::Cons("List".into(), vec![Type::Atom("Nat")]));
        let once = s.apply(&Type::Var(0));
        let twice = s.apply(&once);
        assert_eq!(once, twice);
    }
}
