//! The inductive type representation shared by every solver stage.
//!
//! A [`Type`] is one of three shapes: a type variable, a base atom drawn from
//! the caller's lattice, or a constructor applied to ordered arguments. An
//! [`Atom`] is the sub-language of types that carry no further structure
//! (variables and base atoms), which is what the constraint graph is built
//! over from [`crate::solve::build_graph`] onward.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Identity of a type variable, unique within one [`crate::solve_constraints`]
/// call.
///
/// Allocated by [`crate::VarGen`] from a monotonic counter; see the
/// "Capture-avoiding names" design note — a flat integer identity needs no
/// locally-nameless machinery because there are no binders in this language.
pub type VarId = u32;

/// Bound satisfied by every caller-supplied base-type representation.
///
/// Blanket-implemented for any type that already has these properties, so
/// callers never need to write `impl Base for MyBaseType {}` by hand.
pub trait Base: Clone + Eq + std::hash::Hash + std::fmt::Debug {}

impl<T: Clone + Eq + std::hash::Hash + std::fmt::Debug> Base for T {}

/// A type: a variable, a base atom, or a constructor applied to arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type<B: Base> {
    /// A type variable.
    Var(VarId),
    /// A base type drawn from the oracle's lattice.
    Atom(B),
    /// A constructor applied to ordered type arguments.
    Cons(String, Vec<Type<B>>),
}

impl<B: Base> Type<B> {
    /// Construct the zero-argument constructor named `name`.
    pub fn nullary(name: impl Into<String>) -> Self {
        Type::Cons(name.into(), Vec::new())
    }

    /// Whether this type is an [`Atom`] (variable or base type, no
    /// constructor structure).
    pub fn is_atom(&self) -> bool {
        !matches!(self, Type::Cons(..))
    }

    /// View this type as an [`Atom`], if it is one.
    pub fn as_atom(&self) -> Option<Atom<B>> {
        match self {
            Type::Var(v) => Some(Atom::Var(*v)),
            Type::Atom(b) => Some(Atom::Base(b.clone())),
            Type::Cons(..) => None,
        }
    }

    /// Collect every free variable occurring in this type into `out`.
    pub fn free_vars_into(&self, out: &mut BTreeSet<VarId>) {
        match self {
            Type::Var(v) => {
                out.insert(*v);
            }
            Type::Atom(_) => {}
            Type::Cons(_, args) => {
                for a in args {
                    a.free_vars_into(out);
                }
            }
        }
    }

    /// The set of free variables occurring in this type.
    pub fn free_vars(&self) -> BTreeSet<VarId> {
        let mut out = BTreeSet::new();
        self.free_vars_into(&mut out);
        out
    }
}

/// An atom: a leaf in the type structure, either a variable or a base type.
///
/// Unifies `Var` and base atoms under a single sum so that constraint graphs
/// carry either kind of node uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Atom<B: Base> {
    /// A type variable.
    Var(VarId),
    /// A base type.
    Base(B),
}

impl<B: Base> Atom<B> {
    /// Whether this atom is a variable.
    pub fn is_var(&self) -> bool {
        matches!(self, Atom::Var(_))
    }

    /// Whether this atom is a base type.
    pub fn is_base(&self) -> bool {
        matches!(self, Atom::Base(_))
    }

    /// Embed this atom back into [`Type`].
    pub fn into_type(self) -> Type<B> {
        match self {
            Atom::Var(v) => Type::Var(v),
            Atom::Base(b) => Type::Atom(b),
        }
    }

    /// Borrow the underlying base type, if this atom is one.
    pub fn as_base(&self) -> Option<&B> {
        match self {
            Atom::Base(b) => Some(b),
            Atom::Var(_) => None,
        }
    }
}

/// Per-position polarity controlling whether subtyping recurses in the same
/// direction (`Co`) or the reversed direction (`Contra`) through a
/// constructor argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variance {
    /// Subtyping recurses in the same direction as the enclosing constraint.
    Co,
    /// Subtyping recurses in the opposite direction.
    Contra,
}

/// A monotonic allocator of fresh [`VarId`]s, local to one solver call.
///
/// Stage 2 ([`crate::solve::simplify`]) must generate variables distinct from
/// every variable visible anywhere in the input; constructing a `VarGen` via
/// [`VarGen::past`] guarantees that.
#[derive(Debug, Default, Clone, Copy)]
pub struct VarGen {
    next: VarId,
}

impl VarGen {
    /// A generator starting at `0`, for callers with no existing variables.
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// A generator guaranteed to produce ids past every id in `used`.
    pub fn past(used: impl IntoIterator<Item = VarId>) -> Self {
        let next = used.into_iter().max().map_or(0, |m| m.checked_add(1).expect("VarId overflow"));
        Self { next }
    }

    /// Allocate a fresh, previously-unused [`VarId`].
    pub fn fresh(&mut self) -> VarId {
        let id = self.next;
        self.next = self.next.checked_add(1).expect("VarId overflow");
        id
    }
}
