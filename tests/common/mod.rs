//! Shared test oracle for the integration test suite: a small four-point
//! lattice (`Nat <: Int <: Num`, `Bool` unrelated to the others) plus two
//! constructors, used the same way across `scenarios.rs` and
//! `properties.rs`.

use coercive_solver::{Oracle, Variance};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    Nat,
    Int,
    Num,
    Bool,
}

impl Base {
    fn rank(self) -> Option<u8> {
        match self {
            Base::Nat => Some(0),
            Base::Int => Some(1),
            Base::Num => Some(2),
            Base::Bool => None,
        }
    }
}

pub struct LatticeOracle;

const ARROW: [Variance; 2] = [Variance::Contra, Variance::Co];
const LIST: [Variance; 1] = [Variance::Co];
const PAIR: [Variance; 2] = [Variance::Co, Variance::Co];

impl Oracle<Base> for LatticeOracle {
    fn arity(&self, name: &str) -> Option<&[Variance]> {
        match name {
            "->" => Some(&ARROW),
            "List" => Some(&LIST),
            "Pair" => Some(&PAIR),
            _ => None,
        }
    }

    fn is_sub(&self, lhs: &Base, rhs: &Base) -> bool {
        lhs == rhs || matches!(lhs.rank().zip(rhs.rank()), Some((l, r)) if l <= r)
    }

    fn sup(&self, atoms: &[Base]) -> Option<Base> {
        if atoms.iter().all(|a| *a == atoms[0]) {
            return Some(atoms[0]);
        }
        atoms
            .iter()
            .map(|a| a.rank())
            .collect::<Option<Vec<_>>>()
            .and_then(|ranks| ranks.into_iter().max())
            .and_then(rank_to_base)
    }

    fn inf(&self, atoms: &[Base]) -> Option<Base> {
        if atoms.iter().all(|a| *a == atoms[0]) {
            return Some(atoms[0]);
        }
        atoms
            .iter()
            .map(|a| a.rank())
            .collect::<Option<Vec<_>>>()
            .and_then(|ranks| ranks.into_iter().min())
            .and_then(rank_to_base)
    }
}

fn rank_to_base(rank: u8) -> Option<Base> {
    match rank {
        0 => Some(Base::Nat),
        1 => Some(Base::Int),
        2 => Some(Base::Num),
        _ => None,
    }
}
