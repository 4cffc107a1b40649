//! Benchmarks for the six-stage solving pipeline.
//!
//! Run with: cargo bench --bench solve_pipeline

use coercive_solver::{solve_constraints, Constraint, Oracle, Type, Variance};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Base {
    Nat,
    Int,
    Num,
}

impl Base {
    fn rank(self) -> u8 {
        match self {
            Base::Nat => 0,
            Base::Int => 1,
            Base::Num => 2,
        }
    }
}

struct LatticeOracle;

const ARROW: [Variance; 2] = [Variance::Contra, Variance::Co];

impl Oracle<Base> for LatticeOracle {
    fn arity(&self, name: &str) -> Option<&[Variance]> {
        (name == "->").then_some(&ARROW[..])
    }

    fn is_sub(&self, lhs: &Base, rhs: &Base) -> bool {
        lhs.rank() <= rhs.rank()
    }

    fn sup(&self, atoms: &[Base]) -> Option<Base> {
        atoms.iter().copied().max_by_key(|b| b.rank())
    }

    fn inf(&self, atoms: &[Base]) -> Option<Base> {
        atoms.iter().copied().min_by_key(|b| b.rank())
    }
}

/// A chain of `n` sequentially-dependent subtype constraints:
/// `Nat <: a0 <: a1 <: ... <: a(n-1) <: Num`, forcing stage 5 to resolve each
/// variable's bounds in order.
fn chain_constraints(n: usize) -> Vec<Constraint<Base>> {
    let mut cs = Vec::with_capacity(n + 1);
    cs.push(Constraint::Sub(Type::Atom(Base::Nat), Type::Var(0)));
    for i in 0..n.saturating_sub(1) {
        cs.push(Constraint::Sub(
            Type::Var(i as u32),
            Type::Var(i as u32 + 1),
        ));
    }
    cs.push(Constraint::Sub(
        Type::Var(n as u32 - 1),
        Type::Atom(Base::Num),
    ));
    cs
}

/// A balanced tree of arrow constraints, exercising stage 2's decomposition
/// and stage 4's cycle elimination depth rather than stage 5's bound chains.
fn arrow_tree_constraints(depth: usize) -> Vec<Constraint<Base>> {
    fn build(depth: usize, next: &mut u32) -> Type<Base> {
        if depth == 0 {
            let v = *next;
            *next += 1;
            Type::Var(v)
        } else {
            Type::Cons(
                "->".into(),
                vec![build(depth - 1, next), build(depth - 1, next)],
            )
        }
    }
    let mut left_next = 0;
    let lhs = build(depth, &mut left_next);
    let mut right_next = left_next;
    let rhs = build(depth, &mut right_next);
    vec![Constraint::Sub(lhs, rhs)]
}

fn bench_sequential_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_sequential_chain");

    for n in [10, 50, 100, 500] {
        let cs = chain_constraints(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &cs, |b, cs| {
            b.iter(|| solve_constraints(black_box(cs.clone()), &LatticeOracle).unwrap());
        });
    }

    group.finish();
}

fn bench_arrow_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_arrow_tree");

    for depth in [2, 4, 6] {
        let cs = arrow_tree_constraints(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &cs, |b, cs| {
            b.iter(|| solve_constraints(black_box(cs.clone()), &LatticeOracle).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sequential_chain, bench_arrow_tree);
criterion_main!(benches);
