//! Performance benchmarks for candidate discovery and action application.
//!
//! Workloads:
//! - Width: one abstract base with many concrete subclasses, each holding
//!   several delegation candidates
//! - Depth: a long chain of abstract ancestors above the fixed type
//! - Apply: synthesize and commit one action on a wide snapshot
//!
//! ```bash
//! cargo bench --bench discovery_benchmarks
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;

use synthfix::prelude::*;

fn h(name: &str) -> TypeHash {
    TypeHash::from_name(name)
}

/// `Base` with `members` abstract methods, and `width` subclasses holding
/// `fields` fields of type `Base` each.
fn wide_snapshot(width: usize, members: usize, fields: usize) -> Arc<ProgramSnapshot> {
    let mut builder = SnapshotBuilder::new();

    let mut base = ClassEntry::new("Base").as_abstract();
    for m in 0..members {
        base = base.with_member(
            MemberEntry::method(
                TypeHash::EMPTY,
                format!("Method{m}"),
                vec![Param::new("value", DataType::primitive(PrimitiveKind::Int))],
                DataType::primitive(PrimitiveKind::Int),
            )
            .as_abstract(),
        );
    }
    builder.register(base).unwrap();

    for w in 0..width {
        let mut class = ClassEntry::new(format!("Derived{w}").as_str())
            .with_base(TypeRef::new(h("Base")));
        for f in 0..fields {
            class = class.with_member(MemberEntry::field(
                TypeHash::EMPTY,
                format!("inner{f}"),
                DataType::named(h("Base")),
            ));
        }
        builder.register(class).unwrap();
    }

    Arc::new(builder.build().unwrap())
}

/// `A0 <- A1 <- ... <- A{depth-1} <- Leaf`, one abstract method per level.
fn deep_snapshot(depth: usize) -> Arc<ProgramSnapshot> {
    let mut builder = SnapshotBuilder::new();
    for d in 0..depth {
        let mut class = ClassEntry::new(format!("A{d}").as_str())
            .as_abstract()
            .with_member(
                MemberEntry::method(TypeHash::EMPTY, format!("Level{d}"), vec![], DataType::Void)
                    .as_abstract(),
            );
        if d > 0 {
            class = class.with_base(TypeRef::new(h(&format!("A{}", d - 1))));
        }
        builder.register(class).unwrap();
    }
    builder
        .register(
            ClassEntry::new("Leaf")
                .with_base(TypeRef::new(h(&format!("A{}", depth - 1))))
                .with_member(MemberEntry::field(
                    TypeHash::EMPTY,
                    "inner",
                    DataType::named(h("A0")),
                )),
        )
        .unwrap();
    Arc::new(builder.build().unwrap())
}

fn width_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("width");
    let registry = ProviderRegistry::with_defaults();

    for width in [10, 100, 1000] {
        let snapshot = wide_snapshot(width, 8, 4);
        group.throughput(Throughput::Elements(width as u64));
        group.bench_with_input(BenchmarkId::from_parameter(width), &snapshot, |b, snapshot| {
            b.iter(|| {
                let mut total = 0;
                for w in 0..width {
                    let context = FixContext::new(
                        Arc::clone(snapshot),
                        Selection::Type(h(&format!("Derived{w}"))),
                    );
                    total += compute_actions(&registry, black_box(&context))
                        .unwrap()
                        .len();
                }
                black_box(total)
            });
        });
    }

    group.finish();
}

fn depth_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("depth");
    let registry = ProviderRegistry::with_defaults();

    for depth in [4, 32, 128] {
        let context = FixContext::new(deep_snapshot(depth), Selection::Type(h("Leaf")));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &context, |b, context| {
            b.iter(|| black_box(compute_actions(&registry, black_box(context)).unwrap()));
        });
    }

    group.finish();
}

fn apply_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");
    let registry = ProviderRegistry::with_defaults();
    let context = FixContext::new(wide_snapshot(1000, 32, 1), Selection::Type(h("Derived0")));
    let actions = compute_actions(&registry, &context).unwrap();
    let cancel = CancellationToken::new();

    group.bench_function("forward_32_members", |b| {
        b.iter(|| black_box(actions[0].apply(&cancel).unwrap().version()));
    });

    group.finish();
}

criterion_group!(
    benches,
    width_benchmarks,
    depth_benchmarks,
    apply_benchmarks
);

criterion_main!(benches);
