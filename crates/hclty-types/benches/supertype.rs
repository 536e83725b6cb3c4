//! Type algebra benchmarks.
//!
//! Measures the two relations on the shapes editor tooling sees most:
//! - Scalar literal lists (`["a", 1, true]`)
//! - Lists of records with overlapping attributes
//! - Wide object-to-object convertibility checks

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use hclty_types::Type;
use hclty_types::infer::common_supertype_of;

fn record(i: usize) -> Type {
    Type::object([
        ("name", Type::STRING),
        ("port", if i % 2 == 0 { Type::NUMBER } else { Type::STRING }),
        ("labels", Type::map(Type::STRING)),
        ("index", Type::NUMBER),
    ])
}

fn wide_object(width: usize, value: Type) -> Type {
    Type::object((0..width).map(|i| (format!("field_{i}"), value.clone())))
}

fn bench_scalar_literals(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_literals");

    for size in [4, 64, 1_024].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let scalars = [Type::STRING, Type::NUMBER, Type::BOOL, Type::NULL];
            let types: Vec<Type> = (0..size).map(|i| scalars[i % scalars.len()].clone()).collect();

            b.iter(|| black_box(common_supertype_of(&types)));
        });
    }

    group.finish();
}

fn bench_record_lists(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_lists");

    for size in [4, 64, 512].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let types: Vec<Type> = (0..size).map(|i| Type::list(record(i))).collect();

            b.iter(|| black_box(common_supertype_of(&types)));
        });
    }

    group.finish();
}

fn bench_object_convertibility(c: &mut Criterion) {
    let mut group = c.benchmark_group("object_convertibility");

    for width in [8, 64, 256].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(width), width, |b, &width| {
            let source = wide_object(width, Type::STRING);
            let target = wide_object(width, Type::NUMBER);

            b.iter(|| black_box(source.is_convertible_to(&target)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_scalar_literals,
    bench_record_lists,
    bench_object_convertibility
);
criterion_main!(benches);
