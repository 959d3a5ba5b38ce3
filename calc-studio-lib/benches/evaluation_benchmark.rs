use calc_studio::engine::{evaluate, AngleMode};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let expressions = [
        "2 + 2".to_string(),
        "3 * (4 + 5)^2 / 6".to_string(),
        "sin(pi / 4) * sqrt(2)".to_string(),
        "logb(4096, 2) + factorial(12)".to_string(),
        "hypot(3, 4) % cos(0.5)".to_string(),
        "((((1 + 2".to_string(),
    ];
    for expression in expressions {
        group.throughput(Throughput::Elements(expression.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(&expression),
            &expression,
            |bencher, expression| {
                bencher.iter(|| evaluate(expression, AngleMode::Radians));
            },
        );
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
