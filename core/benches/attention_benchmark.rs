use align_rs::attention::{attention, compute_weights};
use align_rs::matrix::Matrix;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_attention(c: &mut Criterion) {
    let query_len = 64;
    let key_len = 64;
    let dim = 128;

    // Use unwrap() freely as this is a benchmark setup
    let queries = Matrix::new(vec![0.5f32; query_len * dim], [query_len, dim]).unwrap();
    let keys = Matrix::new(vec![0.3f32; key_len * dim], [key_len, dim]).unwrap();
    let values = Matrix::new(vec![0.1f32; key_len * dim], [key_len, dim]).unwrap();

    let mut group = c.benchmark_group("attention");

    group.bench_function("compute_weights", |b| {
        b.iter(|| compute_weights(black_box(&queries), black_box(&keys)).unwrap())
    });

    group.bench_function("full", |b| {
        b.iter(|| {
            attention(black_box(&queries), black_box(&keys), black_box(&values)).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_attention);
criterion_main!(benches);
