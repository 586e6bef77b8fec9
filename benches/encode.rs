use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qrmatrix::{ECLevel, QRBuilder, Scoring};

fn build(data: &[u8], ecl: ECLevel, scoring: Scoring) -> usize {
    let mut builder = QRBuilder::new(ecl);
    builder.add_data(data).scoring(scoring);
    builder.build().map(|qr| qr.count_dark_modules()).unwrap_or(0)
}

fn bench_build_small(c: &mut Criterion) {
    c.bench_function("build_v1_m", |b| {
        b.iter(|| build(black_box(b"Hello, world!"), ECLevel::M, Scoring::Adjacency))
    });
}

fn bench_build_large(c: &mut Criterion) {
    let data = vec![b'x'; 271];
    c.bench_function("build_v10_l", |b| {
        b.iter(|| build(black_box(&data), ECLevel::L, Scoring::Adjacency))
    });
}

fn bench_build_standard_scoring(c: &mut Criterion) {
    let data = vec![b'x'; 271];
    c.bench_function("build_v10_l_standard", |b| {
        b.iter(|| build(black_box(&data), ECLevel::L, Scoring::Standard))
    });
}

fn bench_rebuild_cached(c: &mut Criterion) {
    let mut builder = QRBuilder::new(ECLevel::H);
    builder.add_data(&[0xA5; 119]);
    c.bench_function("rebuild_v10_h_cached", |b| {
        b.iter(|| builder.build().map(|qr| qr.width()).unwrap_or(0))
    });
}

criterion_group!(
    benches,
    bench_build_small,
    bench_build_large,
    bench_build_standard_scoring,
    bench_rebuild_cached
);
criterion_main!(benches);
