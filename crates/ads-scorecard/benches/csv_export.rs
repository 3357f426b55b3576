use ads_scorecard::{build_csv, EvidenceItem};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn evidence(count: usize) -> Vec<EvidenceItem> {
    (0..count)
        .rev()
        .map(|i| {
            EvidenceItem::new(format!("item-{i:05}"), "Problem Solving")
                .with_scores(f64::from(u32::try_from(i % 10).unwrap_or(0)) + 0.25, 10.0)
                .with_response(format!("answer {i} with \"quoted\" text, and a comma"))
                .with_evidence("observed")
        })
        .collect()
}

fn bench_build_csv(c: &mut Criterion) {
    let small = evidence(50);
    let large = evidence(5_000);

    c.bench_function("csv.build.50", |b| b.iter(|| build_csv(black_box(&small))));
    c.bench_function("csv.build.5000", |b| b.iter(|| build_csv(black_box(&large))));
}

criterion_group!(benches, bench_build_csv);
criterion_main!(benches);
