use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use spongeworld_bio::{AbundanceStore, MetadataTable, RawTable};
use spongeworld_core::SequenceInput;
use spongeworld_query::{rank_annotations, sequence_info, sequence_info_batch, QueryOptions};
use spongeworld_test::random_sequence;

const FEATURES: usize = 2000;
const SAMPLES: usize = 500;

fn synthetic_store() -> AbundanceStore {
    let feature_ids: Vec<String> = (0..FEATURES)
        .map(|f| random_sequence(f as u64, 150))
        .collect();
    let sample_ids: Vec<String> = (0..SAMPLES).map(|s| format!("S{}", s)).collect();
    let mut entries = Vec::new();
    for f in 0..FEATURES {
        for s in 0..SAMPLES {
            if (f * 7 + s * 13) % 11 == 0 {
                entries.push((f, s, ((f + s) % 50 + 1) as f64));
            }
        }
    }
    let rows = (0..SAMPLES)
        .map(|s| {
            vec![
                format!("S{}", s),
                format!("host{}", s % 17),
                format!("country{}", s % 5),
            ]
        })
        .collect();
    let metadata = MetadataTable::from_rows(
        vec!["#SampleID".to_string(), "host".to_string(), "country".to_string()],
        rows,
    )
    .unwrap();
    let table = RawTable { feature_ids, sample_ids, entries, taxonomy: Vec::new() };
    AbundanceStore::from_parts(table, metadata).unwrap()
}

fn bench_sequence_info(c: &mut Criterion) {
    let store = synthetic_store();
    let mut group = c.benchmark_group("sequence_info");

    for &n in &[1usize, 10, 100] {
        let input = SequenceInput::from(store.feature_ids()[..n].to_vec());
        group.bench_with_input(BenchmarkId::new("set", n), &input, |b, input| {
            b.iter(|| sequence_info(&store, black_box(input), &QueryOptions::default()))
        });
    }

    group.finish();
}

fn bench_ranking(c: &mut Criterion) {
    let store = synthetic_store();
    let input = SequenceInput::from(store.feature_ids()[..50].to_vec());
    let options = QueryOptions::default().with_min_counts(0);
    let result = sequence_info(&store, &input, &options).unwrap();

    c.bench_function("rank_annotations", |b| {
        b.iter(|| rank_annotations(black_box(&result), 0.1, None))
    });
}

fn bench_batch(c: &mut Criterion) {
    let store = synthetic_store();
    let queries: Vec<SequenceInput> = store.feature_ids()[..200]
        .iter()
        .map(|s| SequenceInput::from(s.as_str()))
        .collect();

    c.bench_function("batch_200_single", |b| {
        b.iter(|| sequence_info_batch(&store, black_box(&queries), &QueryOptions::default()))
    });
}

criterion_group!(benches, bench_sequence_info, bench_ranking, bench_batch);
criterion_main!(benches);
