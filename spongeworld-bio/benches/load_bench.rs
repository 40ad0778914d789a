use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use spongeworld_bio::formats::biom::parse_biom_json;
use spongeworld_bio::{AbundanceStore, MetadataTable};
use spongeworld_test::{metadata_tsv, random_sequence, TableFixture};

fn synthetic_table(features: usize, samples: usize) -> TableFixture {
    let ids: Vec<String> = (0..features).map(|f| random_sequence(f as u64, 150)).collect();
    let names: Vec<String> = (0..samples).map(|s| format!("S{}", s)).collect();
    let id_refs: Vec<&str> = ids.iter().map(|s| s.as_str()).collect();
    let name_refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();

    let mut table = TableFixture::new(&id_refs, &name_refs);
    for f in 0..features {
        for s in 0..samples {
            // Roughly one cell in seven is non-zero
            if (f * 31 + s * 17) % 7 == 0 {
                table = table.with_entry(f, s, ((f + s) % 90 + 1) as f64);
            }
        }
    }
    table
}

fn synthetic_metadata(samples: usize) -> String {
    let rows: Vec<Vec<String>> = (0..samples)
        .map(|s| vec![format!("S{}", s), format!("{}", s % 5), format!("site{}", s % 13)])
        .collect();
    let rows: Vec<Vec<&str>> = rows
        .iter()
        .map(|r| r.iter().map(|s| s.as_str()).collect())
        .collect();
    metadata_tsv(&["#SampleID", "group", "site"], &rows)
}

fn bench_parse_biom(c: &mut Criterion) {
    let mut group = c.benchmark_group("biom_parsing");

    for &(features, samples) in &[(100, 50), (1000, 200)] {
        let json = synthetic_table(features, samples).to_biom_json(false);
        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("sparse", features),
            json.as_bytes(),
            |b, data| b.iter(|| parse_biom_json(black_box(data))),
        );
    }

    group.finish();
}

fn bench_build_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_build");

    for &(features, samples) in &[(100, 50), (1000, 200)] {
        let json = synthetic_table(features, samples).to_biom_json(false);
        let raw = parse_biom_json(json.as_bytes()).unwrap();
        let metadata = MetadataTable::parse(synthetic_metadata(samples).as_bytes()).unwrap();

        group.bench_with_input(
            BenchmarkId::new("join_normalise_index", features),
            &(raw, metadata),
            |b, (raw, metadata)| {
                b.iter(|| AbundanceStore::from_parts(raw.clone(), metadata.clone()))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parse_biom, bench_build_store);
criterion_main!(benches);
