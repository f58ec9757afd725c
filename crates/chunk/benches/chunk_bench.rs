use std::hint::black_box;

use chunk::{ChunkConfig, Chunker};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ingest::{PartyType, PolicyDocument};
use segment::build_section_tree;

fn long_policy(paragraphs: usize) -> PolicyDocument {
    let mut text = String::from("# Acme Privacy Policy\n\n");
    for i in 0..paragraphs {
        if i % 10 == 0 {
            text.push_str(&format!("## Section {i}\n"));
        }
        text.push_str(
            "We collect the information you give us, details about your devices, \
             and records of how you use the service. We keep it only as long as needed.\n\n",
        );
    }
    PolicyDocument::new("bench", PartyType::FirstParty, text)
}

fn bench_chunk_sizes(c: &mut Criterion) {
    let doc = long_policy(500);
    let sections = build_section_tree(&doc.raw_text);
    let mut group = c.benchmark_group("chunk_sections");
    group.throughput(Throughput::Bytes(doc.len() as u64));

    for max in [256usize, 1200, 4096] {
        let chunker = Chunker::new(ChunkConfig::default().with_max_chunk_bytes(max).with_overlap_bytes(max / 6))
            .expect("valid bench config");
        group.bench_with_input(BenchmarkId::from_parameter(max), &max, |b, _| {
            b.iter(|| {
                let chunks = chunker
                    .chunk_sections(black_box(&doc), sections.clone())
                    .expect("sections fit the document");
                black_box(chunks.count())
            });
        });
    }

    group.finish();
}

fn bench_chunk_policy(c: &mut Criterion) {
    let doc = long_policy(500);
    c.bench_function("chunk_policy_default", |b| {
        b.iter(|| black_box(chunk::chunk_policy(black_box(&doc)).count()));
    });
}

criterion_group!(benches, bench_chunk_sizes, bench_chunk_policy);
criterion_main!(benches);
