use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use policyseg::{
    PartyType, PipelineConfig, PolicyDocument, build_section_tree, chunk_policy, process_document,
};

/// A policy with a TOC, markup headings, and typographic headings.
fn bench_policy() -> String {
    let mut text = String::from("Acme Privacy Policy\n\nContents\n");
    for i in 0..40 {
        text.push_str(&format!("- Topic {i}\n"));
    }
    text.push('\n');
    for i in 0..40 {
        if i % 8 == 0 {
            text.push_str(&format!("# Part {i}\n\n"));
        }
        text.push_str(&format!("Topic {i}\n\n"));
        for _ in 0..6 {
            text.push_str(
                "We collect information you provide and information from your device, \
                 and we use it to operate and secure the service.\n",
            );
        }
        text.push_str("\nHow Can You Opt Out?\n\nWrite to privacy@acme.test.\n\n");
    }
    text
}

fn segment_bench(c: &mut Criterion) {
    let text = bench_policy();
    let mut group = c.benchmark_group("segment");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("build_section_tree", |b| {
        b.iter(|| black_box(build_section_tree(black_box(&text))));
    });
    group.finish();
}

fn chunk_bench(c: &mut Criterion) {
    let doc = PolicyDocument::new("bench", PartyType::FirstParty, bench_policy());
    c.bench_function("chunk_policy", |b| {
        b.iter(|| black_box(chunk_policy(black_box(&doc)).count()));
    });
}

fn pipeline_bench(c: &mut Criterion) {
    let doc = PolicyDocument::new("bench", PartyType::ThirdParty, bench_policy());
    let cfg = PipelineConfig::default();
    c.bench_function("process_document", |b| {
        b.iter(|| {
            let processed = process_document(black_box(&doc), &cfg).expect("bench pipeline");
            black_box(processed);
        });
    });
}

criterion_group!(pipeline_benches, segment_bench, chunk_bench, pipeline_bench);
criterion_main!(pipeline_benches);
