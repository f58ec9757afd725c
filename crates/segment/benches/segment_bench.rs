use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use segment::build_section_tree;

/// Synthetic policy with a TOC, markup headings, and typographic headings.
fn synthetic_policy(sections: usize) -> String {
    let mut text = String::from("Acme Privacy Policy\n\nTable of Contents\n");
    for i in 0..sections {
        text.push_str(&format!("- Topic Number {i}\n"));
    }
    text.push('\n');
    for i in 0..sections {
        if i % 3 == 0 {
            text.push_str(&format!("# Part {i}\n"));
        }
        text.push_str(&format!("Topic Number {i}\n"));
        text.push_str("We collect information you provide and information from your device. ");
        text.push_str("We use it to operate, secure, and improve the service.\n\n");
        text.push_str("What Choices Do You Have?\n\n");
        text.push_str("You can opt out of marketing at any time.\n\n");
    }
    text
}

fn bench_build_section_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_section_tree");

    for sections in [10usize, 100, 1000] {
        let text = synthetic_policy(sections);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("sections_{sections}"), |b| {
            b.iter(|| build_section_tree(black_box(&text)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build_section_tree);
criterion_main!(benches);
