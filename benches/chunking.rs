//! Benchmarks for provision chunking.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lexslab::{
    split_sentences, O200kCounter, Paragraph, Provision, ProvisionChunker, TokenBudget,
    TokenCounter,
};

fn sample_text(size: usize) -> String {
    // Legal-register sentences, `;` and `.` boundaries mixed
    let sentences = [
        "Providers of high-risk AI systems shall ensure compliance with the requirements. ",
        "Deployers shall use such systems in accordance with the instructions for use; ",
        "the market surveillance authority may require corrective actions. ",
        "Member States shall lay down the rules on penalties. ",
        "Notified bodies shall verify the conformity of high-risk AI systems; ",
    ];
    let mut text = String::with_capacity(size);
    let mut i = 0;
    while text.len() < size {
        text.push_str(sentences[i % sentences.len()]);
        i += 1;
    }
    text.truncate(size);
    text
}

fn article(size: usize) -> Provision {
    let paragraphs = sample_text(size)
        .split("; ")
        .filter(|text| !text.trim().is_empty())
        .enumerate()
        .map(|(i, text)| Paragraph::new(format!("001.{:03}", i + 1), text))
        .collect();
    Provision::article("art_1", "1", "Article 1", "").with_paragraphs(paragraphs)
}

fn bench_split_sentences(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_sentences");

    for size in [1_000, 10_000, 100_000] {
        let text = sample_text(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("split", size), &text, |b, text| {
            b.iter(|| split_sentences(black_box(text)))
        });
    }

    group.finish();
}

fn bench_count_tokens(c: &mut Criterion) {
    let mut group = c.benchmark_group("o200k_count");
    let counter = O200kCounter::new().unwrap();

    for size in [1_000, 10_000] {
        let text = sample_text(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("count", size), &text, |b, text| {
            b.iter(|| counter.count_tokens(black_box(text)))
        });
    }

    group.finish();
}

fn bench_chunk_provisions(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_provisions");
    group.sample_size(20);
    let chunker = ProvisionChunker::with_counter(
        Arc::new(O200kCounter::new().unwrap()),
        TokenBudget::default(),
    );

    for size in [1_000, 10_000, 50_000] {
        let provisions = vec![
            article(size),
            Provision::annex("anx_I", "I", "ANNEX I", sample_text(size)),
        ];

        group.throughput(Throughput::Bytes(2 * size as u64));
        group.bench_with_input(BenchmarkId::new("mixed", size), &provisions, |b, provisions| {
            b.iter(|| chunker.chunk_provisions(black_box(provisions)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_split_sentences,
    bench_count_tokens,
    bench_chunk_provisions
);
criterion_main!(benches);
