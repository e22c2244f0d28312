//! Classification Benchmark (Criterion)
//!
//! Measures response normalization on each strategy path and the result
//! cache lookup.

use compliance_assistant::cache::ResultCache;
use compliance_assistant::{determine_risk_level, parse_compliance_response};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;
use std::time::Duration;

fn sample_answer(paragraphs: usize) -> String {
    let paragraph = "The submitted hotel rate exceeds the $250 nightly cap for this city. \
                     A **receipt** is required for every night and the manager must sign off \
                     before reimbursement.";

    let mut answer = String::from("COMPLIANCE STATUS: REQUIRES REVIEW\nANALYSIS:\n");
    for _ in 0..paragraphs {
        answer.push_str(paragraph);
        answer.push_str("\n\n\n");
    }
    answer
}

fn benchmark_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    group.throughput(Throughput::Elements(1));

    let top_level = json!({
        "risk_level": "HIGH",
        "violation_summary": "Business class on a domestic flight",
        "detailed_analysis": "Flights under 6 hours must be booked in economy.",
        "sources": ["travel-policy.pdf"]
    });
    group.bench_function("top_level", |b| {
        b.iter(|| std::hint::black_box(parse_compliance_response(&top_level)));
    });

    let nested = json!({
        "risk_classification": { "risk_level": "critical" },
        "violation_summary": "Cash gift to a government official",
        "answer": "This is strictly prohibited."
    });
    group.bench_function("nested", |b| {
        b.iter(|| std::hint::black_box(parse_compliance_response(&nested)));
    });

    for paragraphs in [1, 5, 20].iter() {
        let heuristic = json!({
            "answer": sample_answer(*paragraphs),
            "sources": ["travel-policy.pdf", "expense-policy.pdf"]
        });
        group.bench_with_input(
            BenchmarkId::new("heuristic", paragraphs),
            &heuristic,
            |b, response| {
                b.iter(|| std::hint::black_box(parse_compliance_response(response)));
            },
        );
    }

    group.bench_function("malformed", |b| {
        let malformed = json!([1, 2, 3]);
        b.iter(|| std::hint::black_box(parse_compliance_response(&malformed)));
    });

    group.finish();
}

fn benchmark_resolver(c: &mut Criterion) {
    let mut group = c.benchmark_group("determine_risk_level");

    // Worst case: no tier matches and every trigger is scanned.
    let no_signal = "The team offsite agenda lists three sessions and a dinner.".repeat(20);
    group.bench_function("no_signal", |b| {
        b.iter(|| std::hint::black_box(determine_risk_level(&no_signal, None)));
    });

    group.bench_function("status_hint", |b| {
        b.iter(|| std::hint::black_box(determine_risk_level(&no_signal, Some("LOW"))));
    });

    group.finish();
}

fn benchmark_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("result_cache");
    let result = parse_compliance_response(&json!({ "risk_level": "low" }));

    for size in [100, 1000].iter() {
        let cache = ResultCache::new(*size, Duration::from_secs(300));
        for i in 0..*size {
            cache.put(&format!("Question number {}?", i), &result);
        }

        group.bench_with_input(BenchmarkId::new("hit", size), &cache, |b, cache| {
            b.iter(|| std::hint::black_box(cache.get("question   NUMBER 50?")));
        });
        group.bench_with_input(BenchmarkId::new("miss", size), &cache, |b, cache| {
            b.iter(|| std::hint::black_box(cache.get("Not a cached question")));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_strategies,
    benchmark_resolver,
    benchmark_cache
);
criterion_main!(benches);
