//! Analysis benchmarks: correlation matrix, session clustering, full detector sweep.
//!
//! Run with: cargo bench -p cadence-analysis --bench analysis_bench

use cadence_analysis::correlation::CorrelationMatrix;
use cadence_analysis::cross_session::{cluster_count, cluster_rows};
use cadence_analysis::features::{emotion_features, mining_features};
use cadence_analysis::PatternEngine;
use cadence_core::models::{EmotionAnalysis, EmotionVector, RiskLevel, SessionAnnotations, TherapySession};
use cadence_core::AnalysisContext;
use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn analyses(n: usize) -> Vec<EmotionAnalysis> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let t = i as f64;
            EmotionAnalysis {
                id: format!("ea-{i}"),
                timestamp: base + Duration::minutes(30 * i as i64),
                emotions: EmotionVector {
                    valence: (t * 0.37).sin(),
                    arousal: (t * 0.11).cos().abs(),
                    dominance: ((t * 0.07).sin() + 1.0) / 2.0,
                },
                confidence: 0.5 + 0.5 * (t * 0.013).sin().abs(),
            }
        })
        .collect()
}

fn sessions(n: usize) -> Vec<TherapySession> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    let risks = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High, RiskLevel::Critical];
    (0..n)
        .map(|i| {
            let start = base + Duration::days(i as i64);
            TherapySession {
                id: format!("s-{i}"),
                start_time: start,
                end_time: start + Duration::minutes(30 + (i % 5) as i64 * 15),
                transcript: vec!["word"; 50 + (i * 37) % 400].join(" "),
                annotations: Some(SessionAnnotations {
                    risk_level: Some(risks[i % 4]),
                    emotional_states: (0..(i % 4 + 1)).map(|e| format!("emotion-{e}")).collect(),
                    techniques: vec![if i % 3 == 0 { "cbt" } else { "mindfulness" }.to_string()],
                }),
            }
        })
        .collect()
}

fn bench_correlation_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation_matrix");
    for n in [100, 1_000, 10_000] {
        let features = emotion_features(&analyses(n));
        group.bench_with_input(BenchmarkId::from_parameter(n), &features, |b, f| {
            b.iter(|| CorrelationMatrix::build(f))
        });
    }
    group.finish();
}

fn bench_clustering(c: &mut Criterion) {
    let mut group = c.benchmark_group("clustering");
    for n in [50, 500, 2_000] {
        let mut features = mining_features(&sessions(n));
        features.standardize();
        let k = cluster_count(n, 5);
        group.bench_with_input(BenchmarkId::from_parameter(n), &features.rows, |b, rows| {
            b.iter(|| cluster_rows(rows, k, 2))
        });
    }
    group.finish();
}

fn bench_detector_sweep(c: &mut Criterion) {
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("bench");
    let input = sessions(1_000);
    c.bench_function("detector_sweep_1000", |b| {
        b.iter(|| engine.detect_cross_session_patterns(&ctx, &input))
    });
}

criterion_group!(benches, bench_correlation_matrix, bench_clustering, bench_detector_sweep);
criterion_main!(benches);
