//! Criterion benchmarks for level_dispatch

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use level_dispatch::core::{base_record, merge_defaults};
use level_dispatch::prelude::*;

/// Always available, discards every record
struct NullSink;

impl Sink for NullSink {
    fn probe(&mut self) -> Result<bool> {
        Ok(true)
    }

    fn write(&mut self, data: &[u8]) {
        black_box(data);
    }

    fn name(&self) -> &str {
        "null"
    }
}

/// Never available
struct DownSink;

impl Sink for DownSink {
    fn probe(&mut self) -> Result<bool> {
        Ok(false)
    }

    fn write(&mut self, _data: &[u8]) {}

    fn name(&self) -> &str {
        "down"
    }
}

fn sample_defaults() -> Fields {
    let mut defaults = Fields::new();
    defaults.insert("service".to_string(), "api".into());
    defaults.insert("region".to_string(), "eu-west-1".into());
    defaults.insert("attempt".to_string(), 3i64.into());
    defaults.insert("msg".to_string(), "shadowed".into());
    defaults
}

// ============================================================================
// Gating Benchmarks
// ============================================================================

fn bench_gated(c: &mut Criterion) {
    let mut group = c.benchmark_group("gated");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::builder().level(Level::Error).sink(NullSink).build();

    group.bench_function("debug_under_error", |b| {
        b.iter(|| logger.debug(black_box("Debug message")));
    });

    group.finish();
}

// ============================================================================
// Dispatch Benchmarks
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    let json = Logger::builder()
        .level(Level::Trace)
        .defaults(sample_defaults())
        .sink(NullSink)
        .formatter(JsonFormatter::new())
        .build();

    group.bench_function("json", |b| {
        b.iter(|| json.info(black_box("Info message")));
    });

    let text = Logger::builder()
        .level(Level::Trace)
        .defaults(sample_defaults())
        .sink(NullSink)
        .formatter(TextFormatter::new())
        .build();

    group.bench_function("text", |b| {
        b.iter(|| text.info(black_box("Info message")));
    });

    let fallback = Logger::builder()
        .level(Level::Trace)
        .sink(DownSink)
        .sink(DownSink)
        .sink(DownSink)
        .sink(NullSink)
        .build();

    group.bench_function("fallback_after_three_down", |b| {
        b.iter(|| fallback.info(black_box("Info message")));
    });

    group.finish();
}

// ============================================================================
// Merge Benchmarks
// ============================================================================

fn bench_merge(c: &mut Criterion) {
    let defaults = sample_defaults();

    c.bench_function("merge_defaults", |b| {
        b.iter(|| {
            let base = base_record(
                "2025-01-08T10:30:45.123Z".to_string(),
                "info",
                black_box("Info message"),
            );
            black_box(merge_defaults(base, &defaults))
        });
    });
}

// ============================================================================
// Concurrent Benchmarks
// ============================================================================

fn bench_concurrent(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent");
    group.throughput(Throughput::Elements(400));

    let logger = Logger::builder().level(Level::Trace).sink(NullSink).build();

    group.bench_function("4_threads_x_100", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let logger = logger.clone();
                    std::thread::spawn(move || {
                        for _ in 0..100 {
                            let _ = logger.info("Concurrent message");
                        }
                    })
                })
                .collect();
            for handle in handles {
                let _ = handle.join();
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_gated,
    bench_dispatch,
    bench_merge,
    bench_concurrent,
);

criterion_main!(benches);
