//! Criterion benchmarks for rust_journaler

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_journaler::message::sprintf;
use rust_journaler::prelude::*;
use rust_journaler::{debug, info};
use std::sync::Arc;

fn sink_journaler(threshold: Priority) -> Journaler {
    let sender = NativeSender::with_writer(
        "bench",
        LevelInfo::new(threshold, Priority::INFO),
        std::io::sink(),
    )
    .expect("valid level");
    Journaler::new("bench", sender)
}

// ============================================================================
// Composer Benchmarks
// ============================================================================

fn bench_composers(c: &mut Criterion) {
    let mut group = c.benchmark_group("composers");
    group.throughput(Throughput::Elements(1));

    group.bench_function("sprintf", |b| {
        let args = payloads!["/var", 93.27, 42];
        b.iter(|| black_box(sprintf(black_box("%s is %.1f%% full (%d)"), &args)));
    });

    group.bench_function("lines_resolve", |b| {
        b.iter(|| {
            let message = LinesMessage::new(payloads!["copied", 3, "files", true]);
            black_box(message.resolve().len())
        });
    });

    group.finish();
}

// ============================================================================
// Send Path Benchmarks
// ============================================================================

fn bench_send_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("send_path");
    group.throughput(Throughput::Elements(1));

    let journaler = sink_journaler(Priority::DEBUG);

    group.bench_function("plain", |b| {
        b.iter(|| journaler.info(black_box("Info message")));
    });

    group.bench_function("formatted", |b| {
        b.iter(|| journaler.warning_fmt("%s retry %d", payloads![black_box("db"), 3]));
    });

    group.bench_function("macro", |b| {
        b.iter(|| info!(journaler, "request {} took {}ms", black_box(17), 4));
    });

    let filtered = sink_journaler(Priority::ERROR);

    group.bench_function("filtered_plain", |b| {
        b.iter(|| filtered.debug(black_box("Debug message")));
    });

    group.bench_function("filtered_macro", |b| {
        b.iter(|| debug!(filtered, "expensive {:?}", black_box(vec![1, 2, 3])));
    });

    group.finish();
}

// ============================================================================
// Concurrent Benchmarks
// ============================================================================

fn bench_concurrent(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent");
    group.sample_size(20);

    for threads in [2usize, 4, 8] {
        group.throughput(Throughput::Elements((threads * 100) as u64));
        group.bench_function(format!("threads_{}", threads), |b| {
            let journaler = Arc::new(sink_journaler(Priority::INFO));
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let journaler = Arc::clone(&journaler);
                        std::thread::spawn(move || {
                            for i in 0..100 {
                                journaler.notice_values(payloads!["message", i]);
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    let _ = handle.join();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_composers, bench_send_path, bench_concurrent);
criterion_main!(benches);
