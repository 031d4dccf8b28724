//! Benchmarks for date expansion and batched delivery writes

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use recurring_orders::job::{chunk_records, write_in_batches};
use recurring_orders::orders::DeliveryRecord;
use recurring_orders::schedule::{expand, CalendarDate, WeekdaySet};
use recurring_orders::storage::{MemoryTableStore, MAX_RECORDS_PER_WRITE};
use std::hint::black_box;
use tokio::runtime::Runtime;

fn deliveries(count: usize) -> Vec<DeliveryRecord> {
    let start = CalendarDate::parse("2024-01-01").unwrap();
    (0..count)
        .map(|i| DeliveryRecord {
            date: start.add_days(i as i64).unwrap(),
            restaurant: None,
            hospital: None,
            recurring_order: "recBench".to_string(),
        })
        .collect()
}

fn bench_expand(c: &mut Criterion) {
    let start = CalendarDate::parse("2024-01-01").unwrap();
    let weekdays = WeekdaySet::parse_names(["Mon", "Wed", "Fri"]).unwrap();

    let mut group = c.benchmark_group("expand");
    for days in [7i64, 365, 3650].iter() {
        let end = start.add_days(*days - 1).unwrap();
        group.bench_with_input(BenchmarkId::new("mon_wed_fri", days), &end, |b, end| {
            b.iter(|| expand(black_box(start), black_box(*end), &weekdays))
        });
    }
    group.finish();
}

fn bench_chunking(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_records");
    for size in [10usize, 500, 5000].iter() {
        group.bench_with_input(BenchmarkId::new("limit_50", size), size, |b, &size| {
            b.iter_batched(
                || deliveries(size),
                |records| chunk_records(records, MAX_RECORDS_PER_WRITE),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_memory_writes(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("write_in_batches");
    for size in [50usize, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("memory", size), size, |b, &size| {
            b.to_async(&rt).iter_batched(
                || (MemoryTableStore::new(), deliveries(size)),
                |(store, records)| async move {
                    write_in_batches(&store, records, MAX_RECORDS_PER_WRITE)
                        .await
                        .unwrap()
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_expand, bench_chunking, bench_memory_writes);
criterion_main!(benches);
