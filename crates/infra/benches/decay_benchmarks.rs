use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use std::sync::Arc;

use chrono::{Duration, Utc};
use petcare_core::{ManualClock, PetId};
use petcare_infra::{EngineConfig, InMemoryKeyValueStore, LifecycleService};
use petcare_pets::{apply_time_decay, Pet};

fn bench_apply_time_decay(c: &mut Criterion) {
    let start = Utc::now();
    let pet = Pet::create(PetId::new(), "Rex", "uri://x", start).unwrap();
    let later = start + Duration::hours(7);

    c.bench_function("apply_time_decay", |b| {
        b.iter(|| apply_time_decay(black_box(&pet), black_box(later)))
    });
}

fn bench_list_pets_refresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_pets_refresh");

    for count in [10usize, 50, 200] {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let service = LifecycleService::new(
            InMemoryKeyValueStore::new(),
            clock.clone(),
            EngineConfig::default(),
        );
        for i in 0..count {
            service.create_pet(&format!("pet-{i}"), "uri://x").unwrap();
        }

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                clock.advance(Duration::seconds(1));
                black_box(service.list_pets())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_apply_time_decay, bench_list_pets_refresh);
criterion_main!(benches);
