use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use productd_core::ProductId;
use productd_infra::read_model::{InMemoryProductStore, ProductStore};
use productd_products::ProductDetails;

fn sample(n: i32) -> ProductDetails {
    ProductDetails {
        product_id: n,
        sku: format!("SKU-{n:06}"),
        manufacturer: "Acme".to_string(),
        category_id: 1 + n % 16,
        weight: 100 + n,
        some_other_id: n,
    }
}

fn seeded_store(size: i32) -> InMemoryProductStore {
    let store = InMemoryProductStore::new();
    for n in 1..=size {
        if let Ok(id) = ProductId::new(n) {
            store.put(id, sample(n));
        }
    }
    store
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("product_store_get");
    group.throughput(Throughput::Elements(1));

    for size in [100, 10_000].iter() {
        let store = seeded_store(*size);
        let hit = ProductId::new(size / 2).unwrap();
        let miss = ProductId::new(size + 1).unwrap();

        group.bench_with_input(BenchmarkId::new("hit", size), size, |b, _| {
            b.iter(|| black_box(store.get(black_box(hit))))
        });
        group.bench_with_input(BenchmarkId::new("miss", size), size, |b, _| {
            b.iter(|| black_box(store.get(black_box(miss))))
        });
    }

    group.finish();
}

fn bench_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("product_store_put");
    group.throughput(Throughput::Elements(1));

    group.bench_function("replace_existing", |b| {
        let store = seeded_store(1_000);
        let id = ProductId::new(500).unwrap();
        let record = sample(500);
        b.iter(|| store.put(black_box(id), black_box(record.clone())))
    });

    group.bench_function("insert_fresh", |b| {
        let store = InMemoryProductStore::new();
        let mut n = 0;
        b.iter(|| {
            n = if n == i32::MAX { 1 } else { n + 1 };
            let id = ProductId::new(n).unwrap();
            store.put(id, black_box(sample(n)))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_get, bench_put);
criterion_main!(benches);
