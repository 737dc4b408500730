//! # Statement-Archive Benchmarks
//!
//! | Group | Measures |
//! |-------|----------|
//! | sa-01 compression | Deflate codec over payload sizes |
//! | sa-02 signature | RSA/SHA-512 sign and verify |
//! | sa-03 generation | Whole-chain archival at several pipeline degrees |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

use archive_runtime::{ArchiveConfig, ArchiveContainer};
use sa_01_compression::{compress, decompress, CompressionConfig};
use sa_02_signature::test_utils::test_key_material;
use sa_03_statement_generation::InMemoryTransactionStore;
use shared_types::{Transaction, TransactionId};

/// Payloads with some redundancy, closer to real records than pure noise.
fn generate_payload(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen_range(b'a'..=b'p')).collect()
}

fn bench_compression(c: &mut Criterion) {
    let mut group = c.benchmark_group("sa-01-compression");

    for size in [256, 4_096, 65_536] {
        let payload = generate_payload(size);
        let compressed = compress(&payload).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("compress", size), &payload, |b, p| {
            b.iter(|| compress(black_box(p)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("decompress", size), &compressed, |b, p| {
            b.iter(|| decompress(black_box(p)).unwrap())
        });
    }

    group.finish();
}

fn bench_signature(c: &mut Criterion) {
    let mut group = c.benchmark_group("sa-02-signature");
    let keys = test_key_material();
    let payload = generate_payload(1_024);
    let signature = sa_02_signature::sign(keys.signing_key(), &payload).unwrap();

    group.bench_function("sign_1kib", |b| {
        b.iter(|| sa_02_signature::sign(keys.signing_key(), black_box(&payload)).unwrap())
    });
    group.bench_function("verify_1kib", |b| {
        b.iter(|| sa_02_signature::verify(keys.verifying_key(), black_box(&payload), &signature))
    });

    group.finish();
}

fn seeded_store(length: usize) -> (Arc<InMemoryTransactionStore>, TransactionId) {
    let store = Arc::new(InMemoryTransactionStore::new());
    let mut previous: Option<TransactionId> = None;
    for i in 0..length {
        let id = TransactionId::parse(format!("tx-{i}")).unwrap();
        store.insert(Transaction::new(id.clone(), previous.take(), generate_payload(512)));
        previous = Some(id);
    }
    let tail = previous.unwrap();
    (store, tail)
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("sa-03-generation");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let chain_length = 100;

    for parallelism in [1, 4, 8] {
        group.throughput(Throughput::Elements(chain_length as u64));
        group.bench_with_input(
            BenchmarkId::new("chain_100", parallelism),
            &parallelism,
            |b, &parallelism| {
                b.iter_batched(
                    || {
                        let (store, tail) = seeded_store(chain_length);
                        let mut config = ArchiveConfig::default();
                        config.compression = CompressionConfig::with_workers(8);
                        config.generation.parallelism = parallelism;
                        let container =
                            ArchiveContainer::with_keys(config, store, test_key_material())
                                .unwrap();
                        (container, tail)
                    },
                    |(container, tail)| {
                        runtime
                            .block_on(container.generator().generate(tail))
                            .unwrap();
                        container.shutdown();
                    },
                    criterion::BatchSize::PerIteration,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compression, bench_signature, bench_generation);
criterion_main!(benches);
