//! Hot path benchmarks.
//!
//! Run with: `cargo bench --bench hot_paths`
//! Compare baselines: `cargo bench --bench hot_paths -- --baseline main`
//!
//! Covers reply classification and decoding, the in-process executor, and a
//! full typed round trip (client -> MemoryStore -> normalizer).

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use redis_typed::reply::{self, Reply};
use redis_typed::store::memory::CommandExecutor;
use redis_typed::store::{Command, RespValue, WRONGTYPE_MESSAGE};
use redis_typed::Client;

/// Reply::classify over each sentinel shape
fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    group.throughput(Throughput::Elements(1));

    let cases = [
        ("nil", RespValue::nil()),
        ("zero", RespValue::Integer(0)),
        ("bulk", RespValue::bulk("value")),
        ("wrongtype", RespValue::err(WRONGTYPE_MESSAGE)),
        ("error", RespValue::err("ERR value is not an integer or out of range")),
    ];
    for (name, raw) in cases {
        group.bench_function(name, |b| {
            b.iter(|| Reply::classify(black_box(raw.clone())))
        });
    }

    group.finish();
}

/// Decoders for the collection shapes
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for len in [8usize, 128, 1024] {
        let items: Vec<String> = (0..len).map(|i| format!("member:{}", i)).collect();
        let array = RespValue::bulk_array(&items);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_function(format!("strings_{}", len), |b| {
            b.iter(|| reply::strings(black_box(array.clone())))
        });
        group.bench_function(format!("field_map_{}", len), |b| {
            b.iter(|| reply::field_map(black_box(array.clone())))
        });
    }

    group.finish();
}

/// CommandExecutor without the lock or the client
fn bench_executor(c: &mut Criterion) {
    let mut group = c.benchmark_group("executor");
    group.throughput(Throughput::Elements(1));

    group.bench_function("set_get", |b| {
        let mut executor = CommandExecutor::new(0);
        let set = Command::Set("key".to_string(), "value".to_string());
        let get = Command::Get("key".to_string());
        b.iter(|| {
            executor.execute(black_box(&set));
            executor.execute(black_box(&get))
        })
    });

    group.bench_function("rpush_lpop", |b| {
        let mut executor = CommandExecutor::new(0);
        let push = Command::RPush("queue".to_string(), vec!["job".to_string()]);
        let pop = Command::LPop("queue".to_string());
        b.iter(|| {
            executor.execute(black_box(&push));
            executor.execute(black_box(&pop))
        })
    });

    group.bench_function("sinter_two_sets", |b| {
        let mut executor = CommandExecutor::new(0);
        let a: Vec<String> = (0..100).map(|i| i.to_string()).collect();
        let bs: Vec<String> = (50..150).map(|i| i.to_string()).collect();
        executor.execute(&Command::SAdd("a".to_string(), a));
        executor.execute(&Command::SAdd("b".to_string(), bs));
        let inter = Command::SInter(vec!["a".to_string(), "b".to_string()]);
        b.iter(|| executor.execute(black_box(&inter)))
    });

    group.finish();
}

/// Typed round trips through Client over MemoryStore
fn bench_client(c: &mut Criterion) {
    let mut group = c.benchmark_group("client");
    group.throughput(Throughput::Elements(1));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");
    let client = Client::in_memory();

    group.bench_function("get_hit", |b| {
        runtime.block_on(async { client.set("key", "value").await.unwrap() });
        b.iter(|| runtime.block_on(client.get(black_box("key"))))
    });

    group.bench_function("get_wrong_type", |b| {
        runtime.block_on(async { client.list_push_right("list", &["a"]).await.unwrap() });
        b.iter(|| runtime.block_on(client.get(black_box("list"))))
    });

    group.bench_function("multi_get_16", |b| {
        let keys: Vec<String> = (0..16).map(|i| format!("k{}", i)).collect();
        let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        b.iter(|| runtime.block_on(client.multi_get(black_box(&refs))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_classify,
    bench_decode,
    bench_executor,
    bench_client,
);
criterion_main!(benches);
