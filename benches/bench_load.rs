use std::time::Duration;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use obograph::{CollectionParams, OboGraph, SqliteDataSource, build_graph, load_graph};
use serde_json::{Value, json};

const SAMPLE_SIZE: usize = 10;
const WARM_UP: Duration = Duration::from_millis(300);
const MEASURE: Duration = Duration::from_secs(2);

fn bench_scales() -> &'static [usize] {
    #[cfg(feature = "bench-ci")]
    {
        &[500, 2_000]
    }
    #[cfg(not(feature = "bench-ci"))]
    {
        &[2_000, 10_000]
    }
}

fn document(terms: usize) -> Value {
    let nodes: Vec<Value> = (0..terms)
        .map(|idx| {
            json!({
                "id": format!("http://x/GEN_{idx:07}"),
                "lbl": format!("term {idx}"),
                "type": "CLASS",
                "meta": {"synonyms": [{"pred": "hasExactSynonym", "val": format!("t{idx}")}]}
            })
        })
        .collect();
    let edges: Vec<Value> = (1..terms)
        .map(|idx| {
            json!({
                "sub": format!("http://x/GEN_{idx:07}"),
                "pred": "is_a",
                "obj": format!("http://x/GEN_{:07}", (idx - 1) / 2)
            })
        })
        .collect();
    json!({"graphs": [{"id": "http://x/bench.owl", "nodes": nodes, "edges": edges}]})
}

fn graph(terms: usize) -> OboGraph {
    build_graph(document(terms).to_string().as_bytes()).expect("graph")
}

fn store() -> SqliteDataSource {
    SqliteDataSource::open_in_memory(CollectionParams::default()).expect("store")
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_graph");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for &terms in bench_scales() {
        let doc = document(terms).to_string();
        group.bench_with_input(BenchmarkId::from_parameter(terms), &doc, |b, doc| {
            b.iter(|| build_graph(doc.as_bytes()).expect("graph"));
        });
    }
    group.finish();
}

fn bench_initial_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("initial_load");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for &terms in bench_scales() {
        let graph = graph(terms);
        group.bench_with_input(BenchmarkId::from_parameter(terms), &graph, |b, graph| {
            b.iter_batched(
                store,
                |store| load_graph(graph, &store).expect("load"),
                BatchSize::PerIteration,
            );
        });
    }
    group.finish();
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for &terms in bench_scales() {
        let graph = graph(terms);
        group.bench_with_input(BenchmarkId::from_parameter(terms), &graph, |b, graph| {
            b.iter_batched(
                || {
                    let store = store();
                    load_graph(graph, &store).expect("load");
                    store
                },
                |store| load_graph(graph, &store).expect("reload"),
                BatchSize::PerIteration,
            );
        });
    }
    group.finish();
}

criterion_group!(
    name = load_benches;
    config = Criterion::default();
    targets = bench_build, bench_initial_load, bench_reconcile
);
criterion_main!(load_benches);
