//! Benchmarks for walking SDK object graphs of increasing size.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mcp_sdkgen_introspector::graph::{ClassNode, MethodNode, ModuleNode, ParameterNode};
use mcp_sdkgen_introspector::{LoadedModule, WalkOptions, Walker};
use serde_json::json;
use std::hint::black_box;

/// Builds a module with `classes` classes of 50 methods each
fn create_module(classes: usize) -> LoadedModule {
    let mut root = ModuleNode::new("sdk");
    for c in 0..classes {
        let mut class = ClassNode::new(format!("Api{c}"));
        for m in 0..50 {
            let prefix = ["get", "list", "create", "delete", "_private"][m % 5];
            class = class.with_method(
                MethodNode::new(format!("{prefix}_resource_{m}"))
                    .with_doc("    Operates on a resource.\n\n    :param name: resource name\n")
                    .with_parameter(ParameterNode::positional("self"))
                    .with_parameter(ParameterNode::positional("name").with_annotation("str"))
                    .with_parameter(ParameterNode::positional("page").with_default(json!(1))),
            );
        }
        root = root.with_class(class);
    }

    LoadedModule {
        path: "sdk".to_string(),
        root,
        origin: "memory".to_string(),
    }
}

/// Benchmarks the walk with a filter pattern
fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");
    let options = WalkOptions::new(false, &["^delete_".to_string()]).unwrap();
    let walker = Walker::new(options);

    for classes in [1, 10, 60] {
        let module = create_module(classes);

        group.throughput(Throughput::Elements((classes * 50) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(classes), &module, |b, module| {
            b.iter(|| walker.walk(black_box(module)));
        });
    }

    group.finish();
}

/// Benchmarks parsing a JSON graph dump
fn bench_parse_dump(c: &mut Criterion) {
    let module = create_module(10);
    let dump = serde_json::to_string(&mcp_sdkgen_introspector::graph::Node::Module(module.root))
        .unwrap();

    c.bench_function("parse_dump_500_methods", |b| {
        b.iter(|| {
            let node: mcp_sdkgen_introspector::graph::Node =
                serde_json::from_str(black_box(&dump)).unwrap();
            node
        });
    });
}

criterion_group!(benches, bench_walk, bench_parse_dump);
criterion_main!(benches);
