//! Performance benchmarks for server generation.
//!
//! Measures:
//! - Full generation for growing tool counts
//! - Effect of tool grouping on rendering
//! - Heuristic describe throughput
//!
//! Run with: cargo bench --package mcp-sdkgen-codegen

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mcp_sdkgen_codegen::ServerGenerator;
use mcp_sdkgen_codegen::describe::HeuristicDescriber;
use mcp_sdkgen_core::{ConversionConfig, DescribedMethod, DiscoveredMethod, Parameter};
use serde_json::json;
use std::hint::black_box;

const PREFIXES: [&str; 8] = [
    "get_", "list_", "create_", "update_", "patch_", "delete_", "search_", "watch_",
];

/// Creates a method with a realistic parameter list.
fn create_method(index: usize) -> DiscoveredMethod {
    let prefix = PREFIXES[index % PREFIXES.len()];
    DiscoveredMethod::new(
        format!("sdk.api.Resource{}Api", index / 50),
        format!("{prefix}resource_{index}"),
    )
    .with_parameters(vec![
        Parameter::required("name").with_type("str"),
        Parameter::required("namespace").with_type("str"),
        Parameter::optional("body", None).with_type("Optional[Dict[str, Any]]"),
        Parameter::optional("limit", Some(json!(100))).with_type("int"),
        Parameter::optional("pretty", Some(json!(false))).with_type("bool"),
    ])
    .with_doc(format!("Operate on resource {index}.\n\n:param name: name of the resource"))
}

fn create_described(count: usize) -> Vec<DescribedMethod> {
    let describer = HeuristicDescriber::new();
    (0..count)
        .map(|i| describer.describe_owned(create_method(i)))
        .collect()
}

fn config(max_per_group: Option<usize>) -> ConversionConfig {
    ConversionConfig::builder("bench", "sdk", "out")
        .max_methods_per_tool_group(max_per_group)
        .build()
        .expect("valid config")
}

/// Benchmarks full generation for different tool counts.
fn bench_generation_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation_scaling");
    let generator = ServerGenerator::new().expect("Generator should initialize");
    let config = config(Some(100));

    for count in [1, 10, 100, 1000] {
        let methods = create_described(count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                let result = generator.generate(black_box(&methods), &config);
                assert!(result.is_ok());
            });
        });
    }

    group.finish();
}

/// Benchmarks generation with different group sizes.
fn bench_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("grouping");
    let generator = ServerGenerator::new().expect("Generator should initialize");
    let methods = create_described(500);

    for size in [None, Some(250), Some(50), Some(10)] {
        let config = config(size);
        let label = size.map_or_else(|| "ungrouped".to_string(), |s| s.to_string());

        group.throughput(Throughput::Elements(methods.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(label), &config, |b, config| {
            b.iter(|| {
                let result = generator.generate(black_box(&methods), config);
                assert!(result.is_ok());
            });
        });
    }

    group.finish();
}

/// Benchmarks the heuristic describer.
fn bench_heuristic_describe(c: &mut Criterion) {
    let describer = HeuristicDescriber::new();
    let methods: Vec<_> = (0..1000).map(create_method).collect();

    let mut group = c.benchmark_group("heuristic_describe");
    group.throughput(Throughput::Elements(methods.len() as u64));
    group.bench_function("1000_methods", |b| {
        b.iter(|| {
            for method in &methods {
                black_box(describer.describe(black_box(method)));
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_generation_scaling,
    bench_grouping,
    bench_heuristic_describe
);
criterion_main!(benches);
