use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scenetree::{Forest, NodeIndex, PreOrder};

fn make_forest(size: usize, fanout: usize) -> Forest<usize> {
    let mut forest = Forest::with_capacity(size);
    let mut nodes = Vec::with_capacity(size);

    for weight in 0..size {
        let node = forest.add_node(weight);

        if weight > 0 {
            let parent = nodes[(weight - 1) / fanout];
            forest.push_child(node, parent).unwrap();
        }

        nodes.push(node);
    }

    forest
}

fn scattered_nodes(forest: &Forest<usize>) -> Vec<NodeIndex> {
    let nodes: Vec<_> = forest.iter().map(|(node, _)| node).collect();

    (0..nodes.len())
        .map(|i| nodes[(i * 7919) % nodes.len()])
        .collect()
}

fn bench_make_forest(c: &mut Criterion) {
    let mut g = c.benchmark_group("forest creation");

    for size in [0, 100, 10_000, 1_000_000] {
        g.bench_with_input(
            BenchmarkId::new("make_forest", size),
            &size,
            |b, size| b.iter(|| black_box(make_forest(*size, 10))),
        );
    }
}

fn bench_sort_selection(c: &mut Criterion) {
    let mut g = c.benchmark_group("selection sorting");

    for size in [100, 10_000] {
        g.bench_with_input(
            BenchmarkId::new("sort_cached_keys", size),
            &size,
            |b, size| {
                let forest = make_forest(*size, 10);
                let nodes = scattered_nodes(&forest);
                let order = PreOrder::new();

                b.iter(|| {
                    let mut selection = nodes.clone();
                    order.sort(&forest, &mut selection).unwrap();
                    black_box(selection)
                })
            },
        );

        g.bench_with_input(
            BenchmarkId::new("sort_compare_each", size),
            &size,
            |b, size| {
                let forest = make_forest(*size, 10);
                let nodes = scattered_nodes(&forest);
                let order = PreOrder::new();

                b.iter(|| {
                    let mut selection = nodes.clone();
                    selection.sort_by(|&a, &b| order.compare(&forest, a, b).unwrap());
                    black_box(selection)
                })
            },
        );
    }
}

criterion_group!(benches, bench_make_forest, bench_sort_selection);
criterion_main!(benches);
