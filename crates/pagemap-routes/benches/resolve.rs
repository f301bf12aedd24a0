//! Benchmarks for route resolution on large declaration trees.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pagemap_routes::{MatchSuffix, RawDeclaration, RouteTreeOptions, all_paths, build_route_tree};

/// Create a declaration tree with specified depth and breadth.
fn create_declarations(depth: usize, breadth: usize) -> Vec<RawDeclaration<String>> {
    fn create_level(
        prefix: &str,
        current_depth: usize,
        max_depth: usize,
        breadth: usize,
    ) -> Vec<RawDeclaration<String>> {
        if current_depth > max_depth {
            return Vec::new();
        }

        (0..breadth)
            .map(|i| {
                let name = format!("{prefix}section-{i}");
                let children =
                    create_level(&format!("{name}-"), current_depth + 1, max_depth, breadth);
                RawDeclaration::new(
                    format!("Page{current_depth}"),
                    name,
                    format!("/section-{i}"),
                )
                .with_children(children)
            })
            .collect()
    }

    let mut decls = vec![RawDeclaration::new("HomePage".to_owned(), "home", "/")];
    decls.extend(create_level("", 1, depth, breadth));
    decls
}

fn bench_build_route_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_route_tree");
    let options = RouteTreeOptions::new("NotFoundPage".to_owned());

    for (depth, breadth) in [(3, 5), (5, 3), (2, 30)] {
        let decls = create_declarations(depth, breadth);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{depth}x{breadth}")),
            &decls,
            |b, decls| b.iter(|| build_route_tree(decls.clone(), &options).unwrap()),
        );
    }

    group.finish();
}

fn bench_all_paths(c: &mut Criterion) {
    let decls = create_declarations(4, 4);
    let suffix = MatchSuffix::default();

    c.bench_function("all_paths", |b| {
        b.iter(|| all_paths(decls.clone(), &suffix).unwrap())
    });
}

fn bench_lookup(c: &mut Criterion) {
    let decls = create_declarations(3, 5);
    let options = RouteTreeOptions::new("NotFoundPage".to_owned());
    let tree = build_route_tree(decls, &options).unwrap();

    let mut group = c.benchmark_group("route_lookup");

    group.bench_function("lookup_hit", |b| {
        b.iter(|| tree.lookup("/section-4/section-4/section-4/"))
    });

    group.bench_function("lookup_miss", |b| b.iter(|| tree.lookup("/nonexistent/path")));

    group.finish();
}

criterion_group!(benches, bench_build_route_tree, bench_all_paths, bench_lookup);
criterion_main!(benches);
