//! Performance benchmarks for Courseway core operations
//!
//! Run with: `cargo bench -p courseway-core`
//!
//! These benchmarks measure critical path performance:
//! - Table of contents construction for a large site
//! - Navigation lookups (full sequence rebuild per request)
//! - Category aggregation
//! - Order normalization plus persistence (OCC round trip)

use courseway_core::{
    build_toc, resolve_navigation, CategoryAggregator, ChapterPosition, InMemoryPageStore,
    ModulePosition, OrderEditor, OrderPersistQueue, Page, PageStore, CATEGORY_KEY, READ_TIME_KEY,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use tokio::runtime::Runtime;

const CATEGORIES: [&str; 5] = ["Getting Started", "Using Blake", "Deploying", "Meta", "FAQ"];

/// Generate `courses` × `modules` × `pages` pages, deliberately out of order
fn generate_site(courses: usize, modules: usize, pages: usize) -> Vec<Page> {
    let mut site = Vec::with_capacity(courses * modules * pages);
    for c in 0..courses {
        for m in 0..modules {
            for p in 0..pages {
                let n = site.len();
                site.push(
                    Page::new_with_id(
                        format!("c{}-m{}-p{}", c, m, p),
                        format!("course-{}", c),
                        format!("c{}-module-{}", c, m),
                        format!("Page {}", p),
                        (pages - p) as i64,
                    )
                    .with_module_order((modules - m) as i64)
                    .with_metadata(CATEGORY_KEY, CATEGORIES[n % CATEGORIES.len()])
                    .with_metadata(READ_TIME_KEY, (n % 12).to_string()),
                );
            }
        }
    }
    site
}

fn bench_toc_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_toc");
    for &(courses, modules, pages) in &[(1, 10, 10), (10, 10, 10), (20, 20, 25)] {
        let site = generate_site(courses, modules, pages);
        group.bench_with_input(BenchmarkId::from_parameter(site.len()), &site, |b, site| {
            b.iter(|| build_toc(black_box(site)))
        });
    }
    group.finish();
}

fn bench_navigation(c: &mut Criterion) {
    let site = generate_site(10, 20, 25);
    let target = "c5-m10-p12";

    c.bench_function("resolve_navigation_5000_pages", |b| {
        b.iter(|| resolve_navigation(black_box(&site), black_box(target)))
    });
}

fn bench_category_aggregation(c: &mut Criterion) {
    let site = generate_site(10, 20, 25);
    let aggregator = CategoryAggregator::default();

    c.bench_function("aggregate_categories_5000_pages", |b| {
        b.iter(|| aggregator.aggregate(black_box(&site)))
    });
}

/// Normalize and persist a full reorder of one course
///
/// Measures editor cost plus the store's version check and page rewrite.
fn bench_order_save(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let site = generate_site(5, 20, 25);

    let modules: Vec<ModulePosition> = (0..20)
        .map(|m| ModulePosition::new(format!("c0-module-{}", m), m as i64))
        .collect();
    let chapters: Vec<ChapterPosition> = (0..25)
        .map(|p| ChapterPosition::new(format!("c0-m0-p{}", p), "c0-module-0", p as i64))
        .collect();

    c.bench_function("save_course_order_500_chapters", |b| {
        b.iter_custom(|iters| {
            rt.block_on(async {
                let store: Arc<dyn PageStore> = Arc::new(InMemoryPageStore::new(site.clone()));
                let queue = OrderPersistQueue::new(Arc::clone(&store));

                let start = std::time::Instant::now();
                for _ in 0..iters {
                    let snapshot = store.get_pages(Some("course-0")).await.expect("snapshot");
                    let order = OrderEditor::new(&snapshot.pages)
                        .apply_order("course-0", &modules, &chapters)
                        .expect("valid order");
                    queue
                        .persist_with_retry(&order, 0)
                        .await
                        .expect("uncontended save");
                }
                start.elapsed()
            })
        })
    });
}

criterion_group!(
    benches,
    bench_toc_build,
    bench_navigation,
    bench_category_aggregation,
    bench_order_save
);
criterion_main!(benches);
