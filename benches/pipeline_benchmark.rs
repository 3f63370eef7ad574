//! Benchmarks for the slide and figure pipelines.
//!
//! Run with: cargo bench
//!
//! Inputs are synthetic: generated Markdown decks and random-ish region sets.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use paperdeck::figures::{merge_rows, RegionMerger, RowRule};
use paperdeck::layout::{compute_deck, HeightPolicy, LayoutOptions};
use paperdeck::markdown::parse_markdown;
use paperdeck::model::Region;
use paperdeck::to_pptx_bytes;

/// Creates a deck with the given number of slides, five modules each.
fn create_test_deck(slide_count: usize) -> String {
    let mut md = String::new();
    for s in 0..slide_count {
        md.push_str(&format!("# Slide {}\nA one-line summary of slide {}.\n\n", s, s));
        for m in 0..5 {
            md.push_str(&format!("## Module {}\n", m));
            md.push_str("Some **bold** claim followed by plain explanation text.\n\n");
            md.push_str("A second paragraph with more words to wrap.\n");
        }
    }
    md
}

/// Creates `count` overlapping regions laid out on a loose grid.
fn create_regions(count: usize) -> Vec<Region> {
    (0..count)
        .map(|i| {
            let x = ((i * 37) % 500) as f32;
            let y = ((i * 53) % 700) as f32;
            let size = 40.0 + ((i * 13) % 60) as f32;
            Region::new(x, y, x + size, y + size * 0.8)
        })
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for slides in [10, 100] {
        let md = create_test_deck(slides);
        group.bench_function(format!("{}_slides", slides), |b| {
            b.iter(|| parse_markdown(black_box(&md)))
        });
    }

    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let slides = parse_markdown(&create_test_deck(50));
    let fixed = LayoutOptions::default();
    let estimated = LayoutOptions::default().with_height_policy(HeightPolicy::Estimated);

    let mut group = c.benchmark_group("layout");
    group.bench_function("fixed", |b| {
        b.iter(|| compute_deck(black_box(&slides), &fixed))
    });
    group.bench_function("estimated", |b| {
        b.iter(|| compute_deck(black_box(&slides), &estimated))
    });

    let layouts = compute_deck(&slides, &fixed);
    group.bench_function("pptx_package", |b| {
        b.iter(|| to_pptx_bytes(black_box(&layouts), &fixed))
    });
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let merger = RegionMerger::default();
    let rule = RowRule::default();

    let mut group = c.benchmark_group("merge");
    for count in [20, 100] {
        let regions = create_regions(count);
        group.bench_function(format!("overlap_{}", count), |b| {
            b.iter(|| merger.merge(black_box(&regions)))
        });
        group.bench_function(format!("rows_{}", count), |b| {
            b.iter(|| merge_rows(black_box(&regions), &rule))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_layout, bench_merge);
criterion_main!(benches);
