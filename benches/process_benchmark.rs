//! Benchmarks for sizechart processing performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the pipeline over synthetic block graphs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

const LABELS: [&str; 6] = ["XS", "S", "M", "L", "XL", "XXL"];

/// Creates a block graph holding `table_count` tables of `rows` x 6 cells,
/// with sizes along the header row so that every table gets transposed.
fn create_test_blocks(table_count: usize, rows: usize) -> Value {
    let mut blocks = Vec::new();
    let mut next_word = 0usize;

    for t in 0..table_count {
        let mut cell_ids = Vec::new();

        for row in 1..=rows {
            for col in 1..=LABELS.len() + 1 {
                let text = match (row, col) {
                    (1, 1) => String::new(),
                    (1, c) => LABELS[c - 2].to_string(),
                    (r, 1) => format!("Measure{}", r),
                    (r, c) => format!("{}.5", 30 + r + c),
                };

                let cell_id = format!("t{}-c{}-{}", t, row, col);
                let mut cell = json!({
                    "BlockType": "CELL",
                    "Id": cell_id,
                    "RowIndex": row,
                    "ColumnIndex": col,
                });
                if !text.is_empty() {
                    let word_id = format!("w{}", next_word);
                    next_word += 1;
                    blocks.push(json!({"BlockType": "WORD", "Id": word_id, "Text": text}));
                    cell["Relationships"] = json!([{"Type": "CHILD", "Ids": [word_id]}]);
                }
                blocks.push(cell);
                cell_ids.push(cell_id);
            }
        }

        blocks.push(json!({
            "BlockType": "TABLE",
            "Id": format!("t{}", t),
            "EntityTypes": ["STRUCTURED_TABLE"],
            "Relationships": [{"Type": "CHILD", "Ids": cell_ids}],
        }));
        blocks.push(json!({
            "BlockType": "TABLE_TITLE",
            "Id": format!("title{}", t),
            "Relationships": [{"Type": "CHILD", "Ids": ["w0"]}],
        }));
    }

    Value::Array(blocks)
}

/// Benchmark block processing at various sizes.
fn bench_block_processing(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_processing");

    for table_count in [1, 5, 20].iter() {
        let blocks = create_test_blocks(*table_count, 8);

        group.bench_function(format!("{}_tables", table_count), |b| {
            b.iter(|| sizechart::process_blocks(black_box(&blocks)));
        });

        group.bench_function(format!("{}_tables_sequential", table_count), |b| {
            let options = sizechart::ProcessOptions::new().sequential();
            b.iter(|| sizechart::process_blocks_with_options(black_box(&blocks), options.clone()));
        });
    }

    group.finish();
}

/// Benchmark mapping to sizing charts.
fn bench_chart_mapping(c: &mut Criterion) {
    let images: Vec<_> = (0..10)
        .map(|_| sizechart::process_blocks(&create_test_blocks(3, 8)))
        .collect();

    c.bench_function("map_10_images", |b| {
        b.iter(|| sizechart::map_to_sizing_charts(black_box(&images)));
    });
}

/// Benchmark input shape detection.
fn bench_input_detection(c: &mut Criterion) {
    let envelope = json!({"results": [{"tableData": {"Blocks": []}}]});
    let unknown = json!("not an input");

    c.bench_function("detect_envelope", |b| {
        b.iter(|| sizechart::detect_input(black_box(&envelope)).unwrap());
    });

    c.bench_function("detect_unknown", |b| {
        b.iter(|| sizechart::detect_input(black_box(&unknown)).is_err());
    });
}

criterion_group!(
    benches,
    bench_block_processing,
    bench_chart_mapping,
    bench_input_detection,
);
criterion_main!(benches);
