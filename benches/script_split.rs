//! Benchmarks for script splitting
//!
//! Compares delimiter and SQL-aware splitting on a generated network schema.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use spatial_init_db::script::{split_script, SplitMode};

/// Build a script with `tables` table/geometry/index/trigger groups.
fn network_script(tables: usize, delimiter: &str) -> String {
    let mut script = String::from("SELECT InitSpatialMetadata();");
    for i in 0..tables {
        script.push_str(delimiter);
        script.push_str(&format!(
            "CREATE TABLE links_{i} (ogc_fid INTEGER PRIMARY KEY, name TEXT DEFAULT 'link; #{i}');"
        ));
        script.push_str(delimiter);
        script.push_str(&format!(
            "SELECT AddGeometryColumn('links_{i}', 'geometry', 4326, 'LINESTRING', 'XY');"
        ));
        script.push_str(delimiter);
        script.push_str(&format!(
            "CREATE TRIGGER links_{i}_len AFTER INSERT ON links_{i}\nBEGIN\n  UPDATE links_{i} SET name = CASE WHEN new.name IS NULL THEN 'x' ELSE new.name END WHERE ogc_fid = new.ogc_fid;\nEND;"
        ));
    }
    script
}

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_script");

    for tables in [10, 100, 1000] {
        let delimited = network_script(tables, "#");
        group.bench_with_input(
            BenchmarkId::new("delimiter", tables),
            &delimited,
            |b, script| b.iter(|| split_script(black_box(script), SplitMode::default())),
        );

        let sql = network_script(tables, "\n");
        group.bench_with_input(BenchmarkId::new("sql", tables), &sql, |b, script| {
            b.iter(|| split_script(black_box(script), SplitMode::Sql))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_split);
criterion_main!(benches);
