//! Performance benchmarks for the timesheet export engine.
//!
//! Covers the pure layout path and the HTTP manifest endpoint for a full
//! day of entries at several crew sizes.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use timesheet_export::api::{create_router, AppState};
use timesheet_export::config::{ConfigLoader, ExportSettings};
use timesheet_export::export::export_day;
use timesheet_export::storage::{raw_row, InMemoryStore, RawRow, RawValue};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn export_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 23).unwrap()
}

/// Creates a store with `employees` workers, each logging two entries on
/// one of ten jobs. Every fifth worker is indirect.
fn create_store(employees: usize) -> InMemoryStore {
    let mut time_rows: Vec<RawRow> = Vec::with_capacity(employees * 2);
    let mut roster: Vec<RawRow> = Vec::with_capacity(employees);

    for i in 0..employees {
        let name = format!("Worker {:04}", i);
        for (job, rt, ot) in [(100 + i % 10, 8.0, 0.0), (200 + i % 10, 0.0, 2.5)] {
            time_rows.push(raw_row([
                ("Name", RawValue::from(name.as_str())),
                ("Date", RawValue::from("2025-09-23")),
                ("Job Number", RawValue::from(job.to_string())),
                ("Job Area", RawValue::from("5")),
                ("Cost Code", RawValue::from("01-100")),
                ("RT Hours", RawValue::from(rt)),
                ("OT Hours", RawValue::from(ot)),
                ("Comments", RawValue::from(format!("note {}", i % 7))),
            ]));
        }
        roster.push(raw_row([
            ("Employee Name", RawValue::from(name.as_str())),
            (
                "Indirect / Direct",
                RawValue::from(if i % 5 == 0 { "Indirect" } else { "Direct" }),
            ),
            ("Subsistence Rate", RawValue::from("75")),
        ]));
    }

    InMemoryStore::with_standard_templates()
        .with_table("Time Data", time_rows)
        .with_table("Employee List", roster)
        .with_table("Cost Codes", Vec::new())
}

/// Benchmark: full-day export without the HTTP layer.
fn bench_export_day(c: &mut Criterion) {
    let settings = ExportSettings::default();
    let mut group = c.benchmark_group("export_day");

    for employees in [1, 25, 100, 250].iter() {
        let store = create_store(*employees);
        group.throughput(Throughput::Elements(*employees as u64 * 2));
        group.bench_with_input(
            BenchmarkId::new("employees", employees),
            employees,
            |b, _| b.iter(|| black_box(export_day(&store, &settings, export_date()).unwrap())),
        );
    }

    group.finish();
}

/// Benchmark: POST /export for a 100-employee day.
fn bench_http_export(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = AppState::new(
        ConfigLoader::from_settings(ExportSettings::default()),
        create_store(100),
    );
    let router = create_router(state);
    let body = r#"{ "export_date": "2025-09-23" }"#;

    let mut group = c.benchmark_group("http_export");
    group.sample_size(20);

    group.bench_function("employees_100", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/export")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_export_day, bench_http_export);
criterion_main!(benches);
