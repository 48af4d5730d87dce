//! Performance benchmarks for the personnel records engine.
//!
//! Covers query composition, employee search and grouped earnings reports
//! over a generated dataset, plus a full router round trip.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::NaiveDate;
use personnel_records::api::{AppState, ROLE_HEADER, create_router};
use personnel_records::models::{CallerIdentity, GroupingDimension, ReportPeriod, SearchCriteria};
use personnel_records::query::QueryComposer;
use personnel_records::service::{ReportAggregator, SearchService};
use personnel_records::storage::{Dataset, SqliteStore};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const FIRST_NAMES: [&str; 6] = ["John", "Joanna", "Anjo", "Maria", "Kwame", "Lee"];
const LAST_NAMES: [&str; 6] = ["Smith", "Doe", "Reyes", "Jones", "Smithson", "Park"];

/// Generates `employee_count` employees with two October pay lines each.
fn generate_dataset(employee_count: u32) -> Dataset {
    let employees: Vec<serde_json::Value> = (0..employee_count)
        .map(|i| {
            serde_json::json!({
                "empid": 1000 + i,
                "first_name": FIRST_NAMES[(i % 6) as usize],
                "last_name": LAST_NAMES[(i % 6) as usize],
                "ssn": format!("{:03}-{:02}-{:04}", i % 900 + 100, i % 90 + 10, i % 10000),
                "dob": "1985-03-15",
                "salary": "50000.00"
            })
        })
        .collect();

    let divisions: Vec<serde_json::Value> = (0..employee_count)
        .map(|i| serde_json::json!({ "empid": 1000 + i, "div_id": i % 3 + 1 }))
        .collect();
    let job_titles: Vec<serde_json::Value> = (0..employee_count)
        .map(|i| serde_json::json!({ "empid": 1000 + i, "job_title_id": i % 4 + 1 }))
        .collect();

    let payroll: Vec<serde_json::Value> = (0..employee_count)
        .flat_map(|i| {
            ["2026-10-15", "2026-10-31"]
                .into_iter()
                .enumerate()
                .map(move |(n, date)| {
                    serde_json::json!({
                        "payroll_id": i * 2 + n as u32 + 1,
                        "empid": 1000 + i,
                        "pay_date": date,
                        "earnings": "2000.00",
                        "fed_tax": "240.00",
                        "fed_med": "29.00",
                        "fed_ss": "124.00",
                        "state_tax": "100.00",
                        "retire_401k": "100.00",
                        "healthcare": "120.00"
                    })
                })
        })
        .collect();

    let dataset = serde_json::json!({
        "employees": employees,
        "division": [
            { "div_id": 1, "div_name": "Engineering" },
            { "div_id": 2, "div_name": "Operations" },
            { "div_id": 3, "div_name": "Sales" }
        ],
        "job_titles": [
            { "job_title_id": 1, "job_title": "Engineer" },
            { "job_title_id": 2, "job_title": "Clerk" },
            { "job_title_id": 3, "job_title": "Manager" },
            { "job_title_id": 4, "job_title": "Account Executive" }
        ],
        "employee_division": divisions,
        "employee_job_titles": job_titles,
        "payroll": payroll
    });

    serde_json::from_value(dataset).expect("Failed to build dataset")
}

fn open_store(employee_count: u32) -> SqliteStore {
    SqliteStore::from_dataset(&generate_dataset(employee_count)).expect("Failed to open store")
}

/// Benchmark: composing a query with every criterion populated.
fn bench_compose(c: &mut Criterion) {
    let composer = QueryComposer::default();
    let criteria = SearchCriteria::new()
        .with_employee_id(1001)
        .with_first_name("Jo")
        .with_last_name("Smi")
        .with_date_of_birth(NaiveDate::from_ymd_opt(1985, 3, 15).unwrap())
        .with_ssn_fragment("6789");

    c.bench_function("compose_all_criteria", |b| {
        b.iter(|| black_box(composer.compose(black_box(&criteria))))
    });
}

/// Benchmark: name-prefix search across dataset sizes.
fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_by_last_name");
    for size in [100u32, 1_000, 10_000] {
        let store = Arc::new(open_store(size));
        let service = SearchService::new(store, QueryComposer::default());
        let admin = CallerIdentity::admin();
        let criteria = SearchCriteria::new().with_last_name("Smith");

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(service.search(&admin, &criteria).unwrap()))
        });
    }
    group.finish();
}

/// Benchmark: grouped earnings by each dimension.
fn bench_grouped_totals(c: &mut Criterion) {
    let store = Arc::new(open_store(5_000));
    let reports = ReportAggregator::new(store, QueryComposer::default());
    let admin = CallerIdentity::admin();
    let period = ReportPeriod::new(2026, 10).unwrap();

    let mut group = c.benchmark_group("grouped_totals");
    group.throughput(Throughput::Elements(10_000));
    for dimension in GroupingDimension::ALL {
        group.bench_function(dimension.as_str(), |b| {
            b.iter(|| black_box(reports.grouped_totals(&admin, period, dimension).unwrap()))
        });
    }
    group.finish();
}

/// Benchmark: grouped report request through the HTTP router.
fn bench_router_totals(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = Arc::new(open_store(1_000));
    let router = create_router(AppState::new(store, QueryComposer::default()));

    c.bench_function("router_totals_by_division", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("GET")
                        .uri("/reports/totals/division?period=2026-10")
                        .header(ROLE_HEADER, "admin")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_compose,
    bench_search,
    bench_grouped_totals,
    bench_router_totals
);
criterion_main!(benches);
