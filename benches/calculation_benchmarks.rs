//! Performance benchmarks for the Tip Distribution Engine.
//!
//! This benchmark suite measures:
//! - Proportional allocation for growing rosters
//! - Full shift calculation (reconciliation + allocation) against a directory
//! - A shift preview through the HTTP router
//! - Monthly report folding over a month of saved shifts
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use tip_engine::api::{AppState, create_router};
use tip_engine::calculation::{RosterPolicy, allocate, calculate_shift};
use tip_engine::config::{ConfigLoader, HouseSettings};
use tip_engine::directory::EmployeeDirectory;
use tip_engine::ledger::ShiftLedger;
use tip_engine::models::{Employee, Role, RosterEntry, ShiftInput};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/house").expect("Failed to load config");
    AppState::new(config)
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Creates a roster of `size` employees with uneven fractional hours.
fn create_roster(size: usize) -> Vec<RosterEntry> {
    (0..size)
        .map(|i| RosterEntry::new(format!("emp_{:03}", i), Decimal::new(40 + (i as i64 % 7) * 5, 1)))
        .collect()
}

fn create_directory(size: usize) -> EmployeeDirectory {
    EmployeeDirectory::from_seed((0..size).map(|i| Employee {
        id: format!("emp_{:03}", i),
        name: format!("Employee {}", i),
        role: if i % 4 == 0 { Role::Bartender } else { Role::Waiter },
        hourly_deduction_rate: None,
        is_active: true,
    }))
}

/// Benchmark: allocation alone for several roster sizes.
fn bench_allocation(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocation");
    let pool = dec("4817");

    for size in [2usize, 10, 50, 200] {
        let roster = create_roster(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &roster, |b, roster| {
            b.iter(|| allocate(black_box(pool), black_box(roster)).unwrap())
        });
    }
    group.finish();
}

/// Benchmark: end-to-end shift calculation against the directory.
fn bench_calculate_shift(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate_shift");
    let house = HouseSettings::default();

    for size in [3usize, 12, 40] {
        let directory = create_directory(size);
        let input = ShiftInput {
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            cash_tips: dec("2350"),
            credit_tips: dec("640"),
            roster: create_roster(size),
        };
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| {
                calculate_shift(black_box(input), &directory, &house, RosterPolicy::ActiveOnly)
                    .unwrap()
            })
        });
    }
    group.finish();
}

/// Benchmark: a shift preview through the router.
fn bench_preview_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::json!({
        "date": "2025-03-14",
        "cash_tips": "1200",
        "credit_tips": "400",
        "roster": [
            { "employee_id": "emp_001", "hours": "7.5" },
            { "employee_id": "emp_002", "hours": "6" },
            { "employee_id": "emp_003", "hours": "8" }
        ]
    })
    .to_string();

    c.bench_function("preview_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/shifts/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: monthly report over 31 saved shifts.
fn bench_monthly_report(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let house = HouseSettings::default();
    let directory = create_directory(12);
    let ledger = ShiftLedger::in_memory();
    let first = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

    rt.block_on(async {
        for day in 0..31 {
            let input = ShiftInput {
                date: first + Duration::days(day),
                cash_tips: Decimal::new(1500 + day * 37, 0),
                credit_tips: dec("500"),
                roster: create_roster(12),
            };
            let shift = calculate_shift(&input, &directory, &house, RosterPolicy::ActiveOnly)
                .unwrap()
                .into_shift("bench");
            ledger.save(shift).await.unwrap();
        }
    });

    c.bench_function("monthly_report_31_shifts", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(ledger.get_monthly_report(2025, 3).await.unwrap()) })
    });
}

criterion_group!(
    benches,
    bench_allocation,
    bench_calculate_shift,
    bench_preview_request,
    bench_monthly_report,
);
criterion_main!(benches);
