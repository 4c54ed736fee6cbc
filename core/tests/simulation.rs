//! Day-of-month event behavior, one calendar slice at a time.

use bankgen_core::{
    clock::SimWindow,
    config::SimConfig,
    customer::Customer,
    engine::DailyEngine,
    error::SimError,
    profile::ProfileSampler,
    rng::{RngBank, StreamSlot},
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn customer_with(
    start: NaiveDate,
    balance: f64,
    income: f64,
    savings: f64,
    investment: f64,
) -> Customer {
    let config = SimConfig::default();
    let bank = RngBank::new(9);
    let mut rng = bank.for_customer(0, StreamSlot::Profile);
    let (profile, mut finances) =
        ProfileSampler::new(&config.population).sample(0, start, &mut rng);
    finances.current_balance = balance;
    finances.month_income = income;
    finances.savings = savings;
    finances.investment = investment;
    Customer::new(profile, start, finances)
}

fn run_one_day(customer: &mut Customer, seed: u64) -> bankgen_core::engine::CustomerRun {
    let start = customer.timestamp;
    let window = SimWindow::new(start, start + chrono::Duration::days(1));
    let engine = DailyEngine::new(SimConfig::default()).unwrap();
    let mut rng = RngBank::new(seed).for_customer(0, StreamSlot::Engine);
    engine.run_customer(customer, &[], &window, &mut rng)
}

#[test]
fn salary_day_credits_month_income() {
    let mut customer = customer_with(date(2024, 3, 1), 1_000.0, 12_345.0, 0.0, 0.0);
    run_one_day(&mut customer, 1);
    assert_eq!(customer.finances.current_balance, 13_345.0);
}

#[test]
fn expense_day_charges_at_least_the_floor() {
    // A small balance hits the 6000 floor and goes negative.
    let mut customer = customer_with(date(2024, 3, 10), 1_000.0, 10_000.0, 0.0, 0.0);
    let run = run_one_day(&mut customer, 2);
    assert_eq!(customer.finances.current_balance, -5_000.0);
    // The snapshot column reports fraction × income, freshly sampled.
    let row = &run.snapshots[0];
    assert!(row.monthly_expenses >= 0.30 * 10_000.0 - 1e-9);
    assert!(row.monthly_expenses <= 0.60 * 10_000.0 + 1e-9);
}

#[test]
fn expense_day_scales_with_a_large_balance() {
    let mut customer = customer_with(date(2024, 3, 10), 100_000.0, 10_000.0, 0.0, 0.0);
    run_one_day(&mut customer, 3);
    let spent = 100_000.0 - customer.finances.current_balance;
    // Fraction of balance, never the floor: 30%–60% of 100k.
    assert!((30_000.0 - 1e-6..=60_000.0 + 1e-6).contains(&spent), "spent {spent}");
}

#[test]
fn savings_day_is_a_noop_when_savings_are_zero() {
    let mut customer = customer_with(date(2024, 3, 17), 50_000.0, 10_000.0, 0.0, 0.0);
    run_one_day(&mut customer, 4);
    assert_eq!(customer.finances.savings, 0.0);
    assert_eq!(customer.finances.current_balance, 50_000.0, "no funds may move");
}

#[test]
fn savings_day_moves_funds_from_balance_when_funded() {
    let mut customer = customer_with(date(2024, 3, 17), 50_000.0, 10_000.0, 1_000.0, 0.0);
    run_one_day(&mut customer, 5);
    let contributed = customer.finances.savings - 1_000.0;
    assert!((500.0..=2_000.0).contains(&contributed), "contributed {contributed}");
    assert_eq!(
        customer.finances.current_balance + customer.finances.savings,
        51_000.0,
        "transfer must conserve funds"
    );
}

#[test]
fn savings_contribution_skipped_when_it_would_overdraw() {
    // Funded savings but balance below the smallest contribution.
    let mut customer = customer_with(date(2024, 3, 17), 400.0, 10_000.0, 1_000.0, 0.0);
    run_one_day(&mut customer, 6);
    assert_eq!(customer.finances.savings, 1_000.0);
    assert_eq!(customer.finances.current_balance, 400.0);
}

#[test]
fn investment_day_is_a_noop_when_investment_is_zero() {
    let mut customer = customer_with(date(2024, 3, 19), 50_000.0, 10_000.0, 0.0, 0.0);
    run_one_day(&mut customer, 7);
    assert_eq!(customer.finances.investment, 0.0);
    assert_eq!(customer.finances.current_balance, 50_000.0);
}

#[test]
fn savings_growth_day_compounds_one_percent_unconditionally() {
    let mut customer = customer_with(date(2024, 3, 25), 0.0, 10_000.0, 1_000.0, 0.0);
    let run = run_one_day(&mut customer, 8);
    assert_eq!(run.snapshots[0].savings, 1_010.0);
}

#[test]
fn investment_drift_day_stays_inside_the_ten_percent_band() {
    let mut moved = false;
    for seed in 0..25 {
        let mut customer = customer_with(date(2024, 3, 30), 0.0, 10_000.0, 0.0, 10_000.0);
        run_one_day(&mut customer, seed);
        let after = customer.finances.investment;
        assert!(
            (9_000.0..=11_000.0).contains(&after),
            "seed {seed}: investment {after} outside [0.9, 1.1] of prior value"
        );
        moved |= after != 10_000.0;
    }
    assert!(moved, "drift never moved the investment across 25 seeds");
}

#[test]
fn quiet_days_reset_accumulator_and_expense_fraction() {
    let mut customer = customer_with(date(2024, 3, 21), 5_000.0, 10_000.0, 0.0, 0.0);
    customer.finances.loans_repayment = 874.92;
    customer.finances.monthly_expenses = 0.45;
    let run = run_one_day(&mut customer, 9);
    let row = &run.snapshots[0];
    assert_eq!(row.loans_repayment, 0.0);
    assert_eq!(row.monthly_expenses, 0.0);
    assert_eq!(customer.finances.current_balance, 5_000.0, "quiet days move no money");
}

#[test]
fn age_column_advances_with_the_clock() {
    let start = date(2024, 3, 1);
    let mut customer = customer_with(start, 1_000.0, 10_000.0, 0.0, 0.0);
    customer.profile.date_of_birth = date(1990, 3, 10);

    let window = SimWindow::new(start, date(2024, 3, 20));
    let engine = DailyEngine::new(SimConfig::default()).unwrap();
    let mut rng = RngBank::new(10).for_customer(0, StreamSlot::Engine);
    let run = engine.run_customer(&mut customer, &[], &window, &mut rng);

    let age_on = |d: NaiveDate| {
        run.snapshots
            .iter()
            .find(|r| r.timestamp == d)
            .map(|r| r.age)
            .unwrap()
    };
    assert_eq!(age_on(date(2024, 3, 9)), 33);
    assert_eq!(age_on(date(2024, 3, 10)), 34, "birthday bumps the derived age");
}

#[test]
fn engine_construction_rejects_malformed_probability_tables() {
    let mut config = SimConfig::default();
    config.population.employment_weights = vec![0.5, 0.5, 0.5];
    let err = DailyEngine::new(config).unwrap_err();
    assert!(matches!(err, SimError::Config(_)), "expected a fatal config error");
}
