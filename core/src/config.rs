//! Run configuration — every sampled quantity's range and weights in
//! one explicit structure.
//!
//! Defaults reproduce the documented probability tables. A JSON file
//! with the same shape can override any of them for experiments and
//! tests. `validate()` runs before any simulation starts: a malformed
//! table is a fatal configuration error, never a simulation-time
//! condition.

use crate::{
    error::{SimError, SimResult},
    rng::StreamRng,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ── Sampling primitives ────────────────────────────────────────────

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub fn sample(&self, rng: &mut StreamRng) -> i64 {
        rng.range_i64(self.min, self.max)
    }

    fn validate(&self, field: &str) -> SimResult<()> {
        if self.min > self.max {
            return Err(SimError::Config(format!(
                "{field}: min {} exceeds max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// An amount that is zero unless the funded trial succeeds, in which
/// case it is uniform in [min, max].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FundedRange {
    pub funded_probability: f64,
    pub min: i64,
    pub max: i64,
}

impl FundedRange {
    pub fn sample(&self, rng: &mut StreamRng) -> i64 {
        if rng.chance(self.funded_probability) {
            rng.range_i64(self.min, self.max)
        } else {
            0
        }
    }

    fn validate(&self, field: &str) -> SimResult<()> {
        probability(field, self.funded_probability)?;
        IntRange { min: self.min, max: self.max }.validate(field)
    }
}

/// Discrete stepped float range: {start, start+step, …} below `end`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SteppedRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl SteppedRange {
    pub fn sample(&self, rng: &mut StreamRng) -> f64 {
        // Epsilon keeps float division from inventing an extra step.
        let count = ((self.end - self.start) / self.step - 1e-9).ceil().max(1.0) as u64;
        self.start + rng.next_u64_below(count) as f64 * self.step
    }

    fn validate(&self, field: &str) -> SimResult<()> {
        if self.step <= 0.0 || self.end <= self.start {
            return Err(SimError::Config(format!(
                "{field}: stepped range must have start < end and step > 0"
            )));
        }
        Ok(())
    }
}

/// Discrete stepped integer amounts: {start, start+step, …} below `end`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SteppedAmount {
    pub start: i64,
    pub end: i64,
    pub step: i64,
}

impl SteppedAmount {
    pub fn sample(&self, rng: &mut StreamRng) -> i64 {
        let count = ((self.end - self.start + self.step - 1) / self.step) as u64;
        self.start + rng.next_u64_below(count) as i64 * self.step
    }

    fn validate(&self, field: &str) -> SimResult<()> {
        if self.step <= 0 || self.end <= self.start {
            return Err(SimError::Config(format!(
                "{field}: stepped amounts must have start < end and step > 0"
            )));
        }
        Ok(())
    }
}

// ── Population ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// male / female.
    pub gender_weights: Vec<f64>,
    /// married / single / divorced / widowed.
    pub marital_weights: Vec<f64>,
    /// full-time / part-time / self-employed.
    pub employment_weights: Vec<f64>,
    pub citizenship_probability: f64,
    pub parental_probability: f64,
    pub owner_probability: f64,

    /// Age at the simulation start date.
    pub age_range: IntRange,
    pub credit_score: IntRange,
    pub month_income: IntRange,
    pub opening_balance: IntRange,
    pub savings_seed: FundedRange,
    pub investment_seed: FundedRange,
    /// Shared by the opening ATM withdrawal and deposit draws.
    pub atm_amount: FundedRange,

    /// 0 / 1 / 2 calls.
    pub branch_call_weights: Vec<f64>,
    pub branch_visit_probability: f64,
    pub support_call_probability: f64,
    pub ads_probability: f64,
    /// Exclusive upper bounds, sampled uniformly from [0, max).
    pub mobile_entrances_max: u64,
    pub online_entrances_max: u64,
    pub digital_session_minutes: IntRange,
    /// Feedback score, uniform in [0, feedback_max].
    pub feedback_max: i64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            gender_weights: vec![0.51, 0.49],
            marital_weights: vec![0.48, 0.36, 0.09, 0.07],
            employment_weights: vec![0.65, 0.25, 0.10],
            citizenship_probability: 0.95,
            parental_probability: 0.69,
            owner_probability: 0.65,
            age_range: IntRange { min: 20, max: 67 },
            credit_score: IntRange { min: 580, max: 800 },
            month_income: IntRange { min: 6_000, max: 25_000 },
            opening_balance: IntRange { min: 100, max: 3_000 },
            savings_seed: FundedRange { funded_probability: 0.7, min: 2_000, max: 4_000 },
            investment_seed: FundedRange { funded_probability: 0.3, min: 5_000, max: 10_000 },
            atm_amount: FundedRange { funded_probability: 0.2, min: 50, max: 300 },
            branch_call_weights: vec![0.85, 0.10, 0.05],
            branch_visit_probability: 0.15,
            support_call_probability: 0.15,
            ads_probability: 0.05,
            mobile_entrances_max: 5,
            online_entrances_max: 1,
            digital_session_minutes: IntRange { min: 2, max: 10 },
            feedback_max: 5,
        }
    }
}

// ── Loans ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSizeTable {
    pub car: SteppedAmount,
    pub education: SteppedAmount,
    pub vacation: SteppedAmount,
    pub business: SteppedAmount,
    pub other: SteppedAmount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanConfig {
    pub loans_per_customer: IntRange,
    /// Days between window start and the earliest possible origination.
    pub lead_days: IntRange,
    /// Width of the origination window, itself sampled per loan.
    pub span_days: IntRange,
    pub annual_rate: f64,
    pub default_term_years: u32,
    pub car_term_years: u32,
    pub short_term_years: u32,
    /// Principals below this get the short term.
    pub short_term_ceiling: i64,
    pub sizes: LoanSizeTable,
}

impl Default for LoanConfig {
    fn default() -> Self {
        Self {
            loans_per_customer: IntRange { min: 3, max: 6 },
            lead_days: IntRange { min: 0, max: 90 },
            span_days: IntRange { min: 300, max: 640 },
            annual_rate: 0.0499,
            default_term_years: 3,
            car_term_years: 5,
            short_term_years: 1,
            short_term_ceiling: 10_000,
            sizes: LoanSizeTable {
                car: SteppedAmount { start: 50_000, end: 710_000, step: 10_000 },
                education: SteppedAmount { start: 20_000, end: 200_000, step: 5_000 },
                vacation: SteppedAmount { start: 5_000, end: 20_000, step: 1_000 },
                business: SteppedAmount { start: 50_000, end: 200_000, step: 5_000 },
                other: SteppedAmount { start: 5_000, end: 100_000, step: 1_000 },
            },
        }
    }
}

// ── Underwriting policy ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnderwritingPolicy {
    pub credit_score_floor: i32,
    /// Outstanding debt / income at or above this rejects.
    pub dti_ceiling: f64,
    /// Income share available for total debt service in the capacity
    /// estimate.
    pub capacity_dti_ceiling: f64,
    /// Income share reserved for the candidate loan's own payment.
    pub loan_payment_share: f64,
    /// Credit-score deduction per missed payment.
    pub missed_payment_penalty: i32,
}

impl Default for UnderwritingPolicy {
    fn default() -> Self {
        Self {
            credit_score_floor: 670,
            dti_ceiling: 0.4,
            capacity_dti_ceiling: 0.6,
            loan_payment_share: 0.3,
            missed_payment_penalty: 10,
        }
    }
}

// ── Calendar cycle ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    pub lookback_years: u32,
    pub salary_day: u32,
    pub expense_day: u32,
    pub repayment_day: u32,
    pub savings_day: u32,
    pub investment_day: u32,
    pub savings_growth_day: u32,
    pub investment_drift_day: u32,
    pub owner_expense_share: SteppedRange,
    pub renter_expense_share: SteppedRange,
    /// Expenses never fall below this, whatever the balance.
    pub expense_floor: f64,
    pub savings_contribution: IntRange,
    pub investment_contribution: IntRange,
    pub savings_growth_rate: f64,
    /// Investment return is uniform in ±this band.
    pub investment_drift_band: f64,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            lookback_years: 2,
            salary_day: 1,
            expense_day: 10,
            repayment_day: 15,
            savings_day: 17,
            investment_day: 19,
            savings_growth_day: 25,
            investment_drift_day: 30,
            owner_expense_share: SteppedRange { start: 0.30, end: 0.50, step: 0.05 },
            renter_expense_share: SteppedRange { start: 0.40, end: 0.65, step: 0.05 },
            expense_floor: 6_000.0,
            savings_contribution: IntRange { min: 500, max: 2_000 },
            investment_contribution: IntRange { min: 500, max: 4_000 },
            savings_growth_rate: 0.01,
            investment_drift_band: 0.10,
        }
    }
}

// ── Top level ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub population: PopulationConfig,
    pub loans: LoanConfig,
    pub policy: UnderwritingPolicy,
    pub calendar: CalendarConfig,
}

impl SimConfig {
    /// Load an override file and validate it.
    pub fn load(path: &Path) -> SimResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: SimConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject malformed tables before any simulation starts.
    pub fn validate(&self) -> SimResult<()> {
        let p = &self.population;
        weights_sum_to_one("population.gender_weights", &p.gender_weights, 2)?;
        weights_sum_to_one("population.marital_weights", &p.marital_weights, 4)?;
        weights_sum_to_one("population.employment_weights", &p.employment_weights, 3)?;
        weights_sum_to_one("population.branch_call_weights", &p.branch_call_weights, 3)?;
        probability("population.citizenship_probability", p.citizenship_probability)?;
        probability("population.parental_probability", p.parental_probability)?;
        probability("population.owner_probability", p.owner_probability)?;
        probability("population.branch_visit_probability", p.branch_visit_probability)?;
        probability("population.support_call_probability", p.support_call_probability)?;
        probability("population.ads_probability", p.ads_probability)?;
        p.age_range.validate("population.age_range")?;
        p.credit_score.validate("population.credit_score")?;
        p.month_income.validate("population.month_income")?;
        p.opening_balance.validate("population.opening_balance")?;
        p.savings_seed.validate("population.savings_seed")?;
        p.investment_seed.validate("population.investment_seed")?;
        p.atm_amount.validate("population.atm_amount")?;
        p.digital_session_minutes.validate("population.digital_session_minutes")?;
        if p.mobile_entrances_max == 0 || p.online_entrances_max == 0 {
            return Err(SimError::Config(
                "population: entrance bounds are exclusive and must be >= 1".into(),
            ));
        }

        let l = &self.loans;
        l.loans_per_customer.validate("loans.loans_per_customer")?;
        l.lead_days.validate("loans.lead_days")?;
        l.span_days.validate("loans.span_days")?;
        if l.annual_rate < 0.0 {
            return Err(SimError::Config("loans.annual_rate: negative rate".into()));
        }
        if l.default_term_years == 0 || l.car_term_years == 0 || l.short_term_years == 0 {
            return Err(SimError::Config("loans: terms must be at least one year".into()));
        }
        l.sizes.car.validate("loans.sizes.car")?;
        l.sizes.education.validate("loans.sizes.education")?;
        l.sizes.vacation.validate("loans.sizes.vacation")?;
        l.sizes.business.validate("loans.sizes.business")?;
        l.sizes.other.validate("loans.sizes.other")?;

        let u = &self.policy;
        probability("policy.dti_ceiling", u.dti_ceiling)?;
        probability("policy.capacity_dti_ceiling", u.capacity_dti_ceiling)?;
        probability("policy.loan_payment_share", u.loan_payment_share)?;

        let c = &self.calendar;
        for (field, day) in [
            ("calendar.salary_day", c.salary_day),
            ("calendar.expense_day", c.expense_day),
            ("calendar.repayment_day", c.repayment_day),
            ("calendar.savings_day", c.savings_day),
            ("calendar.investment_day", c.investment_day),
            ("calendar.savings_growth_day", c.savings_growth_day),
            ("calendar.investment_drift_day", c.investment_drift_day),
        ] {
            if !(1..=31).contains(&day) {
                return Err(SimError::Config(format!(
                    "{field}: day-of-month {day} outside 1..=31"
                )));
            }
        }
        c.owner_expense_share.validate("calendar.owner_expense_share")?;
        c.renter_expense_share.validate("calendar.renter_expense_share")?;
        c.savings_contribution.validate("calendar.savings_contribution")?;
        c.investment_contribution.validate("calendar.investment_contribution")?;
        if c.lookback_years == 0 {
            return Err(SimError::Config("calendar.lookback_years: must be >= 1".into()));
        }
        if c.investment_drift_band < 0.0 {
            return Err(SimError::Config(
                "calendar.investment_drift_band: negative band".into(),
            ));
        }
        Ok(())
    }
}

fn weights_sum_to_one(field: &str, weights: &[f64], expected_len: usize) -> SimResult<()> {
    if weights.len() != expected_len {
        return Err(SimError::Config(format!(
            "{field}: expected {expected_len} weights, got {}",
            weights.len()
        )));
    }
    if weights.iter().any(|w| *w < 0.0) {
        return Err(SimError::Config(format!("{field}: negative weight")));
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > 1e-9 {
        return Err(SimError::Config(format!(
            "{field}: weights sum to {sum}, must sum to 1"
        )));
    }
    Ok(())
}

fn probability(field: &str, p: f64) -> SimResult<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(SimError::Config(format!("{field}: {p} outside [0, 1]")));
    }
    Ok(())
}
