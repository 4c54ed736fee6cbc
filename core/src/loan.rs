//! Loan terms and the loan factory.
//!
//! Terms are immutable once constructed. The factory pre-samples a
//! customer's loan set with origination dates scattered over a bounded
//! window; whether a loan ever enters the ledger is decided later, by
//! underwriting, on its exact origination day.

use crate::{
    config::LoanConfig,
    rng::StreamRng,
    types::{CustomerId, LoanId, SimDay},
};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MONTHS_IN_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanType {
    Car,
    Education,
    Vacation,
    Business,
    Other,
}

impl LoanType {
    pub const ALL: [LoanType; 5] = [
        LoanType::Car,
        LoanType::Education,
        LoanType::Vacation,
        LoanType::Business,
        LoanType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Education => "education",
            Self::Vacation => "vacation",
            Self::Business => "business",
            Self::Other => "other",
        }
    }
}

/// A fully priced candidate loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    pub loan_id: LoanId,
    pub customer_id: CustomerId,
    pub loan_type: LoanType,
    /// Original principal (whole currency units).
    pub principal: f64,
    pub term_years: u32,
    pub annual_rate: f64,
    /// Simple-interest contracted debt: principal × (1 + rate × term).
    pub total_debt: f64,
    /// total_debt spread evenly over the term's months.
    pub monthly_payment: f64,
    pub origination_date: SimDay,
}

impl LoanTerms {
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / MONTHS_IN_YEAR
    }

    pub fn term_months(&self) -> u32 {
        self.term_years * 12
    }
}

/// Derive the stable loan id from its owning customer and origination
/// date. Same inputs always yield the same id.
pub fn derive_loan_id(customer_id: &str, origination_date: SimDay) -> LoanId {
    let seed = format!("{customer_id}{origination_date}");
    Uuid::new_v5(&Uuid::NAMESPACE_X500, seed.as_bytes()).to_string()
}

pub struct LoanFactory<'a> {
    config: &'a LoanConfig,
}

impl<'a> LoanFactory<'a> {
    pub fn new(config: &'a LoanConfig) -> Self {
        Self { config }
    }

    /// Pre-sample one customer's loan set for the run.
    ///
    /// Loan ids derive from the origination date, so dates within one
    /// customer's set must be distinct; colliding draws are resampled.
    pub fn sample_set(
        &self,
        customer_id: &str,
        window_start: SimDay,
        rng: &mut StreamRng,
    ) -> Vec<LoanTerms> {
        let count = self.config.loans_per_customer.sample(rng) as usize;
        let mut set: Vec<LoanTerms> = Vec::with_capacity(count);
        while set.len() < count {
            let terms = self.sample(customer_id, window_start, rng);
            if set.iter().any(|l| l.origination_date == terms.origination_date) {
                continue;
            }
            set.push(terms);
        }
        set
    }

    /// Sample a single candidate loan.
    pub fn sample(
        &self,
        customer_id: &str,
        window_start: SimDay,
        rng: &mut StreamRng,
    ) -> LoanTerms {
        let origination_date = self.sample_origination_date(window_start, rng);
        let loan_type = *rng.pick(&LoanType::ALL);
        let (principal, term_years) = self.sample_principal_and_term(loan_type, rng);
        let annual_rate = self.config.annual_rate;

        let total_debt = principal + principal * annual_rate * term_years as f64;
        let monthly_payment = total_debt / (term_years as f64 * MONTHS_IN_YEAR);

        LoanTerms {
            loan_id: derive_loan_id(customer_id, origination_date),
            customer_id: customer_id.to_string(),
            loan_type,
            principal,
            term_years,
            annual_rate,
            total_debt,
            monthly_payment,
            origination_date,
        }
    }

    fn sample_principal_and_term(
        &self,
        loan_type: LoanType,
        rng: &mut StreamRng,
    ) -> (f64, u32) {
        let sizes = &self.config.sizes;
        let (table, mut term_years) = match loan_type {
            LoanType::Car => (sizes.car, self.config.car_term_years),
            LoanType::Education => (sizes.education, self.config.default_term_years),
            LoanType::Vacation => (sizes.vacation, self.config.default_term_years),
            LoanType::Business => (sizes.business, self.config.default_term_years),
            LoanType::Other => (sizes.other, self.config.default_term_years),
        };
        let principal = table.sample(rng);
        if principal < self.config.short_term_ceiling {
            term_years = self.config.short_term_years;
        }
        (principal as f64, term_years)
    }

    /// Origination day: window start, pushed out by a lead offset and a
    /// uniform draw inside a per-loan span.
    fn sample_origination_date(&self, window_start: SimDay, rng: &mut StreamRng) -> SimDay {
        let lead = self.config.lead_days.sample(rng);
        let span = self.config.span_days.sample(rng);
        let offset = rng.range_i64(0, span);
        window_start + Duration::days(lead + offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoanConfig;
    use crate::rng::{RngBank, StreamSlot};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rng(seed: u64) -> crate::rng::StreamRng {
        RngBank::new(seed).for_customer(0, StreamSlot::Loans)
    }

    #[test]
    fn simple_interest_amortization_matches_hand_math() {
        // 10 000 over 1 year at 4.99%: (10000 + 10000·0.0499·1) / 12.
        let terms = LoanTerms {
            loan_id: "x".into(),
            customer_id: "c-000000".into(),
            loan_type: LoanType::Vacation,
            principal: 10_000.0,
            term_years: 1,
            annual_rate: 0.0499,
            total_debt: 10_000.0 + 10_000.0 * 0.0499,
            monthly_payment: (10_000.0 + 10_000.0 * 0.0499) / 12.0,
            origination_date: date(2023, 7, 1),
        };
        assert_relative_eq!(terms.total_debt, 10_499.0);
        assert_relative_eq!(terms.monthly_payment, 874.9166666666666, epsilon = 1e-9);
        assert_eq!(terms.term_months(), 12);
    }

    #[test]
    fn sampled_terms_are_priced_consistently() {
        let config = LoanConfig::default();
        let factory = LoanFactory::new(&config);
        let mut rng = rng(42);
        for _ in 0..200 {
            let terms = factory.sample("c-000007", date(2023, 6, 15), &mut rng);
            assert_relative_eq!(
                terms.total_debt,
                terms.principal * (1.0 + terms.annual_rate * terms.term_years as f64),
                epsilon = 1e-9
            );
            assert_relative_eq!(
                terms.monthly_payment,
                terms.total_debt / (terms.term_years as f64 * 12.0),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn term_rules_follow_type_and_size() {
        let config = LoanConfig::default();
        let factory = LoanFactory::new(&config);
        let mut rng = rng(7);
        for _ in 0..500 {
            let terms = factory.sample("c-000001", date(2023, 6, 15), &mut rng);
            match terms.loan_type {
                LoanType::Car => assert_eq!(terms.term_years, 5),
                _ if terms.principal < 10_000.0 => assert_eq!(terms.term_years, 1),
                _ => assert_eq!(terms.term_years, 3),
            }
        }
    }

    #[test]
    fn origination_dates_stay_inside_the_widest_window() {
        let config = LoanConfig::default();
        let factory = LoanFactory::new(&config);
        let start = date(2023, 6, 15);
        let mut rng = rng(99);
        for _ in 0..500 {
            let terms = factory.sample("c-000002", start, &mut rng);
            let offset = (terms.origination_date - start).num_days();
            assert!((0..=90 + 640).contains(&offset), "offset {offset}");
        }
    }

    #[test]
    fn loan_ids_derive_from_customer_and_date() {
        let a = derive_loan_id("c-000001", date(2023, 7, 1));
        let b = derive_loan_id("c-000001", date(2023, 7, 1));
        let c = derive_loan_id("c-000001", date(2023, 7, 2));
        let d = derive_loan_id("c-000002", date(2023, 7, 1));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn loan_sets_hold_three_to_six_loans_with_distinct_dates() {
        let config = LoanConfig::default();
        let factory = LoanFactory::new(&config);
        let mut rng = rng(21);
        for _ in 0..100 {
            let set = factory.sample_set("c-000003", date(2023, 6, 15), &mut rng);
            assert!((3..=6).contains(&set.len()), "set of {}", set.len());
            let mut dates: Vec<_> = set.iter().map(|l| l.origination_date).collect();
            dates.sort();
            dates.dedup();
            assert_eq!(dates.len(), set.len(), "duplicate origination dates");
        }
    }
}
