//! Borrowing-capacity estimation and the underwriting decision.
//!
//! Both are pure functions of the inputs they are handed. The engine
//! estimates capacity immediately before each underwriting call so the
//! check always sees a fresh ceiling.

use crate::config::UnderwritingPolicy;
use serde::{Deserialize, Serialize};

/// Present-value ceiling on new debt the customer could service.
///
/// Maximum monthly debt service is capped at `income ×
/// capacity_dti_ceiling`; the candidate loan's own payment is reserved
/// at `income × loan_payment_share`; what remains after existing
/// obligations is discounted to a principal ceiling with the standard
/// annuity formula. May be negative.
pub fn borrowing_capacity(
    month_income: f64,
    outstanding_debt: f64,
    monthly_rate: f64,
    term_months: u32,
    policy: &UnderwritingPolicy,
) -> f64 {
    let max_debt_service = month_income * policy.capacity_dti_ceiling;
    let max_loan_payment = month_income * policy.loan_payment_share;
    let net_capacity = max_debt_service - outstanding_debt - max_loan_payment;

    if monthly_rate == 0.0 {
        // Zero-rate degenerate case: no discounting, linear in term.
        return net_capacity * term_months as f64;
    }
    net_capacity * (1.0 - (1.0 + monthly_rate).powi(-(term_months as i32))) / monthly_rate
}

/// Outcome of an underwriting check. The first failing condition wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnderwritingDecision {
    Approved,
    CreditScoreBelowFloor,
    DebtToIncomeTooHigh,
    ExceedsBorrowingCapacity,
}

impl UnderwritingDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

/// Decide loan eligibility. Checks run in order: credit-score floor,
/// then debt-to-income ceiling, then the candidate's total contracted
/// debt against the most recent borrowing-capacity estimate. Pure
/// predicate — no customer state is touched.
pub fn underwrite(
    credit_score: i32,
    outstanding_debt: f64,
    month_income: f64,
    candidate_total_debt: f64,
    borrowing_capacity: f64,
    policy: &UnderwritingPolicy,
) -> UnderwritingDecision {
    if credit_score < policy.credit_score_floor {
        return UnderwritingDecision::CreditScoreBelowFloor;
    }

    let debt_ratio = outstanding_debt / month_income;
    if debt_ratio >= policy.dti_ceiling {
        return UnderwritingDecision::DebtToIncomeTooHigh;
    }

    if candidate_total_debt > borrowing_capacity {
        return UnderwritingDecision::ExceedsBorrowingCapacity;
    }

    UnderwritingDecision::Approved
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn policy() -> UnderwritingPolicy {
        UnderwritingPolicy::default()
    }

    #[test]
    fn zero_rate_capacity_is_exactly_linear() {
        // income 10 000, no outstanding debt: net = 6000 − 3000 = 3000.
        let capacity = borrowing_capacity(10_000.0, 0.0, 0.0, 12, &policy());
        assert_eq!(capacity, 3_000.0 * 12.0);
    }

    #[test]
    fn positive_rate_discounts_below_the_linear_ceiling() {
        let monthly_rate = 0.0499 / 12.0;
        let capacity = borrowing_capacity(10_000.0, 0.0, monthly_rate, 36, &policy());
        let linear = 3_000.0 * 36.0;
        assert!(capacity < linear, "{capacity} not discounted below {linear}");

        let annuity = 3_000.0 * (1.0 - (1.0 + monthly_rate).powi(-36)) / monthly_rate;
        assert_relative_eq!(capacity, annuity, epsilon = 1e-9);
    }

    #[test]
    fn existing_debt_pushes_capacity_negative() {
        let capacity = borrowing_capacity(10_000.0, 50_000.0, 0.0499 / 12.0, 36, &policy());
        assert!(capacity < 0.0);
    }

    #[test]
    fn credit_floor_rejects_first_regardless_of_other_inputs() {
        // DTI is also hopeless here; the credit check still answers.
        let decision = underwrite(669, 1_000_000.0, 10_000.0, 1.0, f64::MAX, &policy());
        assert_eq!(decision, UnderwritingDecision::CreditScoreBelowFloor);
    }

    #[test]
    fn lowering_credit_score_flips_acceptance_monotonically() {
        let mut last_approved = true;
        for score in (600..=750).rev() {
            let decision = underwrite(score, 0.0, 10_000.0, 10_000.0, 100_000.0, &policy());
            let approved = decision.is_approved();
            // Once rejection starts it never flips back as score drops.
            assert!(approved || !last_approved || score < 670);
            if score >= 670 {
                assert!(approved, "score {score} should pass the floor");
            } else {
                assert!(!approved, "score {score} should fail the floor");
            }
            last_approved = approved;
        }
    }

    #[test]
    fn dti_at_the_ceiling_rejects() {
        // 4000 / 10000 = 0.4 — the ceiling itself is rejected.
        let decision = underwrite(700, 4_000.0, 10_000.0, 1.0, f64::MAX, &policy());
        assert_eq!(decision, UnderwritingDecision::DebtToIncomeTooHigh);

        let decision = underwrite(700, 3_999.0, 10_000.0, 1.0, f64::MAX, &policy());
        assert!(decision.is_approved());
    }

    #[test]
    fn candidate_debt_above_capacity_rejects() {
        let capacity = borrowing_capacity(10_000.0, 0.0, 0.0499 / 12.0, 12, &policy());
        let decision = underwrite(700, 0.0, 10_000.0, capacity + 1.0, capacity, &policy());
        assert_eq!(decision, UnderwritingDecision::ExceedsBorrowingCapacity);

        let decision = underwrite(700, 0.0, 10_000.0, capacity - 1.0, capacity, &policy());
        assert!(decision.is_approved());
    }
}
