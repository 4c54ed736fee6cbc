//! The active-loan ledger.
//!
//! One record per active loan: remaining debt, original principal, and
//! the fixed monthly payment always travel together, so the three can
//! never drift out of alignment and the active-loan count is simply
//! the ledger length.

use crate::types::{round2, LoanId};
use serde::{Deserialize, Serialize};

/// State of one active loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanPosition {
    pub loan_id: LoanId,
    /// Remaining principal + interest owed. Non-increasing; the loan
    /// is retired once this rounds to zero or below.
    pub remaining_debt: f64,
    /// Original principal.
    pub principal: f64,
    /// Fixed monthly payment.
    pub monthly_payment: f64,
}

impl LoanPosition {
    /// True once the remaining debt rounds to zero or below.
    pub fn is_paid_off(&self) -> bool {
        round2(self.remaining_debt) <= 0.0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    positions: Vec<LoanPosition>,
}

impl Ledger {
    /// Append a newly originated loan.
    pub fn open(&mut self, position: LoanPosition) {
        self.positions.push(position);
    }

    /// Number of active loans.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[LoanPosition] {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut [LoanPosition] {
        &mut self.positions
    }

    /// Sum of remaining debt across active loans.
    pub fn total_debt(&self) -> f64 {
        self.positions.iter().map(|p| p.remaining_debt).sum()
    }

    /// Sum of original principals across active loans.
    pub fn total_principal(&self) -> f64 {
        self.positions.iter().map(|p| p.principal).sum()
    }

    /// Remove every position whose remaining debt has rounded down to
    /// zero or below, returning the retired positions.
    ///
    /// Runs at the start of each repayment pass, before any payment is
    /// applied: a loan paid to zero is therefore removed on the *next*
    /// evaluation, and no position is ever removed while the pass is
    /// iterating the ledger.
    pub fn retire_paid_off(&mut self) -> Vec<LoanPosition> {
        let mut retired = Vec::new();
        self.positions.retain(|position| {
            if position.is_paid_off() {
                retired.push(position.clone());
                false
            } else {
                true
            }
        });
        retired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(id: &str, remaining: f64) -> LoanPosition {
        LoanPosition {
            loan_id: id.to_string(),
            remaining_debt: remaining,
            principal: 10_000.0,
            monthly_payment: 874.58,
        }
    }

    #[test]
    fn open_grows_the_ledger_atomically() {
        let mut ledger = Ledger::default();
        ledger.open(position("loan-a", 10_499.0));
        ledger.open(position("loan-b", 5_000.0));
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.total_debt(), 15_499.0);
        assert_eq!(ledger.total_principal(), 20_000.0);
    }

    #[test]
    fn retire_removes_only_paid_off_positions() {
        let mut ledger = Ledger::default();
        ledger.open(position("paid", 0.0));
        ledger.open(position("active", 3_000.0));
        ledger.open(position("overpaid", -0.004)); // rounds to -0.00

        let retired = ledger.retire_paid_off();
        let retired_ids: Vec<_> = retired.iter().map(|p| p.loan_id.as_str()).collect();
        assert_eq!(retired_ids, ["paid", "overpaid"]);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.positions()[0].loan_id, "active");
    }

    #[test]
    fn sub_cent_residue_counts_as_paid_off() {
        // 12 × 874.583̅ leaves ~1e-10 of debt; rounding retires it.
        let mut ledger = Ledger::default();
        ledger.open(position("residue", 0.0000000001));
        assert!(ledger.positions()[0].is_paid_off());
        assert_eq!(ledger.retire_paid_off().len(), 1);
        assert!(ledger.is_empty());
    }

    #[test]
    fn one_cent_of_debt_keeps_a_loan_active() {
        let mut ledger = Ledger::default();
        ledger.open(position("penny", 0.01));
        assert!(ledger.retire_paid_off().is_empty());
        assert_eq!(ledger.len(), 1);
    }
}
