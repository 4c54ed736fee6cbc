//! Mutable customer state, owned exclusively by the daily engine for
//! the duration of a run.

use crate::{ledger::Ledger, profile::CustomerProfile, types::SimDay};
use serde::{Deserialize, Serialize};

/// One simulated customer: static profile, per-customer clock, and the
/// financial state the engine mutates day by day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub profile: CustomerProfile,
    /// The customer's simulation clock, advanced one day per step.
    pub timestamp: SimDay,
    pub finances: FinancialState,
}

impl Customer {
    pub fn new(profile: CustomerProfile, start: SimDay, finances: FinancialState) -> Self {
        Self { profile, timestamp: start, finances }
    }

    /// Age on the current clock day. Derived from date of birth, never
    /// stored.
    pub fn age(&self) -> i32 {
        self.profile.age_on(self.timestamp)
    }
}

/// Financial state. Balance may go negative; the credit score is not
/// clamped to its nominal range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialState {
    pub current_balance: f64,
    pub credit_score: i32,
    /// Fixed for the customer's lifetime.
    pub month_income: f64,
    pub savings: f64,
    pub investment: f64,
    /// Expense fraction of balance, recomputed monthly; zero outside
    /// the expense period.
    pub monthly_expenses: f64,
    /// This-period repayment accumulator.
    pub loans_repayment: f64,
    /// Cumulative missed-payment count.
    pub payment_history: u32,
    /// Most recent borrowing-capacity estimate; overwritten on every
    /// origination attempt.
    pub borrowing_capacity: f64,
    pub ledger: Ledger,
}
