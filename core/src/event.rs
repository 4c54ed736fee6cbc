//! Events emitted by the daily engine, one stream per customer run.
//!
//! Events feed tests and the end-of-run summary; they are not one of
//! the two output tables. Variants are append-only — never removed or
//! reordered.

use crate::{
    loan::LoanType,
    types::{CustomerId, LoanId, SimDay},
    underwriting::UnderwritingDecision,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    /// Underwriting passed on the loan's origination day; the loan
    /// entered the ledger.
    LoanAccepted {
        date: SimDay,
        customer_id: CustomerId,
        loan_id: LoanId,
        loan_type: LoanType,
        principal: f64,
    },
    LoanRejected {
        date: SimDay,
        customer_id: CustomerId,
        loan_id: LoanId,
        reason: UnderwritingDecision,
    },
    PaymentMade {
        date: SimDay,
        customer_id: CustomerId,
        loan_id: LoanId,
        amount: f64,
    },
    /// Balance could not cover the fixed payment: miss counted, credit
    /// score penalized, debt unchanged.
    PaymentMissed {
        date: SimDay,
        customer_id: CustomerId,
        loan_id: LoanId,
        credit_score_after: i32,
    },
    /// Remaining debt rounded to zero; position removed from the
    /// ledger.
    LoanRetired {
        date: SimDay,
        customer_id: CustomerId,
        loan_id: LoanId,
    },
}
