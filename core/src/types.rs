//! Shared primitive types used across the entire simulation.

/// One simulated calendar day. The engine clock advances by exactly
/// one day per step.
pub type SimDay = chrono::NaiveDate;

/// A stable, unique identifier for a customer.
pub type CustomerId = String;

/// A stable, unique identifier for a loan.
pub type LoanId = String;

/// Round a monetary amount to two decimal places.
///
/// Applied at emission points only — internal accumulation stays
/// unrounded.
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
