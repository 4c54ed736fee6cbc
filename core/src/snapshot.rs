//! Dataset row projections.
//!
//! Pure functions from simulation state to flat output rows. Monetary
//! values are rounded to two decimals here and nowhere else; struct
//! field order is the tables' column order.

use crate::{
    customer::Customer,
    loan::{LoanTerms, LoanType},
    profile::{EducationLevel, EmploymentStatus, Gender, MaritalStatus, ResidentialStatus},
    types::{round2, CustomerId, LoanId, SimDay},
};
use serde::{Deserialize, Serialize};

/// One per-customer-per-day snapshot row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub timestamp: SimDay,
    pub customer_id: CustomerId,
    pub age: i32,
    pub gender: Gender,
    pub geography: String,
    pub marital_status: MaritalStatus,
    pub education_level: EducationLevel,
    pub employment_status: EmploymentStatus,
    pub occupation: String,
    pub citizenship: bool,
    pub residential_status: ResidentialStatus,
    pub parental_status: bool,
    pub current_balance: f64,
    pub total_current_debt: f64,
    pub credit_score: i32,
    pub total_loans_amount: f64,
    pub loans_repayment: f64,
    pub savings: f64,
    pub investment: f64,
    pub month_income: f64,
    pub monthly_expenses: f64,
    pub payment_history: u32,
    pub calls_to_branch: u32,
    pub visits_to_branch: u32,
    pub mobile_entrances: u32,
    pub online_entrances: u32,
    pub atm_withdrawals: i64,
    pub atm_deposits: i64,
    pub calls_to_support: u32,
    pub adds_use: u32,
    pub time_spent: Option<u32>,
    pub customer_feedback: u32,
}

impl SnapshotRow {
    /// Project the customer's full current state, tagged with the
    /// current clock day.
    pub fn project(customer: &Customer) -> Self {
        let profile = &customer.profile;
        let channels = &profile.channels;
        let finances = &customer.finances;
        Self {
            timestamp: customer.timestamp,
            customer_id: profile.customer_id.clone(),
            age: customer.age(),
            gender: profile.gender,
            geography: profile.geography.clone(),
            marital_status: profile.marital_status,
            education_level: profile.education_level,
            employment_status: profile.employment_status,
            occupation: profile.occupation.clone(),
            citizenship: profile.citizenship,
            residential_status: profile.residential_status,
            parental_status: profile.parental_status,
            current_balance: round2(finances.current_balance),
            total_current_debt: round2(finances.ledger.total_debt()),
            credit_score: finances.credit_score,
            total_loans_amount: round2(finances.ledger.total_principal()),
            loans_repayment: round2(finances.loans_repayment),
            savings: round2(finances.savings),
            investment: round2(finances.investment),
            month_income: round2(finances.month_income),
            monthly_expenses: round2(finances.monthly_expenses * finances.month_income),
            payment_history: finances.payment_history,
            calls_to_branch: channels.calls_to_branch,
            visits_to_branch: channels.visits_to_branch,
            mobile_entrances: channels.mobile_entrances,
            online_entrances: channels.online_entrances,
            atm_withdrawals: channels.atm_withdrawals,
            atm_deposits: channels.atm_deposits,
            calls_to_support: channels.calls_to_support,
            adds_use: channels.adds_use,
            time_spent: channels.time_spent,
            customer_feedback: channels.customer_feedback,
        }
    }
}

/// One loan-origination row, emitted at acceptance time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanOriginationRow {
    pub loan_id: LoanId,
    pub customer_id: CustomerId,
    pub date: SimDay,
    pub loan_size: i64,
    pub loan_type: LoanType,
}

impl LoanOriginationRow {
    pub fn project(terms: &LoanTerms) -> Self {
        Self {
            loan_id: terms.loan_id.clone(),
            customer_id: terms.customer_id.clone(),
            date: terms.origination_date,
            loan_size: terms.principal as i64,
            loan_type: terms.loan_type,
        }
    }
}
