//! The daily simulation engine — the heart of the generator.
//!
//! EXECUTION ORDER per simulated day (fixed, never reordered):
//!   1. Loan origination pass (capacity estimate, then underwriting)
//!   2. Day-of-month event — salary, expenses, repayment, savings,
//!      investment, savings growth, investment drift; any other day
//!      resets the repayment accumulator and expense fraction.
//!   3. Snapshot emission, tagged with the current clock day
//!   4. Clock advance by exactly one day
//!
//! RULES:
//!   - The engine owns each customer's mutable state for the run.
//!   - Age is derived from date of birth at emission, never stored.
//!   - All randomness flows through the customer's Engine stream.
//!   - Customer runs are fully independent and may execute on worker
//!     threads in any order; rows within one customer's run stay
//!     strictly chronological.

use crate::{
    clock::SimWindow,
    config::{IntRange, SimConfig},
    customer::{Customer, FinancialState},
    error::SimResult,
    event::SimEvent,
    ledger::LoanPosition,
    loan::{LoanFactory, LoanTerms},
    profile::{ProfileSampler, ResidentialStatus},
    rng::{RngBank, StreamRng, StreamSlot},
    snapshot::{LoanOriginationRow, SnapshotRow},
    underwriting,
};
use chrono::{Datelike, Duration};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

const PROGRESS_EVERY: usize = 250;

/// Output of one customer's full run.
#[derive(Debug, Clone, Default)]
pub struct CustomerRun {
    pub snapshots: Vec<SnapshotRow>,
    pub originations: Vec<LoanOriginationRow>,
    pub events: Vec<SimEvent>,
}

/// End-of-run counters, aggregated from every customer's events.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub customers: usize,
    pub snapshot_rows: usize,
    pub loans_accepted: usize,
    pub loans_rejected: usize,
    pub payments_made: usize,
    pub payments_missed: usize,
    pub loans_retired: usize,
}

/// The two output tables plus the run summary.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub snapshots: Vec<SnapshotRow>,
    pub originations: Vec<LoanOriginationRow>,
    pub summary: RunSummary,
}

#[derive(Debug)]
pub struct DailyEngine {
    config: SimConfig,
}

impl DailyEngine {
    /// Build an engine. A malformed configuration is fatal here,
    /// before any simulation starts.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Simulate an entire population. Each customer runs on a rayon
    /// worker with RNG streams keyed by customer index, so scheduling
    /// never affects the output.
    pub fn simulate_population(
        &self,
        count: usize,
        window: &SimWindow,
        bank: &RngBank,
    ) -> Dataset {
        log::info!(
            "simulating {count} customers over {} days ({} → {})",
            window.num_days(),
            window.start,
            window.end
        );
        let completed = AtomicUsize::new(0);
        let runs: Vec<CustomerRun> = (0..count)
            .into_par_iter()
            .map(|index| {
                let run = self.run_one(index as u64, window, bank);
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if done % PROGRESS_EVERY == 0 {
                    log::info!("progress: {done}/{count} customers simulated");
                }
                run
            })
            .collect();

        let mut dataset = Dataset::default();
        dataset.summary.customers = count;
        for run in runs {
            for event in &run.events {
                match event {
                    SimEvent::LoanAccepted { .. } => dataset.summary.loans_accepted += 1,
                    SimEvent::LoanRejected { .. } => dataset.summary.loans_rejected += 1,
                    SimEvent::PaymentMade { .. } => dataset.summary.payments_made += 1,
                    SimEvent::PaymentMissed { .. } => dataset.summary.payments_missed += 1,
                    SimEvent::LoanRetired { .. } => dataset.summary.loans_retired += 1,
                }
            }
            dataset.summary.snapshot_rows += run.snapshots.len();
            dataset.snapshots.extend(run.snapshots);
            dataset.originations.extend(run.originations);
        }
        dataset
    }

    /// Sample and run one customer end to end.
    fn run_one(&self, index: u64, window: &SimWindow, bank: &RngBank) -> CustomerRun {
        let mut profile_rng = bank.for_customer(index, StreamSlot::Profile);
        let sampler = ProfileSampler::new(&self.config.population);
        let (profile, finances) = sampler.sample(index, window.start, &mut profile_rng);

        let mut loans_rng = bank.for_customer(index, StreamSlot::Loans);
        let factory = LoanFactory::new(&self.config.loans);
        let pending = factory.sample_set(&profile.customer_id, window.start, &mut loans_rng);

        let mut customer = Customer::new(profile, window.start, finances);
        let mut engine_rng = bank.for_customer(index, StreamSlot::Engine);
        self.run_customer(&mut customer, &pending, window, &mut engine_rng)
    }

    /// Advance one customer from its start timestamp through every day
    /// of the window. The customer must start at the window start.
    pub fn run_customer(
        &self,
        customer: &mut Customer,
        pending: &[LoanTerms],
        window: &SimWindow,
        rng: &mut StreamRng,
    ) -> CustomerRun {
        debug_assert_eq!(customer.timestamp, window.start, "customer clock not at window start");
        let mut run = CustomerRun::default();
        while customer.timestamp < window.end {
            self.step_day(customer, pending, rng, &mut run);
        }
        run
    }

    fn step_day(
        &self,
        customer: &mut Customer,
        pending: &[LoanTerms],
        rng: &mut StreamRng,
        run: &mut CustomerRun,
    ) {
        let today = customer.timestamp;

        self.origination_pass(customer, pending, run);
        self.apply_day_of_month(customer, rng, run);

        run.snapshots.push(SnapshotRow::project(customer));
        customer.timestamp = today + Duration::days(1);
    }

    /// Evaluate every pre-sampled loan due today: estimate capacity
    /// (stored on the customer, overwriting the previous estimate),
    /// then underwrite against the fresh ceiling.
    fn origination_pass(
        &self,
        customer: &mut Customer,
        pending: &[LoanTerms],
        run: &mut CustomerRun,
    ) {
        let today = customer.timestamp;
        for terms in pending.iter().filter(|t| t.origination_date == today) {
            let outstanding = customer.finances.ledger.total_debt();
            let capacity = underwriting::borrowing_capacity(
                customer.finances.month_income,
                outstanding,
                terms.monthly_rate(),
                terms.term_months(),
                &self.config.policy,
            );
            customer.finances.borrowing_capacity = capacity;

            let decision = underwriting::underwrite(
                customer.finances.credit_score,
                outstanding,
                customer.finances.month_income,
                terms.total_debt,
                capacity,
                &self.config.policy,
            );

            if decision.is_approved() {
                customer.finances.ledger.open(LoanPosition {
                    loan_id: terms.loan_id.clone(),
                    remaining_debt: terms.total_debt,
                    principal: terms.principal,
                    monthly_payment: terms.monthly_payment,
                });
                customer.finances.loans_repayment = 0.0;
                run.originations.push(LoanOriginationRow::project(terms));
                run.events.push(SimEvent::LoanAccepted {
                    date: today,
                    customer_id: customer.profile.customer_id.clone(),
                    loan_id: terms.loan_id.clone(),
                    loan_type: terms.loan_type,
                    principal: terms.principal,
                });
            } else {
                run.events.push(SimEvent::LoanRejected {
                    date: today,
                    customer_id: customer.profile.customer_id.clone(),
                    loan_id: terms.loan_id.clone(),
                    reason: decision,
                });
            }
        }
    }

    /// Mutually exclusive day-of-month branches; the default branch
    /// resets the repayment accumulator and expense fraction.
    fn apply_day_of_month(
        &self,
        customer: &mut Customer,
        rng: &mut StreamRng,
        run: &mut CustomerRun,
    ) {
        let cal = &self.config.calendar;
        let day = customer.timestamp.day();

        if day == cal.salary_day {
            customer.finances.current_balance += customer.finances.month_income;
        } else if day == cal.expense_day {
            self.charge_expenses(customer, rng);
        } else if day == cal.repayment_day {
            self.repayment_pass(customer, run);
        } else if day == cal.savings_day {
            self.contribute(rng, cal.savings_contribution, &mut customer.finances, Target::Savings);
        } else if day == cal.investment_day {
            self.contribute(rng, cal.investment_contribution, &mut customer.finances, Target::Investment);
        } else if day == cal.savings_growth_day {
            customer.finances.savings *= 1.0 + cal.savings_growth_rate;
        } else if day == cal.investment_drift_day {
            let drift = rng.range_f64(-cal.investment_drift_band, cal.investment_drift_band);
            customer.finances.investment += drift * customer.finances.investment;
        } else {
            customer.finances.loans_repayment = 0.0;
            customer.finances.monthly_expenses = 0.0;
        }
    }

    /// Expense fraction depends on residential status; the charge
    /// never falls below the configured floor, so the balance may go
    /// negative.
    fn charge_expenses(&self, customer: &mut Customer, rng: &mut StreamRng) {
        let cal = &self.config.calendar;
        let share = match customer.profile.residential_status {
            ResidentialStatus::Owns => cal.owner_expense_share.sample(rng),
            ResidentialStatus::Rent => cal.renter_expense_share.sample(rng),
        };
        let finances = &mut customer.finances;
        finances.monthly_expenses = share;
        let expenses = (share * finances.current_balance).max(cal.expense_floor);
        finances.current_balance -= expenses;
    }

    /// Day-15 pass: retire positions that rounded to zero on a prior
    /// pass, then pay or miss each remaining position.
    fn repayment_pass(&self, customer: &mut Customer, run: &mut CustomerRun) {
        let today = customer.timestamp;
        let customer_id = customer.profile.customer_id.clone();
        let penalty = self.config.policy.missed_payment_penalty;

        for retired in customer.finances.ledger.retire_paid_off() {
            run.events.push(SimEvent::LoanRetired {
                date: today,
                customer_id: customer_id.clone(),
                loan_id: retired.loan_id,
            });
        }

        let FinancialState {
            ledger,
            current_balance,
            loans_repayment,
            payment_history,
            credit_score,
            ..
        } = &mut customer.finances;

        for position in ledger.positions_mut() {
            if *current_balance - position.monthly_payment > 0.0 {
                *loans_repayment += position.monthly_payment;
                position.remaining_debt -= position.monthly_payment;
                *current_balance -= position.monthly_payment;
                run.events.push(SimEvent::PaymentMade {
                    date: today,
                    customer_id: customer_id.clone(),
                    loan_id: position.loan_id.clone(),
                    amount: position.monthly_payment,
                });
            } else {
                *payment_history += 1;
                *credit_score -= penalty;
                run.events.push(SimEvent::PaymentMissed {
                    date: today,
                    customer_id: customer_id.clone(),
                    loan_id: position.loan_id.clone(),
                    credit_score_after: *credit_score,
                });
            }
        }
    }

    /// Savings and investment contributions share a shape: only while
    /// the target already holds funds, and only if the balance stays
    /// positive after the transfer.
    fn contribute(
        &self,
        rng: &mut StreamRng,
        range: IntRange,
        finances: &mut FinancialState,
        target: Target,
    ) {
        let held = match target {
            Target::Savings => finances.savings,
            Target::Investment => finances.investment,
        };
        if held <= 0.0 {
            return;
        }
        let amount = range.sample(rng) as f64;
        if finances.current_balance > amount {
            finances.current_balance -= amount;
            match target {
                Target::Savings => finances.savings += amount,
                Target::Investment => finances.investment += amount,
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Target {
    Savings,
    Investment,
}
