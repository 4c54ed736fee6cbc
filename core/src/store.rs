//! Dataset persistence — the two output tables as delimited files.
//!
//! RULE: Only store.rs touches the output files. Everything else hands
//! finished rows to the writer and never sees a path.
//!
//! Column order is pinned here, written explicitly, and present even
//! when a table ends up empty.

use crate::{engine::Dataset, error::SimResult};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const SNAPSHOT_FILE: &str = "per_client_per_day.csv";
pub const LOANS_FILE: &str = "loans_table.csv";

pub const SNAPSHOT_COLUMNS: [&str; 32] = [
    "timestamp",
    "customer_id",
    "age",
    "gender",
    "geography",
    "marital_status",
    "education_level",
    "employment_status",
    "occupation",
    "citizenship",
    "residential_status",
    "parental_status",
    "current_balance",
    "total_current_debt",
    "credit_score",
    "total_loans_amount",
    "loans_repayment",
    "savings",
    "investment",
    "month_income",
    "monthly_expenses",
    "payment_history",
    "calls_to_branch",
    "visits_to_branch",
    "mobile_entrances",
    "online_entrances",
    "atm_withdrawals",
    "atm_deposits",
    "calls_to_support",
    "adds_use",
    "time_spent",
    "customer_feedback",
];

pub const LOAN_COLUMNS: [&str; 5] = ["loan_id", "customer_id", "date", "loan_size", "loan_type"];

/// Where the two tables landed.
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub snapshots: PathBuf,
    pub loans: PathBuf,
}

pub struct DatasetWriter {
    out_dir: PathBuf,
}

impl DatasetWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self { out_dir: out_dir.into() }
    }

    /// Write both tables, creating the output directory when missing.
    pub fn write(&self, dataset: &Dataset) -> SimResult<DatasetPaths> {
        std::fs::create_dir_all(&self.out_dir)?;
        let paths = DatasetPaths {
            snapshots: self.out_dir.join(SNAPSHOT_FILE),
            loans: self.out_dir.join(LOANS_FILE),
        };
        write_table(&paths.snapshots, &SNAPSHOT_COLUMNS, &dataset.snapshots)?;
        write_table(&paths.loans, &LOAN_COLUMNS, &dataset.originations)?;
        log::info!(
            "wrote {} snapshot rows to {}",
            dataset.snapshots.len(),
            paths.snapshots.display()
        );
        log::info!(
            "wrote {} loan rows to {}",
            dataset.originations.len(),
            paths.loans.display()
        );
        Ok(paths)
    }
}

fn write_table<T: Serialize>(path: &Path, columns: &[&str], rows: &[T]) -> SimResult<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(columns)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
