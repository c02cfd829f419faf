#![allow(dead_code)]

use billing_engine::application::registry::LoanRegistry;
use billing_engine::domain::money::Money;
use std::io::Write;
use tempfile::NamedTempFile;

pub const LOAN_ID: &str = "loan-100";

pub fn weekly() -> Money {
    Money::from_major(110_000)
}

/// A registry holding one 5,000,000 loan, which pays 110,000 a week.
pub fn registry_with_loan() -> LoanRegistry {
    let registry = LoanRegistry::new();
    registry
        .create_loan(LOAN_ID, "borrower-123", Money::from_major(5_000_000))
        .expect("Failed to create loan");
    registry
}

pub fn pay_weeks(registry: &LoanRegistry, weeks: std::ops::RangeInclusive<u32>) {
    for week in weeks {
        registry
            .make_payment(LOAN_ID, weekly(), week)
            .expect("Failed to pay week");
    }
}

/// Writes a command file with the standard header followed by `rows`.
pub fn command_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "type, loan, borrower, amount, week").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file
}
