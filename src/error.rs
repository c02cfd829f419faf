use crate::domain::money::Money;
use thiserror::Error;

/// Reasons a ledger refuses a payment. The loan is left untouched whenever one
/// of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaymentError {
    #[error("amount cannot be negative: {amount}")]
    NegativeAmount { amount: Money },
    #[error("invalid payment amount {actual}: must match the weekly payment of {expected}")]
    InvalidPaymentAmount { expected: Money, actual: Money },
    #[error("loan is already fully paid")]
    LoanFullyPaid,
    #[error("invalid week number {week}: must be between 1 and {term_weeks}")]
    InvalidWeekNumber { week: u32, term_weeks: u32 },
    #[error("week {week} has already been paid")]
    WeekAlreadyPaid { week: u32 },
    #[error("payments must be made in sequence: week {expected} is due, got week {week}")]
    PaymentOutOfSequence { week: u32, expected: u32 },
}

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("loan with ID {0} not found")]
    LoanNotFound(String),
    #[error("loan with ID {0} already exists")]
    DuplicateLoan(String),
    #[error("principal {principal} cannot be spread over {term_weeks} weeks")]
    LoanTermsOutOfRange { principal: Money, term_weeks: u32 },
    #[error(transparent)]
    Payment(#[from] PaymentError),
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BillingError>;
