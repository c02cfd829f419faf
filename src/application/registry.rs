use crate::domain::loan::{
    ANNUAL_INTEREST_RATE, LOAN_DURATION_WEEKS, Loan, Payment, ScheduleEntry,
};
use crate::domain::money::Money;
use crate::error::{BillingError, PaymentError, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, info};

/// A thread-safe index of loans keyed by loan ID.
///
/// One registry-wide `RwLock` guards the map: queries take it shared, creation
/// and payments take it exclusive. Loans handed back to callers are snapshots,
/// so the registry's own instances can only change through these methods.
/// Share it across threads with `Arc<LoanRegistry>`.
#[derive(Default)]
pub struct LoanRegistry {
    loans: RwLock<HashMap<String, Loan>>,
}

impl LoanRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a 50-week, 10% flat-interest loan.
    ///
    /// Fails with `DuplicateLoan` if `loan_id` is taken; the existing loan is
    /// left untouched. A principal too large for the schedule arithmetic fails
    /// with `LoanTermsOutOfRange` and nothing is inserted.
    pub fn create_loan(
        &self,
        loan_id: impl Into<String>,
        borrower_id: impl Into<String>,
        principal: Money,
    ) -> Result<Loan> {
        let loan_id = loan_id.into();
        let mut loans = self.loans.write();

        if loans.contains_key(&loan_id) {
            return Err(BillingError::DuplicateLoan(loan_id));
        }

        let loan = Loan::try_new(
            loan_id.clone(),
            borrower_id,
            principal,
            ANNUAL_INTEREST_RATE,
            LOAN_DURATION_WEEKS,
        )?;
        info!(
            loan_id = %loan.id(),
            borrower_id = %loan.borrower_id(),
            principal = %loan.principal(),
            weekly_payment = %loan.weekly_payment(),
            "loan created"
        );
        loans.insert(loan_id, loan.clone());

        Ok(loan)
    }

    /// Snapshot of the loan. Changing the copy does not affect the registry.
    pub fn get_loan(&self, loan_id: &str) -> Result<Loan> {
        self.read(loan_id, Loan::clone)
    }

    /// Amount still owed on the loan.
    pub fn get_outstanding(&self, loan_id: &str) -> Result<Money> {
        self.read(loan_id, Loan::outstanding)
    }

    /// Whether the borrower is two or more weeks behind the loan's current week.
    pub fn is_delinquent(&self, loan_id: &str) -> Result<bool> {
        self.read(loan_id, Loan::is_delinquent)
    }

    /// Whether every installment has been paid.
    pub fn is_closed(&self, loan_id: &str) -> Result<bool> {
        self.read(loan_id, Loan::is_closed)
    }

    /// Lowest unpaid week, `0` once the loan is closed.
    pub fn next_due_week(&self, loan_id: &str) -> Result<u32> {
        self.read(loan_id, Loan::next_due_week)
    }

    /// Copy of the installment schedule, week 1 first.
    pub fn get_schedule(&self, loan_id: &str) -> Result<Vec<ScheduleEntry>> {
        self.read(loan_id, Loan::schedule)
    }

    /// Copy of the accepted payments, oldest first.
    pub fn get_payment_history(&self, loan_id: &str) -> Result<Vec<Payment>> {
        self.read(loan_id, Loan::payment_history)
    }

    /// Pays a specific week. Ledger rejections are returned as-is.
    pub fn make_payment(&self, loan_id: &str, amount: Money, week_number: u32) -> Result<()> {
        self.write(loan_id, |loan| {
            loan.make_payment(amount, week_number)?;
            Ok(week_number)
        })
        .inspect(|week| debug!(loan_id, week, %amount, "payment recorded"))
        .inspect_err(|e| debug!(loan_id, week_number, %amount, error = %e, "payment rejected"))
        .map(|_| ())
    }

    /// Pays whichever week is due next.
    pub fn make_next_payment(&self, loan_id: &str, amount: Money) -> Result<()> {
        self.write(loan_id, |loan| {
            let next_week = loan.next_due_week();
            if next_week == 0 {
                return Err(PaymentError::LoanFullyPaid.into());
            }
            loan.make_payment(amount, next_week)?;
            Ok(next_week)
        })
        .inspect(|week| debug!(loan_id, week, %amount, "payment recorded"))
        .inspect_err(|e| debug!(loan_id, %amount, error = %e, "next payment rejected"))
        .map(|_| ())
    }

    /// Moves the loan's simulated clock. Out-of-range weeks are ignored by the
    /// ledger; only an unknown loan is an error.
    pub fn set_current_week(&self, loan_id: &str, week: u32) -> Result<()> {
        self.write(loan_id, |loan| {
            loan.set_current_week(week);
            debug!(loan_id, requested = week, current = loan.current_week(), "current week set");
            Ok(())
        })
    }

    /// Snapshot of every loan, ordered by ID.
    pub fn loans(&self) -> Vec<Loan> {
        let loans = self.loans.read();
        let mut all: Vec<Loan> = loans.values().cloned().collect();
        all.sort_by(|a, b| a.id().cmp(b.id()));
        all
    }

    pub fn len(&self) -> usize {
        self.loans.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.read().is_empty()
    }

    fn read<T>(&self, loan_id: &str, f: impl FnOnce(&Loan) -> T) -> Result<T> {
        let loans = self.loans.read();
        loans
            .get(loan_id)
            .map(f)
            .ok_or_else(|| BillingError::LoanNotFound(loan_id.to_string()))
    }

    fn write<T>(&self, loan_id: &str, f: impl FnOnce(&mut Loan) -> Result<T>) -> Result<T> {
        let mut loans = self.loans.write();
        let loan = loans
            .get_mut(loan_id)
            .ok_or_else(|| BillingError::LoanNotFound(loan_id.to_string()))?;
        f(loan)
    }
}
