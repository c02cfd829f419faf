use crate::domain::money::Money;
use crate::error::{BillingError, PaymentError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Fixed loan term, in weeks.
pub const LOAN_DURATION_WEEKS: u32 = 50;

/// Flat annual interest applied once to the principal.
pub const ANNUAL_INTEREST_RATE: Decimal = dec!(0.10);

/// Weeks behind (current week minus last paid week) at which a borrower is delinquent.
pub const DELINQUENCY_THRESHOLD: u32 = 2;

/// One weekly installment obligation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub week_number: u32,
    pub amount: Money,
    pub is_paid: bool,
}

/// A recorded installment. Created once per accepted payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub week_number: u32,
    pub amount: Money,
    pub paid_at: DateTime<Utc>,
}

/// A fixed-term, flat-interest installment loan.
///
/// The loan owns its amortization schedule and payment log. Amounts are fixed
/// at construction; the only mutable state is the paid flags, the append-only
/// payment log and the externally driven current week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loan {
    id: String,
    borrower_id: String,
    principal: Money,
    interest_rate: Decimal,
    total_amount: Money,
    weekly_payment: Money,
    term_weeks: u32,
    schedule: Vec<ScheduleEntry>,
    payments: Vec<Payment>,
    current_week: u32,
}

impl Loan {
    /// Creates a loan and generates its schedule.
    ///
    /// Interest is flat: `principal * annual_interest_rate`, computed once. The
    /// total is split evenly across `term_weeks`. Fails with
    /// `LoanTermsOutOfRange` if the total does not fit a `Decimal` or the term
    /// is zero.
    pub fn try_new(
        id: impl Into<String>,
        borrower_id: impl Into<String>,
        principal: Money,
        annual_interest_rate: Decimal,
        term_weeks: u32,
    ) -> Result<Self, BillingError> {
        let (total_amount, weekly_payment) = principal
            .checked_multiply(annual_interest_rate)
            .and_then(|interest| principal.checked_add(interest))
            .and_then(|total| total.checked_divide(term_weeks).map(|weekly| (total, weekly)))
            .ok_or(BillingError::LoanTermsOutOfRange {
                principal,
                term_weeks,
            })?;

        let schedule = (1..=term_weeks)
            .map(|week_number| ScheduleEntry {
                week_number,
                amount: weekly_payment,
                is_paid: false,
            })
            .collect();

        Ok(Self {
            id: id.into(),
            borrower_id: borrower_id.into(),
            principal,
            interest_rate: annual_interest_rate,
            total_amount,
            weekly_payment,
            term_weeks,
            schedule,
            payments: Vec::new(),
            current_week: 1,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn borrower_id(&self) -> &str {
        &self.borrower_id
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn weekly_payment(&self) -> Money {
        self.weekly_payment
    }

    pub fn term_weeks(&self) -> u32 {
        self.term_weeks
    }

    pub fn current_week(&self) -> u32 {
        self.current_week
    }

    /// Sum of every recorded payment.
    pub fn total_paid(&self) -> Money {
        self.payments.iter().map(|p| &p.amount).sum()
    }

    pub fn paid_weeks(&self) -> usize {
        self.payments.len()
    }

    /// Total owed minus total paid so far.
    pub fn outstanding(&self) -> Money {
        self.total_amount - self.total_paid()
    }

    /// True once the borrower is `DELINQUENCY_THRESHOLD` or more weeks behind
    /// the current week.
    pub fn is_delinquent(&self) -> bool {
        let last_paid_week = self
            .schedule
            .iter()
            .filter(|entry| entry.is_paid)
            .map(|entry| entry.week_number)
            .max()
            .unwrap_or(0);

        self.current_week.saturating_sub(last_paid_week) >= DELINQUENCY_THRESHOLD
    }

    /// Moves the simulated clock. Weeks outside `1..=term_weeks` are ignored.
    pub fn set_current_week(&mut self, week: u32) {
        if (1..=self.term_weeks).contains(&week) {
            self.current_week = week;
        }
    }

    /// Records a payment for `week_number`, stamped with the current time.
    pub fn make_payment(&mut self, amount: Money, week_number: u32) -> Result<(), PaymentError> {
        self.make_payment_at(amount, week_number, Utc::now())
    }

    /// Records a payment for `week_number` at `paid_at`.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// sign, exact amount, loan already paid off, week range, week already
    /// paid, and finally strict sequencing. Nothing is mutated on failure.
    pub fn make_payment_at(
        &mut self,
        amount: Money,
        week_number: u32,
        paid_at: DateTime<Utc>,
    ) -> Result<(), PaymentError> {
        if amount.is_negative() {
            return Err(PaymentError::NegativeAmount { amount });
        }

        if amount != self.weekly_payment {
            return Err(PaymentError::InvalidPaymentAmount {
                expected: self.weekly_payment,
                actual: amount,
            });
        }

        if self.outstanding().is_zero() {
            return Err(PaymentError::LoanFullyPaid);
        }

        if !(1..=self.term_weeks).contains(&week_number) {
            return Err(PaymentError::InvalidWeekNumber {
                week: week_number,
                term_weeks: self.term_weeks,
            });
        }

        let index = (week_number - 1) as usize;
        if self.schedule[index].is_paid {
            return Err(PaymentError::WeekAlreadyPaid { week: week_number });
        }

        let expected = self.next_due_week();
        if week_number != expected {
            return Err(PaymentError::PaymentOutOfSequence {
                week: week_number,
                expected,
            });
        }

        self.payments.push(Payment {
            week_number,
            amount,
            paid_at,
        });
        self.schedule[index].is_paid = true;

        Ok(())
    }

    /// Lowest unpaid week, or `0` once every week is paid.
    pub fn next_due_week(&self) -> u32 {
        self.schedule
            .iter()
            .find(|entry| !entry.is_paid)
            .map_or(0, |entry| entry.week_number)
    }

    pub fn is_closed(&self) -> bool {
        self.outstanding().is_zero()
    }

    /// Copy of the schedule.
    pub fn schedule(&self) -> Vec<ScheduleEntry> {
        self.schedule.clone()
    }

    /// Copy of the payment log, oldest first.
    pub fn payment_history(&self) -> Vec<Payment> {
        self.payments.clone()
    }
}
