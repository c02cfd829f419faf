use crate::domain::loan::Loan;
use crate::domain::money::Money;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// One output row describing a loan's current position.
#[derive(Debug, Serialize, PartialEq)]
pub struct LoanSummary {
    pub loan: String,
    pub borrower: String,
    pub principal: Decimal,
    pub total: Decimal,
    pub weekly_payment: Decimal,
    pub outstanding: Decimal,
    pub paid_weeks: usize,
    pub next_due_week: u32,
    pub current_week: u32,
    pub delinquent: bool,
    pub closed: bool,
}

impl From<&Loan> for LoanSummary {
    fn from(loan: &Loan) -> Self {
        let plain = |m: Money| m.amount().normalize();
        Self {
            loan: loan.id().to_string(),
            borrower: loan.borrower_id().to_string(),
            principal: plain(loan.principal()),
            total: plain(loan.total_amount()),
            weekly_payment: plain(loan.weekly_payment()),
            outstanding: plain(loan.outstanding()),
            paid_weeks: loan.paid_weeks(),
            next_due_week: loan.next_due_week(),
            current_week: loan.current_week(),
            delinquent: loan.is_delinquent(),
            closed: loan.is_closed(),
        }
    }
}

/// Writes loan summaries as CSV, header first.
pub struct LoanWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> LoanWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_loans<'a>(&mut self, loans: impl IntoIterator<Item = &'a Loan>) -> Result<()> {
        for loan in loans {
            self.writer.serialize(LoanSummary::from(loan))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
