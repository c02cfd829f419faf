use crate::application::registry::LoanRegistry;
use crate::domain::money::Money;
use crate::error::{BillingError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum CommandType {
    Create,
    Pay,
    PayNext,
    SetWeek,
}

/// One scripted operation against a registry.
///
/// Which optional fields are required depends on `type`:
/// `create` needs `borrower` and `amount` (the principal), `pay` needs
/// `amount` and `week`, `pay_next` needs `amount`, `set_week` needs `week`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct LoanCommand {
    pub r#type: CommandType,
    pub loan: String,
    pub borrower: Option<String>,
    pub amount: Option<Decimal>,
    pub week: Option<u32>,
}

impl LoanCommand {
    /// Applies the command to `registry`, returning whatever the registry rejects.
    pub fn apply(self, registry: &LoanRegistry) -> Result<()> {
        match self.r#type {
            CommandType::Create => {
                let borrower = self.borrower.clone().ok_or_else(|| self.missing("borrower"))?;
                let principal = Money::new(self.amount.ok_or_else(|| self.missing("amount"))?);
                if principal.is_negative() {
                    return Err(BillingError::InvalidCommand(format!(
                        "principal for loan {} cannot be negative: {principal}",
                        self.loan
                    )));
                }
                registry.create_loan(self.loan, borrower, principal)?;
            }
            CommandType::Pay => {
                let amount = self.amount.ok_or_else(|| self.missing("amount"))?;
                let week = self.week.ok_or_else(|| self.missing("week"))?;
                registry.make_payment(&self.loan, Money::new(amount), week)?;
            }
            CommandType::PayNext => {
                let amount = self.amount.ok_or_else(|| self.missing("amount"))?;
                registry.make_next_payment(&self.loan, Money::new(amount))?;
            }
            CommandType::SetWeek => {
                let week = self.week.ok_or_else(|| self.missing("week"))?;
                registry.set_current_week(&self.loan, week)?;
            }
        }
        Ok(())
    }

    fn missing(&self, field: &str) -> BillingError {
        BillingError::InvalidCommand(format!(
            "{:?} on loan {} is missing {field}",
            self.r#type, self.loan
        ))
    }
}
