//! Domain layer: the money value object and the loan ledger.

pub mod loan;
pub mod money;
