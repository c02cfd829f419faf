use crate::application::command::LoanCommand;
use crate::error::{BillingError, Result};
use std::io::Read;

/// Streams `LoanCommand` rows out of a command file.
///
/// The first line must be the header `type, loan, borrower, amount, week`.
/// Padding around fields is ignored and trailing empty columns may be left
/// off, so `pay_next, loan-1, , 110000` is a complete row.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    /// Wraps a command file (or any byte source) without reading from it yet.
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Yields one parsed command per row, in file order.
    ///
    /// An unknown command type or an unparsable amount or week turns into an
    /// `Err` for that row, and the rows after it are still read.
    pub fn commands(self) -> impl Iterator<Item = Result<LoanCommand>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(BillingError::from))
    }
}
