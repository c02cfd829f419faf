//! Application layer containing the loan registry callers talk to.
//!
//! `LoanRegistry` owns every loan and serializes mutation behind a single
//! read/write lock. `LoanCommand` is the scripted form of a registry call used
//! by the command-file CLI.

pub mod command;
pub mod registry;
