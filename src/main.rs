use billing_engine::application::registry::LoanRegistry;
use billing_engine::interfaces::csv::command_reader::CommandReader;
use billing_engine::interfaces::csv::loan_writer::LoanWriter;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input loan commands CSV file
    input: PathBuf,

    /// Print the payment history of this loan as JSON lines after the summary.
    #[arg(long)]
    history: Option<String>,
}

fn main() -> Result<()> {
    // RUST_LOG controls verbosity; logs go to stderr so stdout stays CSV.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();
    let registry = LoanRegistry::new();

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = CommandReader::new(file);
    for command in reader.commands() {
        match command {
            Ok(command) => {
                if let Err(e) = command.apply(&registry) {
                    warn!("Error processing command: {e}");
                }
            }
            Err(e) => {
                warn!("Error reading command: {e}");
            }
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    LoanWriter::new(&mut out)
        .write_loans(&registry.loans())
        .into_diagnostic()?;

    if let Some(loan_id) = cli.history {
        let history = registry.get_payment_history(&loan_id).into_diagnostic()?;
        for payment in history {
            let line = serde_json::to_string(&payment).into_diagnostic()?;
            writeln!(out, "{line}").into_diagnostic()?;
        }
    }

    Ok(())
}
