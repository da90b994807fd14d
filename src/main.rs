// src/main.rs
use batchopen::application::{EmptyReason, RunOutcome};
use batchopen::cli::args::Args;
use batchopen::domain::error::{DomainError, EXIT_FAILURE, EXIT_INTERRUPTED, EXIT_SUCCESS};
use clap::Parser;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging based on verbosity
    let filter = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("batchopen={}", filter).parse().unwrap()),
        )
        .init();

    match batchopen::run(args) {
        Ok(RunOutcome::NothingToOpen(EmptyReason::NoUrls)) => {
            println!("no URLs in file");
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(RunOutcome::NothingToOpen(EmptyReason::AllFiltered)) => {
            println!("no URLs to open after filtering");
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(RunOutcome::Completed { opened, batches, .. }) => {
            println!("opened {opened} URLs in {batches} batches");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(err) => {
            let code = err
                .downcast_ref::<DomainError>()
                .map(DomainError::exit_code)
                .unwrap_or(EXIT_FAILURE);
            if code == EXIT_INTERRUPTED {
                eprintln!("\ninterrupted, URL file left untouched");
            } else {
                eprintln!("batchopen error: {:#}", err);
            }
            ExitCode::from(code)
        }
    }
}
