//! Office Tweaks CLI
//!
//! Runs one batch operation when an operation flag is given, otherwise the
//! interactive menu.

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use office_tweaks::cli::{run_batch, Cli, InteractiveMenu, Session};
use office_tweaks::error::OfficeError;
use office_tweaks::logging::init_logging;
use office_tweaks::report::Reporter;
use office_tweaks::utils::{error_line, info_line};

const FAREWELL: &str = "Interrupted by user";

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli.log_file, cli.verbose) {
        eprintln!("Warning: logging disabled: {:#}", err);
    }

    let reporter = Reporter::new();
    let cancellation = reporter.cancellation().clone();
    // Running work stops at the next file boundary so staging directories are
    // removed; when idle (or on a second Ctrl+C) exit right away.
    if let Err(err) = ctrlc::set_handler(move || {
        if cancellation.request() {
            tracing::info!("Interrupt requested; stopping after the current file");
            return;
        }
        println!("\n\n{}", info_line(FAREWELL));
        tracing::info!("{}", FAREWELL);
        std::process::exit(0);
    }) {
        tracing::warn!(error = %err, "Failed to install the Ctrl+C handler");
    }

    match run(&cli, reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if is_interrupt(&err) => {
            println!("\n\n{}", info_line(FAREWELL));
            tracing::info!("{}", FAREWELL);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", error_line(&format!("{:#}", err)));
            if let Some(hint) = err.downcast_ref::<OfficeError>().and_then(OfficeError::hint) {
                eprintln!("{}", info_line(hint));
            }
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, reporter: Reporter) -> Result<()> {
    let mut session = Session::from_cli(cli, reporter)?;

    match cli.operation() {
        Some(operation) => run_batch(cli, operation, &mut session),
        None => InteractiveMenu::new(&mut session).run(),
    }
}

/// Stopped work and raw-mode prompts surface Ctrl+C as errors
fn is_interrupt(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        if matches!(cause.downcast_ref::<OfficeError>(), Some(OfficeError::Interrupted)) {
            return true;
        }
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            return io_err.kind() == io::ErrorKind::Interrupted;
        }
        matches!(
            cause.downcast_ref::<dialoguer::Error>(),
            Some(dialoguer::Error::IO(io_err)) if io_err.kind() == io::ErrorKind::Interrupted
        )
    })
}
