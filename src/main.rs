//! dftx - codec and inspector for DfTx custom transaction payloads.

use clap::Parser;
use colored::Colorize;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = dftx::Args::parse();

    // Disable colors if requested
    if args.no_color {
        colored::control::set_override(false);
    }

    let color = if args.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let logger = TermLogger::init(
        args.log_level(),
        Config::default(),
        TerminalMode::Stderr,
        color,
    );
    if let Err(e) = logger {
        eprintln!("{}: could not start logger: {}", "warning".yellow(), e);
    }

    match dftx::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "error".red(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
