//! frender's main application entry point.
//! Handles command-line argument parsing, logger configuration and
//! error-to-exit-code mapping.

use frender::{
    cli::{get_args, run, run_setup, Command},
    error::default_error_handler,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    let result = match args.command {
        Some(Command::Setup) => run_setup(),
        None => run(args),
    };

    if let Err(err) = result {
        default_error_handler(err);
    }
}
