use std::fmt::Display;
use tracing_subscriber::{EnvFilter, prelude::*};

pub mod dump;
pub mod generate;

pub use dump::*;
pub use generate::*;

pub fn handle_error<E>(error: E)
where
    E: Display,
{
    eprintln!("{error}");
    ::std::process::exit(1);
}

/// Install the subscriber for codegen progress: everything at DEBUG with
/// `--verbose`, otherwise bare `info` messages.
pub(crate) fn init_logging(verbose: bool) {
    if verbose {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    } else {
        let filter_layer = EnvFilter::new("entigen=info,entigen_codegen=info");
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_level(false)
            .without_time();

        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    }
}
