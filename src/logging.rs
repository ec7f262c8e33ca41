//! Log setup for the command-line front-end.
//!
//! `DOM_TESTGEN_LOG` (or `RUST_LOG`) takes an `EnvFilter` directive and wins
//! over the `-v` count. Logs go to stderr so stdout stays clean for JSON and
//! generated code.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const LOG_ENV: &str = "DOM_TESTGEN_LOG";

/// Filter directive for a `-v` count.
pub fn filter_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "dom_testgen=warn",
        1 => "dom_testgen=info",
        2 => "dom_testgen=debug",
        _ => "dom_testgen=trace",
    }
}

pub fn init(verbose: u8) {
    let filter = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(filter_for_verbosity(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
