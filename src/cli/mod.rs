//! CLI module - argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod demos;
pub mod diagnostics;
pub mod helpers;
pub mod output;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins over `--verbose`, which wins over the configured level.
pub fn init_tracing(verbose: bool, configured: Option<&str>) {
    let fallback = if verbose {
        "sfr=debug"
    } else {
        configured.unwrap_or("warn")
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // A subscriber may already be installed (tests); keep it
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load the layered config, reporting bad config files at `warn` level
///
/// The real subscriber depends on the config, so loading runs under a
/// temporary one.
pub fn load_config() -> crate::core::Config {
    let early = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    tracing::subscriber::with_default(early, crate::core::Config::load)
}
