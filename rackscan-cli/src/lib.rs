//! Command-line interface for collecting bicycle parking facilities.
//!
//! The `scrape` subcommand samples a GeoJSON boundary, queries the facility
//! service at every sample point and writes the cleaned records as JSON or
//! CSV.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod logging;
mod scrape;

pub use error::CliError;
pub use logging::{DEFAULT_LOG_FILTER, init_logging};

use scrape::{ScrapeArgs, run_scrape};

pub(crate) const ARG_SCRAPE_BOUNDARY: &str = "boundary";
pub(crate) const ARG_SCRAPE_ACCOUNT_KEY: &str = "account-key";
pub(crate) const ARG_SCRAPE_FACILITY_URL: &str = "facility-url";
pub(crate) const ARG_SCRAPE_ADDRESS_URL: &str = "address-url";
pub(crate) const ARG_SCRAPE_ORIGIN_LON: &str = "origin-lon";
pub(crate) const ARG_SCRAPE_ORIGIN_LAT: &str = "origin-lat";
pub(crate) const ARG_SCRAPE_SPACING: &str = "spacing";
pub(crate) const ARG_SCRAPE_LON_COUNT: &str = "lon-count";
pub(crate) const ARG_SCRAPE_LAT_COUNT: &str = "lat-count";
pub(crate) const ARG_SCRAPE_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ARG_SCRAPE_OUTPUT: &str = "output";
pub(crate) const ARG_SCRAPE_FORMAT: &str = "format";
pub(crate) const ENV_SCRAPE_BOUNDARY: &str = "RACKSCAN_CMDS_SCRAPE_BOUNDARY";
pub(crate) const ENV_SCRAPE_ACCOUNT_KEY: &str = "RACKSCAN_CMDS_SCRAPE_ACCOUNT_KEY";

/// Run the rackscan CLI with the current process arguments and environment.
///
/// Logging is initialised before the command runs. Parse failures are
/// returned as [`CliError::ArgumentParsing`] so the caller can let clap print
/// help and version output itself.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging().map_err(CliError::Logging)?;
    match cli.command {
        Command::Scrape(args) => run_scrape(*args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "rackscan",
    about = "Collect bicycle parking facilities inside a boundary",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sample a boundary, query the facility service and export the results.
    Scrape(Box<ScrapeArgs>),
}

#[cfg(test)]
mod tests;
