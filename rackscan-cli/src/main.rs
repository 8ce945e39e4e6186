//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use rackscan_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "fatal errors are reported on stderr before exiting"
)]
fn main() {
    match rackscan_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("rackscan: {err}");
            std::process::exit(1);
        }
    }
}
