//! Error types emitted by the rackscan CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use rackscan_core::{GridSpecError, PipelineError};
use rackscan_data::{BoundarySourceError, ClientBuildError, ExportError, UnknownFormat};
use thiserror::Error;
use tracing_subscriber::util::TryInitError;

/// Errors emitted by the rackscan CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without the leading dashes.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The grid options describe an unusable lattice.
    #[error("invalid grid options: {0}")]
    InvalidGrid(#[from] GridSpecError),
    /// The HTTP timeout was zero.
    #[error("--{field} must be greater than zero")]
    InvalidTimeout {
        /// Flag naming the timeout.
        field: &'static str,
    },
    /// The output format name was not recognised.
    #[error(transparent)]
    InvalidFormat(#[from] UnknownFormat),
    /// Loading the boundary file failed.
    #[error(transparent)]
    Boundary(#[from] BoundarySourceError),
    /// Constructing an HTTP source failed.
    #[error("failed to build HTTP client for {endpoint:?}: {source}")]
    BuildSource {
        /// Endpoint the client was meant for.
        endpoint: String,
        /// Underlying build failure.
        #[source]
        source: ClientBuildError,
    },
    /// The scrape pipeline aborted.
    #[error("scrape failed: {0}")]
    Scrape(#[from] PipelineError),
    /// The output file could not be created.
    #[error("failed to create output file {path:?}: {source}")]
    CreateOutput {
        /// Requested output path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Writing the records failed.
    #[error(transparent)]
    Export(#[from] ExportError),
    /// Installing the log subscriber failed.
    #[error("failed to initialise logging: {0}")]
    Logging(#[source] TryInitError),
}
