//! Input and output adapters for the rackscan pipeline.
//!
//! - [`boundary`] loads the sampling boundary from GeoJSON.
//! - [`facility`] and [`address`] implement the core source traits over HTTP.
//! - [`export`] writes the final records as JSON or CSV.
#![forbid(unsafe_code)]

pub mod address;
pub mod boundary;
mod client;
pub mod export;
pub mod facility;

pub use address::{DEFAULT_ADDRESS_URL, HttpAddressLookup, HttpAddressLookupConfig};
pub use boundary::{BoundarySourceError, load_boundary, parse_boundary};
pub use client::{ClientBuildError, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use export::{CSV_HEADER, ExportError, ExportFormat, UnknownFormat, write_records};
pub use facility::{DEFAULT_FACILITY_URL, HttpFacilitySource, HttpFacilitySourceConfig};
