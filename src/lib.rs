//! Facade crate for the rackscan bicycle-parking collector.
//!
//! This crate re-exports the core sampling and cleaning pipeline and, behind
//! the `http` feature, the GeoJSON boundary loader, the HTTP sources and the
//! record exporters.
//!
//! # Examples
//!
//! ```
//! use rackscan::GridSpec;
//!
//! let spec = GridSpec::default();
//! assert!(spec.validate().is_ok());
//! ```

#![forbid(unsafe_code)]

pub use rackscan_core::{
    AddressInfo, AddressLookup, EnhanceOutcome, EnhancementError, FacilityRecord, FacilitySource,
    FetchError, GridSpec, GridSpecError, MalformedRecordError, NormalizeOutcome, Pipeline,
    PipelineError, RawFacility, RawFacilityBatch, SamplePoint, ScrapeReport, SourceError, enhance,
    fetch_all, generate_grid, normalize,
};

#[cfg(feature = "http")]
pub use rackscan_data::{
    BoundarySourceError, ExportError, ExportFormat, HttpAddressLookup, HttpAddressLookupConfig,
    HttpFacilitySource, HttpFacilitySourceConfig, load_boundary, parse_boundary, write_records,
};
