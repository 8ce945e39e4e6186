//! Core domain logic for collecting bicycle parking facilities.
//!
//! A run samples a regular lattice of points inside a boundary polygon,
//! asks a [`FacilitySource`] for the facilities nearest each point,
//! reduces the answers to one canonical [`FacilityRecord`] per location
//! and finally replaces bare block numbers with readable addresses using an
//! [`AddressLookup`].
//!
//! The network-facing implementations of the two source traits live in
//! `rackscan-data`; this crate only depends on the traits, so every stage
//! can be exercised with in-memory stubs.
//!
//! # Examples
//!
//! ```
//! use geo::{Coord, polygon};
//! use rackscan_core::{GridSpec, generate_grid};
//!
//! let square = polygon![(x: 0.0, y: 0.0), (x: 0.0, y: 1.0), (x: 1.0, y: 1.0), (x: 1.0, y: 0.0)];
//! let spec = GridSpec::new(Coord { x: 0.0, y: 0.0 }, 0.5, 3, 3);
//! let points = generate_grid(&square, &spec)?;
//! assert_eq!(points.len(), 1);
//! assert_eq!((points[0].latitude, points[0].longitude), (0.5, 0.5));
//! # Ok::<(), rackscan_core::GridSpecError>(())
//! ```

#![forbid(unsafe_code)]

mod enhance;
mod facility;
mod fetch;
mod grid;
mod normalize;
mod pipeline;
mod point;
mod source;

#[doc(hidden)]
pub mod test_support;

pub use enhance::{
    EnhanceOutcome, EnhancementError, IDENTIFIER_WIDTH, apply_address, bare_identifier, enhance,
    format_address, lookup_address, normalize_description, padded_identifier,
};
pub use facility::{FacilityRecord, LocationKey, RawFacility, RawFacilityBatch};
pub use fetch::{FetchError, fetch_all};
pub use grid::{
    DEFAULT_LAT_COUNT, DEFAULT_LON_COUNT, DEFAULT_ORIGIN_LAT, DEFAULT_ORIGIN_LON, DEFAULT_SPACING,
    GridSpec, GridSpecError, generate_grid,
};
pub use normalize::{
    MalformedRecordError, NormalizeOutcome, dedup_by_location, has_shelter, normalize,
    normalize_rack_type,
};
pub use pipeline::{Pipeline, PipelineError, ScrapeReport};
pub use point::SamplePoint;
pub use source::{AddressInfo, AddressLookup, FacilitySource, SourceError};
