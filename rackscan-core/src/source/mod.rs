//! Remote data sources consulted by the pipeline.
//!
//! The [`FacilitySource`] trait abstracts the facility-search API queried once
//! per sample point, and [`AddressLookup`] abstracts the address search used
//! to expand bare block numbers. Both are synchronous so the core pipeline
//! stays embeddable in synchronous contexts; HTTP implementations live in
//! `rackscan-data`.
//!
//! Failures surface as [`SourceError`].

mod error;
mod provider;

pub use error::SourceError;
pub use provider::{AddressInfo, AddressLookup, FacilitySource};
