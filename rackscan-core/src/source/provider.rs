//! Source traits for facility and address lookups.

use crate::{RawFacilityBatch, SamplePoint};

use super::error::SourceError;

/// One candidate returned by the address search.
///
/// Fields mirror the upstream payload and stay optional; the literal `"NIL"`
/// is how the service spells an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressInfo {
    /// Building name, e.g. `"HDB-TAMPINES"`.
    pub building: Option<String>,
    /// Block number, e.g. `"123"`.
    pub block: Option<String>,
    /// Road name, e.g. `"TAMPINES STREET 11"`.
    pub road: Option<String>,
}

/// Query the facility-search API around a sample point.
///
/// # Examples
///
/// ```rust
/// use rackscan_core::{FacilitySource, RawFacility, RawFacilityBatch, SamplePoint, SourceError};
///
/// struct Nowhere;
///
/// impl FacilitySource for Nowhere {
///     fn facilities_near(&self, _point: &SamplePoint) -> Result<RawFacilityBatch, SourceError> {
///         Ok(Vec::new())
///     }
/// }
///
/// let batch = Nowhere.facilities_near(&SamplePoint::new(1.3, 103.8))?;
/// assert!(batch.is_empty());
/// # Ok::<(), SourceError>(())
/// ```
pub trait FacilitySource {
    /// Return the raw facilities the service reports near `point`.
    ///
    /// An empty batch is a valid answer, not an error.
    fn facilities_near(&self, point: &SamplePoint) -> Result<RawFacilityBatch, SourceError>;
}

/// Resolve a search term into address candidates.
pub trait AddressLookup {
    /// Return the candidates for `query`, best match first.
    fn search(&self, query: &str) -> Result<Vec<AddressInfo>, SourceError>;
}
