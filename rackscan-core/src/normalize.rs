//! Flatten per-point batches into canonical, deduplicated facility records.
//!
//! Only the first entry of each batch is considered; the facility API is
//! queried per point and the nearest facility is the one of interest.
//! Entries missing a required field are skipped and reported rather than
//! aborting the run.

use std::collections::HashSet;

use thiserror::Error;

use crate::{FacilityRecord, RawFacility, RawFacilityBatch};

/// The shelter indicator value marking a sheltered facility.
const SHELTERED: &str = "Y";

/// A batch whose first entry could not become a [`FacilityRecord`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedRecordError {
    /// The batch had no entries at all.
    #[error("batch {batch} contains no facility entries")]
    EmptyBatch {
        /// Position of the batch in the input.
        batch: usize,
    },
    /// A required field was absent.
    #[error("batch {batch}: first facility entry is missing {field}")]
    MissingField {
        /// Position of the batch in the input.
        batch: usize,
        /// Upstream name of the missing field.
        field: &'static str,
    },
    /// A coordinate was NaN or infinite.
    #[error("batch {batch}: facility coordinates ({latitude}, {longitude}) are not finite")]
    NonFiniteCoordinate {
        /// Position of the batch in the input.
        batch: usize,
        /// Reported latitude.
        latitude: f64,
        /// Reported longitude.
        longitude: f64,
    },
}

/// Records produced by [`normalize`] together with the skipped batches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeOutcome {
    /// Canonical records in first-occurrence order, unique by location.
    pub records: Vec<FacilityRecord>,
    /// Batches that were skipped, in input order.
    pub skipped: Vec<MalformedRecordError>,
}

/// Convert batches into canonical records.
///
/// The first entry of each batch is mapped field by field; records sharing a
/// `(latitude, longitude)` pair with an earlier record are dropped.
///
/// # Examples
/// ```
/// use rackscan_core::{RawFacility, normalize};
///
/// let entry = RawFacility {
///     description: Some("Block 1".into()),
///     latitude: Some(1.3),
///     longitude: Some(103.8),
///     rack_type: Some("BOLLARD_TYPE".into()),
///     rack_count: Some(4),
///     shelter_indicator: Some("Y".into()),
/// };
/// let outcome = normalize(vec![vec![entry.clone()], vec![entry]]);
/// assert_eq!(outcome.records.len(), 1);
/// assert_eq!(outcome.records[0].rack_type, "bollard type");
/// assert!(outcome.records[0].has_shelter);
/// ```
#[must_use]
pub fn normalize(batches: Vec<RawFacilityBatch>) -> NormalizeOutcome {
    let mut outcome = NormalizeOutcome::default();
    let mut converted = Vec::with_capacity(batches.len());
    for (batch, entries) in batches.into_iter().enumerate() {
        match first_record(batch, entries) {
            Ok(record) => converted.push(record),
            Err(error) => {
                log::warn!("skipping malformed facility: {error}");
                outcome.skipped.push(error);
            }
        }
    }
    outcome.records = dedup_by_location(converted);
    outcome
}

fn first_record(
    batch: usize,
    entries: RawFacilityBatch,
) -> Result<FacilityRecord, MalformedRecordError> {
    let first = entries
        .into_iter()
        .next()
        .ok_or(MalformedRecordError::EmptyBatch { batch })?;
    to_record(batch, first)
}

fn to_record(batch: usize, raw: RawFacility) -> Result<FacilityRecord, MalformedRecordError> {
    let missing = |field| MalformedRecordError::MissingField { batch, field };
    let description = raw.description.ok_or_else(|| missing("Description"))?;
    let latitude = raw.latitude.ok_or_else(|| missing("Latitude"))?;
    let longitude = raw.longitude.ok_or_else(|| missing("Longitude"))?;
    let rack_type = raw.rack_type.ok_or_else(|| missing("RackType"))?;
    let rack_count = raw.rack_count.ok_or_else(|| missing("RackCount"))?;
    if !(latitude.is_finite() && longitude.is_finite()) {
        return Err(MalformedRecordError::NonFiniteCoordinate {
            batch,
            latitude,
            longitude,
        });
    }
    Ok(FacilityRecord {
        description,
        latitude,
        longitude,
        rack_type: normalize_rack_type(&rack_type),
        rack_count,
        has_shelter: has_shelter(raw.shelter_indicator.as_deref()),
    })
}

/// Lower-case a rack type code and replace underscores with spaces.
///
/// ```
/// assert_eq!(rackscan_core::normalize_rack_type("BOLLARD_TYPE"), "bollard type");
/// ```
#[must_use]
pub fn normalize_rack_type(raw: &str) -> String {
    raw.to_lowercase().replace('_', " ")
}

/// Map the upstream shelter indicator to a flag; only `"Y"` is sheltered.
#[must_use]
pub fn has_shelter(indicator: Option<&str>) -> bool {
    indicator == Some(SHELTERED)
}

/// Drop records whose location already appeared, keeping the first.
#[must_use]
pub fn dedup_by_location(records: Vec<FacilityRecord>) -> Vec<FacilityRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.location_key()))
        .collect()
}
