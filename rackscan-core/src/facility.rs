//! Raw and canonical bicycle-parking facility records.

/// One facility entry as returned by the facility-search API.
///
/// Every field is optional because the upstream payload is not validated;
/// [`crate::normalize`] decides which omissions are fatal for a record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFacility {
    /// Free-text description, often a bare block number.
    pub description: Option<String>,
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    pub longitude: Option<f64>,
    /// Upstream rack type code, e.g. `"Yellow Box"` or `"MIXED_RACKS"`.
    pub rack_type: Option<String>,
    /// Number of racks at the facility.
    pub rack_count: Option<u32>,
    /// `"Y"` when the facility is sheltered.
    pub shelter_indicator: Option<String>,
}

/// Raw entries returned for a single sample point, in response order.
pub type RawFacilityBatch = Vec<RawFacility>;

/// A deduplicated, field-normalized facility.
///
/// Within a result set the `(latitude, longitude)` pair identifies a record.
///
/// # Examples
/// ```
/// use rackscan_core::FacilityRecord;
///
/// let record = FacilityRecord {
///     description: "blk 123 (yellow box)".into(),
///     latitude: 1.3,
///     longitude: 103.8,
///     rack_type: "yellow box".into(),
///     rack_count: 10,
///     has_shelter: false,
/// };
/// assert_eq!(record.location_key(), FacilityRecord { rack_count: 2, ..record.clone() }.location_key());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FacilityRecord {
    /// Human-readable place description.
    pub description: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Rack type, lower-cased with underscores replaced by spaces.
    pub rack_type: String,
    /// Number of racks.
    pub rack_count: u32,
    /// Whether the racks are sheltered.
    pub has_shelter: bool,
}

/// Exact identity of a coordinate pair, usable as a hash key.
///
/// Negative zero is folded into positive zero so both spellings of the same
/// coordinate collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocationKey {
    latitude: u64,
    longitude: u64,
}

impl LocationKey {
    /// Build the key for a latitude/longitude pair.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: canonical_bits(latitude),
            longitude: canonical_bits(longitude),
        }
    }
}

fn canonical_bits(value: f64) -> u64 {
    if value == 0.0 { 0.0_f64 } else { value }.to_bits()
}

impl FacilityRecord {
    /// The deduplication key of this record.
    #[must_use]
    pub fn location_key(&self) -> LocationKey {
        LocationKey::new(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::expect_used, reason = "tests use expect for readable failures")]

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn signed_zero_shares_a_key() {
        assert_eq!(LocationKey::new(0.0, 103.8), LocationKey::new(-0.0, 103.8));
    }

    #[rstest]
    fn distinct_coordinates_have_distinct_keys() {
        assert_ne!(LocationKey::new(1.3, 103.8), LocationKey::new(103.8, 1.3));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn record_serialises_with_snake_case_fields() {
        let record = FacilityRecord {
            description: "blk 1".into(),
            latitude: 1.0,
            longitude: 2.0,
            rack_type: "yellow box".into(),
            rack_count: 4,
            has_shelter: true,
        };
        let value = serde_json::to_value(&record).expect("serialise record");
        assert_eq!(value["rack_type"], "yellow box");
        assert_eq!(value["has_shelter"], true);
    }
}
