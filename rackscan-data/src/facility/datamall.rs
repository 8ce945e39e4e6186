//! Response types for the bicycle-parking endpoint.
//!
//! The service answers with an OData envelope whose `value` array lists the
//! facilities nearest the queried coordinate, nearest first.

use rackscan_core::RawFacility;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Envelope returned by the bicycle-parking endpoint.
///
/// Entries are kept as raw JSON so that one badly shaped entry cannot fail
/// the whole response.
#[derive(Debug, Deserialize)]
pub struct ParkingResponse {
    /// Facilities near the queried point; empty when none are in range.
    pub value: Vec<Value>,
}

impl ParkingResponse {
    /// Convert every entry, blanking fields whose type does not match.
    #[must_use]
    pub fn into_batch(self) -> Vec<RawFacility> {
        self.value
            .into_iter()
            .map(ParkingEntry::from_value)
            .map(RawFacility::from)
            .collect()
    }
}

/// One facility as reported upstream.
///
/// A field holding an unexpected JSON type reads as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParkingEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub rack_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub rack_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub shelter_indicator: Option<String>,
}

impl ParkingEntry {
    /// Decode one entry; anything other than a JSON object has no fields.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        Self::deserialize(value).unwrap_or_else(|err| {
            log::debug!("ignoring unreadable facility entry: {err}");
            Self::default()
        })
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

impl From<ParkingEntry> for RawFacility {
    fn from(entry: ParkingEntry) -> Self {
        Self {
            description: entry.description,
            latitude: entry.latitude,
            longitude: entry.longitude,
            rack_type: entry.rack_type,
            rack_count: entry.rack_count,
            shelter_indicator: entry.shelter_indicator,
        }
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::expect_used, reason = "tests use expect for readable failures")]

    use super::*;

    #[test]
    fn deserialise_populated_response() {
        let json = r#"{
            "odata.metadata": "http://datamall2.mytransport.sg/ltaodataservice/$metadata#BicycleParkingv2",
            "value": [
                {
                    "Description": "12345-01",
                    "Latitude": 1.3521,
                    "Longitude": 103.8198,
                    "RackType": "Yellow Box",
                    "RackCount": 10,
                    "ShelterIndicator": "N"
                }
            ]
        }"#;

        let response: ParkingResponse = serde_json::from_str(json).expect("should deserialise");

        let batch = response.into_batch();
        assert_eq!(batch.len(), 1);
        let raw = batch.into_iter().next().expect("one entry");
        assert_eq!(raw.description.as_deref(), Some("12345-01"));
        assert_eq!(raw.latitude, Some(1.3521));
        assert_eq!(raw.rack_count, Some(10));
        assert_eq!(raw.shelter_indicator.as_deref(), Some("N"));
    }

    #[test]
    fn deserialise_partial_entry() {
        let json = r#"{"value": [{"Description": "Somewhere"}]}"#;
        let response: ParkingResponse = serde_json::from_str(json).expect("should deserialise");
        let batch = response.into_batch();
        let entry = batch.first().expect("one entry");
        assert_eq!(entry.description.as_deref(), Some("Somewhere"));
        assert!(entry.latitude.is_none());
        assert!(entry.rack_type.is_none());
    }

    #[test]
    fn mistyped_fields_read_as_absent() {
        let json = r#"{"value": [
            {"Description": "12345-01", "Latitude": "1.35", "Longitude": 103.8,
             "RackType": 7, "RackCount": "4", "ShelterIndicator": null},
            {"Description": "Other", "RackCount": 2.5}
        ]}"#;
        let response: ParkingResponse = serde_json::from_str(json).expect("should deserialise");
        let batch = response.into_batch();

        let first = batch.first().expect("first entry");
        assert_eq!(first.description.as_deref(), Some("12345-01"));
        assert!(first.latitude.is_none());
        assert_eq!(first.longitude, Some(103.8));
        assert!(first.rack_type.is_none());
        assert!(first.rack_count.is_none());
        assert!(first.shelter_indicator.is_none());
        assert!(batch.get(1).expect("second entry").rack_count.is_none());
    }

    #[test]
    fn non_object_entries_have_no_fields() {
        let json = r#"{"value": [42, "text"]}"#;
        let response: ParkingResponse = serde_json::from_str(json).expect("should deserialise");
        let batch = response.into_batch();
        assert_eq!(batch, vec![RawFacility::default(), RawFacility::default()]);
    }

    #[test]
    fn missing_value_array_is_rejected() {
        let result = serde_json::from_str::<ParkingResponse>(r#"{"odata.metadata": "x"}"#);
        assert!(result.is_err());
    }
}
