//! Response types for the address search endpoint.

use rackscan_core::AddressInfo;
use serde::Deserialize;

/// Envelope returned by the address search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Candidates ordered best match first.
    pub results: Vec<SearchResult>,
}

/// One address candidate. Fields the service leaves blank are spelled `"NIL"`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "BUILDING")]
    pub building: Option<String>,
    #[serde(rename = "BLK_NO")]
    pub block: Option<String>,
    #[serde(rename = "ROAD_NAME")]
    pub road: Option<String>,
}

impl From<SearchResult> for AddressInfo {
    fn from(result: SearchResult) -> Self {
        Self {
            building: result.building,
            block: result.block,
            road: result.road,
        }
    }
}
