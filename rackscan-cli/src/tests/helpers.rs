//! Test helpers for laying out boundary files and stub sources.

use camino::{Utf8Path, Utf8PathBuf};
use rackscan_core::test_support::{StubAddressLookup, StubFacilitySource, address};
use rackscan_core::{RawFacility, SamplePoint, SourceError};
use std::fs;
use tempfile::TempDir;

use crate::CliError;
use crate::scrape::{ScrapeConfig, ScrapeSources, ScrapeSourcesBuilder};

pub(super) const UNIT_SQUARE: &str = r#"{
    "type": "Feature",
    "properties": {"name": "unit square"},
    "geometry": {
        "type": "Polygon",
        "coordinates": [[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]]
    }
}"#;

/// The only lattice point inside [`UNIT_SQUARE`] at spacing 0.5.
pub(super) fn centre() -> SamplePoint {
    SamplePoint::new(0.5, 0.5)
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directories");
    }
    fs::write(path, contents).expect("write test file");
}

pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn yellow_box(description: &str) -> RawFacility {
    RawFacility {
        description: Some(description.to_owned()),
        latitude: Some(0.5),
        longitude: Some(0.5),
        rack_type: Some("YELLOW_BOX".to_owned()),
        rack_count: Some(8),
        shelter_indicator: Some("Y".to_owned()),
    }
}

/// How the stub facility service answers the centre point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FacilityBehaviour {
    Empty,
    BlockNumber,
    Unavailable,
}

/// Builds in-memory sources instead of HTTP clients.
#[derive(Debug)]
pub(super) struct StubScrapeSourcesBuilder {
    pub(super) behaviour: FacilityBehaviour,
}

impl ScrapeSourcesBuilder for StubScrapeSourcesBuilder {
    fn build(&self, _config: &ScrapeConfig) -> Result<ScrapeSources, CliError> {
        let facilities = match self.behaviour {
            FacilityBehaviour::Empty => StubFacilitySource::default(),
            FacilityBehaviour::BlockNumber => {
                StubFacilitySource::default().with_batch(centre(), vec![yellow_box("123")])
            }
            FacilityBehaviour::Unavailable => StubFacilitySource::default().with_error(
                centre(),
                SourceError::HttpError {
                    url: "http://facilities.test".to_owned(),
                    status: 503,
                    message: "Service Unavailable".to_owned(),
                },
            ),
        };
        let addresses = StubAddressLookup::default()
            .with_address("000123", address("NIL", "123", "TAMPINES STREET 11"));
        Ok(ScrapeSources {
            facilities: Box::new(facilities),
            addresses: Box::new(addresses),
        })
    }
}
