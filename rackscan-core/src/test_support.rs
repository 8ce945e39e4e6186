//! Deterministic in-memory sources used by unit and behaviour tests.
//!
//! Both stubs record the requests they receive so tests can assert on call
//! order and on whether a lookup happened at all.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::{
    AddressInfo, AddressLookup, FacilitySource, LocationKey, RawFacilityBatch, SamplePoint,
    SourceError,
};

/// `FacilitySource` answering from a table keyed by sample point.
///
/// Points without an entry receive an empty batch.
#[derive(Debug, Default)]
pub struct StubFacilitySource {
    responses: HashMap<LocationKey, Result<RawFacilityBatch, SourceError>>,
    requests: RefCell<Vec<SamplePoint>>,
}

impl StubFacilitySource {
    /// Answer `point` with `batch`.
    #[must_use]
    pub fn with_batch(mut self, point: SamplePoint, batch: RawFacilityBatch) -> Self {
        self.responses.insert(key(&point), Ok(batch));
        self
    }

    /// Fail requests for `point` with `error`.
    #[must_use]
    pub fn with_error(mut self, point: SamplePoint, error: SourceError) -> Self {
        self.responses.insert(key(&point), Err(error));
        self
    }

    /// Points queried so far, in call order.
    pub fn requests(&self) -> Vec<SamplePoint> {
        self.requests.borrow().clone()
    }
}

fn key(point: &SamplePoint) -> LocationKey {
    LocationKey::new(point.latitude, point.longitude)
}

impl FacilitySource for StubFacilitySource {
    fn facilities_near(&self, point: &SamplePoint) -> Result<RawFacilityBatch, SourceError> {
        self.requests.borrow_mut().push(*point);
        self.responses
            .get(&key(point))
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// `AddressLookup` answering from a table keyed by query string.
///
/// Unknown queries return no candidates.
#[derive(Debug, Default)]
pub struct StubAddressLookup {
    responses: HashMap<String, Result<Vec<AddressInfo>, SourceError>>,
    queries: RefCell<Vec<String>>,
}

impl StubAddressLookup {
    /// Answer `query` with a single candidate.
    #[must_use]
    pub fn with_address(self, query: impl Into<String>, address: AddressInfo) -> Self {
        self.with_candidates(query, vec![address])
    }

    /// Answer `query` with `candidates`, best match first.
    #[must_use]
    pub fn with_candidates(mut self, query: impl Into<String>, candidates: Vec<AddressInfo>) -> Self {
        self.responses.insert(query.into(), Ok(candidates));
        self
    }

    /// Fail lookups for `query` with `error`.
    #[must_use]
    pub fn with_error(mut self, query: impl Into<String>, error: SourceError) -> Self {
        self.responses.insert(query.into(), Err(error));
        self
    }

    /// Queries received so far, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }
}

impl AddressLookup for StubAddressLookup {
    fn search(&self, query: &str) -> Result<Vec<AddressInfo>, SourceError> {
        self.queries.borrow_mut().push(query.to_owned());
        self.responses
            .get(query)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Build an [`AddressInfo`] from plain strings.
pub fn address(building: &str, block: &str, road: &str) -> AddressInfo {
    AddressInfo {
        building: Some(building.to_owned()),
        block: Some(block.to_owned()),
        road: Some(road.to_owned()),
    }
}
