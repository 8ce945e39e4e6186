//! End-to-end composition of the sampling, fetching, normalizing and
//! enhancing stages.
//!
//! Each stage consumes what the previous one produced; nothing is shared
//! between stages. Grid and fetch failures abort the run, malformed entries
//! and failed address lookups are reported in the [`ScrapeReport`].

use geo::Polygon;
use thiserror::Error;

use crate::{
    AddressLookup, EnhancementError, FacilityRecord, FacilitySource, FetchError, GridSpec,
    GridSpecError, MalformedRecordError, SamplePoint, enhance, fetch_all, generate_grid, normalize,
};

/// Errors that abort a [`Pipeline::run`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The grid parameters were unusable.
    #[error(transparent)]
    Grid(#[from] GridSpecError),
    /// A facility request failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Final records of a run and what happened along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapeReport {
    /// Canonical records in first-occurrence order.
    pub records: Vec<FacilityRecord>,
    /// Number of grid points queried.
    pub points_sampled: usize,
    /// Number of points that reported at least one facility.
    pub batches_fetched: usize,
    /// Batches skipped during normalization.
    pub malformed: Vec<MalformedRecordError>,
    /// Number of descriptions replaced by looked-up addresses.
    pub enhanced: usize,
    /// Address lookups that fell back to the original description.
    pub fallbacks: Vec<EnhancementError>,
}

/// A configured scrape over one boundary.
///
/// # Examples
/// ```
/// use geo::{Coord, polygon};
/// use rackscan_core::{
///     AddressInfo, AddressLookup, FacilitySource, GridSpec, Pipeline, RawFacilityBatch,
///     SamplePoint, SourceError,
/// };
///
/// struct NoFacilities;
///
/// impl FacilitySource for NoFacilities {
///     fn facilities_near(&self, _point: &SamplePoint) -> Result<RawFacilityBatch, SourceError> {
///         Ok(Vec::new())
///     }
/// }
///
/// struct NoAddresses;
///
/// impl AddressLookup for NoAddresses {
///     fn search(&self, _query: &str) -> Result<Vec<AddressInfo>, SourceError> {
///         Ok(Vec::new())
///     }
/// }
///
/// let boundary = polygon![(x: 0.0, y: 0.0), (x: 0.0, y: 1.0), (x: 1.0, y: 1.0), (x: 1.0, y: 0.0)];
/// let pipeline = Pipeline::new(boundary, GridSpec::new(Coord { x: 0.0, y: 0.0 }, 0.5, 3, 3));
/// let report = pipeline.run(&NoFacilities, &NoAddresses)?;
/// assert_eq!(report.points_sampled, 1);
/// assert!(report.records.is_empty());
/// # Ok::<(), rackscan_core::PipelineError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    boundary: Polygon<f64>,
    grid: GridSpec,
}

impl Pipeline {
    /// Create a pipeline sampling `grid` inside `boundary`.
    #[must_use]
    pub const fn new(boundary: Polygon<f64>, grid: GridSpec) -> Self {
        Self { boundary, grid }
    }

    /// The boundary that sample points are clipped to.
    #[must_use]
    pub const fn boundary(&self) -> &Polygon<f64> {
        &self.boundary
    }

    /// The lattice parameters.
    #[must_use]
    pub const fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Generate the sample points without querying anything.
    pub fn sample_points(&self) -> Result<Vec<SamplePoint>, GridSpecError> {
        generate_grid(&self.boundary, &self.grid)
    }

    /// Run every stage and collect the resulting records.
    pub fn run<F, A>(&self, facilities: &F, addresses: &A) -> Result<ScrapeReport, PipelineError>
    where
        F: FacilitySource + ?Sized,
        A: AddressLookup + ?Sized,
    {
        let points = self.sample_points()?;
        let points_sampled = points.len();

        let batches = fetch_all(&points, facilities)?;
        let batches_fetched = batches.len();
        log::info!("{batches_fetched} of {points_sampled} sample points reported facilities");

        let normalized = normalize(batches);
        log::info!(
            "normalized {} unique facilities ({} malformed batches skipped)",
            normalized.records.len(),
            normalized.skipped.len()
        );

        let enhanced = enhance(normalized.records, addresses);
        log::info!(
            "enhanced {} descriptions ({} lookups fell back)",
            enhanced.enhanced,
            enhanced.fallbacks.len()
        );

        Ok(ScrapeReport {
            records: enhanced.records,
            points_sampled,
            batches_fetched,
            malformed: normalized.skipped,
            enhanced: enhanced.enhanced,
            fallbacks: enhanced.fallbacks,
        })
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::expect_used, reason = "tests use expect for readable failures")]

    use super::*;
    use crate::test_support::{StubAddressLookup, StubFacilitySource, address};
    use crate::{RawFacility, SourceError};
    use geo::{Coord, polygon};
    use rstest::{fixture, rstest};

    #[fixture]
    fn pipeline() -> Pipeline {
        let boundary = polygon![
            (x: 0.0, y: 0.0),
            (x: 0.0, y: 2.0),
            (x: 2.0, y: 2.0),
            (x: 2.0, y: 0.0),
        ];
        Pipeline::new(boundary, GridSpec::new(Coord { x: 0.0, y: 0.0 }, 0.5, 5, 5))
    }

    fn raw(description: &str, latitude: f64, longitude: f64) -> RawFacility {
        RawFacility {
            description: Some(description.into()),
            latitude: Some(latitude),
            longitude: Some(longitude),
            rack_type: Some("YELLOW_BOX".into()),
            rack_count: Some(6),
            shelter_indicator: Some("Y".into()),
        }
    }

    #[rstest]
    fn runs_every_stage_in_order(pipeline: Pipeline) {
        let facilities = StubFacilitySource::default()
            .with_batch(SamplePoint::new(0.5, 0.5), vec![raw("100-01", 0.51, 0.52)])
            .with_batch(SamplePoint::new(0.5, 1.0), vec![raw("Block 7_YB", 0.6, 1.1)])
            .with_batch(SamplePoint::new(1.0, 0.5), vec![raw("Duplicate", 0.51, 0.52)])
            .with_batch(SamplePoint::new(1.5, 1.5), vec![RawFacility::default()]);
        let addresses =
            StubAddressLookup::default().with_address("000100", address("NIL", "100", "MAIN ST"));

        let report = pipeline.run(&facilities, &addresses).expect("run succeeds");

        assert_eq!(report.points_sampled, 9);
        assert_eq!(report.batches_fetched, 4);
        assert_eq!(report.malformed.len(), 1);
        assert_eq!(report.enhanced, 1);
        assert!(report.fallbacks.is_empty());
        let descriptions: Vec<_> = report
            .records
            .iter()
            .map(|record| record.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["100 main st", "blk 7 (yellow box)"]);
        assert!(report.records.iter().all(|record| record.has_shelter));
        assert!(report.records.iter().all(|record| record.rack_type == "yellow box"));
    }

    #[rstest]
    fn fetch_failure_aborts_the_run(pipeline: Pipeline) {
        let facilities = StubFacilitySource::default().with_error(
            SamplePoint::new(0.5, 0.5),
            SourceError::Timeout {
                url: "http://example.com".into(),
                timeout_secs: 30,
            },
        );
        let addresses = StubAddressLookup::default();

        let err = pipeline
            .run(&facilities, &addresses)
            .expect_err("run should fail");

        assert!(matches!(err, PipelineError::Fetch(FetchError { index: 0, .. })));
        assert!(addresses.queries().is_empty());
    }

    #[rstest]
    fn invalid_grid_aborts_before_fetching() {
        let boundary = polygon![(x: 0.0, y: 0.0), (x: 0.0, y: 1.0), (x: 1.0, y: 1.0)];
        let pipeline = Pipeline::new(boundary, GridSpec::new(Coord { x: 0.0, y: 0.0 }, 0.0, 3, 3));
        let facilities = StubFacilitySource::default();

        let err = pipeline
            .run(&facilities, &StubAddressLookup::default())
            .expect_err("run should fail");

        assert!(matches!(err, PipelineError::Grid(_)));
        assert!(facilities.requests().is_empty());
    }
}
