//! Sequential per-point facility fetching.

use thiserror::Error;

use crate::{FacilitySource, RawFacilityBatch, SamplePoint, SourceError};

/// A facility request failed; the fetch was abandoned at this point.
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "failed to fetch facilities for sample point {index} ({}, {}): {source}",
    .point.latitude,
    .point.longitude
)]
pub struct FetchError {
    /// Position of the failing point in the input sequence.
    pub index: usize,
    /// The failing point.
    pub point: SamplePoint,
    /// Underlying source failure.
    #[source]
    pub source: SourceError,
}

/// Query `source` once per point, in order, keeping only non-empty batches.
///
/// Requests are issued one at a time. The first failure aborts the fetch and
/// is returned; batches gathered before it are discarded with it.
///
/// # Examples
/// ```
/// use rackscan_core::{FacilitySource, RawFacility, RawFacilityBatch, SamplePoint, SourceError, fetch_all};
///
/// struct EveryOther;
///
/// impl FacilitySource for EveryOther {
///     fn facilities_near(&self, point: &SamplePoint) -> Result<RawFacilityBatch, SourceError> {
///         Ok(if point.latitude > 0.5 { vec![RawFacility::default()] } else { Vec::new() })
///     }
/// }
///
/// let points = [SamplePoint::new(0.0, 0.0), SamplePoint::new(1.0, 0.0)];
/// let batches = fetch_all(&points, &EveryOther)?;
/// assert_eq!(batches.len(), 1);
/// # Ok::<(), rackscan_core::FetchError>(())
/// ```
pub fn fetch_all<S>(points: &[SamplePoint], source: &S) -> Result<Vec<RawFacilityBatch>, FetchError>
where
    S: FacilitySource + ?Sized,
{
    let total = points.len();
    let mut batches = Vec::new();
    for (index, point) in points.iter().enumerate() {
        let batch = source
            .facilities_near(point)
            .map_err(|source_error| FetchError {
                index,
                point: *point,
                source: source_error,
            })?;
        log::info!(
            "point {}/{total} ({}, {}): {} facilities",
            index + 1,
            point.latitude,
            point.longitude,
            batch.len()
        );
        if !batch.is_empty() {
            batches.push(batch);
        }
    }
    Ok(batches)
}

#[cfg(test)]
mod tests {
    #![expect(clippy::expect_used, reason = "tests use expect for readable failures")]
    #![expect(
        clippy::indexing_slicing,
        reason = "tests index into results whose length they assert"
    )]

    use super::*;
    use crate::RawFacility;
    use crate::test_support::StubFacilitySource;
    use rstest::rstest;

    fn facility(description: &str) -> RawFacility {
        RawFacility {
            description: Some(description.to_owned()),
            ..RawFacility::default()
        }
    }

    #[rstest]
    fn drops_empty_batches_and_keeps_order() {
        let points = [
            SamplePoint::new(1.0, 1.0),
            SamplePoint::new(2.0, 2.0),
            SamplePoint::new(3.0, 3.0),
        ];
        let source = StubFacilitySource::default()
            .with_batch(points[0], vec![facility("first")])
            .with_batch(points[2], vec![facility("third")]);

        let batches = fetch_all(&points, &source).expect("fetch should succeed");

        assert_eq!(batches, vec![vec![facility("first")], vec![facility("third")]]);
        assert_eq!(source.requests(), points.to_vec());
    }

    #[rstest]
    fn aborts_on_first_failure() {
        let points = [
            SamplePoint::new(1.0, 1.0),
            SamplePoint::new(2.0, 2.0),
            SamplePoint::new(3.0, 3.0),
        ];
        let failure = SourceError::HttpError {
            url: "http://example.com".into(),
            status: 500,
            message: "boom".into(),
        };
        let source = StubFacilitySource::default().with_error(points[1], failure.clone());

        let err = fetch_all(&points, &source).expect_err("fetch should fail");

        assert_eq!(err.index, 1);
        assert_eq!(err.point, points[1]);
        assert_eq!(err.source, failure);
        assert_eq!(source.requests().len(), 2, "no request after the failure");
    }

    #[rstest]
    fn empty_input_issues_no_requests() {
        let source = StubFacilitySource::default();
        let batches = fetch_all(&[], &source).expect("fetch should succeed");
        assert!(batches.is_empty());
        assert!(source.requests().is_empty());
    }
}
