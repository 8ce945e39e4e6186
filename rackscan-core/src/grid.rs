//! Regular sampling lattices clipped to a boundary polygon.
//!
//! The lattice advances longitude from the origin in steps of `spacing` for
//! `lon_count` columns and latitude in the same steps for `lat_count` rows.
//! Candidates are emitted row by row (latitude-major, longitude-minor) and
//! only those strictly inside the boundary are kept.
//!
//! Containment is exclusive: a point lying exactly on an edge or vertex of the
//! boundary, or inside one of its holes, is not sampled. This is the semantics
//! of [`geo::Contains`] for a polygon and a point.

use geo::{Contains, Coord, Point, Polygon};
use thiserror::Error;

use crate::SamplePoint;

/// Longitude of the default lattice origin, in degrees east.
pub const DEFAULT_ORIGIN_LON: f64 = 103.6081;
/// Latitude of the default lattice origin, in degrees north.
pub const DEFAULT_ORIGIN_LAT: f64 = 1.1607;
/// Default step between neighbouring candidates, roughly 500 m at the equator.
pub const DEFAULT_SPACING: f64 = 0.005;
/// Default number of lattice columns.
pub const DEFAULT_LON_COUNT: u32 = 100;
/// Default number of lattice rows.
pub const DEFAULT_LAT_COUNT: u32 = 70;

/// Parameters describing a rectangular sampling lattice.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use rackscan_core::GridSpec;
///
/// let spec = GridSpec::new(Coord { x: 0.0, y: 0.0 }, 0.5, 3, 3);
/// assert_eq!(spec.candidates().count(), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpec {
    /// South-west corner of the lattice (`x = longitude`, `y = latitude`).
    pub origin: Coord<f64>,
    /// Step between neighbouring candidates on both axes, in degrees.
    pub spacing: f64,
    /// Number of columns along the longitude axis.
    pub lon_count: u32,
    /// Number of rows along the latitude axis.
    pub lat_count: u32,
}

/// Errors returned by [`GridSpec::validate`] and [`generate_grid`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridSpecError {
    /// The spacing was zero, negative, or not finite.
    #[error("grid spacing must be a positive finite number, got {spacing}")]
    InvalidSpacing {
        /// Rejected spacing value.
        spacing: f64,
    },
    /// The origin contained a non-finite ordinate.
    #[error("grid origin must be finite, got ({lon}, {lat})")]
    InvalidOrigin {
        /// Rejected origin longitude.
        lon: f64,
        /// Rejected origin latitude.
        lat: f64,
    },
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            origin: Coord {
                x: DEFAULT_ORIGIN_LON,
                y: DEFAULT_ORIGIN_LAT,
            },
            spacing: DEFAULT_SPACING,
            lon_count: DEFAULT_LON_COUNT,
            lat_count: DEFAULT_LAT_COUNT,
        }
    }
}

impl GridSpec {
    /// Construct a lattice description without validating it.
    #[must_use]
    pub const fn new(origin: Coord<f64>, spacing: f64, lon_count: u32, lat_count: u32) -> Self {
        Self {
            origin,
            spacing,
            lon_count,
            lat_count,
        }
    }

    /// Check that the spacing and origin describe a usable lattice.
    pub fn validate(&self) -> Result<(), GridSpecError> {
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(GridSpecError::InvalidSpacing {
                spacing: self.spacing,
            });
        }
        if !(self.origin.x.is_finite() && self.origin.y.is_finite()) {
            return Err(GridSpecError::InvalidOrigin {
                lon: self.origin.x,
                lat: self.origin.y,
            });
        }
        Ok(())
    }

    /// Every lattice candidate in generation order, before clipping.
    pub fn candidates(&self) -> impl Iterator<Item = SamplePoint> + '_ {
        (0..self.lat_count).flat_map(move |row| {
            let latitude = self.step(self.origin.y, row);
            (0..self.lon_count)
                .map(move |column| SamplePoint::new(latitude, self.step(self.origin.x, column)))
        })
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "lattice ordinates are offsets from the origin"
    )]
    fn step(&self, start: f64, index: u32) -> f64 {
        start + f64::from(index) * self.spacing
    }
}

/// Generate the sampling points of `spec` lying strictly inside `boundary`.
///
/// The output preserves lattice order and is identical for identical inputs.
///
/// # Examples
/// ```
/// use geo::{Coord, LineString, Polygon};
/// use rackscan_core::{GridSpec, SamplePoint, generate_grid};
///
/// let square = Polygon::new(
///     LineString::from(vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]),
///     vec![],
/// );
/// let spec = GridSpec::new(Coord { x: 0.0, y: 0.0 }, 0.5, 3, 3);
/// let points = generate_grid(&square, &spec)?;
/// assert_eq!(points, vec![SamplePoint::new(0.5, 0.5)]);
/// # Ok::<(), rackscan_core::GridSpecError>(())
/// ```
pub fn generate_grid(
    boundary: &Polygon<f64>,
    spec: &GridSpec,
) -> Result<Vec<SamplePoint>, GridSpecError> {
    spec.validate()?;
    let points: Vec<SamplePoint> = spec
        .candidates()
        .filter(|candidate| boundary.contains(&Point::from(*candidate)))
        .collect();
    log::info!(
        "sampled {} of {} lattice candidates inside the boundary",
        points.len(),
        u64::from(spec.lon_count) * u64::from(spec.lat_count)
    );
    Ok(points)
}
