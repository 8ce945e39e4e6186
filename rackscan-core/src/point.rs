//! Geographic sample points probed against the facility-search API.

use geo::{Coord, Point};

/// A single grid coordinate.
///
/// Coordinates are WGS84 degrees. Conversions to `geo` types use
/// `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use rackscan_core::SamplePoint;
///
/// let point = SamplePoint::new(1.3, 103.8);
/// assert_eq!(point.coord(), Coord { x: 103.8, y: 1.3 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplePoint {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl SamplePoint {
    /// Construct a point from latitude and longitude, in that order.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// The point as a `geo` coordinate.
    #[must_use]
    pub const fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }
}

impl From<Coord<f64>> for SamplePoint {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

impl From<SamplePoint> for Point<f64> {
    fn from(point: SamplePoint) -> Self {
        Self::from(point.coord())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn coord_round_trips_axes() {
        let point = SamplePoint::from(Coord { x: 103.8, y: 1.35 });
        assert_eq!(point.latitude, 1.35);
        assert_eq!(point.longitude, 103.8);
        assert_eq!(Point::from(point), Point::new(103.8, 1.35));
    }
}
