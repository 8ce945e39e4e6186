//! Load the sampling boundary from a GeoJSON document.
//!
//! The document may be a `FeatureCollection`, a single `Feature` or a bare
//! geometry. The geometry of the first feature is used: a `Polygon` is taken
//! as-is and a `MultiPolygon` contributes its first polygon.

use camino::{Utf8Path, Utf8PathBuf};
use geo::{Coord, LineString, Polygon};
use geojson::{GeoJson, Geometry, Value};
use thiserror::Error;

/// Minimum number of positions in a closed linear ring.
const MIN_RING_POSITIONS: usize = 4;

/// Errors raised while loading a boundary.
#[derive(Debug, Error)]
pub enum BoundarySourceError {
    /// The boundary file could not be read.
    #[error("failed to read boundary file {path}: {source}")]
    Read {
        /// Path that was read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid GeoJSON.
    #[error("boundary is not valid GeoJSON: {source}")]
    Parse {
        /// Underlying GeoJSON error.
        #[source]
        source: Box<geojson::Error>,
    },
    /// The document contains no geometry.
    #[error("boundary document contains no geometry")]
    MissingGeometry,
    /// The first geometry is neither a polygon nor a multipolygon.
    #[error("boundary geometry must be a Polygon or MultiPolygon, got {kind}")]
    UnsupportedGeometry {
        /// GeoJSON type of the rejected geometry.
        kind: &'static str,
    },
    /// A polygon had no rings at all.
    #[error("boundary polygon has no exterior ring")]
    MissingExterior,
    /// A ring has too few positions to enclose an area.
    #[error("boundary ring {ring} has {positions} positions, at least 4 are required")]
    ShortRing {
        /// Ring index; 0 is the exterior.
        ring: usize,
        /// Number of positions found.
        positions: usize,
    },
    /// A ring does not end where it starts.
    #[error("boundary ring {ring} is not closed")]
    OpenRing {
        /// Ring index; 0 is the exterior.
        ring: usize,
    },
    /// A position lacks a longitude or latitude, or one is not finite.
    #[error("boundary ring {ring} position {position} is not a finite (longitude, latitude) pair")]
    InvalidPosition {
        /// Ring index; 0 is the exterior.
        ring: usize,
        /// Position index within the ring.
        position: usize,
    },
}

/// Read and parse the boundary at `path`.
///
/// # Errors
///
/// Returns [`BoundarySourceError`] when the file is unreadable or does not
/// describe a usable polygon.
pub fn load_boundary(path: &Utf8Path) -> Result<Polygon<f64>, BoundarySourceError> {
    let text = rackscan_fs::read_to_string(path).map_err(|source| BoundarySourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let boundary = parse_boundary(&text)?;
    log::info!(
        "loaded boundary from {path} ({} exterior positions, {} holes)",
        boundary.exterior().0.len(),
        boundary.interiors().len()
    );
    Ok(boundary)
}

/// Parse a boundary polygon from GeoJSON text.
///
/// # Examples
/// ```
/// use rackscan_data::boundary::parse_boundary;
///
/// let text = r#"{"type": "Polygon", "coordinates": [[[0,0],[0,1],[1,1],[1,0],[0,0]]]}"#;
/// let boundary = parse_boundary(text)?;
/// assert_eq!(boundary.exterior().0.len(), 5);
/// # Ok::<(), rackscan_data::boundary::BoundarySourceError>(())
/// ```
pub fn parse_boundary(text: &str) -> Result<Polygon<f64>, BoundarySourceError> {
    let document: GeoJson = text.parse().map_err(|source| BoundarySourceError::Parse {
        source: Box::new(source),
    })?;
    let geometry = first_geometry(document).ok_or(BoundarySourceError::MissingGeometry)?;
    let rings = match geometry.value {
        Value::Polygon(rings) => rings,
        Value::MultiPolygon(polygons) => polygons
            .into_iter()
            .next()
            .ok_or(BoundarySourceError::MissingExterior)?,
        other => {
            return Err(BoundarySourceError::UnsupportedGeometry {
                kind: geometry_kind(&other),
            });
        }
    };
    polygon_from_rings(rings)
}

fn first_geometry(document: GeoJson) -> Option<Geometry> {
    match document {
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .next()
            .and_then(|feature| feature.geometry),
        GeoJson::Feature(feature) => feature.geometry,
        GeoJson::Geometry(geometry) => Some(geometry),
    }
}

const fn geometry_kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn polygon_from_rings(rings: Vec<Vec<Vec<f64>>>) -> Result<Polygon<f64>, BoundarySourceError> {
    let mut converted = rings
        .into_iter()
        .enumerate()
        .map(|(ring, positions)| line_string(ring, positions));
    let exterior = converted
        .next()
        .ok_or(BoundarySourceError::MissingExterior)??;
    let interiors = converted.collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn line_string(ring: usize, positions: Vec<Vec<f64>>) -> Result<LineString<f64>, BoundarySourceError> {
    if positions.len() < MIN_RING_POSITIONS {
        return Err(BoundarySourceError::ShortRing {
            ring,
            positions: positions.len(),
        });
    }
    let coords = positions
        .into_iter()
        .enumerate()
        .map(|(position, ordinates)| match ordinates.as_slice() {
            [x, y, ..] if x.is_finite() && y.is_finite() => Ok(Coord { x: *x, y: *y }),
            _ => Err(BoundarySourceError::InvalidPosition { ring, position }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    let line = LineString::new(coords);
    if !line.is_closed() {
        return Err(BoundarySourceError::OpenRing { ring });
    }
    Ok(line)
}
