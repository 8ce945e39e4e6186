#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
//! Behavioural tests for loading GeoJSON boundaries and sampling them.

use std::cell::RefCell;

use camino::Utf8PathBuf;
use geo::{Coord, Polygon};
use rackscan_core::{GridSpec, SamplePoint, generate_grid};
use rackscan_data::{BoundarySourceError, load_boundary};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// World state for boundary scenarios.
#[derive(Debug, Default)]
struct BoundaryWorld {
    path: RefCell<Option<Utf8PathBuf>>,
    boundary: RefCell<Option<Result<Polygon<f64>, BoundarySourceError>>>,
    points: RefCell<Vec<SamplePoint>>,
}

#[fixture]
fn world() -> BoundaryWorld {
    BoundaryWorld::default()
}

fn fixture_path(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[given("the boundary file {name}")]
fn boundary_file(world: &BoundaryWorld, name: String) {
    world
        .path
        .replace(Some(fixture_path(name.trim_matches('"'))));
}

#[when("I load the boundary")]
fn load(world: &BoundaryWorld) {
    let path = world.path.borrow();
    let result = load_boundary(path.as_ref().expect("path must be set"));
    world.boundary.replace(Some(result));
}

#[when("I sample it with a {lon_count} by {lat_count} lattice at spacing {spacing}")]
fn sample(world: &BoundaryWorld, lon_count: u32, lat_count: u32, spacing: f64) {
    let boundary = world.boundary.borrow();
    let polygon = boundary
        .as_ref()
        .expect("boundary must be loaded")
        .as_ref()
        .expect("boundary should be valid");
    let spec = GridSpec::new(Coord { x: 0.0, y: 0.0 }, spacing, lon_count, lat_count);
    world
        .points
        .replace(generate_grid(polygon, &spec).expect("valid lattice"));
}

#[then("the sample count is {count}")]
fn sample_count(world: &BoundaryWorld, count: usize) {
    assert_eq!(world.points.borrow().len(), count);
}

#[then("loading fails because a ring is not closed")]
fn open_ring(world: &BoundaryWorld) {
    let result = world.boundary.borrow();
    assert!(
        matches!(
            result.as_ref(),
            Some(Err(BoundarySourceError::OpenRing { ring: 0 }))
        ),
        "expected OpenRing, got {result:?}"
    );
}

#[then("loading fails because the file cannot be read")]
fn unreadable(world: &BoundaryWorld) {
    let result = world.boundary.borrow();
    assert!(
        matches!(result.as_ref(), Some(Err(BoundarySourceError::Read { .. }))),
        "expected Read error, got {result:?}"
    );
}

#[scenario(path = "tests/features/boundary.feature", index = 0)]
fn unit_square_boundary(world: BoundaryWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/boundary.feature", index = 1)]
fn multipolygon_boundary(world: BoundaryWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/boundary.feature", index = 2)]
fn open_ring_rejected(world: BoundaryWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/boundary.feature", index = 3)]
fn missing_file_rejected(world: BoundaryWorld) {
    let _ = world;
}
