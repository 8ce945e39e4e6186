//! Scrape command implementation for the rackscan CLI.

use std::fmt;
use std::io::{BufWriter, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rackscan_core::{AddressLookup, FacilityRecord, FacilitySource, GridSpec, Pipeline};
use rackscan_data::{
    DEFAULT_ADDRESS_URL, DEFAULT_FACILITY_URL, DEFAULT_TIMEOUT_SECS, ExportFormat,
    HttpAddressLookup, HttpAddressLookupConfig, HttpFacilitySource, HttpFacilitySourceConfig,
    load_boundary, write_records,
};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_SCRAPE_ACCOUNT_KEY, ARG_SCRAPE_ADDRESS_URL, ARG_SCRAPE_BOUNDARY, ARG_SCRAPE_FACILITY_URL,
    ARG_SCRAPE_FORMAT, ARG_SCRAPE_LAT_COUNT, ARG_SCRAPE_LON_COUNT, ARG_SCRAPE_ORIGIN_LAT,
    ARG_SCRAPE_ORIGIN_LON, ARG_SCRAPE_OUTPUT, ARG_SCRAPE_SPACING, ARG_SCRAPE_TIMEOUT_SECS,
    CliError, ENV_SCRAPE_ACCOUNT_KEY, ENV_SCRAPE_BOUNDARY,
};

/// CLI arguments for the `scrape` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "scrape",
    long_about = "Lay a regular lattice over a GeoJSON boundary, query the \
                 facility-search service at every point inside it, then \
                 de-duplicate, normalize and enrich the results before \
                 writing them as JSON or CSV. Options can come from CLI \
                 flags, configuration files, or RACKSCAN_* environment \
                 variables.",
    about = "Collect bicycle parking facilities inside a boundary"
)]
#[ortho_config(prefix = "RACKSCAN")]
pub(crate) struct ScrapeArgs {
    /// Path to the GeoJSON boundary file.
    #[arg(long = ARG_SCRAPE_BOUNDARY, value_name = "path")]
    #[serde(default)]
    pub(crate) boundary: Option<Utf8PathBuf>,
    /// Credential sent in the `AccountKey` header of facility requests.
    #[arg(long = ARG_SCRAPE_ACCOUNT_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) account_key: Option<String>,
    /// Override the facility-search endpoint.
    #[arg(long = ARG_SCRAPE_FACILITY_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) facility_url: Option<String>,
    /// Override the address-search endpoint.
    #[arg(long = ARG_SCRAPE_ADDRESS_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) address_url: Option<String>,
    /// Longitude of the lattice's south-west corner.
    #[arg(long = ARG_SCRAPE_ORIGIN_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) origin_lon: Option<f64>,
    /// Latitude of the lattice's south-west corner.
    #[arg(long = ARG_SCRAPE_ORIGIN_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) origin_lat: Option<f64>,
    /// Distance between neighbouring sample points, in degrees.
    #[arg(long = ARG_SCRAPE_SPACING, value_name = "degrees")]
    #[serde(default)]
    pub(crate) spacing: Option<f64>,
    /// Number of lattice columns along the longitude axis.
    #[arg(long = ARG_SCRAPE_LON_COUNT, value_name = "count")]
    #[serde(default)]
    pub(crate) lon_count: Option<u32>,
    /// Number of lattice rows along the latitude axis.
    #[arg(long = ARG_SCRAPE_LAT_COUNT, value_name = "count")]
    #[serde(default)]
    pub(crate) lat_count: Option<u32>,
    /// Per-request HTTP timeout in seconds.
    #[arg(long = ARG_SCRAPE_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Write records to this file instead of stdout.
    #[arg(long = ARG_SCRAPE_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Output encoding: `json` or `csv`.
    #[arg(long = ARG_SCRAPE_FORMAT, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<String>,
}

impl ScrapeArgs {
    pub(crate) fn into_config(self) -> Result<ScrapeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScrapeConfig::try_from(merged)
    }
}

/// Resolved `scrape` command configuration.
#[derive(Clone, PartialEq)]
pub(crate) struct ScrapeConfig {
    /// Path to the GeoJSON boundary.
    pub(crate) boundary: Utf8PathBuf,
    /// Facility API credential.
    pub(crate) account_key: String,
    /// Facility-search endpoint.
    pub(crate) facility_url: String,
    /// Address-search endpoint.
    pub(crate) address_url: String,
    /// Validated sampling lattice.
    pub(crate) grid: GridSpec,
    /// Per-request HTTP timeout.
    pub(crate) timeout: Duration,
    /// Output file, or `None` for stdout.
    pub(crate) output: Option<Utf8PathBuf>,
    /// Output encoding.
    pub(crate) format: ExportFormat,
}

impl fmt::Debug for ScrapeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrapeConfig")
            .field("boundary", &self.boundary)
            .field("account_key", &"<redacted>")
            .field("facility_url", &self.facility_url)
            .field("address_url", &self.address_url)
            .field("grid", &self.grid)
            .field("timeout", &self.timeout)
            .field("output", &self.output)
            .field("format", &self.format)
            .finish()
    }
}

impl ScrapeConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.boundary, ARG_SCRAPE_BOUNDARY)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match rackscan_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<ScrapeArgs> for ScrapeConfig {
    type Error = CliError;

    fn try_from(args: ScrapeArgs) -> Result<Self, Self::Error> {
        let boundary = args.boundary.ok_or(CliError::MissingArgument {
            field: ARG_SCRAPE_BOUNDARY,
            env: ENV_SCRAPE_BOUNDARY,
        })?;
        let account_key = args.account_key.ok_or(CliError::MissingArgument {
            field: ARG_SCRAPE_ACCOUNT_KEY,
            env: ENV_SCRAPE_ACCOUNT_KEY,
        })?;

        let defaults = GridSpec::default();
        let grid = GridSpec::new(
            Coord {
                x: args.origin_lon.unwrap_or(defaults.origin.x),
                y: args.origin_lat.unwrap_or(defaults.origin.y),
            },
            args.spacing.unwrap_or(defaults.spacing),
            args.lon_count.unwrap_or(defaults.lon_count),
            args.lat_count.unwrap_or(defaults.lat_count),
        );
        grid.validate()?;

        let timeout_secs = args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(CliError::InvalidTimeout {
                field: ARG_SCRAPE_TIMEOUT_SECS,
            });
        }

        let format = args
            .format
            .as_deref()
            .map(str::parse::<ExportFormat>)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            boundary,
            account_key,
            facility_url: args
                .facility_url
                .unwrap_or_else(|| DEFAULT_FACILITY_URL.to_owned()),
            address_url: args
                .address_url
                .unwrap_or_else(|| DEFAULT_ADDRESS_URL.to_owned()),
            grid,
            timeout: Duration::from_secs(timeout_secs),
            output: args.output,
            format,
        })
    }
}

/// The remote services a scrape talks to.
pub(super) struct ScrapeSources {
    pub(super) facilities: Box<dyn FacilitySource>,
    pub(super) addresses: Box<dyn AddressLookup>,
}

/// Builds the facility and address sources for the current scrape invocation.
pub(super) trait ScrapeSourcesBuilder {
    fn build(&self, config: &ScrapeConfig) -> Result<ScrapeSources, CliError>;
}

pub(super) struct DefaultScrapeSourcesBuilder;

impl ScrapeSourcesBuilder for DefaultScrapeSourcesBuilder {
    fn build(&self, config: &ScrapeConfig) -> Result<ScrapeSources, CliError> {
        let facilities = HttpFacilitySource::with_config(
            HttpFacilitySourceConfig::new(config.account_key.clone())
                .with_base_url(config.facility_url.clone())
                .with_timeout(config.timeout),
        )
        .map_err(|source| CliError::BuildSource {
            endpoint: config.facility_url.clone(),
            source,
        })?;
        let addresses = HttpAddressLookup::with_config(
            HttpAddressLookupConfig::new(config.address_url.clone()).with_timeout(config.timeout),
        )
        .map_err(|source| CliError::BuildSource {
            endpoint: config.address_url.clone(),
            source,
        })?;
        Ok(ScrapeSources {
            facilities: Box::new(facilities),
            addresses: Box::new(addresses),
        })
    }
}

pub(super) fn run_scrape(args: ScrapeArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultScrapeSourcesBuilder;
    run_scrape_with(args, &builder, &mut stdout)
}

pub(super) fn run_scrape_with(
    args: ScrapeArgs,
    builder: &dyn ScrapeSourcesBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_scrape_config(args)?;
    let records = execute_scrape(&config, builder)?;
    write_scrape_output(&config, &records, writer)
}

fn resolve_scrape_config(args: ScrapeArgs) -> Result<ScrapeConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_scrape(
    config: &ScrapeConfig,
    builder: &dyn ScrapeSourcesBuilder,
) -> Result<Vec<FacilityRecord>, CliError> {
    let boundary = load_boundary(&config.boundary)?;
    let sources = builder.build(config)?;
    let pipeline = Pipeline::new(boundary, config.grid);
    let report = pipeline.run(&*sources.facilities, &*sources.addresses)?;
    log::info!(
        "scrape finished: {} records from {} sample points, {} malformed batches, {} lookup fallbacks",
        report.records.len(),
        report.points_sampled,
        report.malformed.len(),
        report.fallbacks.len()
    );
    Ok(report.records)
}

fn write_scrape_output(
    config: &ScrapeConfig,
    records: &[FacilityRecord],
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    match &config.output {
        Some(path) => {
            let file = rackscan_fs::create_file(path).map_err(|source| CliError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            write_records(BufWriter::new(file), records, config.format)?;
            log::info!("wrote {path}");
        }
        None => write_records(writer, records, config.format)?,
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ScrapeConfig, CliError> {
    let merged = ScrapeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ScrapeConfig::try_from(merged)
}
