//! Write canonical records as JSON or CSV.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use rackscan_core::FacilityRecord;
use thiserror::Error;

/// Column order of CSV output.
pub const CSV_HEADER: [&str; 6] = [
    "description",
    "latitude",
    "longitude",
    "rack_type",
    "rack_count",
    "has_shelter",
];

/// Output encodings supported by [`write_records`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pretty-printed JSON array.
    #[default]
    Json,
    /// Comma-separated values with a header row.
    Csv,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Csv => "csv",
        })
    }
}

/// Returned when parsing an unknown format name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown export format {0:?}, expected \"json\" or \"csv\"")]
pub struct UnknownFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownFormat;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(UnknownFormat(value.to_owned())),
        }
    }
}

/// Errors raised while writing records.
#[derive(Debug, Error)]
pub enum ExportError {
    /// JSON serialisation failed.
    #[error("failed to write JSON output: {0}")]
    Json(#[from] serde_json::Error),
    /// CSV serialisation failed.
    #[error("failed to write CSV output: {0}")]
    Csv(#[from] csv::Error),
    /// The underlying writer failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Serialise `records` to `writer` in `format`.
///
/// JSON output is a single pretty-printed array followed by a newline. CSV
/// output always starts with [`CSV_HEADER`], even when `records` is empty.
///
/// # Examples
/// ```
/// use rackscan_core::FacilityRecord;
/// use rackscan_data::export::{ExportFormat, write_records};
///
/// let record = FacilityRecord {
///     description: "blk 1 (yellow box)".into(),
///     latitude: 1.3,
///     longitude: 103.8,
///     rack_type: "yellow box".into(),
///     rack_count: 4,
///     has_shelter: true,
/// };
/// let mut out = Vec::new();
/// write_records(&mut out, &[record], ExportFormat::Csv)?;
/// let text = String::from_utf8(out)?;
/// assert!(text.starts_with("description,latitude,longitude"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_records<W>(
    mut writer: W,
    records: &[FacilityRecord],
    format: ExportFormat,
) -> Result<(), ExportError>
where
    W: Write,
{
    match format {
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, records)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        ExportFormat::Csv => {
            let mut csv_writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(writer);
            csv_writer.write_record(CSV_HEADER)?;
            for record in records {
                csv_writer.serialize(record)?;
            }
            csv_writer.flush()?;
        }
    }
    log::info!("wrote {} records as {format}", records.len());
    Ok(())
}
