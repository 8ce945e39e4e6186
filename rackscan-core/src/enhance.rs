//! Expand bare block numbers into readable place descriptions.
//!
//! Many facilities are described only by a block number such as `"12345-01"`.
//! For those, the numeric prefix is zero-padded to six characters and looked
//! up through an [`AddressLookup`]; the first candidate becomes the new
//! description. Lookups are best effort: any failure leaves the original
//! description in place.
//!
//! After the lookups every description, enhanced or not, is lower-cased and
//! has its abbreviations expanded by [`normalize_description`].

use thiserror::Error;

use crate::{AddressInfo, AddressLookup, FacilityRecord, SourceError};

/// Width that short identifiers are zero-padded to.
pub const IDENTIFIER_WIDTH: usize = 6;

/// Placeholder the address service uses for empty fields.
const NIL: &str = "NIL";

/// Why a bare identifier could not be expanded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnhancementError {
    /// The numeric prefix does not fit in an unsigned 64-bit integer.
    #[error("identifier {identifier:?} is too large to look up")]
    IdentifierOverflow {
        /// The digits that failed to parse.
        identifier: String,
    },
    /// The address lookup itself failed.
    #[error("address lookup for {query:?} failed: {source}")]
    Lookup {
        /// Padded identifier sent to the service.
        query: String,
        /// Underlying source failure.
        #[source]
        source: SourceError,
    },
    /// The lookup succeeded but returned no candidates.
    #[error("address lookup for {query:?} returned no results")]
    NoResults {
        /// Padded identifier sent to the service.
        query: String,
    },
    /// The best candidate lacked a field needed for the description.
    #[error("address candidate is missing {field}")]
    MissingField {
        /// Upstream name of the missing field.
        field: &'static str,
    },
}

/// Records produced by [`enhance`] and how the lookups fared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnhanceOutcome {
    /// All input records, in input order, with normalized descriptions.
    pub records: Vec<FacilityRecord>,
    /// Number of descriptions replaced by a looked-up address.
    pub enhanced: usize,
    /// Lookups that failed and fell back to the original description.
    pub fallbacks: Vec<EnhancementError>,
}

/// Return the numeric prefix of a bare-identifier description.
///
/// A description is bare when the text before its first `-`, or failing that
/// the text before its first `.`, is a non-empty run of ASCII digits.
///
/// ```
/// use rackscan_core::bare_identifier;
///
/// assert_eq!(bare_identifier("12345-01"), Some("12345"));
/// assert_eq!(bare_identifier("123.45"), Some("123"));
/// assert_eq!(bare_identifier("ABC-01"), None);
/// ```
#[must_use]
pub fn bare_identifier(description: &str) -> Option<&str> {
    [prefix_before(description, '-'), prefix_before(description, '.')]
        .into_iter()
        .find(|prefix| is_numeric(prefix))
}

fn prefix_before(text: &str, separator: char) -> &str {
    text.split_once(separator).map_or(text, |(head, _)| head)
}

fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|ch| ch.is_ascii_digit())
}

/// Render digits as an integer, left-padded with zeros to six characters.
///
/// Leading zeros in the input are dropped before padding, and renderings of
/// six or more characters are returned unchanged.
///
/// ```
/// use rackscan_core::padded_identifier;
///
/// assert_eq!(padded_identifier("123")?, "000123");
/// assert_eq!(padded_identifier("1234567")?, "1234567");
/// # Ok::<(), rackscan_core::EnhancementError>(())
/// ```
pub fn padded_identifier(digits: &str) -> Result<String, EnhancementError> {
    let value: u64 = digits
        .parse()
        .map_err(|_| EnhancementError::IdentifierOverflow {
            identifier: digits.to_owned(),
        })?;
    Ok(format!("{value:0>width$}", width = IDENTIFIER_WIDTH))
}

/// Query `lookup` for `query` and return the best candidate.
pub fn lookup_address<L>(lookup: &L, query: &str) -> Result<AddressInfo, EnhancementError>
where
    L: AddressLookup + ?Sized,
{
    let candidates = lookup
        .search(query)
        .map_err(|source| EnhancementError::Lookup {
            query: query.to_owned(),
            source,
        })?;
    candidates
        .into_iter()
        .next()
        .ok_or_else(|| EnhancementError::NoResults {
            query: query.to_owned(),
        })
}

/// Build the display text for an address candidate.
///
/// `"{building}, {block} {road}"` when a building name is present, otherwise
/// `"{block} {road}"`. Fields spelled `"NIL"` count as empty.
pub fn format_address(address: &AddressInfo) -> Result<String, EnhancementError> {
    let building = field(address.building.as_deref(), "BUILDING")?;
    let block = field(address.block.as_deref(), "BLK_NO")?;
    let road = field(address.road.as_deref(), "ROAD_NAME")?;
    Ok(if building.is_empty() {
        format!("{block} {road}")
    } else {
        format!("{building}, {block} {road}")
    })
}

fn field<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, EnhancementError> {
    let present = value.ok_or(EnhancementError::MissingField { field: name })?;
    Ok(if present == NIL { "" } else { present })
}

/// Replace the description of `record` with a looked-up address.
///
/// On any error the record is returned untouched alongside the error.
#[must_use]
pub fn apply_address(
    record: FacilityRecord,
    address: Result<AddressInfo, EnhancementError>,
) -> (FacilityRecord, Option<EnhancementError>) {
    match address.and_then(|candidate| format_address(&candidate)) {
        Ok(description) => (
            FacilityRecord {
                description,
                ..record
            },
            None,
        ),
        Err(error) => (record, Some(error)),
    }
}

/// Lower-case a description and expand its abbreviations.
///
/// ```
/// assert_eq!(
///     rackscan_core::normalize_description("Block 123_yb"),
///     "blk 123 (yellow box)"
/// );
/// ```
#[must_use]
pub fn normalize_description(description: &str) -> String {
    description
        .to_lowercase()
        .replace("_yb", " (yellow box)")
        .replace("block", "blk")
}

/// Expand bare-identifier descriptions, then normalize every description.
///
/// Lookups run one record at a time, in input order. Records are never
/// dropped or reordered.
pub fn enhance<L>(records: Vec<FacilityRecord>, lookup: &L) -> EnhanceOutcome
where
    L: AddressLookup + ?Sized,
{
    let mut outcome = EnhanceOutcome::default();
    let mut expanded = Vec::with_capacity(records.len());
    for record in records {
        let Some(identifier) = bare_identifier(&record.description).map(padded_identifier) else {
            expanded.push(record);
            continue;
        };
        let address = identifier.and_then(|query| lookup_address(lookup, &query));
        let (updated, error) = apply_address(record, address);
        match error {
            Some(fallback) => {
                log::warn!(
                    "keeping description {:?}: {fallback}",
                    updated.description
                );
                outcome.fallbacks.push(fallback);
            }
            None => outcome.enhanced += 1,
        }
        expanded.push(updated);
    }
    outcome.records = expanded
        .into_iter()
        .map(|record| FacilityRecord {
            description: normalize_description(&record.description),
            ..record
        })
        .collect();
    outcome
}
