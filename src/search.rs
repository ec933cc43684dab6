//! VIN lookup against the record store
use crate::catalog::VehicleRecord;
use crate::error::LookupError;

/// Trim surrounding whitespace from raw input. `None` when nothing is left.
pub fn normalize_input(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Find the record whose identifier equals `input`, ignoring ASCII case.
///
/// Blank input (empty or whitespace only) is rejected as
/// [`LookupError::EmptyInput`]. Records are checked in order and the first
/// match wins; identifiers are unique so order only matters for
/// performance.
pub fn search<'a, I>(input: &str, records: I) -> Result<&'a VehicleRecord, LookupError>
where
    I: IntoIterator<Item = &'a VehicleRecord>,
{
    let needle = normalize_input(input).ok_or(LookupError::EmptyInput)?;

    records
        .into_iter()
        .find(|record| record.identifier.eq_ignore_ascii_case(needle))
        .ok_or(LookupError::NotFound)
}
