use crate::decode::Format;

use super::error::SpecError;
use super::layout;

/// Split `start,end_or_count,format` into its three fields.
///
/// Fields are trimmed; empty fields and any field count other than three
/// are rejected.
pub fn split_fields(spec: &str) -> Result<[&str; layout::FIELD_COUNT], SpecError> {
    let malformed = || SpecError::MalformedSpec {
        spec: spec.to_string(),
    };
    let fields: Vec<&str> = spec.split(layout::FIELD_SEPARATOR).map(str::trim).collect();
    if fields.iter().any(|field| field.is_empty()) {
        return Err(malformed());
    }
    <[&str; layout::FIELD_COUNT]>::try_from(fields).map_err(|_| malformed())
}

/// Read a decimal register number or count.
///
/// Values are limited to the `i32` range so later arithmetic cannot overflow.
pub fn read_integer(token: &str) -> Result<i64, SpecError> {
    token
        .trim()
        .parse::<i32>()
        .map(i64::from)
        .map_err(|_| SpecError::InvalidNumber {
            token: token.to_string(),
        })
}

/// Resolve a format from the first character of its token.
pub fn read_format(token: &str) -> Result<Format, SpecError> {
    token
        .trim()
        .chars()
        .next()
        .and_then(Format::from_letter)
        .ok_or_else(|| SpecError::InvalidFormat {
            token: token.to_string(),
        })
}
