use super::error::SpecError;
use super::layout;
use super::plan::ReadPlan;
use super::reader::{read_format, read_integer, split_fields};

/// Parse the three register spec fields into a [`ReadPlan`].
///
/// The second field is a count when it is below the start address and an
/// inclusive end address otherwise. For two-register formats an odd count is
/// rounded up before validation. Validation stops at the first failure, in
/// this order: start address, upper bound, count.
///
/// # Examples
/// ```
/// use mbpoll_core::parse;
///
/// let by_count = parse("40001", "10", "u")?;
/// let by_end = parse("40001", "40010", "u")?;
/// assert_eq!(by_count, by_end);
///
/// let rounded = parse("40001", "3", "f")?;
/// assert_eq!(rounded.register_count(), 4);
/// # Ok::<(), mbpoll_core::SpecError>(())
/// ```
///
/// # Errors
/// Returns [`SpecError`] naming the first rule the fields violate.
pub fn parse(
    start_token: &str,
    second_token: &str,
    format_token: &str,
) -> Result<ReadPlan, SpecError> {
    let start = read_integer(start_token)?;
    let second = read_integer(second_token)?;
    let count = if second < start {
        second
    } else {
        second - start + 1
    };

    let format = read_format(format_token)?;
    let count = if format.words_per_value() == 2 && count % 2 != 0 {
        count + 1
    } else {
        count
    };

    validate(start, count)?;
    let start_address =
        u16::try_from(start).map_err(|_| SpecError::InvalidAddress { address: start })?;
    let register_count = u16::try_from(count).map_err(|_| SpecError::InvalidCount { count })?;
    Ok(ReadPlan::new(start_address, register_count, format))
}

/// Parse a `start,end_or_count,format` string.
///
/// # Examples
/// ```
/// use mbpoll_core::{SpecError, parse_csv};
///
/// assert_eq!(parse_csv("49999,1,u")?.register_count(), 1);
/// assert!(matches!(
///     parse_csv("49999,2,u"),
///     Err(SpecError::RangeExceeded { .. })
/// ));
/// # Ok::<(), SpecError>(())
/// ```
///
/// # Errors
/// Returns [`SpecError::MalformedSpec`] when the string does not hold exactly
/// three non-empty fields, otherwise whatever [`parse`] returns.
pub fn parse_csv(spec: &str) -> Result<ReadPlan, SpecError> {
    let [start, second, format] = split_fields(spec)?;
    parse(start, second, format)
}

fn validate(start: i64, count: i64) -> Result<(), SpecError> {
    if !layout::ADDRESS_RANGE.contains(&start) {
        return Err(SpecError::InvalidAddress { address: start });
    }
    let end = start + count - 1;
    if end > layout::MAX_ADDRESS {
        return Err(SpecError::RangeExceeded { start, count, end });
    }
    if !layout::COUNT_RANGE.contains(&count) {
        return Err(SpecError::InvalidCount { count });
    }
    Ok(())
}
