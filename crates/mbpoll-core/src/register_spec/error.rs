use thiserror::Error;

/// Errors returned by register spec parsing and validation.
///
/// # Examples
/// ```
/// use mbpoll_core::{SpecError, parse_csv};
///
/// let err = parse_csv("40001,10,x").unwrap_err();
/// assert!(matches!(err, SpecError::InvalidFormat { .. }));
/// assert!(err.to_string().contains("invalid format type"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("malformed register spec '{spec}': expected start,end_or_count,format")]
    MalformedSpec { spec: String },
    #[error("invalid register number '{token}'")]
    InvalidNumber { token: String },
    #[error("invalid format type '{token}'")]
    InvalidFormat { token: String },
    #[error("invalid starting register {address}: expected 40000..=49999")]
    InvalidAddress { address: i64 },
    #[error("register high limit exceeded: {start} + {count} registers ends at {end}, past 49999")]
    RangeExceeded { start: i64, count: i64, end: i64 },
    #[error("invalid number of registers {count}: expected 1..=125")]
    InvalidCount { count: i64 },
}
