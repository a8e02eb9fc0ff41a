use thiserror::Error;

/// Errors returned by register decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("register buffer too short: need {needed} words, got {actual}")]
    TooFewWords { needed: usize, actual: usize },
    #[error("address overflow: {count} registers from {first_address} exceed u32::MAX")]
    AddressOverflow { first_address: u32, count: usize },
}
