use serde::Serialize;

use crate::decode::Format;

use super::layout;

/// Validated description of a single holding register read.
///
/// Built only by [`parse`](crate::parse) / [`parse_csv`](crate::parse_csv),
/// so every instance satisfies the address, count and parity rules.
///
/// # Examples
/// ```
/// use mbpoll_core::{Format, parse_csv};
///
/// let plan = parse_csv("40001,40010,u")?;
/// assert_eq!(plan.start_address(), 40001);
/// assert_eq!(plan.register_count(), 10);
/// assert_eq!(plan.end_address(), 40010);
/// assert_eq!(plan.format(), Format::UnsignedShort);
/// assert_eq!(plan.wire_offset(), Some(0));
/// # Ok::<(), mbpoll_core::SpecError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadPlan {
    start_address: u16,
    register_count: u16,
    format: Format,
}

impl ReadPlan {
    pub(crate) fn new(start_address: u16, register_count: u16, format: Format) -> Self {
        Self {
            start_address,
            register_count,
            format,
        }
    }

    /// Friendly (4xxxx) number of the first register.
    pub fn start_address(&self) -> u16 {
        self.start_address
    }

    /// Number of 16-bit words to request.
    pub fn register_count(&self) -> u16 {
        self.register_count
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Friendly number of the last register read (inclusive).
    pub fn end_address(&self) -> u16 {
        self.start_address + self.register_count - 1
    }

    /// Number of decoded values the plan produces.
    pub fn value_count(&self) -> u16 {
        self.register_count / self.format.words_per_value() as u16
    }

    /// Zero-based register offset sent on the wire.
    ///
    /// Register 40000 is accepted by the parser but sits one below wire
    /// offset 0, so it has no offset.
    pub fn wire_offset(&self) -> Option<u16> {
        self.start_address.checked_sub(layout::WIRE_BASE_ADDRESS)
    }
}
