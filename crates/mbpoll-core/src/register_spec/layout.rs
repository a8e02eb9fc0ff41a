use std::ops::RangeInclusive;

/// Friendly (4xxxx) holding register numbers accepted as a start address.
pub const ADDRESS_RANGE: RangeInclusive<i64> = 40000..=49999;
/// Highest friendly holding register number.
pub const MAX_ADDRESS: i64 = 49999;
/// Friendly address of wire offset 0.
pub const WIRE_BASE_ADDRESS: u16 = 40001;

/// Registers a single Read Holding Registers request may return.
pub const COUNT_RANGE: RangeInclusive<i64> = 1..=125;

pub const FIELD_SEPARATOR: char = ',';
pub const FIELD_COUNT: usize = 3;
