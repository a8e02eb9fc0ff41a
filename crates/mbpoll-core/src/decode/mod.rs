//! Register value decoding.
//!
//! The decoder walks a register buffer according to a [`ReadPlan`]'s format,
//! consuming one or two words per value, and yields each value tagged with
//! the friendly address of its first register. Two-register values are
//! assembled through a [`WordOrder`] policy (high word first by default) and
//! reinterpreted bit for bit: signed formats use two's complement and
//! `Float32` uses the raw IEEE-754 pattern, never a numeric cast.
//!
//! Word access goes through `reader`, which bounds-checks every index; the
//! buffer length is also checked once before iteration starts.
//!
//! [`ReadPlan`]: crate::ReadPlan

pub mod decoder;
pub mod error;
pub mod format;
pub mod reader;
pub mod value;

pub use decoder::{DecodedValue, Decoder, decode, decode_with_order};
pub use error::DecodeError;
pub use format::{Format, WordOrder};
pub use value::RegisterValue;
