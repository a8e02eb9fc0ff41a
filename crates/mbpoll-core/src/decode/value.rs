use std::fmt;

use serde::Serialize;

use super::error::DecodeError;
use super::format::{Format, WordOrder};
use super::reader::WordReader;

const PLACEHOLDER: char = '?';

/// A decoded register value.
///
/// `Display` renders the form printed by the CLI: decimal integers, floats
/// with two fractional digits, bit strings and character pairs as-is.
///
/// # Examples
/// ```
/// use mbpoll_core::RegisterValue;
///
/// assert_eq!(RegisterValue::Float(1000.0).to_string(), "1000.00");
/// assert_eq!(RegisterValue::Signed(-1).to_string(), "-1");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RegisterValue {
    Signed(i32),
    Unsigned(u32),
    Float(f32),
    Bits(String),
    Ascii(String),
}

impl fmt::Display for RegisterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterValue::Signed(value) => write!(f, "{value}"),
            RegisterValue::Unsigned(value) => write!(f, "{value}"),
            RegisterValue::Float(value) => write!(f, "{value:.2}"),
            RegisterValue::Bits(text) | RegisterValue::Ascii(text) => f.write_str(text),
        }
    }
}

/// Decode the value starting at `index` according to `format`.
pub fn read_value(
    reader: &WordReader<'_>,
    index: usize,
    format: Format,
    order: WordOrder,
) -> Result<RegisterValue, DecodeError> {
    let value = match format {
        Format::SignedShort => RegisterValue::Signed(i32::from(reader.read_word(index)? as i16)),
        Format::UnsignedShort => RegisterValue::Unsigned(u32::from(reader.read_word(index)?)),
        Format::SignedLong => RegisterValue::Signed(reader.read_pair(index, order)? as i32),
        Format::UnsignedLong => RegisterValue::Unsigned(reader.read_pair(index, order)?),
        Format::Float32 => RegisterValue::Float(f32::from_bits(reader.read_pair(index, order)?)),
        Format::Bitfield => RegisterValue::Bits(bit_string(reader.read_word(index)?)),
        Format::AsciiPair => RegisterValue::Ascii(ascii_pair(reader.read_word(index)?)),
    };
    Ok(value)
}

/// Render a word as 16 binary digits, most significant first, split into
/// two groups of eight.
pub fn bit_string(word: u16) -> String {
    let mut text = String::with_capacity(17);
    for bit in (0..16).rev() {
        if bit == 7 {
            text.push(' ');
        }
        text.push(if word & (1 << bit) != 0 { '1' } else { '0' });
    }
    text
}

/// Render a word as two characters, high byte first.
pub fn ascii_pair(word: u16) -> String {
    let [high, low] = word.to_be_bytes();
    [high, low].into_iter().map(printable_or_placeholder).collect()
}

fn printable_or_placeholder(byte: u8) -> char {
    if byte == b' ' || byte.is_ascii_graphic() {
        char::from(byte)
    } else {
        PLACEHOLDER
    }
}
