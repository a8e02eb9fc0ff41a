use std::iter::FusedIterator;

use serde::Serialize;

use crate::register_spec::ReadPlan;

use super::error::DecodeError;
use super::format::{Format, WordOrder};
use super::reader::WordReader;
use super::value::{RegisterValue, read_value};

/// One decoded value and the friendly address of its first register.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedValue {
    pub address: u32,
    pub value: RegisterValue,
    /// Rendered form of `value`.
    pub text: String,
}

/// Lazy, one-shot walk over a register buffer.
///
/// Yields one item per value until the plan's register count is consumed.
/// After an error the iterator is exhausted.
#[derive(Debug)]
pub struct Decoder<'a> {
    reader: WordReader<'a>,
    format: Format,
    word_order: WordOrder,
    first_address: u32,
    index: usize,
    end: usize,
}

/// Decode `words` using the default high-word-first order.
///
/// # Examples
/// ```
/// use mbpoll_core::{decode, parse_csv};
///
/// let plan = parse_csv("40001,2,b")?;
/// let mut values = decode(&plan, &[0b1010_0000_0000_0001, 0x00FF], 40001)?;
/// let first = values.next().unwrap()?;
/// assert_eq!(first.address, 40001);
/// assert_eq!(first.text, "10100000 00000001");
/// let second = values.next().unwrap()?;
/// assert_eq!(second.address, 40002);
/// assert!(values.next().is_none());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
/// Returns [`DecodeError::TooFewWords`] when `words` is shorter than the
/// plan's register count, and [`DecodeError::AddressOverflow`] when the
/// addresses would not fit in a `u32`.
pub fn decode<'a>(
    plan: &ReadPlan,
    words: &'a [u16],
    first_address: u32,
) -> Result<Decoder<'a>, DecodeError> {
    decode_with_order(plan, words, first_address, WordOrder::default())
}

/// Decode `words`, assembling two-register values in `word_order`.
///
/// # Errors
/// Same as [`decode`].
pub fn decode_with_order<'a>(
    plan: &ReadPlan,
    words: &'a [u16],
    first_address: u32,
    word_order: WordOrder,
) -> Result<Decoder<'a>, DecodeError> {
    let end = usize::from(plan.register_count());
    let reader = WordReader::new(words);
    reader.require_len(end)?;
    let last = u32::try_from(end.saturating_sub(1)).ok();
    if last.and_then(|last| first_address.checked_add(last)).is_none() {
        return Err(DecodeError::AddressOverflow {
            first_address,
            count: end,
        });
    }
    Ok(Decoder {
        reader,
        format: plan.format(),
        word_order,
        first_address,
        index: 0,
        end,
    })
}

impl Iterator for Decoder<'_> {
    type Item = Result<DecodedValue, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.end {
            return None;
        }
        let index = self.index;
        match read_value(&self.reader, index, self.format, self.word_order) {
            Ok(value) => {
                self.index += self.format.words_per_value();
                Some(Ok(DecodedValue {
                    address: self.first_address + index as u32,
                    text: value.to_string(),
                    value,
                }))
            }
            Err(err) => {
                self.index = self.end;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.saturating_sub(self.index);
        let values = remaining.div_ceil(self.format.words_per_value());
        (0, Some(values))
    }
}

impl FusedIterator for Decoder<'_> {}
