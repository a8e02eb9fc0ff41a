use super::error::DecodeError;
use super::format::WordOrder;

#[derive(Debug)]
pub struct WordReader<'a> {
    words: &'a [u16],
}

impl<'a> WordReader<'a> {
    pub fn new(words: &'a [u16]) -> Self {
        Self { words }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), DecodeError> {
        if self.words.len() < needed {
            return Err(DecodeError::TooFewWords {
                needed,
                actual: self.words.len(),
            });
        }
        Ok(())
    }

    pub fn read_word(&self, index: usize) -> Result<u16, DecodeError> {
        self.words
            .get(index)
            .copied()
            .ok_or(DecodeError::TooFewWords {
                needed: index + 1,
                actual: self.words.len(),
            })
    }

    /// Read the registers at `index` and `index + 1` as one 32-bit pattern.
    pub fn read_pair(&self, index: usize, order: WordOrder) -> Result<u32, DecodeError> {
        let first = self.read_word(index)?;
        let second = self.read_word(index + 1)?;
        Ok(order.combine(first, second))
    }
}
