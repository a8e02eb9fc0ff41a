use serde::Serialize;

/// Display format for register values.
///
/// # Examples
/// ```
/// use mbpoll_core::Format;
///
/// let format = Format::from_letter('f').unwrap();
/// assert_eq!(format, Format::Float32);
/// assert_eq!(format.words_per_value(), 2);
/// assert_eq!(format.letter(), 'f');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    SignedShort,
    SignedLong,
    UnsignedShort,
    UnsignedLong,
    Float32,
    Bitfield,
    AsciiPair,
}

impl Format {
    /// All formats in help-text order.
    pub const ALL: [Format; 7] = [
        Format::UnsignedShort,
        Format::UnsignedLong,
        Format::SignedShort,
        Format::SignedLong,
        Format::Float32,
        Format::Bitfield,
        Format::AsciiPair,
    ];

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            's' => Some(Format::SignedShort),
            'S' => Some(Format::SignedLong),
            'u' => Some(Format::UnsignedShort),
            'U' => Some(Format::UnsignedLong),
            'f' => Some(Format::Float32),
            'b' => Some(Format::Bitfield),
            'a' => Some(Format::AsciiPair),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Format::SignedShort => 's',
            Format::SignedLong => 'S',
            Format::UnsignedShort => 'u',
            Format::UnsignedLong => 'U',
            Format::Float32 => 'f',
            Format::Bitfield => 'b',
            Format::AsciiPair => 'a',
        }
    }

    /// Registers consumed by one value.
    pub fn words_per_value(self) -> usize {
        match self {
            Format::SignedLong | Format::UnsignedLong | Format::Float32 => 2,
            Format::SignedShort | Format::UnsignedShort | Format::Bitfield | Format::AsciiPair => 1,
        }
    }

    /// Short human-readable description used in help text.
    pub fn description(self) -> &'static str {
        match self {
            Format::SignedShort => "signed short integer (16 bits)",
            Format::SignedLong => "signed long integer (32 bits)",
            Format::UnsignedShort => "unsigned short integer (16 bits)",
            Format::UnsignedLong => "unsigned long integer (32 bits)",
            Format::Float32 => "float (32 bits)",
            Format::Bitfield => "binary (16 bits)",
            Format::AsciiPair => "ascii characters (16 bits)",
        }
    }
}

/// Order of the two registers that make up a 32-bit value.
///
/// Devices disagree on this, so it is a policy rather than a constant.
///
/// # Examples
/// ```
/// use mbpoll_core::WordOrder;
///
/// assert_eq!(WordOrder::HighFirst.combine(0x1234, 0x5678), 0x1234_5678);
/// assert_eq!(WordOrder::LowFirst.combine(0x1234, 0x5678), 0x5678_1234);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WordOrder {
    /// The register at the lower address holds the high half.
    #[default]
    HighFirst,
    /// The register at the lower address holds the low half.
    LowFirst,
}

impl WordOrder {
    /// Combine two registers, given in address order, into a 32-bit pattern.
    pub fn combine(self, first: u16, second: u16) -> u32 {
        let (high, low) = match self {
            WordOrder::HighFirst => (first, second),
            WordOrder::LowFirst => (second, first),
        };
        (u32::from(high) << 16) | u32::from(low)
    }
}

#[cfg(test)]
mod tests {
    use super::{Format, WordOrder};

    #[test]
    fn letters_round_trip() {
        for format in Format::ALL {
            assert_eq!(Format::from_letter(format.letter()), Some(format));
        }
    }

    #[test]
    fn letters_are_case_sensitive() {
        assert_eq!(Format::from_letter('F'), None);
        assert_eq!(Format::from_letter('B'), None);
        assert_eq!(Format::from_letter('x'), None);
    }

    #[test]
    fn only_long_and_float_are_wide() {
        let wide: Vec<_> = Format::ALL
            .into_iter()
            .filter(|format| format.words_per_value() == 2)
            .collect();
        assert_eq!(
            wide,
            vec![Format::UnsignedLong, Format::SignedLong, Format::Float32]
        );
    }

    #[test]
    fn default_word_order_is_high_first() {
        assert_eq!(WordOrder::default(), WordOrder::HighFirst);
        assert_eq!(WordOrder::default().combine(0x0000, 0x0001), 1);
    }
}
