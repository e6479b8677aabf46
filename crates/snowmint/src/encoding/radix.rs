use core::fmt;

use crate::{Error, ParseError, SnowflakeId};

/// Lowercase digits shared by every supported radix.
const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// The text radixes identifiers can be encoded in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Radix {
    /// Base 16, digits `0-9a-f`.
    Hex,
    /// Base 36, digits `0-9a-z`.
    Base36,
}

impl Radix {
    /// The numeric base.
    pub const fn base(self) -> u32 {
        match self {
            Self::Hex => 16,
            Self::Base36 => 36,
        }
    }

    /// Number of digits in the fixed-width encoding of `ID`, enough for the
    /// largest value of its backing integer.
    ///
    /// ```
    /// use snowmint::{CompactId, ExtendedId, Radix};
    ///
    /// assert_eq!(Radix::Hex.padded_len::<CompactId>(), 16);
    /// assert_eq!(Radix::Base36.padded_len::<CompactId>(), 13);
    /// assert_eq!(Radix::Hex.padded_len::<ExtendedId>(), 32);
    /// assert_eq!(Radix::Base36.padded_len::<ExtendedId>(), 25);
    /// ```
    pub fn padded_len<ID>(self) -> usize
    where
        ID: SnowflakeId,
    {
        let max = if ID::BITS >= u128::BITS {
            u128::MAX
        } else {
            (1u128 << ID::BITS) - 1
        };
        digit_count(max, self.base())
    }
}

impl TryFrom<u32> for Radix {
    type Error = Error;

    fn try_from(base: u32) -> Result<Self, Self::Error> {
        match base {
            16 => Ok(Self::Hex),
            36 => Ok(Self::Base36),
            other => Err(Error::UnsupportedRadix(other)),
        }
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex => f.write_str("hex"),
            Self::Base36 => f.write_str("base36"),
        }
    }
}

fn digit_count(mut value: u128, base: u32) -> usize {
    let base = u128::from(base);
    let mut digits = 1;
    while value >= base {
        value /= base;
        digits += 1;
    }
    digits
}

/// Writes `value` in `radix`, left-padded with `0` up to `min_width` digits.
pub(crate) fn encode_u128(mut value: u128, radix: Radix, min_width: usize) -> String {
    let base = u128::from(radix.base());
    // 128 binary digits is the longest possible output
    let mut buf = [b'0'; 128];
    let mut pos = buf.len();

    loop {
        pos -= 1;
        buf[pos] = ALPHABET[(value % base) as usize];
        value /= base;
        if value == 0 {
            break;
        }
    }

    let start = pos.min(buf.len().saturating_sub(min_width));
    buf[start..].iter().copied().map(char::from).collect()
}

/// Parses `text` as an unsigned integer in `radix`.
///
/// Upper- and lowercase letters are accepted; signs, prefixes and
/// separators are not.
pub(crate) fn decode_u128(text: &str, radix: Radix) -> Result<u128, ParseError> {
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    let base = radix.base();
    text.bytes().enumerate().try_fold(0u128, |acc, (index, byte)| {
        let digit = digit_value(byte)
            .filter(|digit| *digit < base)
            .ok_or(ParseError::InvalidDigit {
                byte,
                index,
                radix: base,
            })?;
        acc.checked_mul(u128::from(base))
            .and_then(|acc| acc.checked_add(u128::from(digit)))
            .ok_or(ParseError::Overflow { radix: base })
    })
}

const fn digit_value(byte: u8) -> Option<u32> {
    match byte {
        b'0'..=b'9' => Some((byte - b'0') as u32),
        b'a'..=b'z' => Some((byte - b'a') as u32 + 10),
        b'A'..=b'Z' => Some((byte - b'A') as u32 + 10),
        _ => None,
    }
}
