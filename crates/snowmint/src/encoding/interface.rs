use crate::{
    ParseError, Radix, SnowflakeId,
    encoding::radix::{decode_u128, encode_u128},
};

/// Extension trait for hex and base-36 text forms of Snowflake IDs.
///
/// [`RadixExt::encode`] produces fixed-width, zero-padded, lowercase text.
/// Since every ID of a layout encodes to the same number of digits,
/// comparing the strings lexicographically gives the same order as comparing
/// the IDs numerically, which makes them safe as sortable database or file
/// keys.
///
/// [`RadixExt::encode_unpadded`] drops leading zeros. Unpadded strings of
/// different lengths do **not** sort like their values, so only use them
/// where ordering does not matter.
///
/// # Example
///
/// ```
/// use snowmint::{CompactId, Radix, RadixExt};
///
/// let id = CompactId::from_raw(255);
/// assert_eq!(id.encode(Radix::Hex), "00000000000000ff");
/// assert_eq!(id.encode_unpadded(Radix::Hex), "ff");
/// assert_eq!(CompactId::decode("FF", Radix::Hex)?, id);
/// # Ok::<(), snowmint::ParseError>(())
/// ```
pub trait RadixExt: SnowflakeId {
    /// Encodes this ID as fixed-width text in `radix`.
    fn encode(&self, radix: Radix) -> String {
        encode_u128(self.to_raw().into(), radix, radix.padded_len::<Self>())
    }

    /// Encodes this ID in `radix` without leading zeros.
    fn encode_unpadded(&self, radix: Radix) -> String {
        encode_u128(self.to_raw().into(), radix, 0)
    }

    /// Decodes text in `radix`, padded or not, back into an ID.
    ///
    /// This is a structural decode: any value that fits the backing integer
    /// is accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is empty, contains a character that is
    /// not a digit of `radix`, or encodes a value wider than the layout.
    fn decode(text: &str, radix: Radix) -> Result<Self, ParseError> {
        let raw = decode_u128(text, radix)?;
        let raw = Self::Ty::try_from(raw).map_err(|_| ParseError::Overflow {
            radix: radix.base(),
        })?;
        Ok(Self::from_raw(raw))
    }
}

impl<ID> RadixExt for ID where ID: SnowflakeId {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CompactId, ExtendedId};

    #[test]
    fn padded_encodings_have_fixed_width() {
        for raw in [0, 1, 35, 36, u64::MAX / 3, u64::MAX] {
            let id = CompactId::from_raw(raw);
            assert_eq!(id.encode(Radix::Hex).len(), 16);
            assert_eq!(id.encode(Radix::Base36).len(), 13);
        }
        for raw in [0, 1, u128::from(u64::MAX) + 1, u128::MAX] {
            let id = ExtendedId::from_raw(raw);
            assert_eq!(id.encode(Radix::Hex).len(), 32);
            assert_eq!(id.encode(Radix::Base36).len(), 25);
        }
    }

    #[test]
    fn max_values_use_every_digit() {
        let id = CompactId::from_raw(u64::MAX);
        assert_eq!(id.encode(Radix::Hex), "ffffffffffffffff");
        assert_eq!(id.encode(Radix::Base36), "3w5e11264sgsf");
    }

    #[test]
    fn padded_encodings_sort_like_values() {
        // Digit count changes between these, which breaks unpadded ordering
        let ids = [
            CompactId::from_raw(35),
            CompactId::from_raw(36),
            CompactId::from_raw(1 << 23),
            CompactId::from_raw(u64::MAX),
        ];
        for radix in [Radix::Hex, Radix::Base36] {
            for pair in ids.windows(2) {
                assert!(pair[0] < pair[1]);
                assert!(pair[0].encode(radix) < pair[1].encode(radix));
            }
        }

        let small = CompactId::from_raw(35).encode_unpadded(Radix::Base36);
        let large = CompactId::from_raw(36).encode_unpadded(Radix::Base36);
        assert!(small > large, "unpadded base36 does not preserve order");
    }

    #[test]
    fn decodes_padded_and_unpadded() {
        let id = ExtendedId::from_components(1_234_567, 1981, 42);
        for radix in [Radix::Hex, Radix::Base36] {
            assert_eq!(ExtendedId::decode(&id.encode(radix), radix), Ok(id));
            assert_eq!(
                ExtendedId::decode(&id.encode_unpadded(radix), radix),
                Ok(id)
            );
            let upper = id.encode(radix).to_ascii_uppercase();
            assert_eq!(ExtendedId::decode(&upper, radix), Ok(id));
        }
    }

    #[test]
    fn decode_rejects_values_wider_than_the_layout() {
        let wide = ExtendedId::from_raw(u128::from(u64::MAX) + 1).encode(Radix::Hex);
        assert_eq!(
            CompactId::decode(&wide, Radix::Hex),
            Err(ParseError::Overflow { radix: 16 })
        );
    }

    #[test]
    fn decode_rejects_wrong_radix_digits() {
        let id = CompactId::from_raw(u64::MAX / 7).encode(Radix::Base36);
        assert!(id.bytes().any(|b| b > b'f'));
        assert!(matches!(
            CompactId::decode(&id, Radix::Hex),
            Err(ParseError::InvalidDigit { radix: 16, .. })
        ));
    }
}
