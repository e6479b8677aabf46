/// A result type defaulting to the crate [`Error`].
///
/// Identifier production is infallible. Only text decoding and radix
/// selection can fail.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `snowmint` can produce.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Text could not be parsed back into an identifier.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Only radix 16 and radix 36 are supported.
    #[error("unsupported radix: {0} (expected 16 or 36)")]
    UnsupportedRadix(u32),
}

/// Errors raised while decoding a textual identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The input string was empty.
    #[error("cannot parse an identifier from an empty string")]
    Empty,

    /// A character is not a digit of the requested radix.
    #[error("invalid digit {:?} at index {index} for radix {radix}", char::from(*byte))]
    InvalidDigit {
        /// The offending byte.
        byte: u8,
        /// Its position in the input.
        index: usize,
        /// The radix being decoded.
        radix: u32,
    },

    /// The decoded value does not fit in the identifier's width.
    #[error("value does not fit the identifier width in radix {radix}")]
    Overflow {
        /// The radix being decoded.
        radix: u32,
    },
}
