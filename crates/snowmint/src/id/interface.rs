use core::{fmt, hash::Hash};

/// A packed, layout-aware Snowflake identifier.
///
/// Implementors split a fixed-width unsigned integer into three adjacent bit
/// fields, from most to least significant: `timestamp | node_id | sequence`.
/// Each field fits in a `u64`, which is the currency the generator works in;
/// [`SnowflakeId::Ty`] is only the packed representation.
///
/// Use [`define_snowflake_id!`] to declare a new layout rather than
/// implementing this trait by hand.
///
/// # Example
///
/// ```
/// use snowmint::{CompactId, SnowflakeId};
///
/// let id = CompactId::from_components(1000, 2, 1);
/// assert_eq!(SnowflakeId::timestamp(&id), 1000);
/// assert_eq!(SnowflakeId::node_id(&id), 2);
/// assert_eq!(SnowflakeId::sequence(&id), 1);
/// ```
///
/// [`define_snowflake_id!`]: crate::define_snowflake_id
pub trait SnowflakeId:
    Copy + Clone + fmt::Display + fmt::Debug + PartialOrd + Ord + PartialEq + Eq + Hash + Send + Sync
{
    /// Packed integer type (`u64` or `u128` for the shipped layouts).
    type Ty: Copy
        + Default
        + fmt::Debug
        + fmt::Display
        + Ord
        + Hash
        + Send
        + Sync
        + Into<u128>
        + TryFrom<u128>;

    /// Width of the packed integer in bits.
    const BITS: u32;

    /// Bit position of the least significant timestamp bit.
    const TIMESTAMP_SHIFT: u32;

    /// Bit position of the least significant node ID bit.
    const NODE_ID_SHIFT: u32;

    /// Returns the epoch-relative timestamp field.
    fn timestamp(&self) -> u64;

    /// Returns the node ID field.
    fn node_id(&self) -> u64;

    /// Returns the sequence field.
    fn sequence(&self) -> u64;

    /// Largest value the timestamp field can hold.
    fn max_timestamp() -> u64;

    /// Largest value the node ID field can hold. Also the node ID mask.
    fn max_node_id() -> u64;

    /// Largest value the sequence field can hold.
    fn max_sequence() -> u64;

    /// Packs the three fields into an identifier.
    ///
    /// Every field is masked to its width. Bits that do not fit are dropped
    /// silently; this is how out-of-range node IDs get truncated.
    fn from_components(timestamp: u64, node_id: u64, sequence: u64) -> Self;

    /// Returns the packed integer.
    fn to_raw(&self) -> Self::Ty;

    /// Wraps a packed integer without any validation.
    fn from_raw(raw: Self::Ty) -> Self;

    /// Returns the decimal value left-padded with zeros to the width of
    /// `Ty::MAX`.
    fn to_padded_string(&self) -> String;
}
