/// Number of decimal digits needed to print `max`.
#[doc(hidden)]
pub const fn __decimal_width(max: u128) -> usize {
    let mut n = max;
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Declares a [`SnowflakeId`] type with a custom bit layout.
///
/// All bits of the backing integer must be accounted for, and every field
/// must be between 1 and 64 bits wide; otherwise a compile-time assertion
/// fails.
///
/// ## Bit layout
///
/// Fields are packed from **MSB to LSB**:
///
/// ```text
///  Bit Index:  high bits                                  low bits
///              +---------------+-----------------+--------------+
///  Field:      | timestamp (N) | node ID (M)     | sequence (K) |
///              +---------------+-----------------+--------------+
/// ```
///
/// ## Example
///
/// ```
/// use snowmint::{SnowflakeId, define_snowflake_id};
///
/// define_snowflake_id!(
///     /// 42-bit timestamp, 12-bit node, 10-bit sequence.
///     WideNodeId, u64,
///     timestamp: 42,
///     node_id: 12,
///     sequence: 10
/// );
///
/// let id = WideNodeId::from_components(7, 0xABC, 3);
/// assert_eq!(id.node_id(), 0xABC);
/// assert_eq!(WideNodeId::max_sequence(), 1023);
/// ```
///
/// [`SnowflakeId`]: crate::SnowflakeId
#[macro_export]
macro_rules! define_snowflake_id {
    (
        $(#[$meta:meta])*
        $name:ident, $int:ty,
        timestamp: $timestamp_bits:expr,
        node_id: $node_id_bits:expr,
        sequence: $sequence_bits:expr
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            id: $int,
        }

        const _: () = {
            assert!(
                $timestamp_bits + $node_id_bits + $sequence_bits == <$int>::BITS,
                "Snowflake layout must cover the underlying integer exactly"
            );
            assert!(
                $timestamp_bits >= 1 && $timestamp_bits <= 64,
                "timestamp field must be 1..=64 bits"
            );
            assert!(
                $node_id_bits >= 1 && $node_id_bits <= 64,
                "node_id field must be 1..=64 bits"
            );
            assert!(
                $sequence_bits >= 1 && $sequence_bits <= 64,
                "sequence field must be 1..=64 bits"
            );
        };

        impl $name {
            pub const TIMESTAMP_BITS: u32 = $timestamp_bits;
            pub const NODE_ID_BITS: u32 = $node_id_bits;
            pub const SEQUENCE_BITS: u32 = $sequence_bits;

            pub const SEQUENCE_SHIFT: u32 = 0;
            pub const NODE_ID_SHIFT: u32 = Self::SEQUENCE_SHIFT + Self::SEQUENCE_BITS;
            pub const TIMESTAMP_SHIFT: u32 = Self::NODE_ID_SHIFT + Self::NODE_ID_BITS;

            pub const TIMESTAMP_MASK: $int = <$int>::MAX >> (<$int>::BITS - Self::TIMESTAMP_BITS);
            pub const NODE_ID_MASK: $int = <$int>::MAX >> (<$int>::BITS - Self::NODE_ID_BITS);
            pub const SEQUENCE_MASK: $int = <$int>::MAX >> (<$int>::BITS - Self::SEQUENCE_BITS);

            /// Packs the fields, masking each one to its width.
            pub const fn from(timestamp: u64, node_id: u64, sequence: u64) -> Self {
                let t = (timestamp as $int & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
                let n = (node_id as $int & Self::NODE_ID_MASK) << Self::NODE_ID_SHIFT;
                let s = (sequence as $int & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
                Self { id: t | n | s }
            }

            /// Extracts the epoch-relative timestamp from the packed ID.
            pub const fn timestamp(&self) -> u64 {
                ((self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK) as u64
            }

            /// Extracts the node ID from the packed ID.
            pub const fn node_id(&self) -> u64 {
                ((self.id >> Self::NODE_ID_SHIFT) & Self::NODE_ID_MASK) as u64
            }

            /// Extracts the sequence number from the packed ID.
            pub const fn sequence(&self) -> u64 {
                ((self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK) as u64
            }

            /// Returns the packed integer.
            pub const fn to_raw(&self) -> $int {
                self.id
            }

            /// Wraps a packed integer.
            pub const fn from_raw(raw: $int) -> Self {
                Self { id: raw }
            }
        }

        impl $crate::SnowflakeId for $name {
            type Ty = $int;

            const BITS: u32 = <$int>::BITS;
            const TIMESTAMP_SHIFT: u32 = Self::TIMESTAMP_SHIFT;
            const NODE_ID_SHIFT: u32 = Self::NODE_ID_SHIFT;

            fn timestamp(&self) -> u64 {
                self.timestamp()
            }

            fn node_id(&self) -> u64 {
                self.node_id()
            }

            fn sequence(&self) -> u64 {
                self.sequence()
            }

            fn max_timestamp() -> u64 {
                Self::TIMESTAMP_MASK as u64
            }

            fn max_node_id() -> u64 {
                Self::NODE_ID_MASK as u64
            }

            fn max_sequence() -> u64 {
                Self::SEQUENCE_MASK as u64
            }

            fn from_components(timestamp: u64, node_id: u64, sequence: u64) -> Self {
                Self::from(timestamp, node_id, sequence)
            }

            fn to_raw(&self) -> Self::Ty {
                self.id
            }

            fn from_raw(raw: Self::Ty) -> Self {
                Self { id: raw }
            }

            fn to_padded_string(&self) -> String {
                let width = $crate::__decimal_width(<$int>::MAX as u128);
                format!("{:0width$}", self.id, width = width)
            }
        }

        impl From<$name> for $int {
            fn from(id: $name) -> Self {
                id.id
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.id)
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                let full = core::any::type_name::<Self>();
                let name = full.rsplit("::").next().unwrap_or(full);
                f.debug_struct(name)
                    .field("id", &format_args!("{} (0x{:x})", self.id, self.id))
                    .field("timestamp", &self.timestamp())
                    .field("node_id", &self.node_id())
                    .field("sequence", &self.sequence())
                    .finish()
            }
        }
    };
}
