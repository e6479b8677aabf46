use crate::define_snowflake_id;

define_snowflake_id!(
    /// A 64-bit Snowflake ID.
    ///
    /// - 41 bits timestamp (ms since the generator's epoch)
    /// - 10 bits node ID
    /// - 13 bits sequence
    ///
    /// ```text
    ///  Bit Index:  63             23 22             13 12             0
    ///              +----------------+-----------------+---------------+
    ///  Field:      | timestamp (41) | node ID (10)    | sequence (13) |
    ///              +----------------+-----------------+---------------+
    ///              |<----- MSB ---------- 64 bits --------- LSB ----->|
    /// ```
    CompactId, u64,
    timestamp: 41,
    node_id: 10,
    sequence: 13
);

define_snowflake_id!(
    /// A 128-bit Snowflake ID for deployments that need more node ID or
    /// sequence headroom.
    ///
    /// - 64 bits timestamp (ms since the generator's epoch)
    /// - 48 bits node ID
    /// - 16 bits sequence
    ///
    /// ```text
    ///  Bit Index:  127            64 63             16 15             0
    ///              +----------------+-----------------+---------------+
    ///  Field:      | timestamp (64) | node ID (48)    | sequence (16) |
    ///              +----------------+-----------------+---------------+
    ///              |<----- MSB ---------- 128 bits -------- LSB ----->|
    /// ```
    ExtendedId, u128,
    timestamp: 64,
    node_id: 48,
    sequence: 16
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SnowflakeId;

    #[test]
    fn compact_layout_constants() {
        assert_eq!(CompactId::TIMESTAMP_SHIFT, 23);
        assert_eq!(CompactId::NODE_ID_SHIFT, 13);
        assert_eq!(CompactId::NODE_ID_MASK, 0x3FF);
        assert_eq!(CompactId::SEQUENCE_MASK, 0x1FFF);
        assert_eq!(CompactId::TIMESTAMP_MASK, (1 << 41) - 1);
    }

    #[test]
    fn extended_layout_constants() {
        assert_eq!(ExtendedId::TIMESTAMP_SHIFT, 64);
        assert_eq!(ExtendedId::NODE_ID_SHIFT, 16);
        assert_eq!(ExtendedId::NODE_ID_MASK, 0xFFFF_FFFF_FFFF);
        assert_eq!(ExtendedId::SEQUENCE_MASK, 0xFFFF);
        assert_eq!(ExtendedId::TIMESTAMP_MASK, u128::from(u64::MAX));
    }

    #[test]
    fn compact_fields_and_bounds() {
        let ts = CompactId::max_timestamp();
        let node = CompactId::max_node_id();
        let seq = CompactId::max_sequence();

        let id = CompactId::from_components(ts, node, seq);
        assert_eq!(id.timestamp(), ts);
        assert_eq!(id.node_id(), node);
        assert_eq!(id.sequence(), seq);
        assert_eq!(id.to_raw(), u64::MAX);
    }

    #[test]
    fn extended_fields_and_bounds() {
        let id = ExtendedId::from_components(u64::MAX, ExtendedId::max_node_id(), 0xFFFF);
        assert_eq!(id.timestamp(), u64::MAX);
        assert_eq!(id.node_id(), 0xFFFF_FFFF_FFFF);
        assert_eq!(id.sequence(), 0xFFFF);
        assert_eq!(id.to_raw(), u128::MAX);
    }

    #[test]
    fn packing_matches_shift_or_formula() {
        let id = CompactId::from_components(12_345, 1981, 7);
        let expected = (12_345u64 << 23) | ((1981 & 0x3FF) << 13) | 7;
        assert_eq!(id.to_raw(), expected);

        let id = ExtendedId::from_components(12_345, 1981, 7);
        let expected = (12_345u128 << 64) | (1981u128 << 16) | 7;
        assert_eq!(id.to_raw(), expected);
    }

    #[test]
    fn node_id_is_truncated_not_rejected() {
        let id = CompactId::from_components(1, 0x7FF, 0);
        assert_eq!(id.node_id(), 0x3FF);
        assert_eq!(id.timestamp(), 1);
        assert_eq!(id.sequence(), 0);

        let id = ExtendedId::from_components(1, 0x1_0000_0000_0001, 0);
        assert_eq!(id.node_id(), 1);
        assert_eq!(id.timestamp(), 1);
    }

    #[test]
    fn sequence_overflow_does_not_bleed_into_node_id() {
        let id = CompactId::from_components(0, 5, CompactId::max_sequence() + 1);
        assert_eq!(id.node_id(), 5);
        assert_eq!(id.sequence(), 0);
    }

    #[test]
    fn low_bit_fields() {
        let id = CompactId::from_components(0, 0, 0);
        assert_eq!(id.to_raw(), 0);

        let id = CompactId::from_components(1, 1, 1);
        assert_eq!(id.timestamp(), 1);
        assert_eq!(id.node_id(), 1);
        assert_eq!(id.sequence(), 1);
    }

    #[test]
    fn ordering_follows_raw_value() {
        let a = CompactId::from_components(10, 1, 5);
        let b = CompactId::from_components(10, 1, 6);
        let c = CompactId::from_components(11, 0, 0);
        assert!(a < b && b < c);
    }

    #[test]
    fn padded_string_has_fixed_width() {
        let id = CompactId::from_raw(42);
        assert_eq!(id.to_padded_string(), "00000000000000000042");
        assert_eq!(id.to_string(), "42");

        let id = ExtendedId::from_raw(42);
        assert_eq!(id.to_padded_string().len(), 39);
    }

    #[test]
    fn debug_shows_fields() {
        let id = CompactId::from_components(3, 2, 1);
        let dbg = format!("{id:?}");
        assert!(dbg.starts_with("CompactId"));
        assert!(dbg.contains("timestamp: 3"));
        assert!(dbg.contains("node_id: 2"));
        assert!(dbg.contains("sequence: 1"));
    }
}
