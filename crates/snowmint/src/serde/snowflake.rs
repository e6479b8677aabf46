//! `#[serde(with = "...")]` adapters for Snowflake IDs.
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use snowmint::{CompactId, as_base36, as_native};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Event {
//!     #[serde(with = "as_native")]
//!     id: CompactId,
//!     #[serde(with = "as_base36")]
//!     parent: CompactId,
//! }
//! ```

use ::serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Radix, RadixExt, SnowflakeId};

pub mod as_native {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::SnowflakeId;

    /// Serialize a Snowflake ID as its packed integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: SnowflakeId,
        ID::Ty: Serialize,
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    /// Deserialize a Snowflake ID from its packed integer.
    ///
    /// Every value of the backing integer is a structurally valid ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails.
    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: SnowflakeId,
        ID::Ty: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        <ID::Ty>::deserialize(d).map(ID::from_raw)
    }
}

pub mod as_hex {
    use super::{Deserializer, Serializer, deserialize_text};
    use crate::{Radix, RadixExt};

    /// Serialize a Snowflake ID as fixed-width lowercase hex.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: RadixExt,
        S: Serializer,
    {
        s.serialize_str(&id.encode(Radix::Hex))
    }

    /// Deserialize a Snowflake ID from hex, padded or not, in either case.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the string
    /// is not a valid hex ID.
    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: RadixExt,
        D: Deserializer<'de>,
    {
        deserialize_text(d, Radix::Hex)
    }
}

pub mod as_base36 {
    use super::{Deserializer, Serializer, deserialize_text};
    use crate::{Radix, RadixExt};

    /// Serialize a Snowflake ID as fixed-width lowercase base-36.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: RadixExt,
        S: Serializer,
    {
        s.serialize_str(&id.encode(Radix::Base36))
    }

    /// Deserialize a Snowflake ID from base-36, padded or not, in either
    /// case.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the string
    /// is not a valid base-36 ID.
    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: RadixExt,
        D: Deserializer<'de>,
    {
        deserialize_text(d, Radix::Base36)
    }
}

fn deserialize_text<'de, ID, D>(d: D, radix: Radix) -> Result<ID, D::Error>
where
    ID: SnowflakeId,
    D: Deserializer<'de>,
{
    struct TextVisitor<ID> {
        radix: Radix,
        marker: core::marker::PhantomData<ID>,
    }

    impl<ID> ::serde::de::Visitor<'_> for TextVisitor<ID>
    where
        ID: SnowflakeId,
    {
        type Value = ID;

        fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
            write!(formatter, "a {} encoded Snowflake ID", self.radix)
        }

        #[inline]
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: ::serde::de::Error,
        {
            ID::decode(v, self.radix).map_err(E::custom)
        }
    }

    d.deserialize_str(TextVisitor {
        radix,
        marker: core::marker::PhantomData,
    })
}
