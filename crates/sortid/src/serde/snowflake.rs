use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::SnowflakeId;

impl Serialize for SnowflakeId {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SnowflakeId {
    /// Accepts the decimal string form or a plain unsigned integer. Either
    /// is rejected if it sets the reserved bit.
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DecimalVisitor;

        impl de::Visitor<'_> for DecimalVisitor {
            type Value = SnowflakeId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a decimal snowflake id")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.parse().map_err(de::Error::custom)
            }

            #[inline]
            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                SnowflakeId::checked(v).map_err(de::Error::custom)
            }
        }

        d.deserialize_any(DecimalVisitor)
    }
}

/// Serializes a [`SnowflakeId`] as its raw `u64`.
///
/// Deserialization rejects values with the reserved bit set.
pub mod as_native_snowflake {
    use super::*;

    pub fn serialize<S>(id: &SnowflakeId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<SnowflakeId, D::Error>
    where
        D: Deserializer<'de>,
    {
        SnowflakeId::checked(u64::deserialize(d)?).map_err(de::Error::custom)
    }
}
