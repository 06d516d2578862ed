use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::Ulid;

impl Serialize for Ulid {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Ulid {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Base32Visitor;

        impl de::Visitor<'_> for Base32Visitor {
            type Value = Ulid;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a Crockford base32 encoded string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ulid::decode(v).map_err(de::Error::custom)
            }
        }

        d.deserialize_str(Base32Visitor)
    }
}

/// Serializes a [`Ulid`] as its raw `u128`.
pub mod as_native_ulid {
    use super::*;

    pub fn serialize<S>(id: &Ulid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Ulid, D::Error>
    where
        D: Deserializer<'de>,
    {
        u128::deserialize(d).map(Ulid::from_raw)
    }
}
