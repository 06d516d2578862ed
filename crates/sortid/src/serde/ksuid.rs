use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::Ksuid;

impl Serialize for Ksuid {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Ksuid {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Base62Visitor;

        impl de::Visitor<'_> for Base62Visitor {
            type Value = Ksuid;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 27 character base62 string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ksuid::decode(v).map_err(de::Error::custom)
            }
        }

        d.deserialize_str(Base62Visitor)
    }
}
