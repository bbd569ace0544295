//! serde::Deserializer implementation backed by the parsed value tree.

use serde::de::{self, DeserializeOwned, IntoDeserializer};

use crate::options::ParseFlags;
use crate::Result;

pub struct Deserializer {
    value: serde_json::Value,
}

impl Deserializer {
    pub fn from_value(value: serde_json::Value) -> Self {
        Self { value }
    }
}

impl<'de> de::Deserializer<'de> for Deserializer {
    type Error = serde_json::Error;

    fn deserialize_any<V>(self, visitor: V) -> std::result::Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        self.value.into_deserializer().deserialize_any(visitor)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 u8 u16 u32 u64 f32 f64 char str string bytes byte_buf
        option unit unit_struct newtype_struct seq tuple tuple_struct map struct
        enum identifier ignored_any
    }
}

/// Parse a tolerant JSON document straight into a deserializable type.
pub fn from_str<T: DeserializeOwned>(s: &str, flags: ParseFlags) -> Result<T> {
    let root = crate::decode::from_str(s, flags)?;
    let deser = Deserializer::from_value(root.to_json());
    let t = T::deserialize(deser)?;
    Ok(t)
}
