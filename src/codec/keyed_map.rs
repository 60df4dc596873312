//! String-keyed map codec
//!
//! A `HashMap` wrapper whose keys travel as strings. Each key type supplies
//! its own string form through [`MapKey`]; values are encoded with their own
//! `Serialize` impl, so record values nest naturally.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use uuid::Uuid;

// == Map Key ==
/// A key type with a lossless string form.
pub trait MapKey: Sized + Eq + Hash + Clone {
    /// Renders the key as a string.
    fn encode_key(&self) -> String;

    /// Parses a key previously produced by [`MapKey::encode_key`].
    fn decode_key(raw: &str) -> Result<Self, String>;
}

impl MapKey for String {
    fn encode_key(&self) -> String {
        self.clone()
    }

    fn decode_key(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }
}

impl MapKey for Uuid {
    fn encode_key(&self) -> String {
        self.hyphenated().to_string()
    }

    fn decode_key(raw: &str) -> Result<Self, String> {
        Uuid::parse_str(raw).map_err(|e| format!("invalid GUID key '{}': {}", raw, e))
    }
}

impl MapKey for u32 {
    fn encode_key(&self) -> String {
        self.to_string()
    }

    fn decode_key(raw: &str) -> Result<Self, String> {
        raw.parse()
            .map_err(|e| format!("invalid integer key '{}': {}", raw, e))
    }
}

impl MapKey for i32 {
    fn encode_key(&self) -> String {
        self.to_string()
    }

    fn decode_key(raw: &str) -> Result<Self, String> {
        raw.parse()
            .map_err(|e| format!("invalid integer key '{}': {}", raw, e))
    }
}

// == Keyed Map ==
/// A map whose keys are encoded through [`MapKey`].
#[derive(Debug, Clone)]
pub struct KeyedMap<K, V>(HashMap<K, V>);

/// Map keyed by GUID.
pub type GuidMap<V> = KeyedMap<Uuid, V>;

/// Map keyed by an unsigned integer (locale ids).
pub type IntMap<V> = KeyedMap<u32, V>;

impl<K: MapKey, V> KeyedMap<K, V> {
    pub fn new() -> Self {
        Self(HashMap::new())
    }
}

impl<K, V> Default for KeyedMap<K, V> {
    fn default() -> Self {
        Self(HashMap::new())
    }
}

impl<K: MapKey, V: PartialEq> PartialEq for KeyedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<K: MapKey, V: Eq> Eq for KeyedMap<K, V> {}

impl<K, V> Deref for KeyedMap<K, V> {
    type Target = HashMap<K, V>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<K, V> DerefMut for KeyedMap<K, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<K: MapKey, V> From<HashMap<K, V>> for KeyedMap<K, V> {
    fn from(map: HashMap<K, V>) -> Self {
        Self(map)
    }
}

impl<K: MapKey, V> FromIterator<(K, V)> for KeyedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<K: MapKey, V: Serialize> Serialize for KeyedMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(&key.encode_key(), value)?;
        }
        map.end()
    }
}

impl<'de, K: MapKey, V: Deserialize<'de>> Deserialize<'de> for KeyedMap<K, V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(KeyedMapVisitor(PhantomData))
    }
}

struct KeyedMapVisitor<K, V>(PhantomData<(K, V)>);

impl<'de, K: MapKey, V: Deserialize<'de>> Visitor<'de> for KeyedMapVisitor<K, V> {
    type Value = KeyedMap<K, V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map with string keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = HashMap::with_capacity(access.size_hint().unwrap_or(0));

        // A bad key aborts the whole map; dropping it would leave the cache
        // silently out of step with its source.
        while let Some((raw, value)) = access.next_entry::<String, V>()? {
            let key = K::decode_key(&raw).map_err(de::Error::custom)?;
            if map.insert(key, value).is_some() {
                return Err(de::Error::custom(format!("duplicate key '{}'", raw)));
            }
        }

        Ok(KeyedMap(map))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Label {
        text: String,
        weight: u32,
    }

    #[test]
    fn test_guid_keys_encode_as_hyphenated_strings() {
        let id = Uuid::parse_str("6f1b2c3d-0000-4000-8000-00000000000a").unwrap();
        let map: GuidMap<String> = [(id, "Finance".to_string())].into_iter().collect();

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"6f1b2c3d-0000-4000-8000-00000000000a":"Finance"}"#);
    }

    #[test]
    fn test_guid_keys_accept_braced_form() {
        let json = r#"{"{6f1b2c3d-0000-4000-8000-00000000000a}":"Finance"}"#;
        let map: GuidMap<String> = serde_json::from_str(json).unwrap();

        let id = Uuid::parse_str("6f1b2c3d-0000-4000-8000-00000000000a").unwrap();
        assert_eq!(map.get(&id).map(String::as_str), Some("Finance"));
    }

    #[test]
    fn test_invalid_guid_key_is_error() {
        let json = r#"{"6f1b2c3d-0000-4000-8000-00000000000a":"ok","not-a-guid":"lost"}"#;
        let result: Result<GuidMap<String>, _> = serde_json::from_str(json);

        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid GUID key 'not-a-guid'"), "{}", err);
    }

    #[test]
    fn test_int_keys_round_trip() {
        let map: IntMap<String> = [(1033, "Pages".to_string()), (1036, "Pages".to_string())]
            .into_iter()
            .collect();

        let json = serde_json::to_string(&map).unwrap();
        let decoded: IntMap<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, map);
    }

    #[test]
    fn test_invalid_int_key_is_error() {
        let result: Result<IntMap<String>, _> = serde_json::from_str(r#"{"en-us":"Pages"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_key_rejected_for_unsigned() {
        let result: Result<IntMap<String>, _> = serde_json::from_str(r#"{"-1":"x"}"#);
        assert!(result.is_err());

        let signed: KeyedMap<i32, String> = serde_json::from_str(r#"{"-1":"x"}"#).unwrap();
        assert_eq!(signed.get(&-1).map(String::as_str), Some("x"));
    }

    #[test]
    fn test_keys_colliding_after_parse_are_error() {
        let result: Result<IntMap<String>, _> = serde_json::from_str(r#"{"7":"a","07":"b"}"#);

        let err = result.unwrap_err().to_string();
        assert!(err.contains("duplicate key"), "{}", err);
    }

    #[test]
    fn test_guid_keys_with_record_values() {
        let id = Uuid::new_v4();
        let map: GuidMap<Label> = [(
            id,
            Label {
                text: "Region".to_string(),
                weight: 3,
            },
        )]
        .into_iter()
        .collect();

        let value = serde_json::to_value(&map).unwrap();
        assert_eq!(value[id.to_string()]["text"], "Region");

        let decoded: GuidMap<Label> = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, map);
    }

    #[test]
    fn test_nested_keyed_maps() {
        let mut inner: KeyedMap<i32, String> = KeyedMap::new();
        inner.insert(12, "jdoe".to_string());
        let mut outer: KeyedMap<String, KeyedMap<i32, String>> = KeyedMap::new();
        outer.insert("https://a.example".to_string(), inner);

        let json = serde_json::to_string(&outer).unwrap();
        let decoded: KeyedMap<String, KeyedMap<i32, String>> =
            serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, outer);
    }

    #[test]
    fn test_non_object_payload_is_error() {
        let result: Result<GuidMap<String>, _> = serde_json::from_str("[1,2,3]");
        assert!(result.is_err());
    }
}
