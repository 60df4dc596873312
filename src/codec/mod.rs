//! Codec Module
//!
//! Converts cached values to and from the JSON bytes kept in the store.
//! JSON objects only take string keys, so maps keyed by GUIDs or integers
//! go through [`KeyedMap`], which stringifies keys on the way in and parses
//! them strictly on the way out.

mod keyed_map;


pub use keyed_map::{GuidMap, IntMap, KeyedMap, MapKey};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{CacheError, Result};

// == Encode ==
/// Serializes a value into store bytes.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| CacheError::Encode(e.to_string()))
}

// == Decode ==
/// Deserializes store bytes into a value.
///
/// `key` names the entry being decoded and is only used for error context.
pub fn decode<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| CacheError::decode(key, e))
}

// == Decode Or Default ==
/// Like [`decode`], but absent bytes yield an empty `T`.
pub fn decode_or_default<T: DeserializeOwned + Default>(
    key: &str,
    bytes: Option<&[u8]>,
) -> Result<T> {
    match bytes {
        Some(bytes) => decode(key, bytes),
        None => Ok(T::default()),
    }
}
