//! Pluggable value ⇄ JSON-tree conversion.
//!
//! Packs never serialize values themselves: callers hand them a [`Codec`]
//! which turns a typed value into a generic JSON tree (and back).

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;

/// Errors raised by a [`Codec`].
#[derive(Debug, Error)]
pub enum CodecError {
    /// The codec refused the value.
    #[error("value rejected by codec: {0}")]
    Rejected(String),
    /// Wrap serde_json conversion failures.
    #[error("json conversion failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encodes values of `T` to a JSON tree and decodes them back.
pub trait Codec<T> {
    /// Encode `value` into a JSON tree.
    fn encode(&self, value: &T) -> Result<Value, CodecError>;

    /// Decode a value from a JSON tree.
    fn decode(&self, value: &Value) -> Result<T, CodecError>;
}

/// [`Codec`] backed by the value's serde implementation.
pub struct SerdeCodec<T>(PhantomData<fn() -> T>);

impl<T> SerdeCodec<T> {
    /// Create the codec.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for SerdeCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SerdeCodec<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> Copy for SerdeCodec<T> {}

impl<T> fmt::Debug for SerdeCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SerdeCodec")
    }
}

impl<T: Serialize + DeserializeOwned> Codec<T> for SerdeCodec<T> {
    fn encode(&self, value: &T) -> Result<Value, CodecError> {
        Ok(serde_json::to_value(value)?)
    }

    fn decode(&self, value: &Value) -> Result<T, CodecError> {
        Ok(T::deserialize(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Gem {
        name: String,
        hardness: u8,
    }

    #[test]
    fn serde_codec_encodes_and_decodes() {
        let codec = SerdeCodec::<Gem>::new();
        let gem = Gem {
            name: "ruby".into(),
            hardness: 9,
        };
        let tree = codec.encode(&gem).unwrap();
        assert_eq!(tree, json!({"name": "ruby", "hardness": 9}));
        assert_eq!(codec.decode(&tree).unwrap(), gem);
    }

    #[test]
    fn serde_codec_reports_shape_mismatch() {
        let codec = SerdeCodec::<Gem>::new();
        let err = codec.decode(&json!({"name": 3})).unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }
}
