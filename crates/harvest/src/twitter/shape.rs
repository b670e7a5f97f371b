//! Shape checks and safe navigation over raw GraphQL responses.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DecodeError;

/// Read access to a raw JSON tree that reports missing fields by name.
pub trait ValueExt {
    /// Child at `key`, treating `null` as absent.
    fn opt(&self, key: &str) -> Option<&Value>;

    /// Child at `key`, or a decode failure naming it.
    fn req(&self, key: &str) -> Result<&Value, DecodeError>;

    /// String child at `key`.
    fn req_str(&self, key: &str) -> Result<&str, DecodeError>;

    /// Array child at `key`.
    fn req_array(&self, key: &str) -> Result<&[Value], DecodeError>;

    /// Walk a sequence of keys, `None` as soon as one is missing.
    fn at(&self, path: &[&str]) -> Option<&Value>;

    /// Deserialize the child at `key` into a leaf type.
    fn decode<T: DeserializeOwned>(&self, key: &str) -> Result<T, DecodeError>;
}

impl ValueExt for Value {
    fn opt(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|v| !v.is_null())
    }

    fn req(&self, key: &str) -> Result<&Value, DecodeError> {
        self.opt(key).ok_or_else(|| DecodeError::MissingField {
            field: key.to_string(),
        })
    }

    fn req_str(&self, key: &str) -> Result<&str, DecodeError> {
        self.req(key)?
            .as_str()
            .ok_or_else(|| DecodeError::InvalidField {
                field: key.to_string(),
                reason: "expected a string".to_string(),
            })
    }

    fn req_array(&self, key: &str) -> Result<&[Value], DecodeError> {
        self.req(key)?
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| DecodeError::InvalidField {
                field: key.to_string(),
                reason: "expected an array".to_string(),
            })
    }

    fn at(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(self, |node, key| node.opt(key))
    }

    fn decode<T: DeserializeOwned>(&self, key: &str) -> Result<T, DecodeError> {
        T::deserialize(self.req(key)?).map_err(|e| DecodeError::InvalidField {
            field: key.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Assert that a tag field equals `expected`.
pub fn expect_tag(node: &Value, field: &'static str, expected: &str) -> Result<(), DecodeError> {
    expect_one_of(node, field, &[expected]).map(|_| ())
}

/// Assert that a tag field equals one of `allowed`, returning the value found.
pub fn expect_one_of<'a>(
    node: &'a Value,
    field: &'static str,
    allowed: &[&str],
) -> Result<&'a str, DecodeError> {
    let found = node.req_str(field)?;
    if allowed.contains(&found) {
        Ok(found)
    } else {
        Err(DecodeError::UnexpectedTag {
            field,
            expected: allowed.join("|"),
            found: found.to_string(),
        })
    }
}

/// Parse a platform id string. Only the canonical decimal form is accepted,
/// so `id.to_string()` always gives back `id_str`.
pub fn parse_id(id_str: &str) -> Result<u64, DecodeError> {
    match id_str.parse::<u64>() {
        Ok(id) if id.to_string() == id_str => Ok(id),
        _ => Err(DecodeError::InvalidId {
            value: id_str.to_string(),
        }),
    }
}
