//! Claim entities carried inside bearer tokens.

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// Reserved claim holding the expiration as Unix seconds
pub const EXPIRATION_CLAIM: &str = "exp";

/// Seconds in one day of token lifetime
pub const SECONDS_PER_DAY: i64 = 86_400;

/// A single claim value
///
/// Serialized as a plain JSON scalar. Whole numbers decode as `Integer`,
/// numbers with a fractional part as `Float`. Whole numbers outside the
/// `i64` range are rejected rather than widened to `Float`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClaimValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl ClaimValue {
    /// Returns the string payload, if this is a string claim
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ClaimValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer claim
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ClaimValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as a float for any numeric claim
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ClaimValue::Integer(n) => Some(*n as f64),
            ClaimValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Whether the value can be written as JSON and read back unchanged
    ///
    /// Only NaN and infinite floats fail; JSON has no encoding for them.
    pub fn is_representable(&self) -> bool {
        match self {
            ClaimValue::Float(f) => f.is_finite(),
            _ => true,
        }
    }

    /// Returns the boolean payload, if this is a boolean claim
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ClaimValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for ClaimValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ClaimValueVisitor)
    }
}

struct ClaimValueVisitor;

impl<'de> Visitor<'de> for ClaimValueVisitor {
    type Value = ClaimValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, boolean, float or 64-bit signed integer")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<ClaimValue, E> {
        Ok(ClaimValue::Boolean(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<ClaimValue, E> {
        Ok(ClaimValue::Integer(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<ClaimValue, E> {
        i64::try_from(value)
            .map(ClaimValue::Integer)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<ClaimValue, E> {
        Ok(ClaimValue::Float(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<ClaimValue, E> {
        Ok(ClaimValue::String(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<ClaimValue, E> {
        Ok(ClaimValue::String(value))
    }
}

impl fmt::Display for ClaimValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimValue::Boolean(b) => write!(f, "{}", b),
            ClaimValue::Integer(n) => write!(f, "{}", n),
            ClaimValue::Float(x) => write!(f, "{}", x),
            ClaimValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for ClaimValue {
    fn from(value: bool) -> Self {
        ClaimValue::Boolean(value)
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        ClaimValue::Integer(value)
    }
}

impl From<i32> for ClaimValue {
    fn from(value: i32) -> Self {
        ClaimValue::Integer(value.into())
    }
}

impl From<u32> for ClaimValue {
    fn from(value: u32) -> Self {
        ClaimValue::Integer(value.into())
    }
}

impl From<f64> for ClaimValue {
    fn from(value: f64) -> Self {
        ClaimValue::Float(value)
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        ClaimValue::String(value)
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        ClaimValue::String(value.to_string())
    }
}

/// Token payload: string keys mapped to scalar claim values
///
/// Always contains [`EXPIRATION_CLAIM`] once issued by the token service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(BTreeMap<String, ClaimValue>);

impl Claims {
    /// Creates an empty claim set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a claim, returning the previous value for that key
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ClaimValue>,
    ) -> Option<ClaimValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&ClaimValue> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ClaimValue::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(ClaimValue::as_i64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(ClaimValue::as_bool)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ClaimValue> {
        self.0.remove(key)
    }

    /// Expiration as Unix seconds
    ///
    /// Fractional timestamps are truncated. Returns `None` when the claim is
    /// absent or not numeric.
    pub fn expiration(&self) -> Option<i64> {
        match self.get(EXPIRATION_CLAIM)? {
            ClaimValue::Integer(n) => Some(*n),
            ClaimValue::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            _ => None,
        }
    }

    /// Overwrites the expiration claim
    pub fn set_expiration(&mut self, exp: i64) {
        self.0
            .insert(EXPIRATION_CLAIM.to_string(), ClaimValue::Integer(exp));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ClaimValue> {
        self.0.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, String, ClaimValue> {
        self.0.keys()
    }
}

impl From<BTreeMap<String, ClaimValue>> for Claims {
    fn from(map: BTreeMap<String, ClaimValue>) -> Self {
        Self(map)
    }
}

impl From<Claims> for BTreeMap<String, ClaimValue> {
    fn from(claims: Claims) -> Self {
        claims.0
    }
}

impl<K, V> FromIterator<(K, V)> for Claims
where
    K: Into<String>,
    V: Into<ClaimValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Claims {
    type Item = (String, ClaimValue);
    type IntoIter = btree_map::IntoIter<String, ClaimValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Claims {
    type Item = (&'a String, &'a ClaimValue);
    type IntoIter = btree_map::Iter<'a, String, ClaimValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
