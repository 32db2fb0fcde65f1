//! Fixed-width administrative region codes and their ancestor prefixes.
//!
//! A region code is six ASCII digits read as three two-digit segments:
//! province, city and county. The first `k` characters of a code form the
//! prefix of its ancestor at level `k / 2`; the empty prefix is the whole
//! country.

use std::fmt;

use crate::error::{ModelError, Result};

/// Number of digits in a full region code.
pub const ADCODE_LENGTH: usize = 6;

/// Number of digits contributed by each administrative level.
pub const SEGMENT_WIDTH: usize = 2;

/// Deepest child prefix length that is still grouped and summed.
///
/// Children at a longer prefix (county level) are shown one record per code.
pub const MAX_AGGREGATION_DEPTH: usize = 4;

/// Map identifier reserved for the whole-country boundary geometry.
pub const COUNTRY_MAP_CODE: &str = "100000";

fn is_ascii_digits(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_digit())
}

/// A full region code: exactly [`ADCODE_LENGTH`] ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionCode(String);

impl RegionCode {
    /// Validate a region code. Input is never trimmed or padded.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.len() != ADCODE_LENGTH || !is_ascii_digits(&value) {
            return Err(ModelError::InvalidRegionCode(value));
        }
        Ok(Self(value))
    }

    /// The reserved whole-country map identifier.
    pub fn country() -> Self {
        Self(COUNTRY_MAP_CODE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The ancestor prefix made of the first `len` digits.
    ///
    /// `len` is clamped to the code length and rounded down to a whole segment.
    pub fn truncated(&self, len: usize) -> RegionPrefix {
        let len = len.min(ADCODE_LENGTH) / SEGMENT_WIDTH * SEGMENT_WIDTH;
        RegionPrefix(self.0[..len].to_string())
    }
}

impl AsRef<str> for RegionCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl serde::Serialize for RegionCode {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for RegionCode {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

/// A leading part of a region code identifying an ancestor scope.
///
/// Always a whole number of segments, at most [`ADCODE_LENGTH`] digits long.
/// The empty prefix is the country scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionPrefix(String);

impl RegionPrefix {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.len() > ADCODE_LENGTH
            || value.len() % SEGMENT_WIDTH != 0
            || !is_ascii_digits(&value)
        {
            return Err(ModelError::InvalidPrefix(value));
        }
        Ok(Self(value))
    }

    /// The empty prefix.
    pub fn country() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix length in digits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_country(&self) -> bool {
        self.0.is_empty()
    }

    /// Administrative level: 0 country, 1 province, 2 city, 3 county.
    pub fn level(&self) -> usize {
        self.0.len() / SEGMENT_WIDTH
    }

    /// True when the prefix is a full code and nothing lies below it.
    pub fn is_leaf(&self) -> bool {
        self.0.len() >= ADCODE_LENGTH
    }

    /// Length of the prefixes one level below this one.
    pub fn child_len(&self) -> usize {
        self.0.len() + SEGMENT_WIDTH
    }

    /// The prefix one level up, or `None` at the country scope.
    pub fn parent(&self) -> Option<Self> {
        if self.is_country() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - SEGMENT_WIDTH].to_string()))
    }

    /// Keep at most `len` digits (rounded down to a whole segment).
    pub fn truncated(&self, len: usize) -> Self {
        let len = len.min(self.0.len()) / SEGMENT_WIDTH * SEGMENT_WIDTH;
        Self(self.0[..len].to_string())
    }

    /// Right-pad with zeros to a full region code.
    pub fn padded(&self) -> RegionCode {
        let mut code = String::with_capacity(ADCODE_LENGTH);
        code.push_str(&self.0);
        while code.len() < ADCODE_LENGTH {
            code.push('0');
        }
        RegionCode(code)
    }

    /// Returns true if `code` lies inside this scope.
    pub fn matches(&self, code: &RegionCode) -> bool {
        code.0.starts_with(&self.0)
    }
}

impl AsRef<str> for RegionPrefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl serde::Serialize for RegionPrefix {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for RegionPrefix {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}
