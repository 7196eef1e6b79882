//! Domain primitives for catalog lookups.
//!
//! Newtypes keep a slug from being passed where a video handle is expected and
//! keep the raw request index separate from a checked position in an episode
//! list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

/// Stable string identifier of an anime title, used as the catalog lookup key.
///
/// # Examples
///
/// ```rust
/// use yummy_player::domain::Slug;
///
/// let slug = Slug::new("sousou-no-frieren");
/// assert_eq!(slug.as_str(), "sousou-no-frieren");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Zero-based episode index as supplied by a caller.
///
/// The value is signed on purpose: a negative index is a well-formed request
/// that simply names no episode, which is a lookup failure rather than a
/// parse failure. The same holds for integers too wide for `i64`; those keep
/// their decimal text for messages and never match a position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct EpisodeIndex {
    value: i64,
    overflow: Option<Box<str>>,
}

impl EpisodeIndex {
    #[must_use]
    pub const fn new(index: i64) -> Self {
        Self {
            value: index,
            overflow: None,
        }
    }

    /// The index as an `i64`, saturated when it did not fit.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }

    /// Returns the list position this index names, if it is within `0..len`.
    #[must_use]
    pub fn position_in(&self, len: usize) -> Option<usize> {
        if self.overflow.is_some() {
            return None;
        }
        usize::try_from(self.value).ok().filter(|pos| *pos < len)
    }
}

impl fmt::Display for EpisodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.overflow {
            Some(digits) => f.write_str(digits),
            None => write!(f, "{}", self.value),
        }
    }
}

/// Canonical decimal text: no `+`, no leading zeros.
fn canonical_digits(s: &str) -> String {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits = digits.trim_start_matches('0');
    if negative {
        format!("-{digits}")
    } else {
        digits.to_string()
    }
}

impl FromStr for EpisodeIndex {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.parse::<i64>() {
            Ok(value) => Ok(Self::new(value)),
            Err(e) => {
                let value = match e.kind() {
                    IntErrorKind::PosOverflow => i64::MAX,
                    IntErrorKind::NegOverflow => i64::MIN,
                    _ => return Err(e),
                };
                Ok(Self {
                    value,
                    overflow: Some(canonical_digits(s).into_boxed_str()),
                })
            }
        }
    }
}

impl Serialize for EpisodeIndex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.value)
    }
}

impl<'de> Deserialize<'de> for EpisodeIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        i64::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn episode_index_position_bounds() {
        assert_eq!(EpisodeIndex::new(0).position_in(3), Some(0));
        assert_eq!(EpisodeIndex::new(2).position_in(3), Some(2));
        assert_eq!(EpisodeIndex::new(3).position_in(3), None);
        assert_eq!(EpisodeIndex::new(-1).position_in(3), None);
        assert_eq!(EpisodeIndex::new(0).position_in(0), None);
    }

    #[test]
    fn episode_index_parsing() {
        assert_eq!("7".parse::<EpisodeIndex>().unwrap(), EpisodeIndex::new(7));
        assert_eq!("-2".parse::<EpisodeIndex>().unwrap(), EpisodeIndex::new(-2));
        assert!("abc".parse::<EpisodeIndex>().is_err());
        assert!("1.5".parse::<EpisodeIndex>().is_err());
        assert!("".parse::<EpisodeIndex>().is_err());
        assert!("-".parse::<EpisodeIndex>().is_err());
    }

    #[test]
    fn oversized_index_parses_but_names_no_episode() {
        let index: EpisodeIndex = "99999999999999999999".parse().unwrap();
        assert_eq!(index.value(), i64::MAX);
        assert_eq!(index.position_in(usize::MAX), None);
        assert_eq!(index.to_string(), "99999999999999999999");

        let index: EpisodeIndex = " +000123456789012345678901 ".parse().unwrap();
        assert_eq!(index.to_string(), "123456789012345678901");

        let index: EpisodeIndex = "-99999999999999999999".parse().unwrap();
        assert_eq!(index.value(), i64::MIN);
        assert_eq!(index.to_string(), "-99999999999999999999");
    }

    #[test]
    fn slug_serializes_as_plain_string() {
        let slug = Slug::new("bocchi-the-rock");
        assert_eq!(serde_json::to_string(&slug).unwrap(), "\"bocchi-the-rock\"");
        assert_eq!(slug.to_string(), "bocchi-the-rock");
    }
}
