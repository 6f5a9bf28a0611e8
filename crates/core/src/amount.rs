//! Price amount value object.
//!
//! The host returns monetary amounts as decimal strings (e.g. `"4.99"`) and
//! formats them itself, so the amount is kept exactly as received. It is never
//! converted to floating point.

use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::OfferError;

/// A non-negative decimal amount, currency-agnostic.
///
/// Value object: two amounts are equal when their decimal text is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Amount(String);

impl Amount {
    pub fn parse(value: &str) -> Result<Self, OfferError> {
        let trimmed = value.trim();
        let (whole, fraction) = match trimmed.split_once('.') {
            Some((w, f)) => (w, Some(f)),
            None => (trimmed, None),
        };

        let digits_ok = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        let has_digit = !whole.is_empty() || fraction.is_some_and(|f| !f.is_empty());

        if !has_digit || !digits_ok(whole) || !fraction.is_none_or(digits_ok) {
            return Err(OfferError::validation(format!(
                "amount must be a non-negative decimal, got {value:?}"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Amount {
    type Err = OfferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Some hosts send the amount as a JSON number instead of a string.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s,
            Raw::Number(n) => n.to_string(),
        };
        Amount::parse(&text).map_err(serde::de::Error::custom)
    }
}
