//! OFX amount values.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};

use crate::error::{Error, Result};

/// Parses an amount, keeping the scale it was written with. Spaces and the grouping separator
/// are dropped: `1,025.53`, `1.025,53` and `1 025,53` all read as 1025.53. A lone comma is the
/// decimal separator.
pub fn parse(s: &str) -> Result<Decimal> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let compact = compact.strip_prefix('+').unwrap_or(&compact);
    let normalized = match (compact.find('.'), compact.rfind(',')) {
        (Some(dot), Some(comma)) if dot < comma => compact.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => compact.replace(',', ""),
        (None, Some(_)) => compact.replace(',', "."),
        _ => String::from(compact),
    };
    Decimal::from_str(&normalized).map_err(|_| Error::InvalidAmount(String::from(s.trim())))
}

/// Deserializes an amount element, for use with `#[serde(deserialize_with = "...")]`.
pub(crate) fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse(&s).map_err(de::Error::custom)
}
