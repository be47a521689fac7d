use serde::Deserialize;

use crate::{error::Result, ofx::Ofx};

pub mod sgml;

/// Deserializes an OFX document, accepting either an SGML (1.x) or an XML (2.x) header.
pub fn from_str<'a, T>(s: &'a str) -> Result<Ofx<'a, T>>
where
    T: Deserialize<'a>,
{
    sgml::from_str(s)
}
