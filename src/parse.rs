//! Parsers for OFX documents.

use nom::{branch::alt, error::ParseError, IResult};

use crate::ofx::header::OfxHeader;

pub(crate) mod sgml;
pub(crate) mod xml;

/// Parses the header of an OFX document, in either its 1.x (SGML) or 2.x (XML) form.
pub(crate) fn ofx_header<'a, E>(input: &'a str) -> IResult<&'a str, OfxHeader<'a>, E>
where
    E: ParseError<&'a str>,
{
    alt((sgml::header::ofx_header, xml::header::ofx_header))(input)
}
