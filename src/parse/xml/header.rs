use nom::{
    bytes::complete::{tag, take_till, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{map_opt, opt},
    error::ParseError,
    multi::many0,
    sequence::{delimited, preceded, separated_pair, terminated, tuple},
    IResult,
};

use crate::ofx::header::*;

type Attribute<'a> = (&'a str, &'a str);

/// Parses a `NAME="value"` attribute of a processing instruction, including its leading
/// whitespace.
fn attribute<'a, E>(input: &'a str) -> IResult<&'a str, Attribute<'a>, E>
where
    E: ParseError<&'a str>,
{
    preceded(
        multispace1,
        separated_pair(
            take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
            char('='),
            delimited(char('"'), take_till(|c: char| c == '"'), char('"')),
        ),
    )(input)
}

/// Parses a processing instruction with the given target, e.g. `<?OFX ... ?>`.
fn processing_instruction<'a, E>(
    target: &'a str,
) -> impl FnMut(&'a str) -> IResult<&'a str, Vec<Attribute<'a>>, E>
where
    E: ParseError<&'a str>,
{
    delimited(
        tuple((tag("<?"), tag(target))),
        many0(attribute),
        tuple((multispace0, tag("?>"))),
    )
}

fn find<'a>(attributes: &[Attribute<'a>], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| *v)
}

fn parse_security(value: &str) -> OfxSecurity {
    match value {
        "NONE" => OfxSecurity::None,
        "TYPE1" => OfxSecurity::Type1,
        other => OfxSecurity::Unknown(String::from(other)),
    }
}

fn parse_encoding(value: &str) -> OfxEncoding {
    match value.to_ascii_uppercase().as_str() {
        "UTF-8" => OfxEncoding::Utf8,
        "US-ASCII" | "USASCII" => OfxEncoding::UsAscii,
        _ => OfxEncoding::Unknown(String::from(value)),
    }
}

fn build<'a>(
    declaration: Option<Vec<Attribute<'a>>>,
    ofx: Vec<Attribute<'a>>,
) -> Option<OfxHeader<'a>> {
    let header_version = find(&ofx, "OFXHEADER")?.parse().ok()?;
    let version = find(&ofx, "VERSION")?.parse().ok()?;
    let encoding = declaration
        .as_deref()
        .and_then(|attrs| find(attrs, "encoding"))
        .map_or(OfxEncoding::Utf8, parse_encoding);

    Some(OfxHeader {
        header_version,
        data: OfxContentType::OfxXml,
        version,
        security: find(&ofx, "SECURITY").map_or(OfxSecurity::None, parse_security),
        encoding,
        charset: OfxCharset::None,
        compression: "",
        old_file_uid: find(&ofx, "OLDFILEUID").unwrap_or(""),
        new_file_uid: find(&ofx, "NEWFILEUID").unwrap_or(""),
    })
}

/// Parses the header of an XML OFX document: an optional XML declaration followed by the
/// `<?OFX ...?>` processing instruction.
pub(crate) fn ofx_header<'a, E>(input: &'a str) -> IResult<&'a str, OfxHeader<'a>, E>
where
    E: ParseError<&'a str>,
{
    map_opt(
        tuple((
            opt(terminated(processing_instruction("xml"), multispace0)),
            processing_instruction("OFX"),
        )),
        |(declaration, ofx)| build(declaration, ofx),
    )(input)
}
