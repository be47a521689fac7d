use nom::{
    branch::{alt, permutation},
    bytes::complete::tag,
    character::complete::{line_ending, not_line_ending, u32},
    combinator::{map, peek, value},
    error::ParseError,
    sequence::{terminated, tuple},
    IResult, Parser,
};

use crate::ofx::header::*;

/// Parses an element.
fn elem<'a, O, E, P>(name: &'a str, mut p: P) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where
    E: ParseError<&'a str>,
    P: Parser<&'a str, O, E>,
{
    move |input: &str| {
        let (input, _) = terminated(tag(name), tag(":"))(input)?;
        let (input, value) = p.parse(input)?;
        let (input, _) = line_ending(input)?;
        Ok((input, value))
    }
}

/// Parses the `OFXHEADER` header element.
fn header_version_elem<'a, E>(input: &'a str) -> IResult<&'a str, u32, E>
where
    E: ParseError<&'a str>,
{
    elem("OFXHEADER", u32)(input)
}

/// Parses the `DATA` header element.
fn data_elem<'a, E>(input: &'a str) -> IResult<&'a str, OfxContentType, E>
where
    E: ParseError<&'a str>,
{
    elem(
        "DATA",
        alt((
            value(OfxContentType::OfxSgml, terminated(tag("OFXSGML"), peek_eol)),
            map(not_line_ending, |v: &str| {
                OfxContentType::Unknown(String::from(v))
            }),
        )),
    )(input)
}

/// Parses the `VERSION` header element.
fn version_elem<'a, E>(input: &'a str) -> IResult<&'a str, u32, E>
where
    E: ParseError<&'a str>,
{
    elem("VERSION", u32)(input)
}

/// Parses the `SECURITY` header element.
fn security_elem<'a, E>(input: &'a str) -> IResult<&'a str, OfxSecurity, E>
where
    E: ParseError<&'a str>,
{
    elem(
        "SECURITY",
        alt((
            value(OfxSecurity::None, terminated(tag("NONE"), peek_eol)),
            value(OfxSecurity::Type1, terminated(tag("TYPE1"), peek_eol)),
            map(not_line_ending, |v: &str| {
                OfxSecurity::Unknown(String::from(v))
            }),
        )),
    )(input)
}

/// Parses the `ENCODING` header element.
fn encoding_elem<'a, E>(input: &'a str) -> IResult<&'a str, OfxEncoding, E>
where
    E: ParseError<&'a str>,
{
    elem(
        "ENCODING",
        alt((
            value(OfxEncoding::UsAscii, terminated(tag("USASCII"), peek_eol)),
            value(OfxEncoding::Utf8, terminated(tag("UTF-8"), peek_eol)),
            map(not_line_ending, |v: &str| {
                OfxEncoding::Unknown(String::from(v))
            }),
        )),
    )(input)
}

/// Parses the `CHARSET` header element.
fn charset_elem<'a, E>(input: &'a str) -> IResult<&'a str, OfxCharset, E>
where
    E: ParseError<&'a str>,
{
    elem(
        "CHARSET",
        alt((
            value(OfxCharset::Latin1, terminated(tag("ISO-8859-1"), peek_eol)),
            value(OfxCharset::WindowsLatin1, terminated(tag("1252"), peek_eol)),
            value(OfxCharset::None, terminated(tag("NONE"), peek_eol)),
            map(not_line_ending, |v: &str| {
                OfxCharset::Unknown(String::from(v))
            }),
        )),
    )(input)
}

/// Succeeds without consuming anything when a line ending follows.
fn peek_eol<'a, E>(input: &'a str) -> IResult<&'a str, (), E>
where
    E: ParseError<&'a str>,
{
    value((), peek(line_ending))(input)
}

/// Parses the `COMPRESSION` header element.
fn compression_elem<'a, E>(input: &'a str) -> IResult<&'a str, &'a str, E>
where
    E: ParseError<&'a str>,
{
    elem("COMPRESSION", not_line_ending)(input)
}

/// Parses the `OLDFILEUID` header element.
fn old_file_uid_elem<'a, E>(input: &'a str) -> IResult<&'a str, &'a str, E>
where
    E: ParseError<&'a str>,
{
    elem("OLDFILEUID", not_line_ending)(input)
}

/// Parses the `NEWFILEUID` header element.
fn new_file_uid_elem<'a, E>(input: &'a str) -> IResult<&'a str, &'a str, E>
where
    E: ParseError<&'a str>,
{
    elem("NEWFILEUID", not_line_ending)(input)
}

/// Parses the header of an SGML OFX document.
pub(crate) fn ofx_header<'a, E>(input: &'a str) -> IResult<&'a str, OfxHeader<'a>, E>
where
    E: ParseError<&'a str>,
{
    let (
        input,
        (
            header_version,
            (data, version, security, encoding, charset, compression, old_file_uid, new_file_uid),
        ),
    ) = tuple((
        header_version_elem,
        permutation((
            data_elem,
            version_elem,
            security_elem,
            encoding_elem,
            charset_elem,
            compression_elem,
            old_file_uid_elem,
            new_file_uid_elem,
        )),
    ))(input)?;

    Ok((
        input,
        OfxHeader {
            header_version,
            data,
            version,
            security,
            encoding,
            charset,
            compression,
            old_file_uid,
            new_file_uid,
        },
    ))
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use nom::error::ErrorKind;
    use test_case::test_case;

    use crate::parse::test_utils::{assert_parser, Expected};

    use super::*;

    #[test_case(""             , Err(ErrorKind::Tag), ""              ; "eof"           )]
    #[test_case(":VAL\r\nx"    , Err(ErrorKind::Tag), ":VAL\r\nx"     ; "empty name"    )]
    #[test_case("NOPE:VAL\r\nx", Err(ErrorKind::Tag), "NOPE:VAL\r\nx" ; "name mismatch" )]
    #[test_case("NAME:\r\nx"   , Err(ErrorKind::Tag), "\r\nx"         ; "value mismatch")]
    #[test_case("NAME:VAL\r\nx", Ok("VAL")          , "x"             ; "matched value" )]
    fn elem(input: &str, expected: Expected<&str>, remaining: &str) {
        assert_parser(super::elem("NAME", tag("VAL")), input, expected, remaining);
    }

    #[test_case("ASDF:100\r\n"      , Err(ErrorKind::Tag)  , "ASDF:100\r\n" ; "invalid tag"  )]
    #[test_case("OFXHEADER:\r\n"    , Err(ErrorKind::Digit), "\r\n"         ; "empty value"  )]
    #[test_case("OFXHEADER:ASDF\r\n", Err(ErrorKind::Digit), "ASDF\r\n"     ; "invalid value")]
    #[test_case("OFXHEADER:100\r\n" , Ok(100)              , ""             ; "valid value"  )]
    #[test_case("OFXHEADER:100\n"   , Ok(100)              , ""             ; "bare newline" )]
    fn header_version_elem(input: &str, expected: Expected<u32>, remaining: &str) {
        assert_parser(super::header_version_elem, input, expected, remaining);
    }

    #[test_case("ASDF:OFXSGML\r\n", Err(ErrorKind::Tag), "ASDF:OFXSGML\r\n" ; "invalid tag")]
    #[test_case(
        "DATA:ofxsgml\r\n",
        Ok(OfxContentType::Unknown(String::from("ofxsgml"))),
        "" ;
        "unknown value"
    )]
    #[test_case(
        "DATA:OFXSGMLX\r\n",
        Ok(OfxContentType::Unknown(String::from("OFXSGMLX"))),
        "" ;
        "known value prefix"
    )]
    #[test_case("DATA:OFXSGML\r\n", Ok(OfxContentType::OfxSgml), "" ; "known value")]
    fn data_elem(input: &str, expected: Expected<OfxContentType>, remaining: &str) {
        assert_parser(super::data_elem, input, expected, remaining);
    }

    #[test_case("ASDF:100\r\n"    , Err(ErrorKind::Tag)  , "ASDF:100\r\n" ; "invalid tag"  )]
    #[test_case("VERSION:\r\n"    , Err(ErrorKind::Digit), "\r\n"         ; "empty value"  )]
    #[test_case("VERSION:ASDF\r\n", Err(ErrorKind::Digit), "ASDF\r\n"     ; "invalid value")]
    #[test_case("VERSION:102\r\n" , Ok(102)              , ""             ; "valid value"  )]
    fn version_elem(input: &str, expected: Expected<u32>, remaining: &str) {
        assert_parser(super::version_elem, input, expected, remaining);
    }

    #[test_case("ASDF:NONE\r\n", Err(ErrorKind::Tag), "ASDF:NONE\r\n" ; "invalid tag")]
    #[test_case(
        "SECURITY:\r\n",
        Ok(OfxSecurity::Unknown(String::from(""))),
        "" ;
        "empty"
    )]
    #[test_case(
        "SECURITY:type1\r\n",
        Ok(OfxSecurity::Unknown(String::from("type1"))),
        "" ;
        "unknown value"
    )]
    #[test_case("SECURITY:NONE\r\n" , Ok(OfxSecurity::None),  "" ; "known value none" )]
    #[test_case("SECURITY:TYPE1\r\n", Ok(OfxSecurity::Type1), "" ; "known value type1")]
    fn security_elem(input: &str, expected: Expected<OfxSecurity>, remaining: &str) {
        assert_parser(super::security_elem, input, expected, remaining);
    }

    #[test_case("ASDF:100\r\n"        , Err(ErrorKind::Tag)     , "ASDF:100\r\n" ; "invalid tag"        )]
    #[test_case(
        "ENCODING:usascii\r\n",
        Ok(OfxEncoding::Unknown(String::from("usascii"))),
        "" ;
        "unknown value"
    )]
    #[test_case("ENCODING:USASCII\r\n", Ok(OfxEncoding::UsAscii), ""             ; "known value usascii")]
    #[test_case("ENCODING:UTF-8\r\n"  , Ok(OfxEncoding::Utf8)   , ""             ; "known value utf-8"  )]
    fn encoding_elem(input: &str, expected: Expected<OfxEncoding>, remaining: &str) {
        assert_parser(super::encoding_elem, input, expected, remaining);
    }

    #[test_case("CHARSET:1252\r\n"      , Ok(OfxCharset::WindowsLatin1), "" ; "windows latin1")]
    #[test_case("CHARSET:ISO-8859-1\r\n", Ok(OfxCharset::Latin1)       , "" ; "latin1"        )]
    #[test_case("CHARSET:NONE\r\n"      , Ok(OfxCharset::None)         , "" ; "none"          )]
    #[test_case(
        "CHARSET:8859-1\r\n",
        Ok(OfxCharset::Unknown(String::from("8859-1"))),
        "" ;
        "unknown value"
    )]
    fn charset_elem(input: &str, expected: Expected<OfxCharset>, remaining: &str) {
        assert_parser(super::charset_elem, input, expected, remaining);
    }

    #[test_case("ASDF:100\r\n"        , Err(ErrorKind::Tag), "ASDF:100\r\n" ; "invalid tag"   )]
    #[test_case("COMPRESSION:\r\n"    , Ok("")             , ""             ; "empty value"   )]
    #[test_case("COMPRESSION:ASDF\r\n", Ok("ASDF")         , ""             ; "nonempty value")]
    fn compression_elem(input: &str, expected: Expected<&str>, remaining: &str) {
        assert_parser(super::compression_elem, input, expected, remaining);
    }

    #[test_case("ASDF:ASDF\r\n"      , Err(ErrorKind::Tag), "ASDF:ASDF\r\n" ; "invalid tag"    )]
    #[test_case("OLDFILEUID:\r\n"    , Ok("")             , ""              ; "empty value"    )]
    #[test_case("OLDFILEUID: A1#\r\n", Ok(" A1#")         , ""              ; "nonempty value" )]
    fn old_file_uid_elem(input: &str, expected: Expected<&str>, remaining: &str) {
        assert_parser(super::old_file_uid_elem, input, expected, remaining);
    }

    #[test_case("ASDF:ASDF\r\n"      , Err(ErrorKind::Tag), "ASDF:ASDF\r\n" ; "invalid tag"    )]
    #[test_case("NEWFILEUID:\r\n"    , Ok("")             , ""              ; "empty value"    )]
    #[test_case("NEWFILEUID: A1#\r\n", Ok(" A1#")         , ""              ; "nonempty value" )]
    fn new_file_uid_elem(input: &str, expected: Expected<&str>, remaining: &str) {
        assert_parser(super::new_file_uid_elem, input, expected, remaining);
    }

    #[test_case(
        "DATA:OFXSGML\r\n\
         OFXHEADER:100\r\n\
         VERSION:102\r\n\
         SECURITY:NONE\r\n\
         ENCODING:USASCII\r\n\
         CHARSET:1252\r\n\
         COMPRESSION:\r\n\
         OLDFILEUID:OLD\r\n\
         NEWFILEUID:NEW\r\n\r\n",
        Err(ErrorKind::Tag),
        "DATA:OFXSGML\r\n\
         OFXHEADER:100\r\n\
         VERSION:102\r\n\
         SECURITY:NONE\r\n\
         ENCODING:USASCII\r\n\
         CHARSET:1252\r\n\
         COMPRESSION:\r\n\
         OLDFILEUID:OLD\r\n\
         NEWFILEUID:NEW\r\n\r\n" ;
        "ofxheader elem not first"
    )]
    #[test_case(
        "OFXHEADER:999\r\n\
         DATA:ASDF1\r\n\
         VERSION:101\r\n\
         SECURITY:ASDF2\r\n\
         ENCODING:USASCII\r\n\
         CHARSET:ASDF3\r\n\
         COMPRESSION:\r\n\
         OLDFILEUID:ASDF4\r\n\
         NEWFILEUID:ASDF5\r\n",
        Ok(OfxHeader {
                header_version: 999,
                data: OfxContentType::Unknown(String::from("ASDF1")),
                version: 101,
                security: OfxSecurity::Unknown(String::from("ASDF2")),
                encoding: OfxEncoding::UsAscii,
                charset: OfxCharset::Unknown(String::from("ASDF3")),
                compression: "",
                old_file_uid: "ASDF4",
                new_file_uid: "ASDF5",

        }),
        "" ;
        "tolerates unknown values"
    )]
    #[test_case(
        "OFXHEADER:100\r\n\
         DATA:OFXSGML\r\n\
         VERSION:102\r\n\
         SECURITY:NONE\r\n\
         ENCODING:USASCII\r\n\
         CHARSET:1252\r\n\
         COMPRESSION:\r\n\
         OLDFILEUID:OLD\r\n\
         NEWFILEUID:NEW\r\nx",
        Ok(OfxHeader {
            header_version: 100,
            data: OfxContentType::OfxSgml,
            version: 102,
            security: OfxSecurity::None,
            encoding: OfxEncoding::UsAscii,
            charset: OfxCharset::WindowsLatin1,
            compression: "",
            old_file_uid: "OLD",
            new_file_uid: "NEW",
        }),
        "x" ;
        "valid ordered header"
    )]
    #[test_case(
        // Note: OFXHEADER must always come first
        "OFXHEADER:100\r\n\
         COMPRESSION:\r\n\
         VERSION:102\r\n\
         ENCODING:USASCII\r\n\
         OLDFILEUID:OLD\r\n\
         CHARSET:1252\r\n\
         DATA:OFXSGML\r\n\
         NEWFILEUID:NEW\r\n\
         SECURITY:NONE\r\nx",
        Ok(OfxHeader {
            header_version: 100,
            data: OfxContentType::OfxSgml,
            version: 102,
            security: OfxSecurity::None,
            encoding: OfxEncoding::UsAscii,
            charset: OfxCharset::WindowsLatin1,
            compression: "",
            old_file_uid: "OLD",
            new_file_uid: "NEW",
        }),
        "x" ;
        "valid out-of-order header"
    )]
    fn ofx_header(input: &str, expected: Expected<OfxHeader>, remaining: &str) {
        assert_parser(super::ofx_header, input, expected, remaining);
    }
}
