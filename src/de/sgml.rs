mod map;
mod seq;
mod sum;

use std::borrow::Cow;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{anychar, i16, i32, i64, i8, u16, u32, u64, u8},
    combinator::value,
    error::{convert_error, Error as BriefError, VerboseError, VerboseErrorKind},
    number::complete::{double, float},
    Err, Parser,
};
use serde::{
    de::{self, Visitor},
    forward_to_deserialize_any, Deserialize,
};
use tracing::debug;

use self::map::MapAccess;
use self::seq::SeqAccess;
use self::sum::EnumAccess;
use crate::error::{Error, Result};
use crate::ofx::Ofx;
use crate::parse::{
    ofx_header,
    sgml::element::{
        any_end_tag, any_start_tag, elem_value, end_tag, start_tag, whitespace_delimited,
        whitespace_preceded,
    },
};

pub struct Deserializer<'de> {
    input: &'de str,
    /// Set when the start tag of the next struct has already been consumed as a map key or
    /// enum variant name.
    skip_next_outer: bool,
    /// Name of the element whose start tag was just consumed as a map key or variant name.
    open_tag: Option<&'de str>,
}

fn nom_error<'a>(input: &'a str, e: Err<VerboseError<&'a str>>) -> Error {
    match e {
        Err::Incomplete(_) => Error::ParseIncomplete,
        Err::Error(e) | Err::Failure(e) => Error::ParseError(convert_error(input, e)),
    }
}

impl<'de> Deserializer<'de> {
    /// Creates an OFX deserializer over the body of a document, i.e. the text following the
    /// header.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Deserializer {
            input,
            skip_next_outer: false,
            open_tag: None,
        }
    }

    fn consume<O, P>(&mut self, mut p: P) -> Result<O>
    where
        P: Parser<&'de str, O, VerboseError<&'de str>>,
    {
        match p.parse(self.input) {
            Ok((input, v)) => {
                self.input = input;
                Ok(v)
            }
            Err(e) => Err(nom_error(self.input, e)),
        }
    }

    fn peek<O, P>(&self, mut p: P) -> Option<O>
    where
        P: Parser<&'de str, O, BriefError<&'de str>>,
    {
        p.parse(self.input).ok().map(|(_, v)| v)
    }

    /// The error for input that no element can be read from.
    fn unexpected(&self) -> Error {
        let e = VerboseError {
            errors: vec![(self.input, VerboseErrorKind::Context("element"))],
        };
        Error::ParseError(convert_error(self.input, e))
    }

    /// Fails unless all input has been consumed.
    pub fn end(&self) -> Result<()> {
        if self.input.trim().is_empty() {
            Ok(())
        } else {
            Err(Error::TrailingInput)
        }
    }
}

impl<'de, 'a> de::Deserializer<'de> for &'a mut Deserializer<'de> {
    type Error = Error;

    /// Elements holding other elements are visited as maps, anything else as a string. This is
    /// also how unknown elements are skipped.
    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let open_tag = self.open_tag.take();
        let aggregate = self.peek(whitespace_preceded(any_start_tag)).is_some()
            && open_tag.map_or(true, |name| is_closed(self.input, name));
        if aggregate {
            self.skip_next_outer = false;
            visitor.visit_map(MapAccess::new(self, false))
        } else {
            let value = self.consume(elem_value)?;
            visitor.visit_string(String::from(value.trim()))
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_bool(self.consume(whitespace_delimited(alt((
            value(true, tag("Y")),
            value(false, tag("N")),
        ))))?)
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i8(self.consume(whitespace_delimited(i8))?)
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i16(self.consume(whitespace_delimited(i16))?)
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i32(self.consume(whitespace_delimited(i32))?)
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i64(self.consume(whitespace_delimited(i64))?)
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_u8(self.consume(whitespace_delimited(u8))?)
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_u16(self.consume(whitespace_delimited(u16))?)
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_u32(self.consume(whitespace_delimited(u32))?)
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_u64(self.consume(whitespace_delimited(u64))?)
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_f32(self.consume(whitespace_delimited(float))?)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_f64(self.consume(whitespace_delimited(double))?)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_char(self.consume(anychar)?)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.consume(elem_value)? {
            Cow::Borrowed(v) => visitor.visit_borrowed_str(v.trim()),
            Cow::Owned(_) => Err(Error::InvalidBorrowedStr),
        }
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let v = self.consume(elem_value)?;
        visitor.visit_string(String::from(v.trim()))
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        // Option is only used for optional fields
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.skip_next_outer = false;
        visitor.visit_seq(SeqAccess::new(self))
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_tuple(len, visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.skip_next_outer = false;
        visitor.visit_map(MapAccess::new(self, false))
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let skip_outer = self.skip_next_outer;
        self.skip_next_outer = false;
        self.open_tag = None;
        if !skip_outer {
            self.consume(whitespace_delimited(start_tag(name)))?;
        }
        let result = visitor.visit_map(MapAccess::new(self, fields.contains(&"$value")))?;
        if !skip_outer {
            self.consume(whitespace_delimited(end_tag(name)))?;
        }
        Ok(result)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_enum(EnumAccess::new(self))
    }

    forward_to_deserialize_any! { bytes byte_buf identifier ignored_any }
}

/// Whether the element `name`, whose start tag precedes `input`, has its own end tag before
/// the enclosing element ends. Leaf elements in SGML need not be closed, so `<A><B>x</B>` and
/// `<A>` followed by a sibling `<B>x</B>` only differ in what closes later.
fn is_closed(mut input: &str, name: &str) -> bool {
    let mut open: Vec<&str> = Vec::new();
    while let Some(pos) = input.find('<') {
        input = &input[pos..];
        if let Ok((rest, tag)) = any_end_tag::<BriefError<&str>>(input) {
            match open.iter().rposition(|&t| t == tag) {
                // Also closes any unterminated leaves opened after it.
                Some(i) => open.truncate(i),
                None => return tag == name,
            }
            input = rest;
        } else if let Ok((rest, tag)) = any_start_tag::<BriefError<&str>>(input) {
            open.push(tag);
            input = rest;
        } else {
            input = &input[1..];
        }
    }
    false
}

/// Deserializes a complete OFX document: the header followed by the `<OFX>` element.
pub fn from_str<'a, T>(s: &'a str) -> Result<Ofx<'a, T>>
where
    T: Deserialize<'a>,
{
    let s = s.trim_start_matches('\u{feff}').trim_start();
    let (body, header) =
        ofx_header::<VerboseError<&str>>(s).map_err(|e| nom_error(s, e))?;
    debug!(version = header.version, "parsed OFX header");

    let mut deserializer = Deserializer::from_str(body);
    let ofx = T::deserialize(&mut deserializer)?;
    deserializer.end()?;

    Ok(Ofx { header, ofx })
}
