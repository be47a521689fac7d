use nom::{
    branch::alt,
    character::complete::multispace0,
    combinator::{eof, opt},
    sequence::tuple,
};
use serde::de::{self, value::BorrowedStrDeserializer, DeserializeSeed};

use super::Deserializer;
use crate::error::{Error, Result};
use crate::parse::sgml::element::{any_end_tag, any_start_tag, end_tag, whitespace_preceded};

/// Implementor of the serde `MapAccess` trait for OFX.
pub(super) struct MapAccess<'a, 'de: 'a> {
    de: &'a mut Deserializer<'de>,
    /// The end tag name to look for after deserializing a value
    tag: Option<&'de str>,
    /// Whether this `MapAccess` is to deserialize all inner contents of an outer element
    strip_outer: bool,
}

impl<'a, 'de> MapAccess<'a, 'de> {
    pub fn new(de: &'a mut Deserializer<'de>, strip_outer: bool) -> Self {
        MapAccess {
            de,
            tag: None,
            strip_outer,
        }
    }
}

impl<'a, 'de> de::MapAccess<'de> for MapAccess<'a, 'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        debug_assert!(self.strip_outer || self.tag.is_none());

        if self
            .de
            .peek(whitespace_preceded(alt((any_end_tag, eof))))
            .is_some()
        {
            return Ok(None);
        }

        if self.strip_outer {
            if self.tag.is_some() {
                Ok(None)
            } else {
                self.tag = Some("$value");
                seed.deserialize(BorrowedStrDeserializer::<Error>::new("$value"))
                    .map(Some)
            }
        } else {
            let name = self.de.consume(whitespace_preceded(any_start_tag))?;
            self.tag = Some(name);
            seed.deserialize(BorrowedStrDeserializer::<Error>::new(name))
                .map(Some)
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        debug_assert!(self.tag.is_some());

        // The start tag has been consumed as the key.
        self.de.skip_next_outer = true;
        if !self.strip_outer {
            self.de.open_tag = self.tag;
        }
        let value = seed.deserialize(&mut *self.de)?;
        self.de.skip_next_outer = false;
        self.de.open_tag = None;

        if !self.strip_outer {
            if let Some(tag) = self.tag.take() {
                self.de.consume(tuple((multispace0, opt(end_tag(tag)))))?;
            }
        }

        Ok(value)
    }
}
