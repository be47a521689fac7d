use nom::{branch::alt, combinator::eof};
use serde::de::{self, DeserializeSeed};

use super::Deserializer;
use crate::error::{Error, Result};
use crate::parse::sgml::element::{any_end_tag, whitespace_preceded};

/// Implementor of the serde `SeqAccess` trait for OFX. Elements run until the end tag of the
/// enclosing element.
pub(super) struct SeqAccess<'a, 'de: 'a> {
    de: &'a mut Deserializer<'de>,
}

impl<'a, 'de> SeqAccess<'a, 'de> {
    pub fn new(de: &'a mut Deserializer<'de>) -> Self {
        SeqAccess { de }
    }
}

impl<'a, 'de> de::SeqAccess<'de> for SeqAccess<'a, 'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        if self
            .de
            .peek(whitespace_preceded(alt((any_end_tag, eof))))
            .is_some()
        {
            Ok(None)
        } else {
            self.de.skip_next_outer = false;
            let remaining = self.de.input.len();
            let element = seed.deserialize(&mut *self.de)?;
            if self.de.input.len() == remaining {
                return Err(self.de.unexpected());
            }
            Ok(Some(element))
        }
    }
}
