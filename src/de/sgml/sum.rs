use std::borrow::Cow;

use nom::combinator::{opt, verify};
use nom::{branch::alt, combinator::map};
use serde::de::{
    self, value::BorrowedStrDeserializer, Deserializer as SerdeDeserializer, IgnoredAny,
};

use super::Deserializer;
use crate::parse::sgml::element::{any_start_tag, end_tag, whitespace_preceded};
use crate::{
    error::{Error, Result},
    parse::sgml::element::elem_value,
};

/// Implementor of the serde `VariantAccess` trait for OFX.
pub(super) struct VariantAccess<'a, 'de: 'a> {
    de: &'a mut Deserializer<'de>,
    name: &'de str,
    /// Whether the variant was named by a start tag (`<STMTTRN>...`) rather than by an element
    /// value (`<SEVERITY>INFO`).
    element: bool,
}

impl<'a, 'de> VariantAccess<'a, 'de> {
    pub(super) fn new(de: &'a mut Deserializer<'de>, name: &'de str, element: bool) -> Self {
        VariantAccess { de, name, element }
    }

    fn close(&mut self) -> Result<()> {
        if self.element {
            self.de
                .consume(opt(whitespace_preceded(end_tag(self.name))))?;
        }
        Ok(())
    }
}

impl<'a, 'de> de::VariantAccess<'de> for VariantAccess<'a, 'de> {
    type Error = Error;

    fn unit_variant(mut self) -> Result<()> {
        if self.element {
            // Unit variants carry no data; whatever the element holds is skipped.
            self.de.skip_next_outer = true;
            self.de.open_tag = Some(self.name);
            (&mut *self.de).deserialize_ignored_any(IgnoredAny)?;
            self.de.skip_next_outer = false;
        }
        self.close()
    }

    fn newtype_variant_seed<T: de::DeserializeSeed<'de>>(mut self, seed: T) -> Result<T::Value> {
        self.de.skip_next_outer = self.element;
        let result = seed.deserialize(&mut *self.de)?;
        self.de.skip_next_outer = false;
        self.close()?;
        Ok(result)
    }

    fn tuple_variant<V: de::Visitor<'de>>(mut self, len: usize, visitor: V) -> Result<V::Value> {
        let result = (&mut *self.de).deserialize_tuple(len, visitor)?;
        self.close()?;
        Ok(result)
    }

    fn struct_variant<V: de::Visitor<'de>>(
        mut self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let result = (&mut *self.de).deserialize_map(visitor)?;
        self.close()?;
        Ok(result)
    }
}

/// Implementor of the serde `EnumAccess` trait for OFX.
pub(super) struct EnumAccess<'a, 'de: 'a> {
    de: &'a mut Deserializer<'de>,
}

impl<'a, 'de> EnumAccess<'a, 'de> {
    pub(super) fn new(de: &'a mut Deserializer<'de>) -> Self {
        EnumAccess { de }
    }
}

impl<'a, 'de> de::EnumAccess<'de> for EnumAccess<'a, 'de> {
    type Error = Error;
    type Variant = VariantAccess<'a, 'de>;

    fn variant_seed<V: de::DeserializeSeed<'de>>(
        self,
        seed: V,
    ) -> Result<(V::Value, VariantAccess<'a, 'de>)> {
        let (name, element) = self.de.consume(whitespace_preceded(alt((
            map(any_start_tag, |name: &'de str| (Cow::Borrowed(name), true)),
            // A `<` that does not open a well-formed tag leaves an empty value.
            map(
                verify(elem_value, |value: &Cow<'de, str>| !value.is_empty()),
                |value: Cow<'de, str>| (value, false),
            ),
        ))))?;
        let name_str = match name {
            Cow::Borrowed(name) => Ok(name.trim()),
            Cow::Owned(_) => Err(Error::EscapesInEnumVariant),
        }?;

        let variant = seed.deserialize(BorrowedStrDeserializer::<Error>::new(name_str))?;
        Ok((variant, VariantAccess::new(self.de, name_str, element)))
    }
}
