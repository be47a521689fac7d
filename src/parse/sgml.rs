//! Parsers for SGML-based (v1.x) OFX documents. The element parsers also serve v2.x documents,
//! whose XML body is a well-formed subset of the same syntax.

pub(crate) mod element;
pub(crate) mod header;
