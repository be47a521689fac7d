//! Parsers for XML-based (v2.x) OFX documents.

pub(crate) mod header;
