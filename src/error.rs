use std::fmt::Display;

use serde::de;
use thiserror::Error;

/// Errors produced while parsing an OFX document.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Message(String),
    #[error("unexpected end of input")]
    ParseIncomplete,
    #[error("parse error:\n{0}")]
    ParseError(String),
    #[error("unexpected input after the closing `</OFX>` tag")]
    TrailingInput,
    #[error("value contains escape sequences and cannot be borrowed")]
    InvalidBorrowedStr,
    #[error("enum variant names may not contain escape sequences")]
    EscapesInEnumVariant,
    #[error("invalid date/time value `{0}`")]
    InvalidDateTime(String),
    #[error("invalid amount `{0}`")]
    InvalidAmount(String),
    #[error("document contains no bank or credit card statement")]
    NoStatement,
}

impl de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Tolerated irregularities in an OFX header.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum OfxParseWarning {
    #[error("unrecognized OFXHEADER value `{0}`")]
    UnrecognizedOfxHeaderVersion(u32),
    #[error("unrecognized VERSION value `{0}`")]
    UnrecognizedVersion(u32),
    #[error("unrecognized DATA value `{0}`")]
    UnrecognizedContentType(String),
    #[error("unrecognized SECURITY value `{0}`")]
    UnrecognizedSecurity(String),
    #[error("unrecognized ENCODING value `{0}`")]
    UnrecognizedEncoding(String),
    #[error("unrecognized CHARSET value `{0}`")]
    UnrecognizedCharset(String),
}
