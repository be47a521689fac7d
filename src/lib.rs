//! Reads OFX/QFX bank and credit card statements and exports their transactions.

pub mod account;
pub mod de;
mod error;
pub mod export;
pub mod ofx;
mod parse;

pub use account::{Account, AccountKind, Statement, Transaction};
pub use de::from_str;
pub use error::{Error, OfxParseWarning, Result};
pub use export::{select_columns, Column, ExportError, Exporter, FieldValue, OutputFormat};
pub use ofx::Ofx;
