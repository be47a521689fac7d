use serde::Deserialize;

pub use self::datetime::OfxDateTime;
pub use self::header::*;
pub use self::signon::*;
pub use self::statement::*;

pub mod amount;
pub mod datetime;
pub mod header;
pub mod signon;
pub mod statement;

/// An OFX response document.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename = "OFX")]
pub struct OfxRoot {
    #[serde(rename = "SIGNONMSGSRSV1")]
    pub signon_message_set_v1: Option<SignonMessageSetV1>,
    #[serde(rename = "BANKMSGSRSV1")]
    pub bank_message_set_v1: Option<BankMessageSetV1>,
    #[serde(rename = "CREDITCARDMSGSRSV1")]
    pub credit_card_message_set_v1: Option<CreditCardMessageSetV1>,
}

/// An OFX document.
#[derive(Clone, Debug, PartialEq)]
pub struct Ofx<'a, T = OfxRoot> {
    /// The header section of the document.
    pub header: OfxHeader<'a>,
    /// The root of the document.
    pub ofx: T,
}
