use rust_decimal::Decimal;
use serde::Deserialize;

use super::{amount, OfxDateTime, StatusV1};

/// `<BANKMSGSRSV1>`: one statement transaction response per account.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename = "BANKMSGSRSV1")]
pub struct BankMessageSetV1 {
    #[serde(rename = "$value", default)]
    pub responses: Vec<BankMessage>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub enum BankMessage {
    #[serde(rename = "STMTTRNRS")]
    Statement(StatementTransactionResponse),
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename = "STMTTRNRS")]
pub struct StatementTransactionResponse {
    #[serde(rename = "TRNUID")]
    pub transaction_uid: Option<String>,
    #[serde(rename = "STATUS")]
    pub status: Option<StatusV1>,
    #[serde(rename = "STMTRS")]
    pub statement: Option<StatementResponse>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename = "STMTRS")]
pub struct StatementResponse {
    #[serde(rename = "CURDEF")]
    pub currency: Option<String>,
    #[serde(rename = "BANKACCTFROM")]
    pub account: Option<BankAccount>,
    #[serde(rename = "BANKTRANLIST")]
    pub transaction_list: Option<TransactionList>,
    #[serde(rename = "LEDGERBAL")]
    pub ledger_balance: Option<Balance>,
    #[serde(rename = "AVAILBAL")]
    pub available_balance: Option<Balance>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename = "BANKACCTFROM")]
pub struct BankAccount {
    #[serde(rename = "BANKID")]
    pub bank_id: Option<String>,
    #[serde(rename = "BRANCHID")]
    pub branch_id: Option<String>,
    #[serde(rename = "ACCTID")]
    pub account_id: String,
    #[serde(rename = "ACCTTYPE")]
    pub account_type: Option<String>,
}

/// `<CREDITCARDMSGSRSV1>`: one credit card statement response per account.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename = "CREDITCARDMSGSRSV1")]
pub struct CreditCardMessageSetV1 {
    #[serde(rename = "$value", default)]
    pub responses: Vec<CreditCardMessage>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub enum CreditCardMessage {
    #[serde(rename = "CCSTMTTRNRS")]
    Statement(CreditCardStatementTransactionResponse),
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename = "CCSTMTTRNRS")]
pub struct CreditCardStatementTransactionResponse {
    #[serde(rename = "TRNUID")]
    pub transaction_uid: Option<String>,
    #[serde(rename = "STATUS")]
    pub status: Option<StatusV1>,
    #[serde(rename = "CCSTMTRS")]
    pub statement: Option<CreditCardStatementResponse>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename = "CCSTMTRS")]
pub struct CreditCardStatementResponse {
    #[serde(rename = "CURDEF")]
    pub currency: Option<String>,
    #[serde(rename = "CCACCTFROM")]
    pub account: Option<CreditCardAccount>,
    #[serde(rename = "BANKTRANLIST")]
    pub transaction_list: Option<TransactionList>,
    #[serde(rename = "LEDGERBAL")]
    pub ledger_balance: Option<Balance>,
    #[serde(rename = "AVAILBAL")]
    pub available_balance: Option<Balance>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename = "CCACCTFROM")]
pub struct CreditCardAccount {
    #[serde(rename = "ACCTID")]
    pub account_id: String,
}

/// `<BANKTRANLIST>`: the statement period followed by the transactions in it.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename = "BANKTRANLIST")]
pub struct TransactionList {
    #[serde(rename = "$value", default)]
    pub items: Vec<TransactionListItem>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub enum TransactionListItem {
    #[serde(rename = "DTSTART")]
    Start(OfxDateTime),
    #[serde(rename = "DTEND")]
    End(OfxDateTime),
    #[serde(rename = "STMTTRN")]
    Transaction(StatementTransaction),
    #[serde(other)]
    Other,
}

impl TransactionList {
    pub fn start(&self) -> Option<OfxDateTime> {
        self.items.iter().find_map(|item| match item {
            TransactionListItem::Start(date) => Some(*date),
            _ => None,
        })
    }

    pub fn end(&self) -> Option<OfxDateTime> {
        self.items.iter().find_map(|item| match item {
            TransactionListItem::End(date) => Some(*date),
            _ => None,
        })
    }

    /// The transactions in document order.
    pub fn transactions(&self) -> impl Iterator<Item = &StatementTransaction> {
        self.items.iter().filter_map(|item| match item {
            TransactionListItem::Transaction(transaction) => Some(transaction),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename = "STMTTRN")]
pub struct StatementTransaction {
    #[serde(rename = "TRNTYPE")]
    pub transaction_type: String,
    #[serde(rename = "DTPOSTED")]
    pub posted: OfxDateTime,
    #[serde(rename = "DTUSER")]
    pub user_date: Option<OfxDateTime>,
    #[serde(rename = "TRNAMT", deserialize_with = "amount::deserialize")]
    pub amount: Decimal,
    #[serde(rename = "FITID")]
    pub fit_id: String,
    #[serde(rename = "CHECKNUM")]
    pub check_number: Option<String>,
    #[serde(rename = "NAME")]
    pub name: Option<String>,
    #[serde(rename = "PAYEE")]
    pub payee: Option<Payee>,
    #[serde(rename = "MEMO")]
    pub memo: Option<String>,
    #[serde(rename = "SIC")]
    pub sic: Option<String>,
    #[serde(rename = "MCC")]
    pub mcc: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename = "PAYEE")]
pub struct Payee {
    #[serde(rename = "NAME")]
    pub name: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Balance {
    #[serde(rename = "BALAMT", deserialize_with = "amount::deserialize")]
    pub amount: Decimal,
    #[serde(rename = "DTASOF")]
    pub as_of: Option<OfxDateTime>,
}
