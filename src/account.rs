//! The account, statement and transaction view of an OFX document that the exporter works on.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::ofx::{
    Balance, BankMessage, CreditCardMessage, Ofx, OfxDateTime, OfxRoot, StatementTransaction,
    TransactionList,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccountKind {
    Bank,
    CreditCard,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    pub account_id: String,
    /// The bank id of a bank account. Credit card accounts have none.
    pub routing_number: Option<String>,
    pub account_type: Option<String>,
    pub kind: AccountKind,
    pub currency: Option<String>,
    pub statement: Statement,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Statement {
    pub start_date: Option<OfxDateTime>,
    pub end_date: Option<OfxDateTime>,
    pub balance: Option<Decimal>,
    pub available_balance: Option<Decimal>,
    pub currency: Option<String>,
    pub transactions: Vec<Transaction>,
}

/// A single statement transaction. Missing optional text fields are empty strings.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub amount: Decimal,
    pub checknum: String,
    pub date: OfxDateTime,
    pub id: String,
    pub mcc: String,
    pub memo: String,
    pub payee: String,
    pub sic: String,
    /// The lowercased `TRNTYPE`, e.g. `debit`.
    pub transaction_type: String,
    pub user_date: Option<OfxDateTime>,
}

impl From<&StatementTransaction> for Transaction {
    fn from(trn: &StatementTransaction) -> Self {
        let payee = trn
            .name
            .clone()
            .or_else(|| trn.payee.as_ref().map(|payee| payee.name.clone()))
            .unwrap_or_default();

        Transaction {
            amount: trn.amount,
            checknum: trn.check_number.clone().unwrap_or_default(),
            date: trn.posted,
            id: trn.fit_id.clone(),
            mcc: trn.mcc.clone().unwrap_or_default(),
            memo: trn.memo.clone().unwrap_or_default(),
            payee,
            sic: trn.sic.clone().unwrap_or_default(),
            transaction_type: trn.transaction_type.to_lowercase(),
            user_date: trn.user_date,
        }
    }
}

impl Statement {
    fn new(
        currency: Option<&String>,
        list: Option<&TransactionList>,
        ledger: Option<&Balance>,
        available: Option<&Balance>,
    ) -> Self {
        Statement {
            start_date: list.and_then(TransactionList::start),
            end_date: list.and_then(TransactionList::end),
            balance: ledger.map(|b| b.amount),
            available_balance: available.map(|b| b.amount),
            currency: currency.cloned(),
            transactions: list
                .map(|l| l.transactions().map(Transaction::from).collect())
                .unwrap_or_default(),
        }
    }
}

impl<'a> Ofx<'a, OfxRoot> {
    /// All accounts that carry a statement, bank accounts first, each in document order.
    pub fn accounts(&self) -> Vec<Account> {
        let mut accounts = Vec::new();

        let bank = self.ofx.bank_message_set_v1.iter().flat_map(|s| &s.responses);
        for message in bank {
            let response = match message {
                BankMessage::Statement(response) => response,
                BankMessage::Other => {
                    debug!("skipping unsupported bank message");
                    continue;
                }
            };
            let Some(stmt) = &response.statement else {
                warn!(
                    trnuid = response.transaction_uid.as_deref().unwrap_or(""),
                    "bank statement response carries no statement"
                );
                continue;
            };
            let acct = stmt.account.as_ref();
            accounts.push(Account {
                account_id: acct.map(|a| a.account_id.clone()).unwrap_or_default(),
                routing_number: acct.and_then(|a| a.bank_id.clone()),
                account_type: acct.and_then(|a| a.account_type.clone()),
                kind: AccountKind::Bank,
                currency: stmt.currency.clone(),
                statement: Statement::new(
                    stmt.currency.as_ref(),
                    stmt.transaction_list.as_ref(),
                    stmt.ledger_balance.as_ref(),
                    stmt.available_balance.as_ref(),
                ),
            });
        }

        let card = self
            .ofx
            .credit_card_message_set_v1
            .iter()
            .flat_map(|s| &s.responses);
        for message in card {
            let response = match message {
                CreditCardMessage::Statement(response) => response,
                CreditCardMessage::Other => {
                    debug!("skipping unsupported credit card message");
                    continue;
                }
            };
            let Some(stmt) = &response.statement else {
                warn!(
                    trnuid = response.transaction_uid.as_deref().unwrap_or(""),
                    "credit card statement response carries no statement"
                );
                continue;
            };
            accounts.push(Account {
                account_id: stmt
                    .account
                    .as_ref()
                    .map(|a| a.account_id.clone())
                    .unwrap_or_default(),
                routing_number: None,
                account_type: None,
                kind: AccountKind::CreditCard,
                currency: stmt.currency.clone(),
                statement: Statement::new(
                    stmt.currency.as_ref(),
                    stmt.transaction_list.as_ref(),
                    stmt.ledger_balance.as_ref(),
                    stmt.available_balance.as_ref(),
                ),
            });
        }

        accounts
    }

    /// The first account of the document.
    pub fn account(&self) -> Result<Account> {
        let mut accounts = self.accounts();
        if accounts.len() > 1 {
            warn!(
                count = accounts.len(),
                "document holds several accounts, using the first"
            );
        }
        if accounts.is_empty() {
            return Err(Error::NoStatement);
        }
        Ok(accounts.swap_remove(0))
    }
}
