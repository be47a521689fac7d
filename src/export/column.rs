use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use time::Date;

use crate::account::Transaction;

/// An exportable transaction field.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Column {
    Amount,
    Checknum,
    Date,
    Id,
    Mcc,
    Memo,
    Payee,
    Sic,
    Type,
    UserDate,
}

impl Column {
    /// Every column, in output order.
    pub const ALL: [Column; 10] = [
        Column::Amount,
        Column::Checknum,
        Column::Date,
        Column::Id,
        Column::Mcc,
        Column::Memo,
        Column::Payee,
        Column::Sic,
        Column::Type,
        Column::UserDate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::Amount => "amount",
            Column::Checknum => "checknum",
            Column::Date => "date",
            Column::Id => "id",
            Column::Mcc => "mcc",
            Column::Memo => "memo",
            Column::Payee => "payee",
            Column::Sic => "sic",
            Column::Type => "type",
            Column::UserDate => "user_date",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Column::ALL.iter().map(|c| c.name()).collect()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| String::from(s))
    }
}

/// A transaction field value, tagged with how it is rendered.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    Date(Date),
    Amount(Decimal),
    Empty,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Date(date) => write!(
                f,
                "{:04}-{:02}-{:02}",
                date.year(),
                u8::from(date.month()),
                date.day()
            ),
            FieldValue::Amount(amount) => write!(f, "{amount}"),
            FieldValue::Empty => Ok(()),
        }
    }
}

impl Transaction {
    pub fn value(&self, column: Column) -> FieldValue {
        match column {
            Column::Amount => FieldValue::Amount(self.amount),
            Column::Checknum => FieldValue::Text(self.checknum.clone()),
            Column::Date => FieldValue::Date(self.date.utc_date()),
            Column::Id => FieldValue::Text(self.id.clone()),
            Column::Mcc => FieldValue::Text(self.mcc.clone()),
            Column::Memo => FieldValue::Text(self.memo.clone()),
            Column::Payee => FieldValue::Text(self.payee.clone()),
            Column::Sic => FieldValue::Text(self.sic.clone()),
            Column::Type => FieldValue::Text(self.transaction_type.clone()),
            Column::UserDate => self
                .user_date
                .map_or(FieldValue::Empty, |d| FieldValue::Date(d.utc_date())),
        }
    }
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use test_case::test_case;
    use time::macros::{date, datetime};

    use super::*;
    use crate::ofx::OfxDateTime;

    #[test_case("amount"   , Ok(Column::Amount)              ; "first")]
    #[test_case("user_date", Ok(Column::UserDate)            ; "snake case")]
    #[test_case("Amount"   , Err(String::from("Amount"))     ; "case sensitive")]
    #[test_case(" amount"  , Err(String::from(" amount"))    ; "untrimmed")]
    #[test_case("balance"  , Err(String::from("balance"))    ; "unknown")]
    fn column__from_str(input: &str, expected: Result<Column, String>) {
        assert_eq!(input.parse::<Column>(), expected);
    }

    #[test]
    fn column__names__sorted() {
        let names = Column::names();
        let mut sorted = names.clone();
        sorted.sort_unstable();

        assert_eq!(names, sorted);
    }

    #[test_case(FieldValue::Text(String::from("a,b")) , "a,b"        ; "text")]
    #[test_case(FieldValue::Date(date!(2020-01-05))    , "2020-01-05" ; "date")]
    #[test_case(FieldValue::Amount(dec!(-50.00))       , "-50.00"     ; "amount keeps scale")]
    #[test_case(FieldValue::Empty                      , ""           ; "empty")]
    fn field_value__display(value: FieldValue, expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[test]
    fn transaction__value() {
        let trn = Transaction {
            amount: dec!(1.5),
            checknum: String::from("7"),
            date: OfxDateTime(datetime!(2020-01-01 02:00 +5)),
            id: String::from("X"),
            mcc: String::new(),
            memo: String::from("m"),
            payee: String::from("p"),
            sic: String::new(),
            transaction_type: String::from("debit"),
            user_date: None,
        };

        assert_eq!(trn.value(Column::Amount), FieldValue::Amount(dec!(1.5)));
        assert_eq!(trn.value(Column::Date), FieldValue::Date(date!(2019-12-31)));
        assert_eq!(trn.value(Column::Type), FieldValue::Text(String::from("debit")));
        assert_eq!(trn.value(Column::Mcc), FieldValue::Text(String::new()));
        assert_eq!(trn.value(Column::UserDate), FieldValue::Empty);
    }
}
