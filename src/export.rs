//! Writes statement transactions as CSV, TSV or a text table.

use std::io::{self, Write};

use clap::ValueEnum;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

pub use self::column::{Column, FieldValue};
use self::table::Align;
use crate::account::Transaction;

mod column;
mod table;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Tsv,
    #[default]
    Table,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(
        "invalid column(s): {}. Available columns: {}",
        .invalid.join(", "),
        .available.join(", ")
    )]
    InvalidColumns {
        invalid: Vec<String>,
        available: Vec<&'static str>,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Resolves user-supplied column names. An empty list, or one holding only empty names, selects
/// every column.
pub fn select_columns<S: AsRef<str>>(names: &[S]) -> Result<Vec<Column>, ExportError> {
    if names.iter().all(|name| name.as_ref().is_empty()) {
        return Ok(Column::ALL.to_vec());
    }

    let mut columns = Vec::with_capacity(names.len());
    let mut invalid = Vec::new();
    for name in names {
        match name.as_ref().parse::<Column>() {
            Ok(column) => columns.push(column),
            Err(name) => invalid.push(name),
        }
    }

    if invalid.is_empty() {
        Ok(columns)
    } else {
        Err(ExportError::InvalidColumns {
            invalid,
            available: Column::names(),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Exporter {
    format: OutputFormat,
    columns: Vec<Column>,
    headers: bool,
}

impl Exporter {
    /// Creates an exporter that writes a header row.
    pub fn new(format: OutputFormat, columns: Vec<Column>) -> Self {
        Exporter {
            format,
            columns,
            headers: true,
        }
    }

    pub fn with_headers(mut self, headers: bool) -> Self {
        self.headers = headers;
        self
    }

    fn header(&self) -> Vec<String> {
        self.columns.iter().map(|c| String::from(c.name())).collect()
    }

    /// The display strings of each transaction, one row per transaction.
    pub fn rows(&self, transactions: &[Transaction]) -> Vec<Vec<String>> {
        transactions
            .iter()
            .map(|trn| {
                self.columns
                    .iter()
                    .map(|&column| trn.value(column).to_string())
                    .collect()
            })
            .collect()
    }

    pub fn write<W: Write>(
        &self,
        out: &mut W,
        transactions: &[Transaction],
    ) -> Result<(), ExportError> {
        debug!(
            format = ?self.format,
            rows = transactions.len(),
            "exporting transactions"
        );
        let rows = self.rows(transactions);
        let header = self.headers.then(|| self.header());

        match self.format {
            OutputFormat::Csv => write_delimited(out, b',', header, rows),
            OutputFormat::Tsv => write_delimited(out, b'\t', header, rows),
            OutputFormat::Table => {
                let aligns: Vec<Align> = (0..self.columns.len())
                    .map(|index| column_align(&rows, index))
                    .collect();
                table::write(out, header.as_deref(), &rows, &aligns)?;
                Ok(())
            }
        }
    }
}

/// Columns whose non-empty cells are all numbers are right-aligned.
fn column_align(rows: &[Vec<String>], index: usize) -> Align {
    let mut cells = rows
        .iter()
        .filter_map(|row| row.get(index))
        .filter(|cell| !cell.is_empty())
        .peekable();
    if cells.peek().is_some() && cells.all(|cell| cell.parse::<Decimal>().is_ok()) {
        Align::Right
    } else {
        Align::Left
    }
}

fn write_delimited<W: Write>(
    out: &mut W,
    delimiter: u8,
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .has_headers(false)
        .from_writer(out);
    if let Some(header) = header {
        writer.write_record(&header)?;
    }
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
