use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;
use std::io::Read;
use thiserror::Error;

use crate::normalize::{parse_decimal, DateFormat, ParseError};
use crate::schema::{Column, HeaderIndex, Schema};

/// One normalized export row. `quantity` is zero for the cash schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub symbol: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub commission: Decimal,
    pub fee: Decimal,
    pub amount: Decimal,
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("Malformed row {row}: {source}")]
    MalformedRow { row: usize, source: csv::Error },
    #[error("Configuration file has no data row")]
    MissingConfig,
    #[error("Unknown trade type '{value}' in rule row {row}")]
    UnknownTradeType { row: usize, value: String },
}

/// Reads every data row of a transaction export.
///
/// The header is resolved against `schema` before any row is read. End of input ends the
/// read; a row the decoder rejects is reported with its 1-based data-row number.
pub fn read_transactions<R: Read>(
    data: R,
    schema: Schema,
    date_format: &DateFormat,
) -> Result<Vec<Transaction>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data);

    let header = reader.headers()?.clone();
    let index = HeaderIndex::resolve(&header, schema)?;

    let mut transactions = Vec::new();
    for (n, result) in reader.records().enumerate() {
        let record = result.map_err(|source| ImportError::MalformedRow { row: n + 1, source })?;
        transactions.push(build_transaction(&record, &index, date_format)?);
    }

    tracing::info!(%schema, count = transactions.len(), "loaded transactions");
    Ok(transactions)
}

fn build_transaction(
    record: &StringRecord,
    index: &HeaderIndex,
    date_format: &DateFormat,
) -> Result<Transaction, ParseError> {
    let number = |column: Column| parse_decimal(column.name(), index.field(record, column));

    let quantity = number(Column::Quantity)?;
    let price = number(Column::Price)?;
    // Trade legs are priced as price × quantity; that product must be representable.
    if price.checked_mul(quantity).is_none() {
        return Err(ParseError {
            column: Column::Price.name().to_string(),
            value: index.field(record, Column::Price).to_string(),
            reason: format!("price × quantity ({quantity}) overflows"),
        });
    }

    Ok(Transaction {
        date: date_format.parse(Column::Date.name(), index.field(record, Column::Date))?,
        description: index.field(record, Column::Description).to_string(),
        symbol: index.field(record, Column::Symbol).to_string(),
        quantity,
        price,
        commission: number(Column::Commission)?,
        fee: number(Column::Fee)?,
        amount: number(Column::Amount)?,
    })
}
