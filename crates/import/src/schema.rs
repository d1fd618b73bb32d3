use csv::StringRecord;
use std::fmt;

use crate::csv::ImportError;

/// The two export shapes handled by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// Bank exports: one cash account against a matched counter-account.
    Cash,
    /// Brokerage exports: adds `quantity` and trade-typed match rules.
    Investment,
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Cash => write!(f, "cash"),
            Schema::Investment => write!(f, "investment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Date,
    Description,
    Symbol,
    Quantity,
    Price,
    Commission,
    Fee,
    Amount,
}

impl Column {
    const COUNT: usize = 8;

    pub fn name(self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::Description => "description",
            Column::Symbol => "symbol",
            Column::Quantity => "quantity",
            Column::Price => "price",
            Column::Commission => "commission",
            Column::Fee => "fee",
            Column::Amount => "amount",
        }
    }
}

const CASH_COLUMNS: &[Column] = &[
    Column::Date,
    Column::Description,
    Column::Symbol,
    Column::Price,
    Column::Commission,
    Column::Fee,
    Column::Amount,
];

const INVESTMENT_COLUMNS: &[Column] = &[
    Column::Date,
    Column::Description,
    Column::Symbol,
    Column::Quantity,
    Column::Price,
    Column::Commission,
    Column::Fee,
    Column::Amount,
];

impl Schema {
    pub fn required_columns(self) -> &'static [Column] {
        match self {
            Schema::Cash => CASH_COLUMNS,
            Schema::Investment => INVESTMENT_COLUMNS,
        }
    }

    /// Whether match rules for this schema carry a BUY/SELL dimension.
    pub fn has_trade_type(self) -> bool {
        matches!(self, Schema::Investment)
    }
}

/// Position of a header cell by exact, case-sensitive name. A repeated name resolves to its last cell.
pub fn locate(header: &StringRecord, name: &str) -> Result<usize, ImportError> {
    header
        .iter()
        .enumerate()
        .filter(|(_, cell)| *cell == name)
        .map(|(idx, _)| idx)
        .last()
        .ok_or_else(|| ImportError::MissingColumn(name.to_string()))
}

/// Header positions for a schema, resolved once before any data row is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderIndex {
    positions: [Option<usize>; Column::COUNT],
}

impl HeaderIndex {
    pub fn resolve(header: &StringRecord, schema: Schema) -> Result<Self, ImportError> {
        let mut positions = [None; Column::COUNT];
        for &column in schema.required_columns() {
            positions[column as usize] = Some(locate(header, column.name())?);
        }
        Ok(HeaderIndex { positions })
    }

    pub fn position(&self, column: Column) -> Option<usize> {
        self.positions[column as usize]
    }

    /// The raw cell for `column`, or `""` when the schema does not carry it.
    pub fn field<'r>(&self, record: &'r StringRecord, column: Column) -> &'r str {
        self.position(column)
            .and_then(|idx| record.get(idx))
            .unwrap_or_default()
    }
}
