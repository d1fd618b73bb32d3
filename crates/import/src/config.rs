use serde::Deserialize;
use std::io::Read;

use crate::csv::ImportError;
use crate::normalize::DateFormat;

/// Run configuration, read once from a single headerless CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub date_format: DateFormat,
    /// Primary account (cash exports) or default from-account (brokerage exports).
    pub account: String,
    pub currency: String,
    /// Flip the sign of every primary-side amount before posting.
    pub reverse: bool,
}

#[derive(Debug, Deserialize)]
struct ConfigRow {
    date_format: String,
    account: String,
    currency: String,
    reverse: String,
}

impl Config {
    pub fn from_reader<R: Read>(data: R) -> Result<Self, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data);

        let row: ConfigRow = reader
            .deserialize::<ConfigRow>()
            .next()
            .ok_or(ImportError::MissingConfig)??;

        let config = Config {
            date_format: DateFormat::new(&row.date_format),
            account: row.account,
            currency: row.currency,
            reverse: row.reverse.trim() == "Y",
        };
        tracing::debug!(
            date_pattern = config.date_format.pattern(),
            account = %config.account,
            currency = %config.currency,
            reverse = config.reverse,
            "loaded configuration"
        );
        Ok(config)
    }
}
