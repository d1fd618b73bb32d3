pub mod config;
pub mod csv;
pub mod normalize;
pub mod rules;
pub mod schema;

pub use config::Config;
pub use crate::csv::{read_transactions, ImportError, Transaction};
pub use normalize::{parse_decimal, DateFormat, ParseError};
pub use rules::{MatchRule, RuleTable, TradeType};
pub use schema::{Column, HeaderIndex, Schema};
