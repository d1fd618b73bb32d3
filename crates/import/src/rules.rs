use beanfold_core::UNASSIGNED_ACCOUNT;
use serde::Deserialize;
use std::fmt;
use std::io::Read;

use crate::csv::ImportError;
use crate::schema::{locate, Schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TradeType {
    Buy,
    Sell,
    #[default]
    None,
}

impl std::str::FromStr for TradeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "BUY" => Ok(TradeType::Buy),
            "SELL" => Ok(TradeType::Sell),
            "" => Ok(TradeType::None),
            other => Err(format!("Unknown trade type: '{other}'")),
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeType::Buy => write!(f, "BUY"),
            TradeType::Sell => write!(f, "SELL"),
            TradeType::None => Ok(()),
        }
    }
}

/// A substring-to-account mapping.
///
/// Cash rules name only the counter-account; the configured account fills the other side.
/// Brokerage rules name both accounts and may carry a trade type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRule {
    pub from_account: Option<String>,
    pub to_account: String,
    pub trade: TradeType,
    pub contains: String,
}

impl MatchRule {
    pub fn cash(account: &str, contains: &str) -> Self {
        MatchRule {
            from_account: None,
            to_account: account.to_string(),
            trade: TradeType::None,
            contains: contains.to_string(),
        }
    }

    /// Fallback for descriptions no rule claims.
    pub fn unassigned() -> Self {
        MatchRule::cash(UNASSIGNED_ACCOUNT, "")
    }

    /// Literal, case-sensitive substring test.
    pub fn matches(&self, description: &str) -> bool {
        description.contains(self.contains.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct TradeRuleRow {
    from_account: String,
    to_account: String,
    trade: String,
    contains: String,
}

/// Match rules in file order. The first rule whose substring occurs in a description wins.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<MatchRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<MatchRule>) -> Self {
        Self { rules }
    }

    pub fn from_reader<R: Read>(data: R, schema: Schema) -> Result<Self, ImportError> {
        let table = if schema.has_trade_type() {
            Self::read_trade_rules(data)?
        } else {
            Self::read_cash_rules(data)?
        };
        tracing::info!(%schema, count = table.len(), "loaded match rules");
        Ok(table)
    }

    /// Header row with `account2` and `contains`, in any order.
    fn read_cash_rules<R: Read>(data: R) -> Result<Self, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data);

        let header = reader.headers()?.clone();
        let account_idx = locate(&header, "account2")?;
        let contains_idx = locate(&header, "contains")?;

        let mut rules = Vec::new();
        for (n, result) in reader.records().enumerate() {
            let record = result.map_err(|source| ImportError::MalformedRow { row: n + 1, source })?;
            rules.push(MatchRule::cash(
                record.get(account_idx).unwrap_or_default(),
                record.get(contains_idx).unwrap_or_default(),
            ));
        }
        Ok(Self::new(rules))
    }

    /// No header; four positional fields: from-account, to-account, trade type, substring.
    fn read_trade_rules<R: Read>(data: R) -> Result<Self, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(data);

        let mut rules = Vec::new();
        for (n, result) in reader.deserialize::<TradeRuleRow>().enumerate() {
            let row = n + 1;
            let record = result.map_err(|source| ImportError::MalformedRow { row, source })?;
            let trade = record
                .trade
                .parse()
                .map_err(|_| ImportError::UnknownTradeType { row, value: record.trade.clone() })?;
            rules.push(MatchRule {
                from_account: Some(record.from_account),
                to_account: record.to_account,
                trade,
                contains: record.contains,
            });
        }
        Ok(Self::new(rules))
    }

    pub fn resolve(&self, description: &str) -> Option<&MatchRule> {
        self.rules.iter().find(|rule| rule.matches(description))
    }

    pub fn resolve_or<'a>(&'a self, description: &str, default: &'a MatchRule) -> &'a MatchRule {
        self.resolve(description).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchRule> {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade_rule(from: &str, to: &str, trade: TradeType, contains: &str) -> MatchRule {
        MatchRule {
            from_account: Some(from.to_string()),
            to_account: to.to_string(),
            trade,
            contains: contains.to_string(),
        }
    }

    // ── resolution ────────────────────────────────────────────────────────────

    #[test]
    fn first_match_wins() {
        let table = RuleTable::new(vec![
            MatchRule::cash("Expenses:Dining", "COFFEE"),
            MatchRule::cash("Expenses:Groceries", "COFFEE SHOP"),
        ]);
        let rule = table.resolve("COFFEE SHOP #12").unwrap();
        assert_eq!(rule.to_account, "Expenses:Dining");
    }

    #[test]
    fn later_rule_used_when_earlier_misses() {
        let table = RuleTable::new(vec![
            MatchRule::cash("Expenses:Dining", "COFFEE"),
            MatchRule::cash("Expenses:Groceries", "MARKET"),
        ]);
        assert_eq!(table.resolve("FARMERS MARKET").unwrap().to_account, "Expenses:Groceries");
    }

    #[test]
    fn match_is_case_sensitive() {
        let table = RuleTable::new(vec![MatchRule::cash("Expenses:Dining", "COFFEE")]);
        assert!(table.resolve("coffee shop").is_none());
    }

    #[test]
    fn match_is_literal_not_pattern() {
        let table = RuleTable::new(vec![MatchRule::cash("Expenses:Misc", "A.B")]);
        assert!(table.resolve("AXB").is_none());
        assert!(table.resolve("PAY A.B CO").is_some());
    }

    #[test]
    fn unmatched_falls_back_to_default() {
        let table = RuleTable::new(vec![MatchRule::cash("Expenses:Dining", "COFFEE")]);
        let fallback = MatchRule::unassigned();
        let rule = table.resolve_or("RENT", &fallback);
        assert_eq!(rule.to_account, "Expenses:Unassigned");
        assert_eq!(rule.trade, TradeType::None);
        assert!(rule.from_account.is_none());
    }

    #[test]
    fn empty_substring_matches_everything() {
        let table = RuleTable::new(vec![MatchRule::cash("Expenses:Catchall", "")]);
        assert!(table.resolve("ANYTHING").is_some());
    }

    // ── loading ───────────────────────────────────────────────────────────────

    #[test]
    fn loads_cash_rules_by_header_name() {
        let data = b"contains,account2\nCOFFEE,Expenses:Dining\nRENT,Expenses:Housing\n";
        let table = RuleTable::from_reader(&data[..], Schema::Cash).unwrap();
        assert_eq!(table.len(), 2);
        let rules: Vec<_> = table.iter().collect();
        assert_eq!(rules[0], &MatchRule::cash("Expenses:Dining", "COFFEE"));
        assert_eq!(rules[1].to_account, "Expenses:Housing");
    }

    #[test]
    fn cash_rules_require_header_columns() {
        let data = b"account,contains\nExpenses:Dining,COFFEE\n";
        let err = RuleTable::from_reader(&data[..], Schema::Cash).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn(ref c) if c == "account2"));
    }

    #[test]
    fn loads_positional_trade_rules() {
        let data = b"Assets:Cash,Assets:Investments:,BUY,YOU BOUGHT\n\
                     Assets:Investments:,Assets:Cash,SELL,YOU SOLD\n\
                     Assets:Cash,Income:Dividends,,DIVIDEND\n";
        let table = RuleTable::from_reader(&data[..], Schema::Investment).unwrap();
        let rules: Vec<_> = table.iter().cloned().collect();
        assert_eq!(
            rules,
            vec![
                trade_rule("Assets:Cash", "Assets:Investments:", TradeType::Buy, "YOU BOUGHT"),
                trade_rule("Assets:Investments:", "Assets:Cash", TradeType::Sell, "YOU SOLD"),
                trade_rule("Assets:Cash", "Income:Dividends", TradeType::None, "DIVIDEND"),
            ]
        );
    }

    #[test]
    fn unknown_trade_type_is_rejected() {
        let data = b"Assets:Cash,Assets:Investments:,BUY,A\nAssets:Cash,Assets:X,buy,B\n";
        let err = RuleTable::from_reader(&data[..], Schema::Investment).unwrap_err();
        assert!(matches!(err, ImportError::UnknownTradeType { row: 2, ref value } if value == "buy"));
    }

    #[test]
    fn short_trade_rule_row_is_malformed() {
        let data = b"Assets:Cash,Assets:Investments:,BUY\n";
        let err = RuleTable::from_reader(&data[..], Schema::Investment).unwrap_err();
        assert!(matches!(err, ImportError::MalformedRow { row: 1, .. }));
    }

    #[test]
    fn empty_rule_file_is_empty_table() {
        let table = RuleTable::from_reader(&b""[..], Schema::Investment).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn trade_type_from_str() {
        assert_eq!("BUY".parse::<TradeType>(), Ok(TradeType::Buy));
        assert_eq!(" SELL ".parse::<TradeType>(), Ok(TradeType::Sell));
        assert_eq!("".parse::<TradeType>(), Ok(TradeType::None));
        assert!("HOLD".parse::<TradeType>().is_err());
    }
}
