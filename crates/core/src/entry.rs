use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unit price and currency at which a security lot was acquired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBasis {
    pub unit_price: Decimal,
    pub currency: String,
}

/// One account line of a ledger entry.
///
/// Cash postings carry an amount in `currency`. Lot postings carry a quantity in `currency`
/// (the ticker symbol) together with the cost basis of the lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub account: String,
    pub amount: Decimal,
    pub currency: String,
    pub cost_basis: Option<CostBasis>,
}

impl Posting {
    pub fn cash(account: impl Into<String>, amount: Decimal, currency: &str) -> Self {
        Posting {
            account: account.into(),
            amount,
            currency: currency.to_string(),
            cost_basis: None,
        }
    }

    pub fn lot(
        account: impl Into<String>,
        quantity: Decimal,
        symbol: &str,
        unit_price: Decimal,
        currency: &str,
    ) -> Self {
        Posting {
            account: account.into(),
            amount: quantity,
            currency: symbol.to_string(),
            cost_basis: Some(CostBasis {
                unit_price,
                currency: currency.to_string(),
            }),
        }
    }

    /// Balancing weight of the posting: the amount itself, or quantity × unit price for a lot.
    pub fn weight(&self) -> (Decimal, &str) {
        match &self.cost_basis {
            Some(cost) => (self.amount * cost.unit_price, cost.currency.as_str()),
            None => (self.amount, self.currency.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub narration: String,
    pub postings: Vec<Posting>,
}

impl LedgerEntry {
    /// Sum of posting weights per currency.
    pub fn weights(&self) -> BTreeMap<&str, Decimal> {
        let mut totals = BTreeMap::new();
        for posting in &self.postings {
            let (weight, currency) = posting.weight();
            *totals.entry(currency).or_insert(Decimal::ZERO) += weight;
        }
        totals
    }

    pub fn is_balanced(&self) -> bool {
        self.weights().values().all(|total| total.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn cash_posting_weight_is_amount() {
        let p = Posting::cash("Assets:Checking", dec("-4.50"), "USD");
        assert_eq!(p.weight(), (dec("-4.50"), "USD"));
        assert!(p.cost_basis.is_none());
    }

    #[test]
    fn lot_posting_weight_uses_cost() {
        let p = Posting::lot("Assets:Investments:ABC", dec("10"), "ABC", dec("5.00"), "USD");
        assert_eq!(p.currency, "ABC");
        assert_eq!(p.weight(), (dec("50.00"), "USD"));
    }

    #[test]
    fn opposite_cash_postings_balance() {
        let entry = LedgerEntry {
            date: date(2024, 1, 15),
            narration: "COFFEE SHOP".to_string(),
            postings: vec![
                Posting::cash("Assets:Checking", dec("-4.50"), "USD"),
                Posting::cash("Expenses:Dining", dec("4.50"), "USD"),
            ],
        };
        assert!(entry.is_balanced());
    }

    #[test]
    fn lot_against_cash_balances() {
        let entry = LedgerEntry {
            date: date(2024, 1, 15),
            narration: "BUY ABC".to_string(),
            postings: vec![
                Posting::cash("Assets:Cash", dec("-50.00"), "USD"),
                Posting::lot("Assets:Investments:ABC", dec("10"), "ABC", dec("5.00"), "USD"),
            ],
        };
        assert!(entry.is_balanced());
    }

    #[test]
    fn mismatched_currencies_do_not_balance() {
        let entry = LedgerEntry {
            date: date(2024, 1, 15),
            narration: "Mixed".to_string(),
            postings: vec![
                Posting::cash("Assets:Checking", dec("-10"), "USD"),
                Posting::cash("Assets:Savings", dec("10"), "EUR"),
            ],
        };
        assert!(!entry.is_balanced());
        assert_eq!(entry.weights().len(), 2);
    }
}
