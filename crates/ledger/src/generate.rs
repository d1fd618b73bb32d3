//! Turns one normalized transaction and its resolved match rule into a ledger entry.
//!
//! Cash-side postings always sum to zero. For BUY and SELL the traded leg is priced at
//! `price × quantity` and the raw `amount` column is ignored, so the lot posting's cost
//! basis is exact even when the export's net amount disagrees with it.

use beanfold_core::{lot_account, LedgerEntry, Posting};
use beanfold_import::{Config, MatchRule, TradeType, Transaction};
use rust_decimal::Decimal;

pub fn generate(tx: &Transaction, rule: &MatchRule, config: &Config) -> LedgerEntry {
    let from_account = rule.from_account.as_deref().unwrap_or(&config.account);
    let currency = config.currency.as_str();

    let postings = match rule.trade {
        TradeType::Buy => vec![
            Posting::cash(from_account, -(tx.price * tx.quantity), currency),
            Posting::lot(
                lot_account(&rule.to_account, &tx.symbol),
                tx.quantity,
                &tx.symbol,
                tx.price,
                currency,
            ),
        ],
        TradeType::Sell => vec![
            Posting::lot(
                lot_account(from_account, &tx.symbol),
                tx.quantity,
                &tx.symbol,
                tx.price,
                currency,
            ),
            Posting::cash(&rule.to_account, -(tx.price * tx.quantity), currency),
        ],
        TradeType::None => {
            let primary = signed(tx.amount, config.reverse);
            vec![
                Posting::cash(from_account, primary, currency),
                Posting::cash(&rule.to_account, -primary, currency),
            ]
        }
    };

    if rule.trade != TradeType::None {
        tracing::debug!(
            trade = %rule.trade,
            symbol = %tx.symbol,
            quantity = %tx.quantity,
            price = %tx.price,
            "priced trade"
        );
    }

    let entry = LedgerEntry {
        date: tx.date,
        narration: tx.description.clone(),
        postings,
    };
    debug_assert!(entry.is_balanced());
    entry
}

fn signed(amount: Decimal, reverse: bool) -> Decimal {
    if reverse {
        -amount
    } else {
        amount
    }
}
