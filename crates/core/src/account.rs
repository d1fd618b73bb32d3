/// Counter-account used when no match rule claims a transaction.
pub const UNASSIGNED_ACCOUNT: &str = "Expenses:Unassigned";

/// Joins a lot account prefix (e.g. `Assets:Investments:`) with a ticker symbol.
///
/// The prefix is used verbatim, so rules are expected to carry their own trailing separator.
pub fn lot_account(prefix: &str, symbol: &str) -> String {
    format!("{prefix}{symbol}")
}
