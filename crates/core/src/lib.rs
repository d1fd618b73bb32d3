pub mod account;
pub mod entry;
pub mod money;

pub use account::{lot_account, UNASSIGNED_ACCOUNT};
pub use entry::{CostBasis, LedgerEntry, Posting};
pub use money::{fixed, AMOUNT_DP, PRICE_DP, QUANTITY_DP};
