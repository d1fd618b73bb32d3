use beanfold_core::{fixed, LedgerEntry, Posting, AMOUNT_DP, PRICE_DP, QUANTITY_DP};
use std::io::{self, Write};

/// Minimum width of the account column in posting lines.
const ACCOUNT_WIDTH: usize = 40;

/// Renders one entry: a `DATE * "NARRATION"` line, one line per posting and a blank separator.
pub fn render_entry(entry: &LedgerEntry) -> String {
    let mut out = format!("{} * {:?}\n", entry.date.format("%Y-%m-%d"), entry.narration);
    for posting in &entry.postings {
        out.push_str(&format!(
            "  {:<width$} {}\n",
            posting.account,
            render_value(posting),
            width = ACCOUNT_WIDTH
        ));
    }
    out.push('\n');
    out
}

fn render_value(posting: &Posting) -> String {
    match &posting.cost_basis {
        Some(cost) => format!(
            "{}  {}  {{{}  {}}}",
            fixed(posting.amount, QUANTITY_DP),
            posting.currency,
            fixed(cost.unit_price, PRICE_DP),
            cost.currency
        ),
        None => format!("{}  {}", fixed(posting.amount, AMOUNT_DP), posting.currency),
    }
}

/// Appends rendered entries to an output stream.
pub struct LedgerWriter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> LedgerWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    pub fn write_entry(&mut self, entry: &LedgerEntry) -> io::Result<()> {
        self.out.write_all(render_entry(entry).as_bytes())?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flushes and hands back the underlying stream.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
