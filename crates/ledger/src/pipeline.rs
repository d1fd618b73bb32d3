use beanfold_import::{read_transactions, Config, ImportError, MatchRule, RuleTable, Schema, Transaction};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::generate::generate;
use crate::writer::LedgerWriter;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("Failed to read {}: {source}", path.display())]
    Import { path: PathBuf, source: ImportError },
    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Input and output locations for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinePaths {
    pub config: PathBuf,
    pub transactions: PathBuf,
    pub rules: PathBuf,
    pub output: PathBuf,
}

impl PipelinePaths {
    /// The conventional file names for each schema, relative to the working directory.
    pub fn defaults(schema: Schema) -> Self {
        let (transactions, rules, output) = match schema {
            Schema::Cash => ("transactions.csv", "match.csv", "output.bean"),
            Schema::Investment => ("transactions-inv.csv", "match-inv.csv", "output-inv.bean"),
        };
        PipelinePaths {
            config: PathBuf::from("config.csv"),
            transactions: PathBuf::from(transactions),
            rules: PathBuf::from(rules),
            output: PathBuf::from(output),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub entries: usize,
    pub unmatched: usize,
}

/// Loads configuration, rules and transactions, then writes the ledger.
///
/// Every input is fully loaded before the output file is created, so a bad input
/// leaves any existing output untouched.
pub fn run(schema: Schema, paths: &PipelinePaths) -> Result<RunSummary, PipelineError> {
    let config = load(&paths.config, Config::from_reader)?;
    let rules = load(&paths.rules, |r| RuleTable::from_reader(r, schema))?;
    let transactions = load(&paths.transactions, |r| {
        read_transactions(r, schema, &config.date_format)
    })?;

    let write_err = |source: io::Error| PipelineError::Write { path: paths.output.clone(), source };
    let file = File::create(&paths.output).map_err(write_err)?;
    let summary = convert(&config, &rules, &transactions, BufWriter::new(file)).map_err(write_err)?;

    tracing::info!(
        %schema,
        entries = summary.entries,
        unmatched = summary.unmatched,
        output = %paths.output.display(),
        "wrote ledger"
    );
    Ok(summary)
}

/// Generates and writes one entry per transaction, in input order.
pub fn convert<W: Write>(
    config: &Config,
    rules: &RuleTable,
    transactions: &[Transaction],
    out: W,
) -> io::Result<RunSummary> {
    let fallback = MatchRule::unassigned();
    let mut writer = LedgerWriter::new(out);
    let mut unmatched = 0;

    for tx in transactions {
        let rule = rules.resolve_or(&tx.description, &fallback);
        if std::ptr::eq(rule, &fallback) {
            tracing::debug!(description = %tx.description, "no rule matched");
            unmatched += 1;
        }
        writer.write_entry(&generate(tx, rule, config))?;
    }

    let entries = writer.written();
    writer.finish()?;
    Ok(RunSummary { entries, unmatched })
}

fn load<T>(
    path: &Path,
    read: impl FnOnce(BufReader<File>) -> Result<T, ImportError>,
) -> Result<T, PipelineError> {
    let file = File::open(path).map_err(|source| PipelineError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read(BufReader::new(file)).map_err(|source| PipelineError::Import {
        path: path.to_path_buf(),
        source,
    })
}
