use anyhow::Context;
use beanfold_import::Schema;
use beanfold_ledger::PipelinePaths;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "beanfold",
    version,
    about = "Convert bank and brokerage CSV exports into Beancount entries"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bank export: config.csv, transactions.csv, match.csv -> output.bean
    Cash(PathArgs),
    /// Brokerage export: config.csv, transactions-inv.csv, match-inv.csv -> output-inv.bean
    Invest(PathArgs),
}

#[derive(Args, Debug)]
struct PathArgs {
    /// Single-row configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Transaction export with a header row
    #[arg(long)]
    transactions: Option<PathBuf>,
    /// Match rules, highest priority first
    #[arg(long)]
    rules: Option<PathBuf>,
    /// Ledger file to create
    #[arg(long)]
    output: Option<PathBuf>,
}

impl PathArgs {
    fn into_paths(self, schema: Schema) -> PipelinePaths {
        let defaults = PipelinePaths::defaults(schema);
        PipelinePaths {
            config: self.config.unwrap_or(defaults.config),
            transactions: self.transactions.unwrap_or(defaults.transactions),
            rules: self.rules.unwrap_or(defaults.rules),
            output: self.output.unwrap_or(defaults.output),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match try_main(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: Cli) -> anyhow::Result<()> {
    let (schema, args) = match cli.command {
        Command::Cash(args) => (Schema::Cash, args),
        Command::Invest(args) => (Schema::Investment, args),
    };
    let paths = args.into_paths(schema);

    beanfold_ledger::run(schema, &paths).with_context(|| format!("{schema} conversion failed"))?;
    Ok(())
}
