use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use finance_planner::analysis;
use finance_planner::charts::{save_all_charts, save_chart, ChartKind};
use finance_planner::config::Config;
use finance_planner::form::TransactionForm;
use finance_planner::ledger::Ledger;
use finance_planner::models::Transaction;
use finance_planner::storage::{CsvStorage, LedgerStorage, MemoryStorage};
use finance_planner::{view, write_category_totals};

/// Record income and expenses and look at where the money goes.
#[derive(Parser, Debug)]
#[command(name = "finance-planner", version, about, long_about = None)]
struct Cli {
    /// TOML config file (defaults to ./finance.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// CSV data file, overriding the config
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a transaction; positive amounts are income, negative are expenses
    Add {
        #[arg(long, allow_hyphen_values = true)]
        amount: String,

        #[arg(long)]
        category: String,

        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: String,

        #[arg(long, default_value = "")]
        comment: String,

        /// Validate and show the result without writing the data file
        #[arg(long)]
        dry_run: bool,
    },

    /// List all transactions
    List,

    /// Show total income, expenses and balance
    Analysis,

    /// Show the current balance
    Balance,

    /// Show the total per category
    Categories {
        /// Print CSV instead of a table
        #[arg(long)]
        csv: bool,
    },

    /// Show income and expenses per month
    Monthly,

    /// Write charts as HTML files
    Chart {
        #[arg(value_enum, default_value_t = ChartArg::All)]
        kind: ChartArg,

        /// Output directory, overriding the config
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Number of categories in the top expenses chart
        #[arg(long)]
        top: Option<usize>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ChartArg {
    IncomeExpense,
    CategoryPie,
    TopExpenses,
    All,
}

impl ChartArg {
    fn kind(self) -> Option<ChartKind> {
        match self {
            ChartArg::IncomeExpense => Some(ChartKind::IncomeExpense),
            ChartArg::CategoryPie => Some(ChartKind::CategoryPie),
            ChartArg::TopExpenses => Some(ChartKind::TopExpenses),
            ChartArg::All => None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
    }

    match cli.command {
        Command::Add {
            amount,
            category,
            date,
            comment,
            dry_run,
        } => {
            let form = TransactionForm::new(&amount, &category, &date, &comment);
            if dry_run {
                let storage = MemoryStorage::snapshot(&CsvStorage::new(&config.data_file));
                add_transaction(Ledger::open(storage), &form, &config)
            } else {
                add_transaction(
                    Ledger::open(CsvStorage::new(&config.data_file)),
                    &form,
                    &config,
                )
            }
        }
        Command::List => {
            let ledger = Ledger::open(CsvStorage::new(&config.data_file));
            if ledger.is_empty() {
                println!("No transactions recorded yet.");
            } else {
                print!("{}", view::transactions_table(ledger.transactions()));
            }
            println!();
            println!("{}", view::balance_line(ledger.balance(), &config.currency_symbol));
            Ok(())
        }
        Command::Analysis => {
            let ledger = Ledger::open(CsvStorage::new(&config.data_file));
            if ledger.is_empty() {
                println!("No data to analyse.");
            } else {
                print!(
                    "{}",
                    view::analysis_report(&ledger.summary(), &config.currency_symbol)
                );
            }
            Ok(())
        }
        Command::Balance => {
            let ledger = Ledger::open(CsvStorage::new(&config.data_file));
            println!("{}", view::balance_line(ledger.balance(), &config.currency_symbol));
            Ok(())
        }
        Command::Categories { csv } => {
            let ledger = Ledger::open(CsvStorage::new(&config.data_file));
            let totals = analysis::category_summary(ledger.transactions());
            if csv {
                write_category_totals(&totals, io::stdout())
                    .context("Failed to write category summary")?;
            } else {
                print!(
                    "{}",
                    view::category_summary_table(&totals, &config.currency_symbol)
                );
            }
            Ok(())
        }
        Command::Monthly => {
            let ledger = Ledger::open(CsvStorage::new(&config.data_file));
            let months = analysis::monthly_totals(ledger.transactions());
            print!("{}", view::monthly_table(&months, &config.currency_symbol));
            Ok(())
        }
        Command::Chart { kind, out_dir, top } => {
            let ledger = Ledger::open(CsvStorage::new(&config.data_file));
            let out_dir = out_dir.unwrap_or_else(|| config.chart_dir.clone());
            let top_n = top.unwrap_or(config.top_n);
            write_charts(ledger.transactions(), kind, &out_dir, top_n)
        }
    }
}

fn add_transaction<S: LedgerStorage>(
    mut ledger: Ledger<S>,
    form: &TransactionForm,
    config: &Config,
) -> Result<()> {
    let transaction = match form.parse() {
        Ok(transaction) => transaction,
        Err(e) => anyhow::bail!("Invalid transaction: {e}"),
    };

    ledger
        .add(transaction)
        .with_context(|| format!("Failed to save '{}'", config.data_file.display()))?;

    print!("{}", view::transactions_table(ledger.transactions()));
    println!();
    println!("{}", view::balance_line(ledger.balance(), &config.currency_symbol));
    Ok(())
}

fn write_charts(
    transactions: &[Transaction],
    kind: ChartArg,
    out_dir: &Path,
    top_n: usize,
) -> Result<()> {
    if transactions.is_empty() {
        println!("No data to chart.");
        return Ok(());
    }

    let Some(kind) = kind.kind() else {
        let written = save_all_charts(transactions, out_dir, top_n)
            .context("Failed to save charts")?;
        for path in written {
            println!("Chart saved: {}", path.display());
        }
        return Ok(());
    };

    match kind.build(transactions, top_n) {
        Some(chart) => {
            let path = out_dir.join(kind.file_name());
            save_chart(&chart, kind.title(), &path)
                .with_context(|| format!("Failed to save chart '{}'", path.display()))?;
            println!("Chart saved: {}", path.display());
        }
        None => println!("No data for '{}'.", kind.title()),
    }
    Ok(())
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}
