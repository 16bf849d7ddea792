use std::io::{stdout, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use expense_book::format::format_amount;
use expense_book::logging::{apply_level, effective_level, init_logging, DEFAULT_LEVEL};
use expense_book::prompt::fill_draft;
use expense_book::render::render_list;
use expense_book::{
    BookConfig, BookError, ExpenseBook, ExpenseDraft, ExpenseStore, FileStorage,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
    /// Path to the TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory the expense book is stored in
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new expense; prompts for anything not given as a flag
    Add {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        memo: Option<String>,
    },
    /// Show all expenses, newest first
    List,
    /// Delete an expense by id
    #[command(alias = "delete")]
    Remove { id: String },
    /// Show the sum of all expenses
    Total,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(BookError::ExpenseCreationAborted) => {
            eprintln!("Expense creation aborted, nothing saved");
            ExitCode::SUCCESS
        }
        Err(e) if e.is_validation() => {
            eprintln!("Invalid expense: {e}");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), BookError> {
    let logger = init_logging(effective_level(args.debug, DEFAULT_LEVEL))?;
    let config = BookConfig::load(args.config.as_deref())?;
    apply_level(&logger, effective_level(args.debug, &config.log_level))?;

    let data_dir = args.data_dir.clone().unwrap_or_else(|| config.data_dir());
    let store = ExpenseStore::new(FileStorage::new(data_dir), config.format);
    let mut book = ExpenseBook::open(store)?.with_decimal_sep(config.decimal_sep);
    log::debug!(
        "using data directory {}",
        book.store().storage().dir().display()
    );

    if args.debug {
        log::debug!("=== Expenses Before ===\n{:?}", book.expenses());
    }

    let colour = stdout().is_terminal();
    match args.command {
        Command::Add {
            date,
            amount,
            category,
            memo,
        } => {
            let mut draft = ExpenseDraft::default();
            if let Some(date) = date {
                draft = draft.with_date(date);
            }
            let interactive = amount.is_none() && category.is_none();
            draft.amount = amount.unwrap_or_default();
            draft.category = category.unwrap_or_default();
            draft.memo = memo.unwrap_or_default();
            if interactive {
                fill_draft(&mut draft, &config)?;
            }
            let expense = book.add(&mut draft)?;
            println!(
                "Added {} {} {}",
                expense.category,
                format_amount(expense.amount, &config),
                expense.id
            );
        }
        Command::List => {
            let total = book
                .total()
                .inspect_err(|e| log::warn!("cannot compute total: {e}"))
                .ok();
            println!("{}", render_list(book.expenses(), total, &config, colour));
        }
        Command::Remove { id } => {
            if book.remove(&id)? {
                println!("Removed {id}");
            }
        }
        Command::Total => println!("{}", format_amount(book.total()?, &config)),
    }

    if args.debug {
        log::debug!("=== Expenses After ===\n{:?}", book.expenses());
    }
    Ok(())
}
