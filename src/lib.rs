pub mod book;
pub mod config;
pub mod errors;
pub mod expenses;
pub mod form;
pub mod format;
pub mod logging;
pub mod parse;
pub mod prompt;
pub mod render;
pub mod store;

pub use book::ExpenseBook;
pub use config::BookConfig;
pub use errors::{BookError, StoreError, ValidationError};
pub use expenses::{Category, Expense};
pub use form::ExpenseDraft;
pub use store::{ExpenseStore, FileStorage, MemoryStorage, Storage, StorageFormat};

pub const ANSI_YELLOW: &str = "\x1b[33m";
pub const ANSI_BLUE: &str = "\x1b[34m";
pub const ANSI_MAGENTA: &str = "\x1b[35m";
pub const ANSI_GRAY: &str = "\x1b[90m";
pub const ANSI_BOLD: &str = "\x1b[1m";
pub const ANSI_STOP: &str = "\x1b[0m";
