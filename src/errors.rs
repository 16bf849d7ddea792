use inquire::InquireError;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Amount is required")]
    MissingAmount,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Amount must not be negative: {0}")]
    NegativeAmount(Decimal),
    #[error("Amount exceeds the largest accepted value: {0}")]
    AmountTooLarge(Decimal),
    #[error("Category is required")]
    MissingCategory,
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Date is required")]
    MissingDate,
    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Stored value under '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
    #[error("JSON encoding error: {0}")]
    JsonEncode(serde_json::Error),
    #[error("MessagePack encoding error: {0}")]
    MsgpackEncode(#[from] rmp_serde::encode::Error),
}

#[derive(Debug, Error)]
pub enum BookError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Prompt error: {0}")]
    Prompt(InquireError),
    #[error("Logger error: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),
    #[error("Total of all expenses exceeds the representable range")]
    TotalOverflow,
    #[error("Expense creation aborted")]
    ExpenseCreationAborted,
}

impl From<InquireError> for BookError {
    /// Esc and Ctrl-C while filling in the form abort the expense.
    fn from(e: InquireError) -> Self {
        match e {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => {
                BookError::ExpenseCreationAborted
            }
            e => BookError::Prompt(e),
        }
    }
}

impl BookError {
    pub fn is_validation(&self) -> bool {
        matches!(self, BookError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_prompt_aborts_creation() {
        for e in [
            InquireError::OperationCanceled,
            InquireError::OperationInterrupted,
        ] {
            assert!(matches!(
                BookError::from(e),
                BookError::ExpenseCreationAborted
            ));
        }
        assert!(matches!(
            BookError::from(InquireError::NotTTY),
            BookError::Prompt(InquireError::NotTTY)
        ));
    }

    #[test]
    fn only_validation_errors_are_validation() {
        assert!(BookError::from(ValidationError::MissingAmount).is_validation());
        assert!(!BookError::TotalOverflow.is_validation());
        assert!(!BookError::ExpenseCreationAborted.is_validation());
    }
}
