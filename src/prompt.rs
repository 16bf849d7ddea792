//! Interactive entry form.

use chrono::{NaiveDate, Weekday};
use inquire::validator::Validation;
use inquire::{DateSelect, Select, Text};

use crate::config::BookConfig;
use crate::errors::BookError;
use crate::expenses::Category;
use crate::form::ExpenseDraft;
use crate::parse::{parse_amount, parse_date, DATE_FORMAT};

fn money_amount(config: &BookConfig, initial: &str) -> inquire::error::InquireResult<String> {
    let decimal_sep = config.decimal_sep;
    Text::new("Amount:")
        .with_initial_value(initial)
        .with_help_message(&format!(
            "Type the amount in {} using '{}' as the decimal separator",
            config.currency, decimal_sep
        ))
        .with_validator(move |input: &str| {
            Ok(match parse_amount(input, decimal_sep) {
                Ok(_) => Validation::Valid,
                Err(e) => Validation::Invalid(e.to_string().into()),
            })
        })
        .prompt()
}

/// Fills in the fields of `draft` that are still empty by prompting.
///
/// Fields already set (e.g. from command-line flags) are used as initial
/// values or skipped.
pub fn fill_draft(draft: &mut ExpenseDraft, config: &BookConfig) -> Result<(), BookError> {
    let default_date = parse_date(&draft.date).unwrap_or_else(|_| chrono::Local::now().date_naive());
    let date: NaiveDate = DateSelect::new("Date:")
        .with_default(default_date)
        .with_week_start(Weekday::Mon)
        .prompt()?;
    draft.date = date.format(DATE_FORMAT).to_string();

    draft.amount = money_amount(config, &draft.amount)?;

    if draft.category.parse::<Category>().is_err() {
        let category = Select::new("Category:", Category::ALL.to_vec()).prompt()?;
        draft.category = category.key().to_string();
    }

    if draft.memo.is_empty() {
        draft.memo = Text::new("Memo:")
            .with_help_message("Optional, press enter to skip")
            .prompt()?;
    }
    Ok(())
}
