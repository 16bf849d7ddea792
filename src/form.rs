use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use crate::errors::ValidationError;
use crate::expenses::Category;
use crate::parse::{parse_amount, parse_date, DATE_FORMAT};

/// The pending input fields of the entry form, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub date: String,
    pub amount: String,
    pub category: String,
    pub memo: String,
}

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidExpense {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: Category,
    pub memo: String,
}

impl Default for ExpenseDraft {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl ExpenseDraft {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format(DATE_FORMAT).to_string(),
            amount: String::new(),
            category: String::new(),
            memo: String::new(),
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date.format(DATE_FORMAT).to_string();
        self
    }

    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = amount.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Checks amount first, then category, then date.
    pub fn validate(&self, decimal_sep: char) -> Result<ValidExpense, ValidationError> {
        let amount = parse_amount(&self.amount, decimal_sep)?;
        let category = self.category.parse::<Category>()?;
        let date = parse_date(&self.date)?;
        Ok(ValidExpense {
            date,
            amount,
            category,
            memo: self.memo.trim().to_string(),
        })
    }

    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn may_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn new_draft_defaults_to_today() {
        let draft = ExpenseDraft::new(may_first());
        assert_eq!(draft.date, "2024-05-01");
        assert!(draft.amount.is_empty());
        assert!(draft.category.is_empty());
        assert!(draft.memo.is_empty());
    }

    #[test]
    fn validates_complete_draft() {
        let draft = ExpenseDraft::new(may_first())
            .with_amount("500")
            .with_category("living")
            .with_memo(" bus ");
        let valid = draft.validate('.').unwrap();
        assert_eq!(valid.amount, Decimal::from(500));
        assert_eq!(valid.category, Category::Living);
        assert_eq!(valid.memo, "bus");
        assert_eq!(valid.date, may_first());
    }

    #[test]
    fn missing_fields_are_reported() {
        let draft = ExpenseDraft::new(may_first()).with_category("food");
        assert_eq!(draft.validate('.'), Err(ValidationError::MissingAmount));

        let draft = ExpenseDraft::new(may_first()).with_amount("10");
        assert_eq!(draft.validate('.'), Err(ValidationError::MissingCategory));
    }

    #[test]
    fn reset_clears_fields() {
        let mut draft = ExpenseDraft::new(may_first())
            .with_amount("1")
            .with_category("food")
            .with_memo("x");
        let next_day = may_first().succ_opt().unwrap();
        draft.reset(next_day);
        assert_eq!(draft, ExpenseDraft::new(next_day));
    }
}
