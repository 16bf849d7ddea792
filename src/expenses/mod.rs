use std::fmt::Display;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use self::category::Category;

pub mod category;

/// One recorded spending event.
///
/// Records are immutable once created; the only lifecycle events are creation
/// through [`crate::book::ExpenseBook::add`] and deletion by `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: Category,
    #[serde(default)]
    pub memo: String,
    pub created_at: i64,
}

impl Display for Expense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({:.2})", self.date, self.category, self.amount)?;
        if !self.memo.is_empty() {
            write!(f, " {}", self.memo)?;
        }
        Ok(())
    }
}

impl Expense {
    pub fn new(
        id: String,
        date: NaiveDate,
        amount: Decimal,
        category: Category,
        memo: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            date,
            amount,
            category,
            memo,
            created_at: created_at.timestamp_millis(),
        }
    }

    pub fn has_memo(&self) -> bool {
        !self.memo.is_empty()
    }
}
