use chrono::{DateTime, Local, Utc};
use rust_decimal::Decimal;

use crate::errors::BookError;
use crate::expenses::Expense;
use crate::form::ExpenseDraft;
use crate::store::{ExpenseStore, Storage};

/// The canonical, newest-first collection of expenses.
///
/// Every mutation is mirrored to the store before returning. If the save
/// fails the mutation is undone, so memory and storage never diverge.
#[derive(Debug)]
pub struct ExpenseBook<S> {
    expenses: Vec<Expense>,
    store: ExpenseStore<S>,
    decimal_sep: char,
}

impl<S: Storage> ExpenseBook<S> {
    pub fn open(store: ExpenseStore<S>) -> Result<Self, BookError> {
        let expenses = store.load()?;
        Ok(Self {
            expenses,
            store,
            decimal_sep: '.',
        })
    }

    pub fn with_decimal_sep(mut self, decimal_sep: char) -> Self {
        self.decimal_sep = decimal_sep;
        self
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn store(&self) -> &ExpenseStore<S> {
        &self.store
    }

    pub fn add(&mut self, draft: &mut ExpenseDraft) -> Result<Expense, BookError> {
        self.add_at(draft, Utc::now())
    }

    /// Validates `draft`, prepends the new record and saves.
    ///
    /// On success the draft is reset to an empty form dated today. On any
    /// error the draft and the collection are left as they were.
    pub fn add_at(
        &mut self,
        draft: &mut ExpenseDraft,
        now: DateTime<Utc>,
    ) -> Result<Expense, BookError> {
        let valid = draft.validate(self.decimal_sep)?;
        if self.total()?.checked_add(valid.amount).is_none() {
            return Err(BookError::TotalOverflow);
        }
        let expense = Expense::new(
            self.next_id(now),
            valid.date,
            valid.amount,
            valid.category,
            valid.memo,
            now,
        );

        self.expenses.insert(0, expense.clone());
        if let Err(e) = self.store.save(&self.expenses) {
            self.expenses.remove(0);
            return Err(e.into());
        }
        log::info!("added expense {} ({})", expense.id, expense.category.key());

        draft.reset(now.with_timezone(&Local).date_naive());
        Ok(expense)
    }

    /// Returns `false` without touching the store when `id` is absent.
    pub fn remove(&mut self, id: &str) -> Result<bool, BookError> {
        let Some(index) = self.expenses.iter().position(|e| e.id == id) else {
            log::debug!("no expense with id {id}, nothing removed");
            return Ok(false);
        };
        let removed = self.expenses.remove(index);
        if let Err(e) = self.store.save(&self.expenses) {
            self.expenses.insert(index, removed);
            return Err(e.into());
        }
        log::info!("removed expense {id}");
        Ok(true)
    }

    /// Fails only for a stored collection whose sum exceeds `Decimal::MAX`;
    /// `add` never lets the book reach that state.
    pub fn total(&self) -> Result<Decimal, BookError> {
        self.expenses
            .iter()
            .try_fold(Decimal::ZERO, |sum, e| sum.checked_add(e.amount))
            .ok_or(BookError::TotalOverflow)
    }

    /// Time-based id: creation time in epoch milliseconds, bumped past any
    /// id already in use.
    fn next_id(&self, now: DateTime<Utc>) -> String {
        let mut candidate = now.timestamp_millis();
        loop {
            let id = candidate.to_string();
            if self.get(&id).is_none() {
                return id;
            }
            candidate += 1;
        }
    }
}
