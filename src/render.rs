use crate::config::BookConfig;
use crate::expenses::{Category, Expense};
use crate::format::{format_amount, format_date};
use crate::{ANSI_BOLD, ANSI_STOP};

use rust_decimal::Decimal;

const BADGE_WIDTH: usize = 15;

pub fn category_badge(category: Category, colour: bool) -> String {
    if colour {
        format!("{}[{}]{ANSI_STOP}", category.color(), category.label())
    } else {
        format!("[{}]", category.label())
    }
}

/// One list row: date, badge, amount, memo (if any) and id.
pub fn render_expense(expense: &Expense, config: &BookConfig, colour: bool) -> String {
    // pad on the visible label so escape codes don't skew the columns
    let padding = " ".repeat(BADGE_WIDTH.saturating_sub(expense.category.label().len() + 2));
    let mut line = format!(
        "{}  {}{padding} {:>12}",
        format_date(expense.date, config),
        category_badge(expense.category, colour),
        format_amount(expense.amount, config),
    );
    if expense.has_memo() {
        line.push_str("  ");
        line.push_str(&expense.memo);
    }
    line.push_str(&format!("  (id {})", expense.id));
    line
}

/// The footer is only rendered for a non-empty list. A `None` total means
/// the sum could not be computed.
pub fn render_footer(
    expenses: &[Expense],
    total: Option<Decimal>,
    config: &BookConfig,
    colour: bool,
) -> Option<String> {
    if expenses.is_empty() {
        return None;
    }
    let total = match total {
        Some(total) => format_amount(total, config),
        None => "out of range".to_string(),
    };
    Some(if colour {
        format!("{ANSI_BOLD}Total: {total}{ANSI_STOP}")
    } else {
        format!("Total: {total}")
    })
}

pub fn render_list(
    expenses: &[Expense],
    total: Option<Decimal>,
    config: &BookConfig,
    colour: bool,
) -> String {
    if expenses.is_empty() {
        return "No expenses recorded yet.".to_string();
    }
    let mut lines: Vec<String> = expenses
        .iter()
        .map(|e| render_expense(e, config, colour))
        .collect();
    if let Some(footer) = render_footer(expenses, total, config, colour) {
        lines.push(String::new());
        lines.push(footer);
    }
    lines.join("\n")
}
