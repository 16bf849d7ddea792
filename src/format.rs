use std::fmt::Write;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::BookConfig;
use crate::parse::DATE_FORMAT;

/// Formats `amount` as currency, e.g. `¥1,500` or `€1.234,50`.
pub fn format_amount(amount: Decimal, config: &BookConfig) -> String {
    let rounded = amount.round_dp_with_strategy(
        config.fraction_digits,
        RoundingStrategy::MidpointAwayFromZero,
    );
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let plain = format!("{:.*}", config.fraction_digits as usize, rounded.abs());
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };

    let mut out = format!("{sign}{}", config.currency);
    out.push_str(&group_thousands(int_part, config.thousands_sep));
    if let Some(frac) = frac_part {
        out.push(config.decimal_sep);
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str, sep: Option<char>) -> String {
    let Some(sep) = sep else {
        return digits.to_string();
    };
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}

/// Falls back to ISO dates when the configured format is invalid.
pub fn format_date(date: NaiveDate, config: &BookConfig) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(&config.date_format)).is_err() {
        log::warn!("invalid date_format '{}', using ISO dates", config.date_format);
        return date.format(DATE_FORMAT).to_string();
    }
    out
}
