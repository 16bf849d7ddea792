use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::ValidationError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest amount a single expense may carry (10^15).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

const GROUPING_SEPARATORS: [char; 5] = [',', '.', '\'', '_', ' '];

/// Parses a user-typed amount.
///
/// The decimal point is the last `.` or `decimal_sep`, provided that
/// character occurs only once. Everything before it may use one kind of
/// thousands separator between groups of three digits. Input that fits
/// neither shape is rejected rather than guessed at.
pub fn parse_amount(s: &str, decimal_sep: char) -> Result<Decimal, ValidationError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingAmount);
    }
    let invalid = || ValidationError::InvalidAmount(trimmed.to_string());

    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let (int_part, frac_part) = split_decimal_point(unsigned, decimal_sep);
    let frac_part = frac_part.filter(|f| !f.is_empty());
    if frac_part.is_some_and(|f| !f.chars().all(|c| c.is_ascii_digit())) {
        return Err(invalid());
    }

    let mut normalized = String::with_capacity(unsigned.len() + 2);
    if negative {
        normalized.push('-');
    }
    normalized.push_str(&strip_grouping(int_part, frac_part.is_some()).ok_or_else(invalid)?);
    if let Some(frac) = frac_part {
        normalized.push('.');
        normalized.push_str(frac);
    }

    let value = Decimal::from_str(&normalized).map_err(|_| invalid())?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::NegativeAmount(value));
    }
    if value > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge(value));
    }
    Ok(value.normalize())
}

fn split_decimal_point(s: &str, decimal_sep: char) -> (&str, Option<&str>) {
    let is_separator = |c: char| c == ',' || c == '.' || c == decimal_sep;
    let Some((i, c)) = s.char_indices().rev().find(|&(_, c)| is_separator(c)) else {
        return (s, None);
    };
    if (c == '.' || c == decimal_sep) && s.matches(c).count() == 1 {
        (&s[..i], Some(&s[i + c.len_utf8()..]))
    } else {
        (s, None)
    }
}

/// Returns the bare digits, or `None` for malformed grouping.
fn strip_grouping(s: &str, allow_empty: bool) -> Option<String> {
    if s.is_empty() {
        return allow_empty.then(|| "0".to_string());
    }
    let mut separators = s.chars().filter(|c| !c.is_ascii_digit());
    let Some(sep) = separators.next() else {
        return Some(s.to_string());
    };
    if !GROUPING_SEPARATORS.contains(&sep) || separators.any(|c| c != sep) {
        return None;
    }
    let groups: Vec<&str> = s.split(sep).collect();
    let first_ok = (1..=3).contains(&groups[0].len());
    let rest_ok = groups[1..].iter().all(|g| g.len() == 3);
    (first_ok && rest_ok).then(|| groups.concat())
}

pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingDate);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}
