// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::{Decimal, RoundingStrategy};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Parse a `YYYY-MM` month reference into the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Half-open calendar-month window `[first_of_month, first_of_next_month)`
/// around a reference date.
pub fn month_window(reference: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let start = reference
        .with_day(1)
        .with_context(|| format!("Invalid month reference {}", reference))?;
    let end = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    }
    .with_context(|| format!("Month following {} out of range", start))?;
    Ok((start, end))
}

/// First day of the calendar month immediately preceding `month_start`.
pub fn previous_month_start(month_start: NaiveDate) -> Result<NaiveDate> {
    if month_start.month() == 1 {
        NaiveDate::from_ymd_opt(month_start.year() - 1, 12, 1)
    } else {
        NaiveDate::from_ymd_opt(month_start.year(), month_start.month() - 1, 1)
    }
    .with_context(|| format!("Month preceding {} out of range", month_start))
}

/// Round half-up to 2 decimal places; output-boundary rounding for
/// percentages and monetary display values.
pub fn round2(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round half-up to a whole currency unit.
pub fn round_unit(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

// Display currency settings
pub fn get_currency(conn: &Connection) -> Result<String> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key='currency'", [], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v.unwrap_or_else(|| "USD".to_string()))
}

pub fn set_currency(conn: &Connection, ccy: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('currency', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![ccy],
    )?;
    Ok(())
}

pub const MAX_EXPENSE_VALUE: Decimal = Decimal::from_parts(99999999, 0, 0, false, 2); // 999999.99

/// Validate the record bounds shared by `expense add`, `expense edit`, and
/// CSV import: positive value with at most 2 fractional digits, capped at
/// 999999.99, date not in the future, description 1-200 chars.
pub fn validate_expense(
    value: Decimal,
    date: NaiveDate,
    description: &str,
    today: NaiveDate,
) -> Result<()> {
    if value <= Decimal::ZERO {
        bail!("Value must be positive, got {}", value);
    }
    if value > MAX_EXPENSE_VALUE {
        bail!("Value must be at most {}, got {}", MAX_EXPENSE_VALUE, value);
    }
    if value.normalize().scale() > 2 {
        bail!("Value '{}' has more than 2 decimal places", value);
    }
    if date > today {
        bail!("Date {} is in the future", date);
    }
    let len = description.chars().count();
    if len == 0 {
        bail!("Description must not be empty");
    }
    if len > 200 {
        bail!("Description must be at most 200 characters, got {}", len);
    }
    Ok(())
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_window_spans_calendar_month() {
        let (start, end) = month_window(parse_date("2025-08-19").unwrap()).unwrap();
        assert_eq!(start, parse_date("2025-08-01").unwrap());
        assert_eq!(end, parse_date("2025-09-01").unwrap());
    }

    #[test]
    fn month_window_rolls_over_december() {
        let (start, end) = month_window(parse_date("2024-12-31").unwrap()).unwrap();
        assert_eq!(start, parse_date("2024-12-01").unwrap());
        assert_eq!(end, parse_date("2025-01-01").unwrap());
    }

    #[test]
    fn previous_month_wraps_january() {
        let start = parse_date("2025-01-01").unwrap();
        assert_eq!(
            previous_month_start(start).unwrap(),
            parse_date("2024-12-01").unwrap()
        );
    }

    #[test]
    fn round2_is_half_up() {
        assert_eq!(round2("1.005".parse().unwrap()).to_string(), "1.01");
        assert_eq!(round2("-1.005".parse().unwrap()).to_string(), "-1.01");
    }

    #[test]
    fn expense_validation_bounds() {
        let today = parse_date("2025-08-19").unwrap();
        let ok = |v: &str| validate_expense(v.parse().unwrap(), today, "groceries", today);
        assert!(ok("0.01").is_ok());
        assert!(ok("999999.99").is_ok());
        assert!(ok("1000000").is_err());
        assert!(ok("0").is_err());
        assert!(ok("-5").is_err());
        assert!(ok("1.005").is_err());
        let tomorrow = today.succ_opt().unwrap();
        assert!(validate_expense("5".parse().unwrap(), tomorrow, "x", today).is_err());
        assert!(validate_expense("5".parse().unwrap(), today, "", today).is_err());
        assert!(validate_expense("5".parse().unwrap(), today, &"x".repeat(201), today).is_err());
    }
}
