// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Category;
use crate::utils::{MAX_EXPENSE_VALUE, pretty_table};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;

/// Data-quality scan over stored expenses: anything the validators would
/// reject today but that slipped in through older builds or hand edits.
pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();
    let today = Utc::now().date_naive();

    let mut stmt =
        conn.prepare("SELECT id, value, category, date, description FROM expenses ORDER BY id")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let value_s: String = r.get(1)?;
        let category: String = r.get(2)?;
        let date_s: String = r.get(3)?;
        let description: String = r.get(4)?;

        match value_s.parse::<Decimal>() {
            Ok(v) => {
                if v <= Decimal::ZERO {
                    rows.push(vec!["non_positive_value".into(), format!("#{} {}", id, v)]);
                } else if v > MAX_EXPENSE_VALUE {
                    rows.push(vec!["value_over_limit".into(), format!("#{} {}", id, v)]);
                }
                if v.normalize().scale() > 2 {
                    rows.push(vec!["fractional_cents".into(), format!("#{} {}", id, v)]);
                }
            }
            Err(_) => rows.push(vec!["unparseable_value".into(), format!("#{} '{}'", id, value_s)]),
        }

        match NaiveDate::parse_from_str(&date_s, "%Y-%m-%d") {
            Ok(d) if d > today => {
                rows.push(vec!["future_date".into(), format!("#{} {}", id, d)]);
            }
            Ok(_) => {}
            Err(_) => rows.push(vec!["unparseable_date".into(), format!("#{} '{}'", id, date_s)]),
        }

        if Category::from_label(&category).is_none() {
            rows.push(vec!["unknown_category".into(), format!("#{} '{}'", id, category)]);
        }

        let len = description.chars().count();
        if len == 0 || len > 200 {
            rows.push(vec![
                "description_length".into(),
                format!("#{} {} chars", id, len),
            ]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
