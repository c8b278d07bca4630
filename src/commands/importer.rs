// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Category;
use crate::utils::{parse_date, parse_decimal, validate_expense};
use anyhow::{Context, Result, bail};
use chrono::Utc;
use csv::ReaderBuilder;
use rusqlite::{Connection, params};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => import_expenses(conn, sub),
        _ => Ok(()),
    }
}

/// Import `date,value,category,description` rows for one user. The whole
/// file goes in a single transaction; any invalid row aborts the import.
fn import_expenses(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap().trim().to_string();
    if user.is_empty() {
        bail!("User id must not be empty");
    }
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let today = Utc::now().date_naive();
    let tx = conn.transaction()?;
    let mut imported = 0usize;

    for (idx, result) in rdr.records().enumerate() {
        let line = idx + 2; // header occupies line 1
        let rec = result?;
        let date_raw = rec.get(0).context("date missing")?.trim();
        let value_raw = rec.get(1).context("value missing")?.trim();
        let category_raw = rec.get(2).context("category missing")?.trim();
        let description = rec.get(3).context("description missing")?.trim().to_string();

        let date =
            parse_date(date_raw).with_context(|| format!("Line {}: invalid date", line))?;
        let value =
            parse_decimal(value_raw).with_context(|| format!("Line {}: invalid value", line))?;
        let category = Category::from_label(category_raw)
            .with_context(|| format!("Line {}: unknown category '{}'", line, category_raw))?
            .label();
        validate_expense(value, date, &description, today)
            .with_context(|| format!("Line {}: invalid expense", line))?;

        tx.execute(
            "INSERT INTO expenses(user_id, value, category, date, description)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user,
                value.to_string(),
                category,
                date.to_string(),
                description
            ],
        )?;
        imported += 1;
    }
    tx.commit()?;
    println!("Imported {} expenses from {}", imported, path);
    Ok(())
}
