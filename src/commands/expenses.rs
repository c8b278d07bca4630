// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Category;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table, validate_expense};
use anyhow::{Result, bail};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn known_category(raw: &str) -> Result<String> {
    match Category::from_label(raw) {
        Some(c) => Ok(c.label().to_string()),
        None => bail!(
            "Unknown category '{}', expected one of: {}",
            raw,
            Category::ALL.map(|c| c.label()).join(", ")
        ),
    }
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap().trim().to_string();
    if user.is_empty() {
        bail!("User id must not be empty");
    }
    let value = parse_decimal(sub.get_one::<String>("value").unwrap().trim())?;
    let category = known_category(sub.get_one::<String>("category").unwrap())?;
    let today = Utc::now().date_naive();
    let date = match sub.get_one::<String>("date") {
        Some(raw) => parse_date(raw.trim())?,
        None => today,
    };
    let description = sub
        .get_one::<String>("description")
        .unwrap()
        .trim()
        .to_string();
    validate_expense(value, date, &description, today)?;

    conn.execute(
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
    println!("Recorded {} on {} under '{}'", value, date, category);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.category.clone(),
                    r.value.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Category", "Value", "Description"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub date: String,
    pub category: String,
    pub value: String,
    pub description: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<ExpenseRow>> {
    let mut sql =
        String::from("SELECT id, date, category, value, description FROM expenses WHERE user_id=?");
    let mut params_vec: Vec<String> = vec![sub.get_one::<String>("user").unwrap().to_string()];

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(month.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND category=?");
        params_vec.push(cat.trim().to_lowercase());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(ExpenseRow {
            id: r.get(0)?,
            date: r.get(1)?,
            category: r.get(2)?,
            value: r.get(3)?,
            description: r.get(4)?,
        });
    }
    Ok(data)
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id: i64 = *sub.get_one::<i64>("id").unwrap();
    let existing: Option<(String, String, String, String)> = conn
        .query_row(
            "SELECT value, category, date, description FROM expenses WHERE id=?1",
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()?;
    let Some((old_value, old_category, old_date, old_description)) = existing else {
        bail!("Expense {} not found", id);
    };

    let value = match sub.get_one::<String>("value") {
        Some(raw) => parse_decimal(raw.trim())?,
        None => parse_decimal(&old_value)?,
    };
    let category = match sub.get_one::<String>("category") {
        Some(raw) => known_category(raw)?,
        None => old_category,
    };
    let date = match sub.get_one::<String>("date") {
        Some(raw) => parse_date(raw.trim())?,
        None => parse_date(&old_date)?,
    };
    let description = match sub.get_one::<String>("description") {
        Some(raw) => raw.trim().to_string(),
        None => old_description,
    };
    validate_expense(value, date, &description, Utc::now().date_naive())?;

    conn.execute(
        "UPDATE expenses SET value=?1, category=?2, date=?3, description=?4 WHERE id=?5",
        params![
            value.to_string(),
            category,
            date.to_string(),
            description,
            id
        ],
    )?;
    println!("Updated expense {}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id: i64 = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM expenses WHERE id=?1", params![id])?;
    if n == 0 {
        bail!("Expense {} not found", id);
    }
    println!("Removed expense {}", id);
    Ok(())
}
