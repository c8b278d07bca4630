// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Tip;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, bail};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let content = sub.get_one::<String>("content").unwrap().trim().to_string();
            if content.is_empty() {
                bail!("Tip content must not be empty");
            }
            conn.execute("INSERT INTO tips(content) VALUES (?1)", params![content])?;
            println!("Added tip");
        }
        Some(("list", sub)) => {
            let tips = query_tips(conn, "SELECT id, content FROM tips ORDER BY id")?;
            print_tips(sub, &tips)?;
        }
        Some(("random", sub)) => {
            // Fewer than two tips stored: just return whatever exists.
            let tips = query_tips(
                conn,
                "SELECT id, content FROM tips ORDER BY random() LIMIT 2",
            )?;
            print_tips(sub, &tips)?;
        }
        _ => {}
    }
    Ok(())
}

fn query_tips(conn: &Connection, sql: &str) -> Result<Vec<Tip>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |r| {
        Ok(Tip {
            id: r.get(0)?,
            content: r.get(1)?,
        })
    })?;
    let mut tips = Vec::new();
    for row in rows {
        tips.push(row?);
    }
    Ok(tips)
}

fn print_tips(sub: &clap::ArgMatches, tips: &[Tip]) -> Result<()> {
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &tips)? {
        let data = tips
            .iter()
            .map(|t| vec![t.id.to_string(), t.content.clone()])
            .collect();
        println!("{}", pretty_table(&["Id", "Tip"], data));
    }
    Ok(())
}
