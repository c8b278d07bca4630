// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::insights::catalog::Catalog;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub)?,
        Some(("set", sub)) => set(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let catalog = Catalog::load(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &catalog)? {
        return Ok(());
    }
    let rows = catalog
        .instruments()
        .iter()
        .map(|i| {
            vec![
                i.kind.clone(),
                i.title.clone(),
                format!("{:.2}%", i.annual_rate * Decimal::ONE_HUNDRED),
                i.risk.label().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Kind", "Title", "Annual return", "Risk"], rows)
    );
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("file").unwrap();
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("Read catalog file {}", path))?;
    let catalog: Catalog =
        serde_json::from_str(&raw).with_context(|| format!("Parse catalog file {}", path))?;
    catalog.save(conn)?;
    println!("Catalog replaced ({} instruments)", catalog.instruments().len());
    Ok(())
}
