// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;
use spendscope::{cli, commands, db};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn expense_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["spendscope", "expense"];
    argv.extend_from_slice(args);
    let m = cli::build_cli().try_get_matches_from(argv).unwrap();
    let Some(("expense", sub)) = m.subcommand() else {
        panic!("expected expense subcommand");
    };
    sub.clone()
}

fn add(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut full = vec!["add"];
    full.extend_from_slice(args);
    commands::expenses::handle(conn, &expense_matches(&full))
}

#[test]
fn add_and_fetch_round_trip() {
    let conn = setup();
    add(
        &conn,
        &[
            "--user",
            "u1",
            "--value",
            "12.50",
            "--category",
            "food",
            "--date",
            "2025-08-10",
            "--description",
            "lunch",
        ],
    )
    .unwrap();

    let start = spendscope::utils::parse_date("2025-08-01").unwrap();
    let end = spendscope::utils::parse_date("2025-09-01").unwrap();
    let fetched = db::fetch_expenses(&conn, "u1", start, end).unwrap();
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].value, "12.50".parse::<Decimal>().unwrap());
    assert_eq!(fetched[0].category, "food");
    assert_eq!(fetched[0].description, "lunch");

    // other users and other windows see nothing
    assert!(db::fetch_expenses(&conn, "u2", start, end).unwrap().is_empty());
    let sept = spendscope::utils::parse_date("2025-10-01").unwrap();
    assert!(db::fetch_expenses(&conn, "u1", end, sept).unwrap().is_empty());
}

#[test]
fn add_rejects_invalid_records() {
    let conn = setup();
    let base = |value: &str, category: &str, date: &str, desc: &str| {
        [
            "--user", "u1", "--value", value, "--category", category, "--date", date,
            "--description", desc,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
    };
    let run = |args: Vec<String>| {
        let refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
        add(&conn, &refs)
    };

    assert!(run(base("0", "food", "2025-08-10", "x")).is_err());
    assert!(run(base("-3", "food", "2025-08-10", "x")).is_err());
    assert!(run(base("1000000", "food", "2025-08-10", "x")).is_err());
    assert!(run(base("1.005", "food", "2025-08-10", "x")).is_err());
    assert!(run(base("10", "groceries", "2025-08-10", "x")).is_err());
    assert!(run(base("10", "food", "2999-01-01", "x")).is_err());
    assert!(run(base("10", "food", "2025-08-10", "")).is_err());

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn edit_updates_only_given_fields() {
    let conn = setup();
    add(
        &conn,
        &[
            "--user",
            "u1",
            "--value",
            "30",
            "--category",
            "transport",
            "--date",
            "2025-08-03",
            "--description",
            "bus pass",
        ],
    )
    .unwrap();
    let id: i64 = conn
        .query_row("SELECT id FROM expenses", [], |r| r.get(0))
        .unwrap();

    let id_s = id.to_string();
    commands::expenses::handle(
        &conn,
        &expense_matches(&["edit", &id_s, "--value", "35.75"]),
    )
    .unwrap();

    let (value, category): (String, String) = conn
        .query_row(
            "SELECT value, category FROM expenses WHERE id=?1",
            [id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(value, "35.75");
    assert_eq!(category, "transport");
}

#[test]
fn rm_missing_expense_errors() {
    let conn = setup();
    let err = commands::expenses::handle(&conn, &expense_matches(&["rm", "42"])).unwrap_err();
    assert!(err.to_string().contains("not found"));
}
