// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use spendscope::{cli, commands, db};
use std::io::Write;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn import(conn: &mut Connection, user: &str, path: &str) -> anyhow::Result<()> {
    let m = cli::build_cli()
        .try_get_matches_from(["spendscope", "import", "expenses", "--user", user, path])
        .unwrap();
    let Some(("import", sub)) = m.subcommand() else {
        panic!("expected import subcommand");
    };
    commands::importer::handle(conn, sub)
}

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

#[test]
fn imports_valid_rows() {
    let mut conn = setup();
    let f = write_csv(
        "date,value,category,description\n\
         2025-08-01,12.30,food,groceries\n\
         2025-08-02,45,Transport,monthly pass\n",
    );
    import(&mut conn, "u1", f.path().to_str().unwrap()).unwrap();

    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM expenses WHERE user_id='u1'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(count, 2);

    // category labels are normalized on the way in
    let cat: String = conn
        .query_row(
            "SELECT category FROM expenses WHERE description='monthly pass'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(cat, "transport");
}

#[test]
fn one_bad_row_aborts_the_whole_import() {
    let mut conn = setup();
    let f = write_csv(
        "date,value,category,description\n\
         2025-08-01,12.30,food,groceries\n\
         2025-08-02,45,spaceships,rocket fuel\n",
    );
    let err = import(&mut conn, "u1", f.path().to_str().unwrap()).unwrap_err();
    assert!(format!("{:#}", err).contains("unknown category"));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn future_dates_are_rejected_on_import() {
    let mut conn = setup();
    let f = write_csv("date,value,category,description\n2999-01-01,10,food,time travel\n");
    assert!(import(&mut conn, "u1", f.path().to_str().unwrap()).is_err());
}
