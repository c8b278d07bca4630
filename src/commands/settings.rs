// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_currency, set_currency};
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            println!("{}", get_currency(conn)?);
        }
        Some(("set", sub)) => {
            let code = sub.get_one::<String>("code").unwrap().trim().to_uppercase();
            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                bail!("Currency code '{}' must be 3 letters", code);
            }
            set_currency(conn, &code)?;
            println!("Display currency set to {}", code);
        }
        _ => {}
    }
    Ok(())
}
