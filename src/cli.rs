// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn user_arg() -> Arg {
    Arg::new("user")
        .long("user")
        .short('u')
        .required(true)
        .help("User id the operation is scoped to")
}

pub fn build_cli() -> Command {
    Command::new("spendscope")
        .about("Personal expense tracking, spending insights, and investment projections")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the database if it does not exist"))
        .subcommand(
            Command::new("expense")
                .about("Record and manage expenses")
                .subcommand(
                    Command::new("add")
                        .about("Record an expense")
                        .arg(user_arg())
                        .arg(
                            Arg::new("value")
                                .long("value")
                                .required(true)
                                .allow_negative_numbers(true),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD, defaults to today"),
                        )
                        .arg(Arg::new("description").long("description").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List expenses, newest first")
                        .arg(user_arg())
                        .arg(Arg::new("month").long("month").help("Filter by YYYY-MM"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Update fields of an expense")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("value")
                                .long("value")
                                .allow_negative_numbers(true),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("rm").about("Delete an expense").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Expense categories")
                .subcommand(Command::new("list").about("List the known categories")),
        )
        .subcommand(
            Command::new("tip")
                .about("Financial tips feed")
                .subcommand(
                    Command::new("add")
                        .about("Add a tip")
                        .arg(Arg::new("content").required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List all tips")))
                .subcommand(json_flags(
                    Command::new("random").about("Pick two tips at random"),
                )),
        )
        .subcommand(
            Command::new("insights")
                .about("Spending analysis, suggestions, and projections")
                .subcommand(json_flags(
                    Command::new("analysis")
                        .about("Compare this month's spending against last month")
                        .arg(user_arg())
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .help("Current month as YYYY-MM, defaults to today's month"),
                        )
                        .arg(
                            Arg::new("previous")
                                .long("previous")
                                .help("Comparison month as YYYY-MM, defaults to the month before"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("suggestions")
                        .about("Investment suggestions derived from saving opportunities")
                        .arg(user_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("projection")
                        .about("Project a monthly contribution over 24 months")
                        .arg(user_arg())
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .help("Monthly contribution, defaults to 100"),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .help("Instrument kind from the catalog"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("dashboard")
                        .about("One-call dashboard summary")
                        .arg(user_arg()),
                )),
        )
        .subcommand(
            Command::new("catalog")
                .about("Instrument catalog used for suggestions and projections")
                .subcommand(json_flags(
                    Command::new("show").about("Show the active catalog"),
                ))
                .subcommand(
                    Command::new("set")
                        .about("Replace the catalog from a JSON file")
                        .arg(Arg::new("file").long("file").required(true)),
                ),
        )
        .subcommand(
            Command::new("currency")
                .about("Display currency for money output")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set").arg(Arg::new("code").required(true).help("e.g. USD, BRL")),
                ),
        )
        .subcommand(
            Command::new("import").about("Import records").subcommand(
                Command::new("expenses")
                    .about("Import expenses from CSV (date,value,category,description)")
                    .arg(user_arg())
                    .arg(Arg::new("path").required(true)),
            ),
        )
        .subcommand(
            Command::new("export").about("Export records").subcommand(
                Command::new("expenses")
                    .about("Export one user's expenses")
                    .arg(user_arg())
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv or json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Scan stored expenses for data-quality issues"))
}
