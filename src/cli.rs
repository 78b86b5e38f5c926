// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, arg, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print as pretty JSON").conflicts_with("jsonl"))
        .arg(arg!(--jsonl "Print as JSON lines"))
}

fn yes_flag() -> Arg {
    arg!(-y --yes "Skip the confirmation prompt")
}

pub fn build_cli() -> Command {
    Command::new("budgetbook")
        .about("Track income and expenses, filter them and see where the money goes")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .value_name("PATH")
                .env("BUDGETBOOK_DB")
                .global(true)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Database file (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("More log output (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Record, list and delete transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record an income or expense")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_name("TYPE")
                                .required(true)
                                .value_parser(["income", "expense"])
                                .help("income or expense"),
                        )
                        .arg(arg!(--date <DATE> "YYYY-MM-DD").required(true))
                        .arg(arg!(--description <TEXT>).required(true))
                        .arg(arg!(--amount <AMOUNT> "Positive amount").required(true))
                        .arg(arg!(--category <NAME> "Required for expenses")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_name("TYPE")
                                .value_parser(["all", "income", "expense"])
                                .help("all, income or expense (this call only)"),
                        )
                        .arg(arg!(--month <MONTH> "YYYY-MM or all (this call only)"))
                        .arg(arg!(--category <NAME> "Category name or all"))
                        .arg(arg!(--search <TEXT> "Match description or category"))
                        .arg(arg!(--limit <N>).value_parser(value_parser!(usize))),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(arg!(<ID> "Transaction id"))
                        .arg(yes_flag()),
                )
                .subcommand(
                    Command::new("clear")
                        .about("Delete all transactions, keep categories and settings")
                        .arg(yes_flag()),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Expense categories")
                .subcommand(Command::new("add").arg(arg!(<NAME>)))
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("filter")
                .about("Saved type and month filters")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("type")
                        .arg(arg!(<TYPE>).value_parser(["all", "income", "expense"])),
                )
                .subcommand(Command::new("month").arg(arg!(<MONTH> "YYYY-MM or all")))
                .subcommand(Command::new("clear").about("Reset type to all and drop the month")),
        )
        .subcommand(
            Command::new("report")
                .about("Totals and category breakdown over all transactions")
                .subcommand(json_flags(Command::new("totals")))
                .subcommand(json_flags(Command::new("categories"))),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("csv")
                    .about("Write all transactions to a CSV file")
                    .arg(arg!(--out <PATH> "Output file (default: timestamped name)")),
            ),
        )
        .subcommand(
            Command::new("theme")
                .subcommand(Command::new("show"))
                .subcommand(Command::new("toggle")),
        )
        .subcommand(
            Command::new("reset")
                .about("Delete all data and start from defaults")
                .arg(yes_flag()),
        )
}
