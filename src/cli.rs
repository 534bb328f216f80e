// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn required(name: &'static str, value_name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name(value_name)
        .required(true)
        .allow_negative_numbers(true)
        .help(help)
}

fn rate_arg() -> Arg {
    Arg::new("rate")
        .long("rate")
        .value_name("PCT")
        .allow_negative_numbers(true)
        .help("Expected annual rate in percent (defaults to the configured rate)")
}

fn json_flags() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    ]
}

fn text_flag() -> Arg {
    Arg::new("text")
        .long("text")
        .action(ArgAction::SetTrue)
        .conflicts_with_all(["json", "jsonl"])
        .help("Print a plain-text summary suitable for copying")
}

fn calculator(cmd: Command) -> Command {
    cmd.args(json_flags()).arg(text_flag())
}

fn lumpsum_args(cmd: Command) -> Command {
    cmd.arg(required("principal", "AMOUNT", "One-time investment"))
        .arg(rate_arg())
        .arg(required("years", "YEARS", "Investment horizon in years"))
}

fn sip_args(cmd: Command) -> Command {
    cmd.arg(required("monthly", "AMOUNT", "Monthly contribution"))
        .arg(rate_arg())
        .arg(required("years", "YEARS", "Investment horizon in years"))
}

fn emi_args(cmd: Command) -> Command {
    cmd.arg(required("amount", "AMOUNT", "Loan amount"))
        .arg(rate_arg())
        .arg(required("months", "MONTHS", "Tenure in months"))
}

fn ppf_args(cmd: Command) -> Command {
    cmd.arg(required("annual", "AMOUNT", "Yearly contribution"))
        .arg(required("years", "YEARS", "Number of years"))
        .arg(
            Arg::new("rate")
                .long("rate")
                .value_name("PCT")
                .allow_negative_numbers(true)
                .help("PPF rate in percent (defaults to the configured PPF rate)"),
        )
}

fn goal_args(cmd: Command) -> Command {
    cmd.arg(required("target", "AMOUNT", "Amount needed at the end"))
        .arg(rate_arg())
        .arg(required("years", "YEARS", "Years until the goal"))
}

fn schedule_output(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("format")
            .long("format")
            .value_parser(["table", "csv", "json"])
            .default_value("table")
            .help("Output format"),
    )
    .arg(
        Arg::new("out")
            .long("out")
            .value_name("FILE")
            .help("Write to a file instead of stdout (csv/json)"),
    )
}

fn profile_file(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("file")
            .long("file")
            .short('f')
            .value_name("PATH")
            .required(true)
            .help("Portfolio payload JSON"),
    )
    .args(json_flags())
}

pub fn build_cli() -> Command {
    Command::new("finplan")
        .version(crate_version!())
        .about("Lump sum, SIP, EMI, PPF and goal calculators with portfolio summaries")
        .subcommand(calculator(lumpsum_args(
            Command::new("lumpsum").about("Growth of a one-time investment"),
        )))
        .subcommand(calculator(sip_args(
            Command::new("sip").about("Systematic Investment Plan maturity"),
        )))
        .subcommand(calculator(emi_args(
            Command::new("emi").about("Loan EMI, total payable and interest"),
        )))
        .subcommand(calculator(ppf_args(
            Command::new("ppf").about("Public Provident Fund maturity"),
        )))
        .subcommand(calculator(goal_args(
            Command::new("goal").about("Monthly SIP or lump sum needed for a target"),
        )))
        .subcommand(
            Command::new("schedule")
                .about("Year-by-year growth or month-by-month loan amortization")
                .subcommand_required(true)
                .subcommand(schedule_output(lumpsum_args(Command::new("lumpsum"))))
                .subcommand(schedule_output(sip_args(Command::new("sip"))))
                .subcommand(schedule_output(ppf_args(Command::new("ppf"))))
                .subcommand(schedule_output(
                    emi_args(Command::new("emi")).arg(
                        Arg::new("start")
                            .long("start")
                            .value_name("YYYY-MM")
                            .help("Month of the first installment"),
                    ),
                )),
        )
        .subcommand(
            Command::new("profile")
                .about("Summaries over a portfolio payload")
                .subcommand_required(true)
                .subcommand(profile_file(
                    Command::new("summary").about("Net worth, cash flow and goal progress"),
                ))
                .subcommand(profile_file(
                    Command::new("allocation").about("Asset allocation by bucket"),
                ))
                .subcommand(profile_file(
                    Command::new("expenses")
                        .about("Monthly cash flow with essential and per-category spending"),
                ))
                .subcommand(profile_file(
                    Command::new("goals")
                        .about("Funding needed per goal")
                        .arg(rate_arg())
                        .arg(
                            Arg::new("as-of")
                                .long("as-of")
                                .value_name("YYYY-MM-DD")
                                .help("Valuation date (defaults to today)"),
                        ),
                )),
        )
        .subcommand(
            Command::new("presets")
                .about("Quick-pick amounts per calculator")
                .arg(Arg::new("mode").help("lumpsum|sip|emi|ppf|goal")),
        )
        .subcommand(
            Command::new("config")
                .about("Settings file")
                .subcommand_required(true)
                .subcommand(Command::new("path").about("Print the settings path"))
                .subcommand(Command::new("show").about("Print effective settings"))
                .subcommand(
                    Command::new("init").about("Write default settings").arg(
                        Arg::new("force")
                            .long("force")
                            .action(ArgAction::SetTrue)
                            .help("Overwrite an existing file"),
                    ),
                ),
        )
}
