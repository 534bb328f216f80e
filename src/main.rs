// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use finplan::{Mode, cli, commands, config};

fn main() -> Result<()> {
    env_logger::init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    // Settings problems must not block the command that repairs them.
    if let Some(("config", sub)) = matches.subcommand() {
        return commands::config::handle(sub);
    }
    if let Some(("presets", sub)) = matches.subcommand() {
        return commands::presets::handle(sub);
    }

    let settings = config::load()?;

    match matches.subcommand() {
        Some(("lumpsum", sub)) => commands::calc::handle(&settings, Mode::LumpSum, sub)?,
        Some(("sip", sub)) => commands::calc::handle(&settings, Mode::Sip, sub)?,
        Some(("emi", sub)) => commands::calc::handle(&settings, Mode::Emi, sub)?,
        Some(("ppf", sub)) => commands::calc::handle(&settings, Mode::Ppf, sub)?,
        Some(("goal", sub)) => commands::calc::handle(&settings, Mode::Goal, sub)?,
        Some(("schedule", sub)) => commands::schedule::handle(&settings, sub)?,
        Some(("profile", sub)) => commands::profile::handle(&settings, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
