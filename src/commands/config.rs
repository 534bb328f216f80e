// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{config_path, load, write_defaults};
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("path", _)) => println!("{}", config_path()?.display()),
        Some(("show", _)) => println!("{}", serde_json::to_string_pretty(&load()?)?),
        Some(("init", sub)) => {
            let path = config_path()?;
            write_defaults(&path, sub.get_flag("force"))?;
            println!("Settings written to {}", path.display());
        }
        _ => {}
    }
    Ok(())
}
