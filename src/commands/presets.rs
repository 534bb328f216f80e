// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calculator::Mode;
use crate::utils::{format_compact, pretty_table};
use anyhow::{Result, anyhow};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let modes: Vec<Mode> = match m.get_one::<String>("mode") {
        Some(raw) => vec![raw.parse::<Mode>().map_err(|e| anyhow!(e))?],
        None => Mode::ALL.to_vec(),
    };
    let headers = ["Mode", "Calculator", "Description", "Presets"];
    println!("{}", pretty_table(&headers, rows(&modes)));
    Ok(())
}

pub fn rows(modes: &[Mode]) -> Vec<Vec<String>> {
    modes
        .iter()
        .map(|m| {
            let presets: Vec<String> = m.presets().iter().map(|v| format_compact(*v)).collect();
            vec![
                m.id().to_string(),
                m.label().to_string(),
                m.description().to_string(),
                presets.join(", "),
            ]
        })
        .collect()
}
