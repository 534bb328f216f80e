// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::calc::{emi_input, lump_sum_input, ppf_input, ppf_rate, sip_input};
use crate::config::Settings;
use crate::models::{AmortizationRow, GrowthRow};
use crate::schedule::{emi_schedule, lump_sum_schedule, ppf_schedule, sip_schedule};
use crate::utils::{fmt_money, parse_month, pretty_table, round2};
use anyhow::{Result, anyhow};
use serde::Serialize;
use std::io::Write;

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("lumpsum", sub)) => {
            let rows = lump_sum_schedule(lump_sum_input(settings, sub))?;
            emit_growth(settings, sub, &rows)
        }
        Some(("sip", sub)) => {
            let rows = sip_schedule(sip_input(settings, sub))?;
            emit_growth(settings, sub, &rows)
        }
        Some(("ppf", sub)) => {
            let rows = ppf_schedule(ppf_input(sub), ppf_rate(settings, sub))?;
            emit_growth(settings, sub, &rows)
        }
        Some(("emi", sub)) => {
            let start = match sub.get_one::<String>("start") {
                Some(raw) => Some(parse_month(raw)?),
                None => None,
            };
            let rows = emi_schedule(emi_input(settings, sub), start)?;
            emit_amortization(settings, sub, &rows)
        }
        _ => Ok(()),
    }
}

fn rounded_growth(rows: &[GrowthRow]) -> Vec<GrowthRow> {
    rows.iter()
        .map(|r| GrowthRow {
            year: r.year,
            invested: round2(r.invested),
            value: round2(r.value),
            gain: round2(r.gain),
        })
        .collect()
}

fn rounded_amortization(rows: &[AmortizationRow]) -> Vec<AmortizationRow> {
    rows.iter()
        .map(|r| AmortizationRow {
            month: r.month,
            period: r.period.clone(),
            payment: round2(r.payment),
            principal: round2(r.principal),
            interest: round2(r.interest),
            balance: round2(r.balance),
        })
        .collect()
}

fn emit_growth(settings: &Settings, sub: &clap::ArgMatches, rows: &[GrowthRow]) -> Result<()> {
    let sym = settings.currency_symbol.as_str();
    let table_rows = rows
        .iter()
        .map(|r| {
            vec![
                r.year.to_string(),
                fmt_money(r.invested, sym),
                fmt_money(r.value, sym),
                fmt_money(r.gain, sym),
            ]
        })
        .collect();
    emit(
        sub,
        &rounded_growth(rows),
        &["Year", "Invested", "Value", "Gain"],
        table_rows,
    )
}

fn emit_amortization(
    settings: &Settings,
    sub: &clap::ArgMatches,
    rows: &[AmortizationRow],
) -> Result<()> {
    let sym = settings.currency_symbol.as_str();
    let table_rows = rows
        .iter()
        .map(|r| {
            vec![
                r.period.clone().unwrap_or_else(|| r.month.to_string()),
                fmt_money(r.payment, sym),
                fmt_money(r.principal, sym),
                fmt_money(r.interest, sym),
                fmt_money(r.balance, sym),
            ]
        })
        .collect();
    emit(
        sub,
        &rounded_amortization(rows),
        &["Month", "Payment", "Principal", "Interest", "Balance"],
        table_rows,
    )
}

fn emit<T: Serialize>(
    sub: &clap::ArgMatches,
    rows: &[T],
    headers: &[&str],
    table_rows: Vec<Vec<String>>,
) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "table".to_string());
    let out = sub.get_one::<String>("out");

    match (fmt.as_str(), out) {
        ("csv", Some(path)) => {
            write_csv(csv::Writer::from_path(path)?, rows)?;
            println!("Wrote {} rows to {}", rows.len(), path);
        }
        ("csv", None) => write_csv(csv::Writer::from_writer(std::io::stdout()), rows)?,
        ("json", Some(path)) => {
            std::fs::write(path, serde_json::to_string_pretty(rows)?)?;
            println!("Wrote {} rows to {}", rows.len(), path);
        }
        ("json", None) => println!("{}", serde_json::to_string_pretty(rows)?),
        ("table", None) => println!("{}", pretty_table(headers, table_rows)),
        ("table", Some(_)) => return Err(anyhow!("--out needs --format csv or json")),
        (other, _) => return Err(anyhow!("Unknown format: {} (use table|csv|json)", other)),
    }
    Ok(())
}

pub fn write_csv<W: Write, T: Serialize>(mut wtr: csv::Writer<W>, rows: &[T]) -> Result<()> {
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
