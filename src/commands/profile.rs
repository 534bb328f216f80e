// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::profile::{asset_allocation, cash_flow, goal_plans, load_profile, summary};
use crate::utils::{
    coerce_amount, fixed1, fmt_money, maybe_print_json, parse_date, pretty_table,
};
use anyhow::Result;
use chrono::Utc;
use std::path::Path;

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => show_summary(settings, sub)?,
        Some(("allocation", sub)) => show_allocation(settings, sub)?,
        Some(("expenses", sub)) => show_expenses(settings, sub)?,
        Some(("goals", sub)) => show_goals(settings, sub)?,
        _ => {}
    }
    Ok(())
}

fn profile_path(sub: &clap::ArgMatches) -> &Path {
    Path::new(sub.get_one::<String>("file").map(String::as_str).unwrap_or_default())
}

fn show_summary(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let profile = load_profile(profile_path(sub))?;
    let s = summary(&profile);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let sym = settings.currency_symbol.as_str();
    let rows = vec![
        vec!["Total assets".into(), fmt_money(s.total_assets, sym)],
        vec!["Total liabilities".into(), fmt_money(s.total_liabilities, sym)],
        vec!["Net worth".into(), fmt_money(s.net_worth, sym)],
        vec!["Monthly income".into(), fmt_money(s.monthly_income, sym)],
        vec!["Monthly expenses".into(), fmt_money(s.monthly_expenses, sym)],
        vec!["Monthly savings".into(), fmt_money(s.monthly_savings, sym)],
        vec![
            "Monthly debt payments".into(),
            fmt_money(s.monthly_debt_payments, sym),
        ],
        vec![
            "Debt to income".into(),
            format!("{}%", fixed1(s.debt_to_income_percent)),
        ],
        vec![
            "Goal progress".into(),
            format!("{}%", fixed1(s.goal_progress_percent)),
        ],
        vec![
            "Risk profile".into(),
            format!(
                "score {}, {} horizon, {} capacity",
                s.risk.score, s.risk.time_horizon, s.risk.risk_capacity
            ),
        ],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    Ok(())
}

fn show_allocation(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let profile = load_profile(profile_path(sub))?;
    let slices = asset_allocation(&profile);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &slices)? {
        return Ok(());
    }
    let sym = settings.currency_symbol.as_str();
    let rows = slices
        .iter()
        .map(|s| {
            vec![
                s.bucket.label().to_string(),
                format!("{}%", fixed1(s.percent)),
                fmt_money(s.amount, sym),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Bucket", "Share", "Amount"], rows));
    Ok(())
}

fn show_expenses(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let profile = load_profile(profile_path(sub))?;
    let flow = cash_flow(&profile);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &flow)? {
        return Ok(());
    }
    let sym = settings.currency_symbol.as_str();
    let totals = vec![
        vec!["Monthly income".into(), fmt_money(flow.monthly_income, sym)],
        vec!["Monthly expenses".into(), fmt_money(flow.monthly_expenses, sym)],
        vec!["Essential".into(), fmt_money(flow.essential_expenses, sym)],
        vec!["Discretionary".into(), fmt_money(flow.discretionary_expenses, sym)],
        vec!["Monthly savings".into(), fmt_money(flow.monthly_savings, sym)],
        vec![
            "Savings rate".into(),
            format!("{}%", fixed1(flow.savings_rate_percent)),
        ],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], totals));

    let rows = flow
        .categories
        .iter()
        .map(|c| {
            vec![
                c.category.label().to_string(),
                fmt_money(c.monthly_amount, sym),
                format!("{}%", fixed1(c.percent)),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Per month", "Share"], rows));
    Ok(())
}

fn show_goals(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let profile = load_profile(profile_path(sub))?;
    let as_of = match sub.get_one::<String>("as-of") {
        Some(raw) => parse_date(raw.trim())?,
        None => Utc::now().date_naive(),
    };
    let rate = sub
        .get_one::<String>("rate")
        .map(|s| coerce_amount(s))
        .unwrap_or(settings.default_rate_percent);
    let plans = goal_plans(&profile, as_of, rate)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &plans)? {
        return Ok(());
    }
    let sym = settings.currency_symbol.as_str();
    let rows = plans
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                format!("{}%", fixed1(p.progress_percent)),
                p.deadline.to_string(),
                fmt_money(p.remaining, sym),
                fmt_money(p.monthly_sip_required, sym),
                fmt_money(p.lump_sum_required_today, sym),
            ]
        })
        .collect();
    let headers = [
        "Goal",
        "Progress",
        "Deadline",
        "Remaining",
        "SIP / month",
        "Lump sum today",
    ];
    println!("{}", pretty_table(&headers, rows));
    Ok(())
}
