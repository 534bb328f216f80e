// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calculator::{Mode, Outcome, Request, compute, ppf_at_rate};
use crate::config::Settings;
use crate::models::{EmiInput, GoalInput, LumpSumInput, PpfInput, SipInput};
use crate::utils::{
    coerce_amount, fixed1, fmt_money, format_compact, maybe_print_json, pretty_table,
};
use anyhow::{Result, anyhow};
use serde_json::json;

fn amount(sub: &clap::ArgMatches, name: &str) -> f64 {
    sub.get_one::<String>(name)
        .map(|s| coerce_amount(s))
        .unwrap_or(0.0)
}

fn rate_or(sub: &clap::ArgMatches, fallback: f64) -> f64 {
    sub.get_one::<String>("rate")
        .map(|s| coerce_amount(s))
        .unwrap_or(fallback)
}

pub fn lump_sum_input(settings: &Settings, sub: &clap::ArgMatches) -> LumpSumInput {
    LumpSumInput {
        principal: amount(sub, "principal"),
        annual_rate_percent: rate_or(sub, settings.default_rate_percent),
        years: amount(sub, "years"),
    }
}

pub fn sip_input(settings: &Settings, sub: &clap::ArgMatches) -> SipInput {
    SipInput {
        monthly_amount: amount(sub, "monthly"),
        annual_rate_percent: rate_or(sub, settings.default_rate_percent),
        years: amount(sub, "years"),
    }
}

pub fn emi_input(settings: &Settings, sub: &clap::ArgMatches) -> EmiInput {
    EmiInput {
        principal: amount(sub, "amount"),
        annual_rate_percent: rate_or(sub, settings.default_rate_percent),
        tenure_months: amount(sub, "months"),
    }
}

pub fn ppf_input(sub: &clap::ArgMatches) -> PpfInput {
    PpfInput {
        annual_contribution: amount(sub, "annual"),
        years: amount(sub, "years"),
    }
}

/// PPF rate as a fraction: `--rate` if given, else the configured rate.
pub fn ppf_rate(settings: &Settings, sub: &clap::ArgMatches) -> f64 {
    rate_or(sub, settings.ppf_rate_percent) / 100.0
}

pub fn goal_input(settings: &Settings, sub: &clap::ArgMatches) -> GoalInput {
    GoalInput {
        target_amount: amount(sub, "target"),
        years: amount(sub, "years"),
        annual_rate_percent: rate_or(sub, settings.default_rate_percent),
    }
}

pub fn request_from(settings: &Settings, mode: Mode, sub: &clap::ArgMatches) -> Request {
    match mode {
        Mode::LumpSum => Request::LumpSum(lump_sum_input(settings, sub)),
        Mode::Sip => Request::Sip(sip_input(settings, sub)),
        Mode::Emi => Request::Emi(emi_input(settings, sub)),
        Mode::Ppf => Request::Ppf(ppf_input(sub)),
        Mode::Goal => Request::Goal(goal_input(settings, sub)),
    }
}

/// Runs one calculator from parsed arguments.
pub fn evaluate(
    settings: &Settings,
    mode: Mode,
    sub: &clap::ArgMatches,
) -> Result<(Request, Outcome)> {
    let req = request_from(settings, mode, sub);
    let outcome = match req {
        Request::Ppf(input) => Outcome::Ppf(ppf_at_rate(input, ppf_rate(settings, sub))?),
        _ => compute(&req)?,
    };
    Ok((req, outcome))
}

pub fn handle(settings: &Settings, mode: Mode, sub: &clap::ArgMatches) -> Result<()> {
    let (req, outcome) = evaluate(settings, mode, sub)?;
    let symbol = settings.currency_symbol.as_str();

    if sub.get_flag("text") {
        println!("{}", summary_text(&req, &outcome, symbol)?);
        return Ok(());
    }

    let payload = json!({ "mode": mode, "input": req, "result": outcome });
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &payload)? {
        println!("{} Calculator: {}", mode.label(), mode.description());
        let rows = result_rows(&outcome, symbol);
        println!("{}", pretty_table(&["Metric", "Value", "Compact"], rows));
    }
    Ok(())
}

fn money_row(label: &str, v: f64, symbol: &str) -> Vec<String> {
    vec![label.to_string(), fmt_money(v, symbol), format_compact(v)]
}

fn percent_row(label: &str, v: f64) -> Vec<String> {
    vec![label.to_string(), format!("{}%", fixed1(v)), String::new()]
}

pub fn result_rows(outcome: &Outcome, symbol: &str) -> Vec<Vec<String>> {
    match outcome {
        Outcome::LumpSum(r) => vec![
            money_row("Invested", r.invested, symbol),
            money_row("Future value", r.future_value, symbol),
            money_row("Gain", r.gain, symbol),
            percent_row("Total return", r.gain_percent),
        ],
        Outcome::Sip(r) => vec![
            money_row("Invested", r.invested, symbol),
            money_row("Future value", r.future_value, symbol),
            money_row("Gain", r.gain, symbol),
            percent_row("Total return", r.gain_percent),
        ],
        Outcome::Emi(r) => vec![
            money_row("Monthly EMI", r.emi, symbol),
            money_row("Total payable", r.total_payable, symbol),
            money_row("Interest", r.interest, symbol),
            percent_row("Interest share", r.interest_percent),
        ],
        Outcome::Ppf(r) => vec![
            money_row("Invested", r.invested, symbol),
            money_row("Maturity value", r.future_value, symbol),
            money_row("Gain", r.gain, symbol),
            percent_row("Total return", r.gain_percent),
        ],
        Outcome::Goal(r) => vec![
            money_row("Monthly SIP required", r.monthly_sip_required, symbol),
            money_row("Lump sum required today", r.lump_sum_required_today, symbol),
        ],
    }
}

/// Plain-text block for pasting elsewhere. Errors if `outcome` is not the
/// result of `req`'s mode.
pub fn summary_text(req: &Request, outcome: &Outcome, symbol: &str) -> Result<String> {
    let m = |v: f64| fmt_money(v, symbol);
    let text = match (req, outcome) {
        (Request::LumpSum(i), Outcome::LumpSum(r)) => format!(
            "Lump Sum Investment:\nPrincipal: {}\nRate: {}% for {} years\nFuture Value: {}\nGain: {} ({}%)",
            m(i.principal),
            i.annual_rate_percent,
            i.years,
            m(r.future_value),
            m(r.gain),
            fixed1(r.gain_percent)
        ),
        (Request::Sip(i), Outcome::Sip(r)) => format!(
            "SIP Investment:\nMonthly: {}\nRate: {}% for {} years\nFuture Value: {}\nInvested: {}\nGain: {} ({}%)",
            m(i.monthly_amount),
            i.annual_rate_percent,
            i.years,
            m(r.future_value),
            m(r.invested),
            m(r.gain),
            fixed1(r.gain_percent)
        ),
        (Request::Emi(i), Outcome::Emi(r)) => format!(
            "Loan EMI:\nLoan Amount: {}\nRate: {}% for {} months\nEMI: {}\nTotal Payable: {}\nInterest: {} ({}%)",
            m(i.principal),
            i.annual_rate_percent,
            i.tenure_months,
            m(r.emi),
            m(r.total_payable),
            m(r.interest),
            fixed1(r.interest_percent)
        ),
        (Request::Ppf(i), Outcome::Ppf(r)) => format!(
            "PPF Investment:\nAnnual: {}\nFor {} years\nMaturity Value: {}\nInvested: {}\nGain: {} ({}%)",
            m(i.annual_contribution),
            i.years,
            m(r.future_value),
            m(r.invested),
            m(r.gain),
            fixed1(r.gain_percent)
        ),
        (Request::Goal(i), Outcome::Goal(r)) => format!(
            "Goal Planning:\nTarget: {} in {} years\nSIP Required: {}/month\nLump Sum Required: {} today",
            m(i.target_amount),
            i.years,
            m(r.monthly_sip_required),
            m(r.lump_sum_required_today)
        ),
        _ => {
            return Err(anyhow!(
                "{} request paired with a result of another mode",
                req.mode()
            ));
        }
    };
    Ok(text)
}
