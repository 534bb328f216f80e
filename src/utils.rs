// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::prelude::*;

// Leading number with an optional Indian/compact unit, e.g. "1.5Cr", "5 lakh", "10k".
static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([+-]?(?:\d+\.?\d*|\.\d+)(?:e[+-]?\d+)?)\s*(crores?|cr|lakhs?|lacs?|l|k)?")
        .expect("amount pattern compiles")
});

fn unit_multiplier(unit: &str) -> f64 {
    match unit.to_lowercase().as_str() {
        "k" => 1e3,
        "l" | "lakh" | "lakhs" | "lac" | "lacs" => 1e5,
        "cr" | "crore" | "crores" => 1e7,
        _ => 1.0,
    }
}

// Separators and spaces go, so "1 00 000" and "₹ 2,500" read as plain digits.
fn strip_amount(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, ',' | '_' | '₹'))
        .collect()
}

fn scan_amount(s: &str) -> Option<f64> {
    let cleaned = strip_amount(s);
    let caps = AMOUNT_RE.captures(&cleaned)?;
    let num: f64 = caps.get(1)?.as_str().parse().ok()?;
    let mult = caps.get(2).map(|m| unit_multiplier(m.as_str())).unwrap_or(1.0);
    let v = num * mult;
    v.is_finite().then_some(v)
}

/// Lenient number parsing for form-style input: anything unreadable becomes 0.
///
/// A leading number is honoured the way a browser `parseFloat` would
/// ("12%" reads as 12), and K/L/Cr suffixes scale it.
pub fn coerce_amount(s: &str) -> f64 {
    match scan_amount(s) {
        Some(v) => v,
        None => {
            if !s.trim().is_empty() {
                log::warn!("treating non-numeric input '{}' as 0", s);
            }
            0.0
        }
    }
}

/// Strict counterpart of [`coerce_amount`]: the whole string must be an amount.
pub fn parse_amount(s: &str) -> Result<f64> {
    let cleaned = strip_amount(s);
    let caps = AMOUNT_RE
        .captures(&cleaned)
        .filter(|c| c.get(0).map(|m| m.end()) == Some(cleaned.len()))
        .with_context(|| format!("Invalid amount '{}'", s))?;
    let num: f64 = caps[1]
        .parse()
        .with_context(|| format!("Invalid amount '{}'", s))?;
    let mult = caps.get(2).map(|m| unit_multiplier(m.as_str())).unwrap_or(1.0);
    let v = num * mult;
    if !v.is_finite() {
        return Err(anyhow!("Amount '{}' is out of range", s));
    }
    Ok(v)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// First day of a `YYYY-MM` month.
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (h, t) = rest.split_at(rest.len() - 2);
        groups.push(t);
        rest = h;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Whole-unit amount with Indian digit grouping: 1234567 -> "12,34,567".
pub fn format_inr(v: f64) -> String {
    if !v.is_finite() {
        return "-".to_string();
    }
    let Some(d) = Decimal::from_f64(v) else {
        // Beyond Decimal's range; plain rounding is the best we can show.
        return format!("{:.0}", v);
    };
    let rounded = d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let s = rounded.abs().trunc().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}{}", sign, group_indian(&s))
}

/// Short display form: Cr / L / K with one decimal.
pub fn format_compact(v: f64) -> String {
    if !v.is_finite() {
        return "-".to_string();
    }
    if v >= 1e7 {
        format!("{:.1}Cr", v / 1e7)
    } else if v >= 1e5 {
        format!("{:.1}L", v / 1e5)
    } else if v >= 1e3 {
        format!("{:.1}K", v / 1e3)
    } else {
        format_inr(v)
    }
}

pub fn fixed1(v: f64) -> String {
    if v.is_finite() { format!("{:.1}", v) } else { "0.0".to_string() }
}

/// Two-decimal value for CSV/JSON export.
pub fn round2(v: f64) -> f64 {
    Decimal::from_f64(v)
        .map(|d| d.round_dp(2))
        .and_then(|d| d.to_f64())
        .unwrap_or(v)
}

pub fn fmt_money(v: f64, symbol: &str) -> String {
    format!("{}{}", symbol, format_inr(v))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
