// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Closed-form time-value-of-money calculators.
//!
//! Every function here is pure: inputs in, numbers out. Rates are annual
//! percentages; monthly modes divide them by 12. A zero rate or a zero
//! horizon is handled by its own branch so nothing divides by zero.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcResult, non_negative, rate_percent};
use crate::models::{
    EmiInput, EmiResult, GoalInput, GoalResult, LumpSumInput, LumpSumResult, PpfInput, PpfResult,
    SipInput, SipResult,
};

/// Annual PPF interest rate as a fraction.
///
/// The rate is set by government notification each quarter and moves
/// independently of this code. Callers that need the current notified rate
/// should pass it to [`ppf_at_rate`] (the CLI reads it from settings).
pub const PPF_ANNUAL_RATE: f64 = 0.076;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    LumpSum,
    Sip,
    Emi,
    Ppf,
    Goal,
}

impl Mode {
    pub const ALL: [Mode; 5] = [Mode::LumpSum, Mode::Sip, Mode::Emi, Mode::Ppf, Mode::Goal];

    pub fn id(self) -> &'static str {
        match self {
            Mode::LumpSum => "lumpsum",
            Mode::Sip => "sip",
            Mode::Emi => "emi",
            Mode::Ppf => "ppf",
            Mode::Goal => "goal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::LumpSum => "Lump Sum",
            Mode::Sip => "SIP",
            Mode::Emi => "EMI",
            Mode::Ppf => "PPF",
            Mode::Goal => "Goal",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Mode::LumpSum => "One-time investment growth",
            Mode::Sip => "Systematic Investment Plan",
            Mode::Emi => "Loan EMI calculator",
            Mode::Ppf => "Public Provident Fund",
            Mode::Goal => "Goal-based planning",
        }
    }

    /// Quick-pick amounts for the mode's primary amount field.
    pub fn presets(self) -> &'static [f64] {
        match self {
            Mode::LumpSum => &[50_000.0, 100_000.0, 500_000.0, 1_000_000.0],
            Mode::Sip => &[1_000.0, 5_000.0, 10_000.0, 25_000.0],
            Mode::Emi => &[200_000.0, 500_000.0, 1_000_000.0, 2_500_000.0],
            Mode::Ppf => &[50_000.0, 100_000.0, 150_000.0],
            Mode::Goal => &[500_000.0, 1_000_000.0, 5_000_000.0, 10_000_000.0],
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Mode::ALL
            .into_iter()
            .find(|m| m.id() == wanted)
            .ok_or_else(|| format!("Unknown mode '{}' (use lumpsum|sip|emi|ppf|goal)", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Request {
    LumpSum(LumpSumInput),
    Sip(SipInput),
    Emi(EmiInput),
    Ppf(PpfInput),
    Goal(GoalInput),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Outcome {
    LumpSum(LumpSumResult),
    Sip(SipResult),
    Emi(EmiResult),
    Ppf(PpfResult),
    Goal(GoalResult),
}

impl Request {
    pub fn mode(&self) -> Mode {
        match self {
            Request::LumpSum(_) => Mode::LumpSum,
            Request::Sip(_) => Mode::Sip,
            Request::Emi(_) => Mode::Emi,
            Request::Ppf(_) => Mode::Ppf,
            Request::Goal(_) => Mode::Goal,
        }
    }
}

pub fn compute(req: &Request) -> CalcResult<Outcome> {
    let out = match *req {
        Request::LumpSum(i) => Outcome::LumpSum(lump_sum(i)?),
        Request::Sip(i) => Outcome::Sip(sip(i)?),
        Request::Emi(i) => Outcome::Emi(emi(i)?),
        Request::Ppf(i) => Outcome::Ppf(ppf(i)?),
        Request::Goal(i) => Outcome::Goal(goal(i)?),
    };
    log::debug!("computed {}: {:?}", req.mode(), out);
    Ok(out)
}

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}

/// Future value of a single deposit compounded annually.
pub fn lump_sum(input: LumpSumInput) -> CalcResult<LumpSumResult> {
    let principal = non_negative("principal", input.principal)?;
    let years = non_negative("years", input.years)?;
    let rate = rate_percent("annual rate", input.annual_rate_percent)? / 100.0;

    let future_value = principal * (1.0 + rate).powf(years);
    let gain = future_value - principal;
    Ok(LumpSumResult {
        future_value,
        gain,
        gain_percent: percent_of(gain, principal),
        invested: principal,
    })
}

/// Future value of a monthly SIP, contributions made at the start of each month.
pub fn sip(input: SipInput) -> CalcResult<SipResult> {
    let pmt = non_negative("monthly amount", input.monthly_amount)?;
    let years = non_negative("years", input.years)?;
    let r = rate_percent("annual rate", input.annual_rate_percent)? / 100.0 / 12.0;
    let n = years * 12.0;

    if n == 0.0 {
        return Ok(SipResult {
            future_value: 0.0,
            invested: 0.0,
            gain: 0.0,
            gain_percent: 0.0,
        });
    }

    let future_value = annuity_due_value(pmt, r, n);
    let invested = pmt * n;
    let gain = future_value - invested;
    Ok(SipResult {
        future_value,
        invested,
        gain,
        gain_percent: percent_of(gain, invested),
    })
}

/// `(1 + r)^n - 1`, accurate when `r` is tiny.
fn growth_less_one(r: f64, n: f64) -> f64 {
    (n * r.ln_1p()).exp_m1()
}

/// `((1 + r)^n - 1) / r`, which tends to `n` as `r` goes to 0.
fn accumulation_factor(r: f64, n: f64) -> f64 {
    if r == 0.0 { n } else { growth_less_one(r, n) / r }
}

pub(crate) fn annuity_due_value(pmt: f64, r: f64, n: f64) -> f64 {
    pmt * accumulation_factor(r, n) * (1.0 + r)
}

/// Equated monthly installment on a reducing-balance loan.
pub fn emi(input: EmiInput) -> CalcResult<EmiResult> {
    let principal = non_negative("loan amount", input.principal)?;
    let n = non_negative("tenure months", input.tenure_months)?;
    let r = rate_percent("annual rate", input.annual_rate_percent)? / 100.0 / 12.0;

    if n == 0.0 {
        return Ok(EmiResult {
            emi: 0.0,
            total_payable: 0.0,
            interest: 0.0,
            interest_percent: 0.0,
        });
    }

    if r == 0.0 {
        let emi = principal / n;
        return Ok(EmiResult {
            emi,
            total_payable: emi * n,
            interest: 0.0,
            interest_percent: 0.0,
        });
    }

    // P*r / (1 - (1+r)^-n): settles at P*r for long tenures instead of inf/inf.
    let emi = principal * r / -growth_less_one(r, -n);
    let total_payable = emi * n;
    let interest = total_payable - principal;
    Ok(EmiResult {
        emi,
        total_payable,
        interest,
        interest_percent: percent_of(interest, principal),
    })
}

/// PPF maturity at the statutory [`PPF_ANNUAL_RATE`].
pub fn ppf(input: PpfInput) -> CalcResult<PpfResult> {
    ppf_at_rate(input, PPF_ANNUAL_RATE)
}

/// PPF maturity with year-end contributions at an explicit annual rate (fraction, not percent).
pub fn ppf_at_rate(input: PpfInput, rate: f64) -> CalcResult<PpfResult> {
    let contribution = non_negative("annual contribution", input.annual_contribution)?;
    let years = non_negative("years", input.years)?;
    rate_percent("PPF rate", rate * 100.0)?;

    let future_value = ordinary_annuity_value(contribution, rate, years);
    let invested = contribution * years;
    let gain = future_value - invested;
    Ok(PpfResult {
        future_value,
        invested,
        gain,
        gain_percent: percent_of(gain, invested),
    })
}

pub(crate) fn ordinary_annuity_value(pmt: f64, r: f64, n: f64) -> f64 {
    pmt * accumulation_factor(r, n)
}

/// Monthly SIP and today's lump sum needed to reach `target_amount`.
pub fn goal(input: GoalInput) -> CalcResult<GoalResult> {
    let target = non_negative("target amount", input.target_amount)?;
    let years = non_negative("years", input.years)?;
    let annual_rate = rate_percent("annual rate", input.annual_rate_percent)? / 100.0;
    let r = annual_rate / 12.0;
    let months = years * 12.0;

    if months == 0.0 {
        return Ok(GoalResult {
            monthly_sip_required: 0.0,
            lump_sum_required_today: 0.0,
        });
    }

    let monthly_sip_required = target / (accumulation_factor(r, months) * (1.0 + r));
    let lump_sum_required_today = if annual_rate == 0.0 {
        target
    } else {
        target / (1.0 + annual_rate).powf(years)
    };

    Ok(GoalResult {
        monthly_sip_required,
        lump_sum_required_today,
    })
}

