// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Period-by-period views of the calculators.
//!
//! Growth schedules have one row per year and the last row lands on the
//! exact horizon, so it always agrees with the closed-form result.

use chrono::{Months, NaiveDate};

use crate::calculator::{self, annuity_due_value, ordinary_annuity_value};
use crate::errors::{CalcError, CalcResult};
use crate::models::{AmortizationRow, EmiInput, GrowthRow, LumpSumInput, PpfInput, SipInput};

/// Longest growth schedule, in years.
pub const MAX_SCHEDULE_YEARS: f64 = 1200.0;
/// Longest amortization schedule, in months.
pub const MAX_SCHEDULE_MONTHS: f64 = 14_400.0;

fn within(value: f64, limit: f64, unit: &'static str) -> CalcResult<()> {
    if value > limit {
        return Err(CalcError::HorizonTooLong { value, limit, unit });
    }
    Ok(())
}

fn year_marks(years: f64) -> impl Iterator<Item = f64> {
    let whole = years.ceil() as u32;
    (1..=whole).map(move |y| f64::from(y).min(years))
}

fn growth_row(year: f64, invested: f64, value: f64) -> GrowthRow {
    GrowthRow {
        year,
        invested,
        value,
        gain: value - invested,
    }
}

pub fn lump_sum_schedule(input: LumpSumInput) -> CalcResult<Vec<GrowthRow>> {
    calculator::lump_sum(input)?;
    within(input.years, MAX_SCHEDULE_YEARS, "years")?;
    let rate = input.annual_rate_percent / 100.0;
    Ok(year_marks(input.years)
        .map(|t| {
            let value = input.principal * (1.0 + rate).powf(t);
            growth_row(t, input.principal, value)
        })
        .collect())
}

pub fn sip_schedule(input: SipInput) -> CalcResult<Vec<GrowthRow>> {
    calculator::sip(input)?;
    within(input.years, MAX_SCHEDULE_YEARS, "years")?;
    let r = input.annual_rate_percent / 100.0 / 12.0;
    Ok(year_marks(input.years)
        .map(|t| {
            let months = t * 12.0;
            let value = annuity_due_value(input.monthly_amount, r, months);
            growth_row(t, input.monthly_amount * months, value)
        })
        .collect())
}

/// `rate` is an annual fraction, as for [`calculator::ppf_at_rate`].
pub fn ppf_schedule(input: PpfInput, rate: f64) -> CalcResult<Vec<GrowthRow>> {
    calculator::ppf_at_rate(input, rate)?;
    within(input.years, MAX_SCHEDULE_YEARS, "years")?;
    Ok(year_marks(input.years)
        .map(|t| {
            let value = ordinary_annuity_value(input.annual_contribution, rate, t);
            growth_row(t, input.annual_contribution * t, value)
        })
        .collect())
}

/// Month-by-month amortization of a reducing-balance loan.
///
/// The last installment is trimmed to whatever balance remains, so the
/// schedule always closes at exactly zero. With `start` set, rows are
/// labelled with their calendar month.
pub fn emi_schedule(input: EmiInput, start: Option<NaiveDate>) -> CalcResult<Vec<AmortizationRow>> {
    let plan = calculator::emi(input)?;
    let n = input.tenure_months;
    if n.fract() != 0.0 {
        return Err(CalcError::FractionalTenure { months: n });
    }
    within(n, MAX_SCHEDULE_MONTHS, "months")?;
    let n = n as u32;
    let r = input.annual_rate_percent / 100.0 / 12.0;

    let mut balance = input.principal;
    let mut rows = Vec::with_capacity(n as usize);
    for month in 1..=n {
        let interest = balance * r;
        let (principal, payment) = if month == n {
            (balance, balance + interest)
        } else {
            (plan.emi - interest, plan.emi)
        };
        balance = if month == n { 0.0 } else { balance - principal };
        let period = start
            .and_then(|d| d.checked_add_months(Months::new(month - 1)))
            .map(|d| d.format("%Y-%m").to_string());
        rows.push(AmortizationRow {
            month,
            period,
            payment,
            principal,
            interest,
            balance,
        });
    }
    Ok(rows)
}
