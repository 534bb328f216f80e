// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use chrono::NaiveDate;
use finplan::calculator;
use finplan::errors::CalcError;
use finplan::models::{EmiInput, LumpSumInput, PpfInput, SipInput};
use finplan::schedule::{
    MAX_SCHEDULE_MONTHS, MAX_SCHEDULE_YEARS, emi_schedule, lump_sum_schedule, ppf_schedule,
    sip_schedule,
};

#[test]
fn lump_sum_schedule_ends_on_fractional_horizon() {
    let input = LumpSumInput {
        principal: 100_000.0,
        annual_rate_percent: 12.0,
        years: 2.5,
    };
    let rows = lump_sum_schedule(input).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].year, 1.0);
    assert_abs_diff_eq!(rows[0].value, 112_000.0, epsilon = 1e-6);
    assert_eq!(rows[2].year, 2.5);
    let closed = calculator::lump_sum(input).unwrap();
    assert_relative_eq!(rows[2].value, closed.future_value, max_relative = 1e-12);
    assert!(rows.iter().all(|r| r.invested == 100_000.0));
}

#[test]
fn sip_schedule_matches_closed_form_each_year() {
    let input = SipInput {
        monthly_amount: 1_000.0,
        annual_rate_percent: 12.0,
        years: 3.0,
    };
    let rows = sip_schedule(input).unwrap();
    assert_eq!(rows.len(), 3);
    assert_abs_diff_eq!(rows[0].value, 12_809.33, epsilon = 0.01);
    assert_eq!(rows[0].invested, 12_000.0);
    assert_eq!(rows[2].invested, 36_000.0);
    let closed = calculator::sip(input).unwrap();
    assert_relative_eq!(rows[2].value, closed.future_value, max_relative = 1e-12);
    assert!(rows.windows(2).all(|w| w[1].value > w[0].value));
}

#[test]
fn ppf_schedule_uses_given_rate() {
    let input = PpfInput {
        annual_contribution: 150_000.0,
        years: 15.0,
    };
    let rows = ppf_schedule(input, calculator::PPF_ANNUAL_RATE).unwrap();
    assert_eq!(rows.len(), 15);
    assert_abs_diff_eq!(rows[0].value, 150_000.0, epsilon = 1e-6);
    assert_abs_diff_eq!(rows[1].value, 311_400.0, epsilon = 1e-6);
    let closed = calculator::ppf(input).unwrap();
    assert_relative_eq!(rows[14].value, closed.future_value, max_relative = 1e-12);
}

#[test]
fn zero_horizon_schedules_are_empty() {
    let rows = lump_sum_schedule(LumpSumInput {
        principal: 1.0,
        annual_rate_percent: 5.0,
        years: 0.0,
    })
    .unwrap();
    assert!(rows.is_empty());

    let rows = emi_schedule(
        EmiInput {
            principal: 1_000.0,
            annual_rate_percent: 5.0,
            tenure_months: 0.0,
        },
        None,
    )
    .unwrap();
    assert!(rows.is_empty());
}

#[test]
fn emi_schedule_amortizes_to_zero() {
    let input = EmiInput {
        principal: 100_000.0,
        annual_rate_percent: 12.0,
        tenure_months: 12.0,
    };
    let rows = emi_schedule(input, None).unwrap();
    assert_eq!(rows.len(), 12);
    assert_abs_diff_eq!(rows[0].interest, 1_000.0, epsilon = 1e-9);
    assert_abs_diff_eq!(rows[0].payment, 8_884.88, epsilon = 0.01);
    assert_eq!(rows[11].balance, 0.0);

    let principal_paid: f64 = rows.iter().map(|r| r.principal).sum();
    assert_abs_diff_eq!(principal_paid, 100_000.0, epsilon = 1e-6);

    let paid: f64 = rows.iter().map(|r| r.payment).sum();
    let closed = calculator::emi(input).unwrap();
    assert_abs_diff_eq!(paid, closed.total_payable, epsilon = 1e-6);
    assert!(rows.iter().all(|r| r.period.is_none()));
}

#[test]
fn emi_schedule_labels_calendar_months() {
    let input = EmiInput {
        principal: 30_000.0,
        annual_rate_percent: 0.0,
        tenure_months: 3.0,
    };
    let start = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
    let rows = emi_schedule(input, Some(start)).unwrap();
    let periods: Vec<_> = rows.iter().map(|r| r.period.clone().unwrap()).collect();
    assert_eq!(periods, vec!["2025-11", "2025-12", "2026-01"]);
    assert!(rows.iter().all(|r| r.payment == 10_000.0 && r.interest == 0.0));
    assert_eq!(rows[1].balance, 10_000.0);
}

#[test]
fn emi_schedule_rejects_fractional_tenure() {
    let err = emi_schedule(
        EmiInput {
            principal: 1_000.0,
            annual_rate_percent: 10.0,
            tenure_months: 6.5,
        },
        None,
    )
    .unwrap_err();
    assert_eq!(err, CalcError::FractionalTenure { months: 6.5 });
}

#[test]
fn schedules_validate_like_the_calculators() {
    assert!(matches!(
        sip_schedule(SipInput {
            monthly_amount: 1.0,
            annual_rate_percent: 10.0,
            years: -2.0,
        }),
        Err(CalcError::Negative { .. })
    ));
}

#[test]
fn emi_schedule_caps_the_tenure() {
    let at_limit = emi_schedule(
        EmiInput {
            principal: 1_000_000.0,
            annual_rate_percent: 9.0,
            tenure_months: MAX_SCHEDULE_MONTHS,
        },
        None,
    )
    .unwrap();
    assert_eq!(at_limit.len(), 14_400);
    assert_eq!(at_limit.last().unwrap().balance, 0.0);

    for months in [MAX_SCHEDULE_MONTHS + 1.0, 5e9] {
        let err = emi_schedule(
            EmiInput {
                principal: 1_000_000.0,
                annual_rate_percent: 9.0,
                tenure_months: months,
            },
            None,
        )
        .unwrap_err();
        assert!(matches!(err, CalcError::HorizonTooLong { unit: "months", .. }));
    }
}

#[test]
fn growth_schedules_cap_the_horizon() {
    let rows = lump_sum_schedule(LumpSumInput {
        principal: 1_000.0,
        annual_rate_percent: 0.0,
        years: MAX_SCHEDULE_YEARS,
    })
    .unwrap();
    assert_eq!(rows.len(), 1_200);

    assert!(matches!(
        lump_sum_schedule(LumpSumInput {
            principal: 1_000.0,
            annual_rate_percent: 8.0,
            years: 1e12,
        }),
        Err(CalcError::HorizonTooLong { unit: "years", .. })
    ));
    assert!(matches!(
        sip_schedule(SipInput {
            monthly_amount: 1_000.0,
            annual_rate_percent: 8.0,
            years: MAX_SCHEDULE_YEARS + 0.5,
        }),
        Err(CalcError::HorizonTooLong { .. })
    ));
    assert!(matches!(
        ppf_schedule(
            PpfInput {
                annual_contribution: 1_000.0,
                years: 2_000.0,
            },
            0.071
        ),
        Err(CalcError::HorizonTooLong { .. })
    ));
}
