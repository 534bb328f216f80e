// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("annual rate {value}% is at or below -100%")]
    RateTooLow { value: f64 },

    #[error("amortization needs a whole number of months (got {months})")]
    FractionalTenure { months: f64 },

    #[error("schedule of {value} {unit} is longer than the {limit} {unit} limit")]
    HorizonTooLong {
        value: f64,
        limit: f64,
        unit: &'static str,
    },
}

pub type CalcResult<T> = Result<T, CalcError>;

pub(crate) fn non_negative(field: &'static str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(CalcError::Negative { field, value });
    }
    Ok(value)
}

pub(crate) fn rate_percent(field: &'static str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::NonFinite { field });
    }
    if value <= -100.0 {
        return Err(CalcError::RateTooLow { value });
    }
    Ok(value)
}
