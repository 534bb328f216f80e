// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod calculator;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod models;
pub mod profile;
pub mod schedule;
pub mod utils;

pub use calculator::{Mode, Outcome, PPF_ANNUAL_RATE, Request, compute};
pub use errors::{CalcError, CalcResult};
