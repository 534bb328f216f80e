// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finplan::PPF_ANNUAL_RATE;
use finplan::config::{Settings, load_from, write_defaults};
use tempfile::tempdir;

#[test]
fn defaults_match_calculator_constants() {
    let s = Settings::default();
    assert_eq!(s.default_rate_percent, 12.0);
    assert_eq!(s.ppf_rate(), PPF_ANNUAL_RATE);
    assert_eq!(s.currency_symbol, "₹");
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let s = load_from(&dir.path().join("nope.json")).unwrap();
    assert_eq!(s, Settings::default());
}

#[test]
fn init_writes_defaults_and_refuses_to_clobber() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");
    write_defaults(&path, false).unwrap();
    assert_eq!(load_from(&path).unwrap(), Settings::default());

    assert!(write_defaults(&path, false).is_err());
    write_defaults(&path, true).unwrap();
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "ppf_rate_percent": 7.1, "currency_symbol": "Rs. " }"#).unwrap();
    let s = load_from(&path).unwrap();
    assert_eq!(s.ppf_rate_percent, 7.1);
    assert_eq!(s.currency_symbol, "Rs. ");
    assert_eq!(s.default_rate_percent, 12.0);
}

#[test]
fn invalid_settings_are_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");

    std::fs::write(&path, "{ broken").unwrap();
    let err = load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("settings.json"));

    std::fs::write(&path, r#"{ "default_rate_percent": -150 }"#).unwrap();
    assert!(load_from(&path).is_err());
}
