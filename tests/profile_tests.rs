// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use finplan::models::{AssetCategory, ExpenseCategory, LiabilityCategory};
use finplan::profile::{
    Bucket, asset_allocation, cash_flow, goal_plans, load_profile, monthly_equivalent,
    parse_payload, summary,
};
use serde_json::json;
use tempfile::tempdir;

fn sample_payload() -> serde_json::Value {
    json!({
        "assets": [
            { "name": "Nifty Index Fund", "type": "Mutual Fund", "current_value": 400000 },
            { "name": "HDFC Bank", "type": "Stock", "current_value": "100000" },
            { "name": "PPF Account", "type": "Savings", "current_value": 250000 },
            { "name": "Sovereign Gold Bond", "type": "Bond", "current_value": 50000 },
            { "name": "2BHK Apartment", "type": "Property", "current_value": 200000 },
            { "name": "Emergency cash", "type": "", "category": "cash", "current_value": 0 }
        ],
        "liabilities": [
            { "name": "Home loan", "type": "Home Loan", "current_balance": 300000, "monthly_payment": 15000, "interest_rate": 8.5 },
            { "name": "Card", "type": "Credit Card", "current_balance": "60000" }
        ],
        "income": [
            { "source_name": "Salary", "amount": 100000, "frequency": "monthly" },
            { "source_name": "Bonus", "amount": 200000, "frequency": "annual" },
            { "amount": 20000 }
        ],
        "expenses": [
            { "category": "Rent", "amount": 30000, "frequency": "monthly" },
            { "title": "Movies", "category": "Entertainment", "amount": 5000 },
            { "name": "Insurance premium", "category": "insurance", "amount": 24000, "frequency": "yearly" },
            { "category": "Groceries & food", "amount": 12000, "is_essential": false }
        ],
        "goals": [
            { "title": "House down payment", "target_amount": 1000000, "current_amount": 250000, "target_date": "2030-01-01" },
            { "title": "Car", "target_amount": 500000, "current_amount": 600000 },
            { "target_amount": 0, "current_amount": 1000 }
        ],
        "risk_profile": { "risk_score": "7", "time_horizon": "long" }
    })
}

#[test]
fn payload_maps_categories_and_defaults() {
    let profile = parse_payload(&sample_payload().to_string()).unwrap();

    let cats: Vec<_> = profile.assets.iter().map(|a| a.category).collect();
    assert_eq!(
        cats,
        vec![
            AssetCategory::Investments,
            AssetCategory::Investments,
            AssetCategory::Bank,
            AssetCategory::Other,
            AssetCategory::RealEstate,
            AssetCategory::Cash,
        ]
    );
    assert_eq!(profile.assets[1].value, 100_000.0);

    let home = &profile.liabilities[0];
    assert_eq!(home.category, LiabilityCategory::Mortgage);
    assert!(home.is_secured);
    assert_eq!(home.monthly_payment, 15_000.0);
    let card = &profile.liabilities[1];
    assert_eq!(card.category, LiabilityCategory::Credit);
    assert!(!card.is_secured);
    assert_eq!(card.monthly_payment, 1_000.0);

    assert_eq!(profile.incomes[2].source, "Income");
    assert_eq!(profile.incomes[2].frequency, "monthly");
    assert_eq!(profile.incomes[2].category, "salary");

    let rent = &profile.expenses[0];
    assert_eq!(rent.category, ExpenseCategory::Housing);
    assert!(rent.is_essential);
    assert_eq!(rent.name, "Rent");
    let movies = &profile.expenses[1];
    assert_eq!(movies.name, "Movies");
    assert_eq!(movies.category, ExpenseCategory::Entertainment);
    assert!(!movies.is_essential);
    assert!(!profile.expenses[3].is_essential);
    assert_eq!(profile.expenses[3].category, ExpenseCategory::Food);

    assert_eq!(profile.goals[1].deadline, NaiveDate::from_ymd_opt(2030, 12, 31).unwrap());
    assert_eq!(profile.goals[2].name, "Goal");
    assert_eq!(profile.goals[0].priority, "medium");

    assert_eq!(profile.risk.score, 7.0);
    assert_eq!(profile.risk.time_horizon, "long");
    assert_eq!(profile.risk.risk_capacity, "moderate");
}

#[test]
fn summary_counts_monthly_flows_and_caps_goal_progress() {
    let profile = parse_payload(&sample_payload().to_string()).unwrap();
    let s = summary(&profile);
    assert_eq!(s.total_assets, 1_000_000.0);
    assert_eq!(s.total_liabilities, 360_000.0);
    assert_eq!(s.net_worth, 640_000.0);
    assert_eq!(s.monthly_income, 120_000.0);
    // The yearly insurance premium is not a monthly outflow.
    assert_eq!(s.monthly_expenses, 47_000.0);
    assert_eq!(s.monthly_savings, 73_000.0);
    assert_eq!(s.monthly_debt_payments, 16_000.0);
    assert_abs_diff_eq!(s.debt_to_income_percent, 13.333, epsilon = 0.001);
    // (25 + 100 + 0) / 3
    assert_eq!(s.goal_progress_percent, 41.7);
}

#[test]
fn empty_payload_summarises_to_zero() {
    let profile = parse_payload("{}").unwrap();
    let s = summary(&profile);
    assert_eq!(s.net_worth, 0.0);
    assert_eq!(s.debt_to_income_percent, 0.0);
    assert_eq!(s.goal_progress_percent, 0.0);
}

#[test]
fn allocation_groups_by_bucket() {
    let profile = parse_payload(&sample_payload().to_string()).unwrap();
    let slices = asset_allocation(&profile);
    let got: Vec<_> = slices.iter().map(|s| (s.bucket, s.percent, s.amount)).collect();
    assert_eq!(
        got,
        vec![
            (Bucket::IndianStocks, 50.0, 500_000.0),
            (Bucket::IndianBonds, 25.0, 250_000.0),
            (Bucket::RealEstate, 20.0, 200_000.0),
            (Bucket::CashAndOthers, 5.0, 50_000.0),
        ]
    );
}

#[test]
fn allocation_without_assets_falls_back_to_model_mix() {
    let profile = parse_payload(r#"{"assets": []}"#).unwrap();
    let slices = asset_allocation(&profile);
    let total: f64 = slices.iter().map(|s| s.percent).sum();
    assert_eq!(slices.len(), 5);
    assert_eq!(total, 100.0);
    assert_eq!(slices[2].bucket, Bucket::InternationalMarkets);
    assert!(slices.iter().all(|s| s.amount == 0.0));
    assert_eq!(
        serde_json::to_value(&slices[4]).unwrap()["bucket"],
        "Cash & Others"
    );
}

#[test]
fn goal_plans_fund_the_remaining_gap() {
    let profile = parse_payload(&sample_payload().to_string()).unwrap();
    let as_of = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let plans = goal_plans(&profile, as_of, 0.0).unwrap();

    let house = &plans[0];
    assert_eq!(house.remaining, 750_000.0);
    assert_abs_diff_eq!(house.years_left, 1826.0 / 365.25, epsilon = 1e-12);
    assert_abs_diff_eq!(
        house.monthly_sip_required,
        750_000.0 / (house.years_left * 12.0),
        epsilon = 1e-6
    );
    assert_eq!(house.lump_sum_required_today, 750_000.0);
    assert_eq!(house.progress_percent, 25.0);

    // Already overfunded.
    assert_eq!(plans[1].remaining, 0.0);
    assert_eq!(plans[1].monthly_sip_required, 0.0);
}

#[test]
fn goal_past_deadline_needs_nothing_periodic() {
    let profile = parse_payload(
        r#"{"goals":[{"title":"Trip","target_amount":90000,"current_amount":10000,"target_date":"2020-06-01"}]}"#,
    )
    .unwrap();
    let as_of = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let plans = goal_plans(&profile, as_of, 12.0).unwrap();
    assert_eq!(plans[0].years_left, 0.0);
    assert_eq!(plans[0].monthly_sip_required, 0.0);
}

#[test]
fn load_profile_reads_file_and_reports_bad_json() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("portfolio.json");
    std::fs::write(&good, sample_payload().to_string()).unwrap();
    let profile = load_profile(&good).unwrap();
    assert_eq!(profile.assets.len(), 6);

    let bad = dir.path().join("broken.json");
    std::fs::write(&bad, "{ not json").unwrap();
    let err = load_profile(&bad).unwrap_err();
    assert!(format!("{:#}", err).contains("broken.json"));

    assert!(load_profile(&dir.path().join("missing.json")).is_err());
}

#[test]
fn blank_asset_category_falls_back_to_investments() {
    let profile = parse_payload(
        r#"{"assets":[{"name":"Misc","type":"","category":"  ","current_value":1000},
                      {"name":"Wallet","type":"","category":"cash","current_value":500}]}"#,
    )
    .unwrap();
    assert_eq!(profile.assets[0].category, AssetCategory::Investments);
    assert_eq!(profile.assets[1].category, AssetCategory::Cash);
}

#[test]
fn summary_carries_the_risk_profile() {
    let profile = parse_payload(&sample_payload().to_string()).unwrap();
    let s = summary(&profile);
    assert_eq!(s.risk.score, 7.0);
    assert_eq!(s.risk.time_horizon, "long");
}

#[test]
fn monthly_equivalent_normalises_frequencies() {
    assert_eq!(monthly_equivalent(100.0, "daily"), 3_000.0);
    assert_eq!(monthly_equivalent(1_000.0, "Weekly"), 4_000.0);
    assert_eq!(monthly_equivalent(5_000.0, "monthly"), 5_000.0);
    assert_eq!(monthly_equivalent(24_000.0, "yearly"), 2_000.0);
    assert_eq!(monthly_equivalent(24_000.0, "annual"), 2_000.0);
    assert_eq!(monthly_equivalent(50_000.0, "one-time"), 0.0);
    assert_eq!(monthly_equivalent(50_000.0, "fortnightly"), 0.0);
}

#[test]
fn cash_flow_splits_spending() {
    let profile = parse_payload(&sample_payload().to_string()).unwrap();
    let flow = cash_flow(&profile);

    assert_abs_diff_eq!(flow.monthly_income, 120_000.0 + 200_000.0 / 12.0, epsilon = 1e-6);
    assert_eq!(flow.monthly_expenses, 49_000.0);
    assert_eq!(flow.essential_expenses, 32_000.0);
    assert_eq!(flow.discretionary_expenses, 17_000.0);
    assert_abs_diff_eq!(flow.monthly_savings, 87_666.666_666, epsilon = 1e-3);
    assert_eq!(flow.savings_rate_percent, 64.1);

    let cats: Vec<_> = flow
        .categories
        .iter()
        .map(|c| (c.category, c.monthly_amount, c.percent))
        .collect();
    assert_eq!(
        cats,
        vec![
            (ExpenseCategory::Housing, 30_000.0, 61.2),
            (ExpenseCategory::Food, 12_000.0, 24.5),
            (ExpenseCategory::Entertainment, 5_000.0, 10.2),
            (ExpenseCategory::Insurance, 2_000.0, 4.1),
        ]
    );
}

#[test]
fn cash_flow_of_empty_profile_is_zero() {
    let flow = cash_flow(&parse_payload("{}").unwrap());
    assert_eq!(flow.monthly_income, 0.0);
    assert_eq!(flow.monthly_expenses, 0.0);
    assert_eq!(flow.savings_rate_percent, 0.0);
    assert!(flow.categories.is_empty());
}
