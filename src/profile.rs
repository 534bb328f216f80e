// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Portfolio payloads: mapping backend records into a [`Profile`] and the
//! summaries built on top of it.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::calculator;
use crate::errors::CalcResult;
use crate::models::{
    Asset, AssetCategory, Expense, ExpenseCategory, Goal, GoalInput, Income, Liability,
    LiabilityCategory, Profile, RiskProfile,
};

const DEFAULT_DEADLINE: (i32, u32, u32) = (2030, 12, 31);
// Tenure assumed for a liability that reports no monthly payment.
const ASSUMED_TENURE_MONTHS: f64 = 60.0;

/// Accepts numbers, numeric strings and null; anything else reads as 0.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match v {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match v {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAsset {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub current_value: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub quantity: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLiability {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub current_balance: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub interest_rate: f64,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub monthly_payment: Option<f64>,
    pub start_date: Option<String>,
    pub maturity_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawIncome {
    pub source_name: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub amount: f64,
    pub frequency: Option<String>,
    pub income_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawExpense {
    pub name: Option<String>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub amount: f64,
    pub frequency: Option<String>,
    pub is_essential: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawGoal {
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub target_amount: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub current_amount: f64,
    pub target_date: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRiskProfile {
    #[serde(deserialize_with = "lenient_f64")]
    pub risk_score: f64,
    pub time_horizon: Option<String>,
    pub risk_capacity: Option<String>,
}

/// Portfolio payload as served by the backend.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Payload {
    pub assets: Vec<RawAsset>,
    pub liabilities: Vec<RawLiability>,
    pub income: Vec<RawIncome>,
    pub expenses: Vec<RawExpense>,
    pub goals: Vec<RawGoal>,
    pub risk_profile: Option<RawRiskProfile>,
}

fn lower(s: &Option<String>) -> String {
    s.as_deref().unwrap_or_default().to_lowercase()
}

fn non_empty(s: &Option<String>) -> Option<String> {
    s.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_asset_category(s: &str) -> Option<AssetCategory> {
    match s.trim().to_lowercase().as_str() {
        "investments" => Some(AssetCategory::Investments),
        "bank" => Some(AssetCategory::Bank),
        "cash" => Some(AssetCategory::Cash),
        "realestate" => Some(AssetCategory::RealEstate),
        "vehicles" => Some(AssetCategory::Vehicles),
        "other" => Some(AssetCategory::Other),
        _ => None,
    }
}

pub fn asset_category(raw: &RawAsset) -> AssetCategory {
    let t = lower(&raw.kind);
    let n = lower(&raw.name);
    if t.contains("mutual") || n.contains("fund") {
        return AssetCategory::Investments;
    }
    if t.contains("stock") || t.contains("equity") {
        return AssetCategory::Investments;
    }
    if t.contains("ppf") || t.contains("fd") || n.contains("ppf") {
        return AssetCategory::Bank;
    }
    if t.contains("gold") || n.contains("gold") {
        return AssetCategory::Other;
    }
    if t.contains("real") || n.contains("apartment") || n.contains("property") {
        return AssetCategory::RealEstate;
    }
    match non_empty(&raw.category) {
        Some(c) => parse_asset_category(&c).unwrap_or(AssetCategory::Other),
        None => AssetCategory::Investments,
    }
}

pub fn liability_category(raw: &RawLiability) -> LiabilityCategory {
    let t = lower(&raw.kind);
    if t.contains("mortgage") || t.contains("home") {
        LiabilityCategory::Mortgage
    } else if t.contains("credit") {
        // Ahead of the vehicle check: "credit card" contains "car".
        LiabilityCategory::Credit
    } else if t.contains("auto") || t.contains("car") || t.contains("vehicle") {
        LiabilityCategory::Vehicle
    } else if t.contains("personal") {
        LiabilityCategory::Personal
    } else if t.contains("business") {
        LiabilityCategory::Business
    } else {
        LiabilityCategory::Other
    }
}

const EXPENSE_RULES: &[(&[&str], ExpenseCategory)] = &[
    (&["housing", "rent"], ExpenseCategory::Housing),
    (&["food"], ExpenseCategory::Food),
    (&["transport"], ExpenseCategory::Transport),
    (&["utilit"], ExpenseCategory::Utilities),
    (&["entertain"], ExpenseCategory::Entertainment),
    (&["insur"], ExpenseCategory::Insurance),
    (&["personal"], ExpenseCategory::Personal),
    (&["invest"], ExpenseCategory::Investment),
    (&["shop"], ExpenseCategory::Shopping),
    (&["travel"], ExpenseCategory::Travel),
];

pub fn expense_category(name: &Option<String>) -> ExpenseCategory {
    let n = lower(name);
    EXPENSE_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|k| n.contains(k)))
        .map(|(_, c)| *c)
        .unwrap_or(ExpenseCategory::Other)
}

fn essential_by_default(c: ExpenseCategory) -> bool {
    matches!(
        c,
        ExpenseCategory::Housing
            | ExpenseCategory::Food
            | ExpenseCategory::Utilities
            | ExpenseCategory::Insurance
            | ExpenseCategory::Transport
    )
}

fn default_deadline() -> NaiveDate {
    let (y, m, d) = DEFAULT_DEADLINE;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MAX)
}

impl Payload {
    pub fn into_profile(self) -> Profile {
        let assets = self
            .assets
            .iter()
            .map(|a| Asset {
                name: a.name.clone().unwrap_or_default(),
                category: asset_category(a),
                value: a.current_value,
                quantity: a.quantity,
            })
            .collect();

        let liabilities = self
            .liabilities
            .iter()
            .map(|l| {
                let category = liability_category(l);
                Liability {
                    name: l.name.clone().unwrap_or_default(),
                    category,
                    amount: l.current_balance,
                    paid: 0.0,
                    interest_rate: l.interest_rate,
                    monthly_payment: l
                        .monthly_payment
                        .unwrap_or(l.current_balance / ASSUMED_TENURE_MONTHS),
                    start_date: non_empty(&l.start_date),
                    end_date: non_empty(&l.maturity_date),
                    is_secured: matches!(
                        category,
                        LiabilityCategory::Mortgage
                            | LiabilityCategory::Vehicle
                            | LiabilityCategory::Business
                    ),
                }
            })
            .collect();

        let incomes = self
            .income
            .iter()
            .map(|i| Income {
                source: non_empty(&i.source_name).unwrap_or_else(|| "Income".to_string()),
                amount: i.amount,
                frequency: non_empty(&i.frequency).unwrap_or_else(|| "monthly".to_string()),
                category: non_empty(&i.income_type).unwrap_or_else(|| "salary".to_string()),
            })
            .collect();

        let expenses = self
            .expenses
            .iter()
            .map(|e| {
                let category = expense_category(&e.category);
                let fallback = non_empty(&e.category).unwrap_or_else(|| "Expense".to_string());
                Expense {
                    name: non_empty(&e.name)
                        .or_else(|| non_empty(&e.title))
                        .unwrap_or_else(|| fallback.clone()),
                    description: non_empty(&e.description).unwrap_or(fallback),
                    amount: e.amount,
                    frequency: non_empty(&e.frequency).unwrap_or_else(|| "monthly".to_string()),
                    category,
                    is_essential: e.is_essential.unwrap_or(essential_by_default(category)),
                }
            })
            .collect();

        let goals = self
            .goals
            .iter()
            .map(|g| {
                let deadline = g.target_date.as_deref().and_then(|d| {
                    let parsed = crate::utils::parse_date(d.trim());
                    if parsed.is_err() {
                        log::warn!("goal deadline '{}' is not YYYY-MM-DD, using default", d);
                    }
                    parsed.ok()
                });
                Goal {
                    name: non_empty(&g.title).unwrap_or_else(|| "Goal".to_string()),
                    target_amount: g.target_amount,
                    current_amount: g.current_amount,
                    deadline: deadline.unwrap_or_else(default_deadline),
                    priority: non_empty(&g.priority).unwrap_or_else(|| "medium".to_string()),
                }
            })
            .collect();

        let risk = self
            .risk_profile
            .map(|r| RiskProfile {
                score: r.risk_score,
                time_horizon: non_empty(&r.time_horizon).unwrap_or_else(|| "medium".to_string()),
                risk_capacity: non_empty(&r.risk_capacity)
                    .unwrap_or_else(|| "moderate".to_string()),
            })
            .unwrap_or_default();

        Profile {
            assets,
            liabilities,
            incomes,
            expenses,
            goals,
            risk,
        }
    }
}

pub fn parse_payload(json: &str) -> Result<Profile> {
    let payload: Payload = serde_json::from_str(json).context("Invalid portfolio payload")?;
    Ok(payload.into_profile())
}

pub fn load_profile(path: &Path) -> Result<Profile> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Read portfolio payload {}", path.display()))?;
    let profile =
        parse_payload(&raw).with_context(|| format!("Parse portfolio payload {}", path.display()))?;
    log::debug!(
        "mapped {} assets, {} liabilities, {} incomes, {} expenses, {} goals",
        profile.assets.len(),
        profile.liabilities.len(),
        profile.incomes.len(),
        profile.expenses.len(),
        profile.goals.len()
    );
    Ok(profile)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub monthly_savings: f64,
    pub monthly_debt_payments: f64,
    pub debt_to_income_percent: f64,
    pub goal_progress_percent: f64,
    pub risk: RiskProfile,
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn is_monthly(frequency: &str) -> bool {
    frequency.eq_ignore_ascii_case("monthly")
}

/// Progress toward a goal in percent, capped at 100.
pub fn goal_progress(goal: &Goal) -> f64 {
    if goal.target_amount <= 0.0 {
        return 0.0;
    }
    (goal.current_amount / goal.target_amount * 100.0).min(100.0)
}

pub fn summary(profile: &Profile) -> PortfolioSummary {
    let total_assets: f64 = profile.assets.iter().map(|a| a.value).sum();
    let total_liabilities: f64 = profile.liabilities.iter().map(|l| l.amount - l.paid).sum();
    let monthly_income: f64 = profile
        .incomes
        .iter()
        .filter(|i| is_monthly(&i.frequency))
        .map(|i| i.amount)
        .sum();
    let monthly_expenses: f64 = profile
        .expenses
        .iter()
        .filter(|e| is_monthly(&e.frequency))
        .map(|e| e.amount)
        .sum();
    let monthly_debt_payments: f64 = profile.liabilities.iter().map(|l| l.monthly_payment).sum();
    let debt_to_income_percent = if monthly_income > 0.0 {
        monthly_debt_payments / monthly_income * 100.0
    } else {
        0.0
    };
    let goal_progress_percent = if profile.goals.is_empty() {
        0.0
    } else {
        let total: f64 = profile.goals.iter().map(goal_progress).sum();
        round1(total / profile.goals.len() as f64)
    };

    PortfolioSummary {
        total_assets,
        total_liabilities,
        net_worth: total_assets - total_liabilities,
        monthly_income,
        monthly_expenses,
        monthly_savings: monthly_income - monthly_expenses,
        monthly_debt_payments,
        debt_to_income_percent,
        goal_progress_percent,
        risk: profile.risk.clone(),
    }
}

/// Monthly equivalent of an amount paid at `frequency`.
///
/// Daily counts as 30 days and weekly as 4 weeks. One-time and unknown
/// frequencies contribute nothing to a monthly figure.
pub fn monthly_equivalent(amount: f64, frequency: &str) -> f64 {
    match frequency.trim().to_lowercase().as_str() {
        "daily" => amount * 30.0,
        "weekly" => amount * 4.0,
        "monthly" => amount,
        "yearly" | "annual" | "annually" => amount / 12.0,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub monthly_amount: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlow {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub essential_expenses: f64,
    pub discretionary_expenses: f64,
    pub monthly_savings: f64,
    pub savings_rate_percent: f64,
    pub categories: Vec<CategoryTotal>,
}

/// Income and spending normalised to a month, split by essential flag and
/// expense category.
pub fn cash_flow(profile: &Profile) -> CashFlow {
    let monthly_income: f64 = profile
        .incomes
        .iter()
        .map(|i| monthly_equivalent(i.amount, &i.frequency))
        .sum();

    let mut essential_expenses = 0.0;
    let mut discretionary_expenses = 0.0;
    let mut by_category: BTreeMap<ExpenseCategory, f64> = BTreeMap::new();
    for e in &profile.expenses {
        let monthly = monthly_equivalent(e.amount, &e.frequency);
        if monthly == 0.0 {
            continue;
        }
        if e.is_essential {
            essential_expenses += monthly;
        } else {
            discretionary_expenses += monthly;
        }
        *by_category.entry(e.category).or_insert(0.0) += monthly;
    }

    let monthly_expenses = essential_expenses + discretionary_expenses;
    let categories = by_category
        .into_iter()
        .map(|(category, monthly_amount)| CategoryTotal {
            category,
            monthly_amount,
            percent: if monthly_expenses > 0.0 {
                round1(monthly_amount / monthly_expenses * 100.0)
            } else {
                0.0
            },
        })
        .collect();
    let monthly_savings = monthly_income - monthly_expenses;

    CashFlow {
        monthly_income,
        monthly_expenses,
        essential_expenses,
        discretionary_expenses,
        monthly_savings,
        savings_rate_percent: if monthly_income > 0.0 {
            round1(monthly_savings / monthly_income * 100.0)
        } else {
            0.0
        },
        categories,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Bucket {
    #[serde(rename = "Indian Stocks")]
    IndianStocks,
    #[serde(rename = "Indian Bonds")]
    IndianBonds,
    #[serde(rename = "International Markets")]
    InternationalMarkets,
    #[serde(rename = "Real Estate")]
    RealEstate,
    #[serde(rename = "Cash & Others")]
    CashAndOthers,
}

impl Bucket {
    pub fn label(self) -> &'static str {
        match self {
            Bucket::IndianStocks => "Indian Stocks",
            Bucket::IndianBonds => "Indian Bonds",
            Bucket::InternationalMarkets => "International Markets",
            Bucket::RealEstate => "Real Estate",
            Bucket::CashAndOthers => "Cash & Others",
        }
    }

    pub fn for_category(c: AssetCategory) -> Bucket {
        match c {
            AssetCategory::RealEstate | AssetCategory::Vehicles => Bucket::RealEstate,
            AssetCategory::Investments => Bucket::IndianStocks,
            AssetCategory::Bank => Bucket::IndianBonds,
            AssetCategory::Cash | AssetCategory::Other => Bucket::CashAndOthers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSlice {
    pub bucket: Bucket,
    pub percent: f64,
    pub amount: f64,
}

/// Model allocation shown when there is nothing to break down.
pub const DEFAULT_ALLOCATION: [(Bucket, f64); 5] = [
    (Bucket::IndianStocks, 45.0),
    (Bucket::IndianBonds, 25.0),
    (Bucket::InternationalMarkets, 15.0),
    (Bucket::RealEstate, 10.0),
    (Bucket::CashAndOthers, 5.0),
];

pub fn asset_allocation(profile: &Profile) -> Vec<AllocationSlice> {
    let total: f64 = profile.assets.iter().map(|a| a.value).sum();
    if total == 0.0 {
        return DEFAULT_ALLOCATION
            .iter()
            .map(|&(bucket, percent)| AllocationSlice {
                bucket,
                percent,
                amount: 0.0,
            })
            .collect();
    }

    let mut by_bucket: BTreeMap<Bucket, f64> = BTreeMap::new();
    for asset in profile.assets.iter().filter(|a| a.value != 0.0) {
        *by_bucket.entry(Bucket::for_category(asset.category)).or_insert(0.0) += asset.value;
    }
    by_bucket
        .into_iter()
        .map(|(bucket, amount)| AllocationSlice {
            bucket,
            percent: round1(amount / total * 100.0),
            amount,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalPlan {
    pub name: String,
    pub target: f64,
    pub current: f64,
    pub progress_percent: f64,
    pub deadline: NaiveDate,
    pub years_left: f64,
    pub remaining: f64,
    pub monthly_sip_required: f64,
    pub lump_sum_required_today: f64,
}

/// Funding plan per goal: what is still missing at `as_of`, and what it takes
/// to close the gap by the deadline at `annual_rate_percent`.
pub fn goal_plans(
    profile: &Profile,
    as_of: NaiveDate,
    annual_rate_percent: f64,
) -> CalcResult<Vec<GoalPlan>> {
    profile
        .goals
        .iter()
        .map(|g| {
            let days = (g.deadline - as_of).num_days().max(0);
            let years_left = days as f64 / 365.25;
            let remaining = (g.target_amount - g.current_amount).max(0.0);
            let need = calculator::goal(GoalInput {
                target_amount: remaining,
                years: years_left,
                annual_rate_percent,
            })?;
            Ok(GoalPlan {
                name: g.name.clone(),
                target: g.target_amount,
                current: g.current_amount,
                progress_percent: goal_progress(g),
                deadline: g.deadline,
                years_left,
                remaining,
                monthly_sip_required: need.monthly_sip_required,
                lump_sum_required_today: need.lump_sum_required_today,
            })
        })
        .collect()
}
