// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LumpSumInput {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub years: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LumpSumResult {
    pub future_value: f64,
    pub gain: f64,
    pub gain_percent: f64,
    pub invested: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SipInput {
    pub monthly_amount: f64,
    pub annual_rate_percent: f64,
    pub years: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SipResult {
    pub future_value: f64,
    pub invested: f64,
    pub gain: f64,
    pub gain_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmiInput {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub tenure_months: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmiResult {
    pub emi: f64,
    pub total_payable: f64,
    pub interest: f64,
    pub interest_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PpfInput {
    pub annual_contribution: f64,
    pub years: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PpfResult {
    pub future_value: f64,
    pub invested: f64,
    pub gain: f64,
    pub gain_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalInput {
    pub target_amount: f64,
    pub years: f64,
    pub annual_rate_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalResult {
    pub monthly_sip_required: f64,
    pub lump_sum_required_today: f64,
}

/// One year of a growth projection. `year` may be fractional on the last row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthRow {
    pub year: f64,
    pub invested: f64,
    pub value: f64,
    pub gain: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub period: Option<String>, // YYYY-MM
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Investments,
    Bank,
    Cash,
    RealEstate,
    Vehicles,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiabilityCategory {
    Mortgage,
    Vehicle,
    Credit,
    Personal,
    Business,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Housing,
    Food,
    Transport,
    Utilities,
    Entertainment,
    Insurance,
    Personal,
    Investment,
    Shopping,
    Travel,
    Other,
}

impl ExpenseCategory {
    pub fn label(self) -> &'static str {
        match self {
            ExpenseCategory::Housing => "Housing",
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Insurance => "Insurance",
            ExpenseCategory::Personal => "Personal",
            ExpenseCategory::Investment => "Investment",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Travel => "Travel",
            ExpenseCategory::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub category: AssetCategory,
    pub value: f64,
    pub quantity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Liability {
    pub name: String,
    pub category: LiabilityCategory,
    pub amount: f64,
    pub paid: f64,
    pub interest_rate: f64,
    pub monthly_payment: f64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_secured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub source: String,
    pub amount: f64,
    pub frequency: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub name: String,
    pub description: String,
    pub amount: f64,
    pub frequency: String,
    pub category: ExpenseCategory,
    pub is_essential: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: NaiveDate,
    pub priority: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub score: f64,
    pub time_horizon: String,
    pub risk_capacity: String,
}

impl Default for RiskProfile {
    fn default() -> Self {
        Self {
            score: 0.0,
            time_horizon: "medium".to_string(),
            risk_capacity: "moderate".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    pub assets: Vec<Asset>,
    pub liabilities: Vec<Liability>,
    pub incomes: Vec<Income>,
    pub expenses: Vec<Expense>,
    pub goals: Vec<Goal>,
    pub risk: RiskProfile,
}
