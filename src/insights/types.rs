// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Engine output shapes. All of these are derived fresh per call and never
//! persisted; field names follow the JSON surface consumed by dashboards.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use super::catalog::RiskLevel;

/// One calendar-month window: total spend plus per-category sums.
/// Aggregation keys are the stored (lowercased) category labels, kept
/// verbatim even when outside the closed category set.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub total: Decimal,
    pub by_category: BTreeMap<String, Decimal>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryVariation {
    pub category: String,
    pub current_amount: Decimal,
    pub previous_amount: Decimal,
    /// Percentage change, rounded half-up to 2 decimals. 100 when spending
    /// appears in a category with no history; 0 when both windows are zero.
    pub variation: Decimal,
    pub difference: Decimal,
    pub is_initial: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingOpportunity {
    pub category: String,
    pub current_spending: Decimal,
    pub excess_amount: Decimal,
    /// Rounded to a whole currency unit.
    pub potential_saving: Decimal,
    pub suggestion: String,
    pub is_initial: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingAnalysis {
    pub current_month: MonthSummary,
    pub previous_month: MonthSummary,
    pub variations: Vec<CategoryVariation>,
    pub saving_opportunities: Vec<SavingOpportunity>,
    pub insights: Vec<String>,
    pub has_historical_data: bool,
    pub has_current_data: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentSuggestion {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub suggested_amount: Decimal,
    pub expected_return: Decimal,
    pub risk_level: RiskLevel,
    pub category: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub month: u32,
    /// Future value of the annuity at this month, rounded to 2 decimals.
    pub value: Decimal,
    /// Contribution * months; exact, never rounded.
    pub invested: Decimal,
    pub profit: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialProjection {
    pub investment_type: String,
    pub monthly_investment: Decimal,
    pub annual_rate: Decimal,
    pub projections: Vec<ProjectionPoint>,
    pub total_invested: Decimal,
    pub final_value: Decimal,
    pub total_profit: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardInsights {
    pub total_spent_this_month: Decimal,
    pub total_spent_last_month: Decimal,
    pub monthly_variation: Decimal,
    pub top_saving_opportunity: Option<SavingOpportunity>,
    pub best_investment_suggestion: Option<InvestmentSuggestion>,
    pub projected_gain_in_2_years: Decimal,
    pub insights: Vec<String>,
}
