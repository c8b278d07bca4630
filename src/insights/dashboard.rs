// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Dashboard aggregator: one call combining the spending analysis, the
//! best investment suggestion, and its 24-month projected gain.

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

use super::analysis::analyze_spending_patterns;
use super::catalog::Catalog;
use super::projection::calculate_financial_projections;
use super::suggestions::suggestions_from_opportunities;
use super::types::DashboardInsights;
use crate::utils::{get_currency, round2};

const MAX_DASHBOARD_INSIGHTS: usize = 3;

pub fn get_dashboard_insights(
    conn: &Connection,
    user_id: &str,
    catalog: &Catalog,
) -> Result<DashboardInsights> {
    let analysis = analyze_spending_patterns(conn, user_id, None, None)?;
    let currency = get_currency(conn)?;
    let suggestions =
        suggestions_from_opportunities(&analysis.saving_opportunities, catalog, &currency);

    let best_suggestion = suggestions.first().cloned();
    let projected_gain = match &best_suggestion {
        Some(s) => {
            calculate_financial_projections(
                user_id,
                catalog,
                Some(s.suggested_amount),
                Some(&s.kind),
            )?
            .total_profit
        }
        None => Decimal::ZERO,
    };

    let mut insights = analysis.insights;
    insights.truncate(MAX_DASHBOARD_INSIGHTS);

    Ok(DashboardInsights {
        total_spent_this_month: analysis.current_month.total,
        total_spent_last_month: analysis.previous_month.total,
        monthly_variation: monthly_variation(
            analysis.current_month.total,
            analysis.previous_month.total,
        ),
        top_saving_opportunity: analysis.saving_opportunities.into_iter().next(),
        best_investment_suggestion: best_suggestion,
        projected_gain_in_2_years: projected_gain,
        insights,
    })
}

/// Month-over-month variation of the window totals, rounded half-up to 2
/// decimals. A zero previous total maps to 100 when anything was spent
/// this month, 0 otherwise.
pub fn monthly_variation(current: Decimal, previous: Decimal) -> Decimal {
    if previous == Decimal::ZERO {
        if current > Decimal::ZERO {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    } else {
        round2((current - previous) / previous * Decimal::ONE_HUNDRED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_variation_zero_rules() {
        assert_eq!(
            monthly_variation(Decimal::ZERO, Decimal::ZERO),
            Decimal::ZERO
        );
        assert_eq!(
            monthly_variation(Decimal::from(10), Decimal::ZERO),
            Decimal::ONE_HUNDRED
        );
    }

    #[test]
    fn monthly_variation_rounds_to_two_decimals() {
        let v = monthly_variation(Decimal::from(110), Decimal::from(300));
        assert_eq!(v, "-63.33".parse().unwrap());
    }
}
