// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Investment suggestion generator: pairs each detected saving
//! opportunity with the catalog's two low-risk instruments, proposing the
//! opportunity's potential saving as the monthly contribution.

use anyhow::Result;
use rusqlite::Connection;

use super::analysis::analyze_spending_patterns;
use super::catalog::Catalog;
use super::types::{InvestmentSuggestion, SavingOpportunity};
use crate::utils::{fmt_money, get_currency};

const MAX_SUGGESTIONS: usize = 5;

pub fn generate_investment_suggestions(
    conn: &Connection,
    user_id: &str,
    catalog: &Catalog,
) -> Result<Vec<InvestmentSuggestion>> {
    let analysis = analyze_spending_patterns(conn, user_id, None, None)?;
    let currency = get_currency(conn)?;
    Ok(suggestions_from_opportunities(
        &analysis.saving_opportunities,
        catalog,
        &currency,
    ))
}

/// Pure mapping from opportunities (at most 3) to suggestions (at most 5).
pub fn suggestions_from_opportunities(
    opportunities: &[SavingOpportunity],
    catalog: &Catalog,
    currency: &str,
) -> Vec<InvestmentSuggestion> {
    let (first, second) = catalog.low_risk_pair();
    let mut suggestions = Vec::new();
    for opportunity in opportunities {
        for instrument in [first, second] {
            suggestions.push(InvestmentSuggestion {
                kind: instrument.kind.clone(),
                title: instrument.title.clone(),
                description: format!(
                    "Invest {} monthly in {}",
                    fmt_money(&opportunity.potential_saving, currency),
                    instrument.title,
                ),
                suggested_amount: opportunity.potential_saving,
                expected_return: instrument.annual_rate,
                risk_level: instrument.risk,
                category: opportunity.category.clone(),
            });
        }
    }
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn opportunity(category: &str, saving: i64) -> SavingOpportunity {
        SavingOpportunity {
            category: category.into(),
            current_spending: Decimal::from(saving * 10),
            excess_amount: Decimal::from(saving * 2),
            potential_saving: Decimal::from(saving),
            suggestion: "cut back".into(),
            is_initial: false,
        }
    }

    #[test]
    fn two_suggestions_per_opportunity_capped_at_five() {
        let catalog = Catalog::default();
        let opportunities = vec![
            opportunity("food", 40),
            opportunity("transport", 25),
            opportunity("shopping", 15),
        ];
        let suggestions = suggestions_from_opportunities(&opportunities, &catalog, "USD");
        assert_eq!(suggestions.len(), 5);
        assert_eq!(suggestions[0].kind, "gov_bond");
        assert_eq!(suggestions[1].kind, "bank_cd");
        assert_eq!(suggestions[0].category, "food");
        assert_eq!(suggestions[0].suggested_amount, Decimal::from(40));
        assert_eq!(suggestions[4].category, "shopping");
    }

    #[test]
    fn no_opportunities_means_no_suggestions() {
        let catalog = Catalog::default();
        assert!(suggestions_from_opportunities(&[], &catalog, "USD").is_empty());
    }
}
