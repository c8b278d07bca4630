// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spending pattern analyzer: compares two calendar-month windows of one
//! user's expenses, derives per-category variations, saving opportunities,
//! and plain-language insight sentences. Pure given its fetched inputs;
//! the only side effects live in the two window fetches.

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

use super::InsightError;
use super::types::{CategoryVariation, MonthSummary, SavingOpportunity, SpendingAnalysis};
use crate::db;
use crate::models::{Category, Expense};
use crate::utils::{
    fmt_money, get_currency, month_window, parse_month, previous_month_start, round2, round_unit,
};

// Selection thresholds, all strict comparisons.
const VARIATION_FLOOR: Decimal = Decimal::from_parts(10, 0, 0, false, 0);
const SPEND_FLOOR: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
const SHARE_FLOOR: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
const INITIAL_SPEND_FLOOR: Decimal = Decimal::from_parts(100, 0, 0, false, 0);
const SENTENCE_THRESHOLD: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

// Half of the observed increase / a tenth of a dominant category.
const COMPARATIVE_SAVING_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
const INITIAL_SAVING_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

const MAX_OPPORTUNITIES: usize = 3;
const MAX_SENTENCES: usize = 3;

/// Analyze one user's spending across the current and previous month.
/// `current_month`/`previous_month` are optional `YYYY-MM` references; the
/// current month defaults to today, the previous one to the calendar month
/// immediately before the current reference.
pub fn analyze_spending_patterns(
    conn: &Connection,
    user_id: &str,
    current_month: Option<&str>,
    previous_month: Option<&str>,
) -> Result<SpendingAnalysis> {
    if user_id.trim().is_empty() {
        return Err(InsightError::EmptyUserId.into());
    }

    let current_ref = match current_month {
        Some(s) => parse_month(s)?,
        None => Utc::now().date_naive(),
    };
    let (cur_start, cur_end) = month_window(current_ref)?;
    let prev_ref = match previous_month {
        Some(s) => parse_month(s)?,
        None => previous_month_start(cur_start)?,
    };
    let (prev_start, prev_end) = month_window(prev_ref)?;

    // Two independent window fetches; empty results are normal.
    let current = db::fetch_expenses(conn, user_id, cur_start, cur_end)?;
    let previous = db::fetch_expenses(conn, user_id, prev_start, prev_end)?;
    let currency = get_currency(conn)?;

    Ok(analyze_windows(&current, &previous, &currency))
}

/// Pure core over two already-fetched windows.
pub fn analyze_windows(
    current: &[Expense],
    previous: &[Expense],
    currency: &str,
) -> SpendingAnalysis {
    let has_current_data = !current.is_empty();
    let has_historical_data = !previous.is_empty();

    let current_month = summarize(current);
    let previous_month = summarize(previous);

    let variations = if has_historical_data {
        category_variations(&current_month.by_category, &previous_month.by_category)
    } else {
        initial_category_analysis(&current_month.by_category)
    };

    let saving_opportunities = if has_historical_data {
        comparative_opportunities(&variations)
    } else {
        initial_opportunities(&variations, current_month.total)
    };

    let insights = if has_historical_data {
        comparative_insights(&variations, currency)
    } else {
        initial_insights(&variations, current_month.total, has_current_data, currency)
    };

    SpendingAnalysis {
        current_month,
        previous_month,
        variations,
        saving_opportunities,
        insights,
        has_historical_data,
        has_current_data,
    }
}

/// Group a window into total + per-category sums. Keys are normalized to
/// lowercase; blank categories land in "other". Unknown labels are kept
/// verbatim so nothing is silently merged away.
fn summarize(expenses: &[Expense]) -> MonthSummary {
    let mut by_category: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut total = Decimal::ZERO;
    for e in expenses {
        let key = normalize_category(&e.category);
        *by_category.entry(key).or_insert(Decimal::ZERO) += e.value;
        total += e.value;
    }
    MonthSummary { total, by_category }
}

fn normalize_category(raw: &str) -> String {
    let key = raw.trim().to_lowercase();
    if key.is_empty() {
        Category::Other.label().to_string()
    } else {
        key
    }
}

/// Per-category variation over the union of both windows, sorted by
/// descending absolute percentage variation. A category appearing with no
/// history counts as +100%; absent on both sides counts as 0%.
fn category_variations(
    current: &BTreeMap<String, Decimal>,
    previous: &BTreeMap<String, Decimal>,
) -> Vec<CategoryVariation> {
    let mut variations: Vec<CategoryVariation> = Vec::new();
    let mut categories: Vec<&String> = current.keys().chain(previous.keys()).collect();
    categories.sort();
    categories.dedup();

    for category in categories {
        let current_amount = current.get(category).copied().unwrap_or(Decimal::ZERO);
        let previous_amount = previous.get(category).copied().unwrap_or(Decimal::ZERO);
        let difference = current_amount - previous_amount;
        let variation = if previous_amount > Decimal::ZERO {
            round2(difference / previous_amount * Decimal::ONE_HUNDRED)
        } else if current_amount > Decimal::ZERO {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
        variations.push(CategoryVariation {
            category: category.clone(),
            current_amount,
            previous_amount,
            variation,
            difference,
            is_initial: false,
        });
    }

    // Stable sort: ties keep the alphabetical union order, so identical
    // inputs always produce identical output.
    variations.sort_by(|a, b| b.variation.abs().cmp(&a.variation.abs()));
    variations
}

/// First-use branch: no history to compare against, so rank the current
/// window's categories by amount.
fn initial_category_analysis(current: &BTreeMap<String, Decimal>) -> Vec<CategoryVariation> {
    let mut analysis: Vec<CategoryVariation> = current
        .iter()
        .map(|(category, amount)| CategoryVariation {
            category: category.clone(),
            current_amount: *amount,
            previous_amount: Decimal::ZERO,
            variation: Decimal::ZERO,
            difference: *amount,
            is_initial: true,
        })
        .collect();
    analysis.sort_by(|a, b| b.current_amount.cmp(&a.current_amount));
    analysis
}

/// Categories that grew more than 10% and spend above 50 units, in
/// variation order; the saving estimate is half the observed increase.
fn comparative_opportunities(variations: &[CategoryVariation]) -> Vec<SavingOpportunity> {
    variations
        .iter()
        .filter(|v| v.variation > VARIATION_FLOOR && v.current_amount > SPEND_FLOOR)
        .take(MAX_OPPORTUNITIES)
        .map(|v| SavingOpportunity {
            category: v.category.clone(),
            current_spending: v.current_amount,
            excess_amount: v.difference,
            potential_saving: round_unit(v.difference * COMPARATIVE_SAVING_RATE),
            suggestion: comparative_advice(Category::from_label_lossy(&v.category)).to_string(),
            is_initial: false,
        })
        .collect()
}

/// First-use branch: flag categories that dominate the current window
/// (more than 20% of the total and above 100 units).
fn initial_opportunities(
    variations: &[CategoryVariation],
    total: Decimal,
) -> Vec<SavingOpportunity> {
    if total <= Decimal::ZERO {
        return Vec::new();
    }
    variations
        .iter()
        .filter(|v| {
            let share = v.current_amount / total * Decimal::ONE_HUNDRED;
            share > SHARE_FLOOR && v.current_amount > INITIAL_SPEND_FLOOR
        })
        .take(MAX_OPPORTUNITIES)
        .map(|v| SavingOpportunity {
            category: v.category.clone(),
            current_spending: v.current_amount,
            excess_amount: Decimal::ZERO,
            potential_saving: round_unit(v.current_amount * INITIAL_SAVING_RATE),
            suggestion: initial_advice(Category::from_label_lossy(&v.category)).to_string(),
            is_initial: true,
        })
        .collect()
}

/// Sentences for the top variations: only moves beyond +/-20% are worth a
/// sentence, so the list may be empty.
fn comparative_insights(variations: &[CategoryVariation], currency: &str) -> Vec<String> {
    let mut insights = Vec::new();
    for v in variations.iter().take(MAX_SENTENCES) {
        if v.variation > SENTENCE_THRESHOLD {
            insights.push(format!(
                "You spent {}% more on {} this month ({} more)",
                pct1(v.variation),
                v.category,
                fmt_money(&v.difference, currency),
            ));
        } else if v.variation < -SENTENCE_THRESHOLD {
            insights.push(format!(
                "Nice work! You saved {}% on {} this month ({} less)",
                pct1(v.variation.abs()),
                v.category,
                fmt_money(&v.difference.abs(), currency),
            ));
        }
    }
    insights
}

fn initial_insights(
    variations: &[CategoryVariation],
    total: Decimal,
    has_current_data: bool,
    currency: &str,
) -> Vec<String> {
    if !has_current_data {
        return vec![
            "Add your first expenses to start receiving personalized insights".to_string(),
            "Log your daily spending to build up a picture of your habits".to_string(),
            "After a few weeks you will see detailed month-over-month comparisons".to_string(),
        ];
    }

    let mut insights = Vec::new();
    if let Some(top) = variations.first() {
        let share = if total > Decimal::ZERO {
            top.current_amount / total * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
        insights.push(format!(
            "Your biggest spending category is {} at {} ({}% of total)",
            top.category,
            fmt_money(&top.current_amount, currency),
            pct1(share),
        ));
    }
    if let Some(second) = variations.get(1) {
        insights.push(format!(
            "Your second biggest category is {} at {}",
            second.category,
            fmt_money(&second.current_amount, currency),
        ));
    }
    insights.push(
        "Keep logging your expenses to unlock monthly comparisons and saving suggestions"
            .to_string(),
    );
    insights
}

/// One-decimal percentage for sentences, padded like "25.0".
fn pct1(d: Decimal) -> String {
    format!(
        "{:.1}",
        d.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    )
}

fn comparative_advice(category: Category) -> &'static str {
    match category {
        Category::Food => "Consider cooking at home more often and planning meals ahead",
        Category::Transport => "Look into public transport or shared rides",
        Category::Housing => "Review rent, utilities and insurance for room to renegotiate",
        Category::Bills => "Audit recurring bills and cancel services you no longer use",
        Category::Entertainment => "Look for free or discounted activities",
        Category::Health => "Compare providers and ask about generic alternatives",
        Category::Education => "Check library resources and free courses before paying",
        Category::Shopping => "Make a list before you shop and avoid impulse buys",
        Category::Other => "Review these expenses and identify where you can cut back",
    }
}

fn initial_advice(category: Category) -> &'static str {
    match category {
        Category::Food => "Plan your meals and consider cooking at home more to save",
        Category::Transport => "Evaluate cheaper ways to get around, like public transport",
        Category::Housing => "Compare housing-related contracts once a year",
        Category::Bills => "List every recurring bill and question each one",
        Category::Entertainment => "Seek out free or discounted activities in your area",
        Category::Health => "Keep an eye on recurring health costs and compare plans",
        Category::Education => "Look for free learning resources before enrolling",
        Category::Shopping => "Write shopping lists and avoid buying on impulse",
        Category::Other => "Track spending in this category to identify patterns",
    }
}
