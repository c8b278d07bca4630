// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::insights::analysis::analyze_spending_patterns;
use crate::insights::catalog::Catalog;
use crate::insights::dashboard::get_dashboard_insights;
use crate::insights::projection::calculate_financial_projections;
use crate::insights::suggestions::generate_investment_suggestions;
use crate::insights::types::SpendingAnalysis;
use crate::utils::{fmt_money, get_currency, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("analysis", sub)) => analysis(conn, sub)?,
        Some(("suggestions", sub)) => suggestions(conn, sub)?,
        Some(("projection", sub)) => projection(conn, sub)?,
        Some(("dashboard", sub)) => dashboard(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn analysis(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let result = analyze_spending_patterns(
        conn,
        user,
        sub.get_one::<String>("month").map(|s| s.as_str()),
        sub.get_one::<String>("previous").map(|s| s.as_str()),
    )?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &result)? {
        return Ok(());
    }
    print_analysis(conn, &result)
}

fn print_analysis(conn: &Connection, result: &SpendingAnalysis) -> Result<()> {
    let ccy = get_currency(conn)?;
    println!(
        "This month: {}   Last month: {}",
        fmt_money(&result.current_month.total, &ccy),
        fmt_money(&result.previous_month.total, &ccy),
    );

    let rows = result
        .variations
        .iter()
        .map(|v| {
            vec![
                v.category.clone(),
                format!("{:.2}", v.current_amount),
                format!("{:.2}", v.previous_amount),
                format!("{:.2}", v.variation),
                format!("{:.2}", v.difference),
                if v.is_initial { "yes".into() } else { "no".into() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "Category",
                "Current",
                "Previous",
                "Variation %",
                "Difference",
                "Initial",
            ],
            rows
        )
    );

    if !result.saving_opportunities.is_empty() {
        let rows = result
            .saving_opportunities
            .iter()
            .map(|o| {
                vec![
                    o.category.clone(),
                    format!("{:.2}", o.current_spending),
                    format!("{:.2}", o.potential_saving),
                    o.suggestion.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Spending", "Potential saving", "Suggestion"],
                rows
            )
        );
    }

    for insight in &result.insights {
        println!("- {}", insight);
    }
    Ok(())
}

fn suggestions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let catalog = Catalog::load(conn)?;
    let result = generate_investment_suggestions(conn, user, &catalog)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &result)? {
        return Ok(());
    }
    let rows = result
        .iter()
        .map(|s| {
            vec![
                s.title.clone(),
                format!("{:.2}", s.suggested_amount),
                format!("{:.2}%", s.expected_return * rust_decimal::Decimal::ONE_HUNDRED),
                s.risk_level.label().to_string(),
                s.category.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Instrument", "Monthly", "Annual return", "Risk", "Category"],
            rows
        )
    );
    Ok(())
}

fn projection(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let catalog = Catalog::load(conn)?;
    let amount = match sub.get_one::<String>("amount") {
        Some(raw) => Some(parse_decimal(raw.trim())?),
        None => None,
    };
    let result = calculate_financial_projections(
        user,
        &catalog,
        amount,
        sub.get_one::<String>("type").map(|s| s.as_str()),
    )?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &result)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    println!(
        "{} at {:.2}% a year, {} monthly",
        result.investment_type,
        result.annual_rate * rust_decimal::Decimal::ONE_HUNDRED,
        fmt_money(&result.monthly_investment, &ccy),
    );
    let rows = result
        .projections
        .iter()
        .map(|p| {
            vec![
                p.month.to_string(),
                format!("{:.2}", p.invested),
                format!("{:.2}", p.value),
                format!("{:.2}", p.profit),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Invested", "Value", "Profit"], rows)
    );
    println!(
        "After 24 months: {} invested, {} value, {} profit",
        fmt_money(&result.total_invested, &ccy),
        fmt_money(&result.final_value, &ccy),
        fmt_money(&result.total_profit, &ccy),
    );
    Ok(())
}

fn dashboard(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let catalog = Catalog::load(conn)?;
    let result = get_dashboard_insights(conn, user, &catalog)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &result)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    println!(
        "This month: {}   Last month: {}   Variation: {:.2}%",
        fmt_money(&result.total_spent_this_month, &ccy),
        fmt_money(&result.total_spent_last_month, &ccy),
        result.monthly_variation,
    );
    match &result.top_saving_opportunity {
        Some(o) => println!(
            "Top saving opportunity: {} ({} potential saving)",
            o.category,
            fmt_money(&o.potential_saving, &ccy)
        ),
        None => println!("Top saving opportunity: none yet"),
    }
    match &result.best_investment_suggestion {
        Some(s) => println!("Best suggestion: {}", s.description),
        None => println!("Best suggestion: none yet"),
    }
    println!(
        "Projected gain over 2 years: {}",
        fmt_money(&result.projected_gain_in_2_years, &ccy)
    );
    for insight in &result.insights {
        println!("- {}", insight);
    }
    Ok(())
}
