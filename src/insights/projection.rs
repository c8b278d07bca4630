// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Financial projection calculator: future value of a fixed monthly
//! contribution compounded at an instrument's annual rate. The compounding
//! itself runs in f64 (the rate conversion is transcendental); results are
//! brought back into Decimal and rounded only at the output boundary.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use super::InsightError;
use super::catalog::Catalog;
use super::types::{FinancialProjection, ProjectionPoint};
use crate::utils::round2;

pub const DEFAULT_MONTHLY_AMOUNT: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

const HORIZON_MONTHS: u32 = 24;
const STEP_MONTHS: u32 = 6;

/// Project a monthly contribution at 6-month checkpoints up to 24 months.
/// A missing amount defaults to 100 units; a missing or unrecognized
/// instrument kind falls back to the catalog default instead of failing.
pub fn calculate_financial_projections(
    user_id: &str,
    catalog: &Catalog,
    amount: Option<Decimal>,
    kind: Option<&str>,
) -> Result<FinancialProjection> {
    if user_id.trim().is_empty() {
        return Err(InsightError::EmptyUserId.into());
    }
    let amount = amount.unwrap_or(DEFAULT_MONTHLY_AMOUNT);
    if amount <= Decimal::ZERO {
        return Err(InsightError::NonPositiveAmount(amount).into());
    }
    let instrument = catalog.resolve(kind);

    let annual = instrument
        .annual_rate
        .to_f64()
        .with_context(|| format!("Annual rate {} out of range", instrument.annual_rate))?;
    let monthly_rate = (1.0 + annual).powf(1.0 / 12.0) - 1.0;
    let pmt = amount
        .to_f64()
        .with_context(|| format!("Contribution {} out of range", amount))?;

    let mut projections = Vec::new();
    for month in (STEP_MONTHS..=HORIZON_MONTHS).step_by(STEP_MONTHS as usize) {
        projections.push(point(pmt, monthly_rate, amount, month)?);
    }

    let last = point(pmt, monthly_rate, amount, HORIZON_MONTHS)?;
    Ok(FinancialProjection {
        investment_type: instrument.kind.clone(),
        monthly_investment: amount,
        annual_rate: instrument.annual_rate,
        projections,
        total_invested: last.invested,
        final_value: last.value,
        total_profit: last.profit,
    })
}

fn point(pmt: f64, monthly_rate: f64, amount: Decimal, month: u32) -> Result<ProjectionPoint> {
    let fv = future_value(pmt, monthly_rate, month);
    let value = round2(
        Decimal::from_f64(fv).with_context(|| format!("Projected value {} out of range", fv))?,
    );
    // Invested is exact (amount has at most 2 decimals), so deriving the
    // profit from the rounded value keeps profit == value - invested.
    let invested = amount * Decimal::from(month);
    let profit = value - invested;
    Ok(ProjectionPoint {
        month,
        value,
        invested,
        profit,
    })
}

/// FV of an ordinary annuity: PMT * (((1+r)^n - 1) / r). At r == 0 the
/// formula degenerates to plain accumulation, guarded explicitly.
fn future_value(pmt: f64, rate: f64, months: u32) -> f64 {
    if rate == 0.0 {
        pmt * f64::from(months)
    } else {
        pmt * ((1.0 + rate).powi(months as i32) - 1.0) / rate
    }
}
