// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use spendscope::insights::catalog::{Catalog, Instrument, RiskLevel};
use spendscope::insights::projection::calculate_financial_projections;

fn flat_catalog() -> Catalog {
    Catalog::new(vec![Instrument {
        kind: "mattress".into(),
        title: "Under the Mattress".into(),
        annual_rate: Decimal::ZERO,
        risk: RiskLevel::Low,
    }])
    .unwrap()
}

#[test]
fn twelve_percent_annual_projection() {
    // Scenario C: 100/month at 12% a year over 24 months.
    let catalog = Catalog::default();
    let p = calculate_financial_projections(
        "u1",
        &catalog,
        Some(Decimal::from(100)),
        Some("bank_cd"),
    )
    .unwrap();

    assert_eq!(p.investment_type, "bank_cd");
    assert_eq!(p.annual_rate, "0.12".parse().unwrap());
    assert_eq!(p.total_invested, Decimal::from(2400));
    assert_eq!(
        p.projections.iter().map(|pt| pt.month).collect::<Vec<_>>(),
        vec![6, 12, 18, 24]
    );

    // monthlyRate = 1.12^(1/12) - 1 ~ 0.0094888 puts FV(24) near 2681.
    assert!(p.final_value > Decimal::from(2675));
    assert!(p.final_value < Decimal::from(2687));
    assert_eq!(p.total_profit, p.final_value - p.total_invested);

    for pt in &p.projections {
        assert_eq!(pt.invested, Decimal::from(100) * Decimal::from(pt.month));
        assert_eq!(pt.profit, pt.value - pt.invested);
        assert!(pt.value >= pt.invested);
    }
}

#[test]
fn defaults_to_hundred_per_month_in_the_default_instrument() {
    let catalog = Catalog::default();
    let p = calculate_financial_projections("u1", &catalog, None, None).unwrap();
    assert_eq!(p.monthly_investment, Decimal::from(100));
    assert_eq!(p.investment_type, "gov_bond");
}

#[test]
fn unrecognized_kind_falls_back_to_default() {
    let catalog = Catalog::default();
    let p = calculate_financial_projections("u1", &catalog, None, Some("dogecoin")).unwrap();
    assert_eq!(p.investment_type, "gov_bond");
}

#[test]
fn zero_rate_degenerates_to_linear_accumulation() {
    let p = calculate_financial_projections(
        "u1",
        &flat_catalog(),
        Some(Decimal::from(50)),
        Some("mattress"),
    )
    .unwrap();
    for pt in &p.projections {
        assert_eq!(pt.value, Decimal::from(50) * Decimal::from(pt.month));
        assert_eq!(pt.profit, Decimal::ZERO);
    }
    assert_eq!(p.final_value, Decimal::from(1200));
    assert_eq!(p.total_profit, Decimal::ZERO);
}

#[test]
fn non_positive_amount_is_rejected() {
    let catalog = Catalog::default();
    for bad in ["0", "-25"] {
        let err = calculate_financial_projections(
            "u1",
            &catalog,
            Some(bad.parse().unwrap()),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("must be positive"));
    }
}

#[test]
fn empty_user_id_is_rejected() {
    let catalog = Catalog::default();
    assert!(calculate_financial_projections("", &catalog, None, None).is_err());
}
