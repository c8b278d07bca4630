// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Instrument catalog: the table of investable instrument types and their
//! expected annual returns. This is business policy, not algorithm, so it
//! is injected configuration: persisted as JSON under the
//! `instrument_catalog` settings key and defaulted when absent.

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const SETTINGS_KEY: &str = "instrument_catalog";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instrument {
    /// Stable lookup key, e.g. "gov_bond".
    pub kind: String,
    pub title: String,
    /// Expected annual return as a fraction, e.g. 0.12 for 12%.
    pub annual_rate: Decimal,
    pub risk: RiskLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Instrument>", into = "Vec<Instrument>")]
pub struct Catalog {
    instruments: Vec<Instrument>,
}

impl TryFrom<Vec<Instrument>> for Catalog {
    type Error = anyhow::Error;
    fn try_from(instruments: Vec<Instrument>) -> Result<Catalog> {
        Catalog::new(instruments)
    }
}

impl From<Catalog> for Vec<Instrument> {
    fn from(c: Catalog) -> Vec<Instrument> {
        c.instruments
    }
}

impl Default for Catalog {
    fn default() -> Catalog {
        fn pct(n: i64, scale: u32) -> Decimal {
            Decimal::new(n, scale)
        }
        let entry = |kind: &str, title: &str, rate: Decimal, risk: RiskLevel| Instrument {
            kind: kind.to_string(),
            title: title.to_string(),
            annual_rate: rate,
            risk,
        };
        Catalog {
            instruments: vec![
                entry("gov_bond", "Government Bonds", pct(1056, 4), RiskLevel::Low),
                entry("bank_cd", "Bank CD", pct(12, 2), RiskLevel::Low),
                entry("stocks", "Stocks", pct(15, 2), RiskLevel::High),
                entry(
                    "real_estate_fund",
                    "Real Estate Funds",
                    pct(8, 2),
                    RiskLevel::Medium,
                ),
                entry("savings", "Savings Account", pct(7, 2), RiskLevel::Low),
            ],
        }
    }
}

impl Catalog {
    pub fn new(instruments: Vec<Instrument>) -> Result<Catalog> {
        if instruments.is_empty() {
            bail!("Instrument catalog must not be empty");
        }
        if !instruments.iter().any(|i| i.risk == RiskLevel::Low) {
            bail!("Instrument catalog needs at least one low-risk instrument");
        }
        let mut seen: Vec<&str> = Vec::new();
        for i in &instruments {
            if seen.contains(&i.kind.as_str()) {
                bail!("Duplicate instrument kind '{}'", i.kind);
            }
            if i.annual_rate <= Decimal::NEGATIVE_ONE {
                bail!("Annual rate {} for '{}' below -100%", i.annual_rate, i.kind);
            }
            seen.push(&i.kind);
        }
        Ok(Catalog { instruments })
    }

    /// Load the persisted catalog, falling back to the built-in defaults
    /// when none has been set.
    pub fn load(conn: &Connection) -> Result<Catalog> {
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM settings WHERE key=?1",
                params![SETTINGS_KEY],
                |r| r.get(0),
            )
            .optional()?;
        match raw {
            Some(json) => serde_json::from_str(&json).context("Invalid stored instrument catalog"),
            None => Ok(Catalog::default()),
        }
    }

    pub fn save(&self, conn: &Connection) -> Result<()> {
        conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![SETTINGS_KEY, serde_json::to_string(self)?],
        )?;
        Ok(())
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn find(&self, kind: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.kind == kind)
    }

    /// Default instrument: the first low-risk entry. `new` guarantees one
    /// exists.
    pub fn default_instrument(&self) -> &Instrument {
        self.instruments
            .iter()
            .find(|i| i.risk == RiskLevel::Low)
            .unwrap_or(&self.instruments[0])
    }

    /// Resolve an optional/unrecognized kind to a concrete instrument,
    /// falling back to the default instead of failing.
    pub fn resolve(&self, kind: Option<&str>) -> &Instrument {
        kind.and_then(|k| self.find(k))
            .unwrap_or_else(|| self.default_instrument())
    }

    /// The pair of low-risk instruments offered against each saving
    /// opportunity; the second falls back to the first when the catalog
    /// carries a single low-risk entry.
    pub fn low_risk_pair(&self) -> (&Instrument, &Instrument) {
        let mut low = self.instruments.iter().filter(|i| i.risk == RiskLevel::Low);
        let first = low.next().unwrap_or(&self.instruments[0]);
        let second = low.next().unwrap_or(first);
        (first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_resolves_known_and_unknown_kinds() {
        let catalog = Catalog::default();
        assert_eq!(catalog.resolve(Some("bank_cd")).kind, "bank_cd");
        assert_eq!(catalog.resolve(Some("crypto")).kind, "gov_bond");
        assert_eq!(catalog.resolve(None).kind, "gov_bond");
    }

    #[test]
    fn low_risk_pair_comes_in_catalog_order() {
        let catalog = Catalog::default();
        let (a, b) = catalog.low_risk_pair();
        assert_eq!(a.kind, "gov_bond");
        assert_eq!(b.kind, "bank_cd");
    }

    #[test]
    fn rejects_empty_and_duplicate_catalogs() {
        assert!(Catalog::new(vec![]).is_err());
        let dup = vec![
            Instrument {
                kind: "x".into(),
                title: "X".into(),
                annual_rate: Decimal::new(1, 1),
                risk: RiskLevel::Low,
            },
            Instrument {
                kind: "x".into(),
                title: "X again".into(),
                annual_rate: Decimal::new(2, 1),
                risk: RiskLevel::Low,
            },
        ];
        assert!(Catalog::new(dup).is_err());
    }
}
