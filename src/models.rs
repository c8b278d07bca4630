// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub user_id: String,
    pub value: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub description: String,
}

impl Expense {
    /// Column order: id, user_id, value, category, date, description.
    pub fn from_row(r: &rusqlite::Row<'_>) -> Result<Expense> {
        let value_s: String = r.get(2)?;
        let date_s: String = r.get(4)?;
        Ok(Expense {
            id: r.get(0)?,
            user_id: r.get(1)?,
            value: value_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid expense value '{}'", value_s))?,
            category: r.get(3)?,
            date: NaiveDate::parse_from_str(&date_s, "%Y-%m-%d")
                .with_context(|| format!("Invalid expense date '{}'", date_s))?,
            description: r.get(5)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tip {
    pub id: i64,
    pub content: String,
}

/// Closed set of expense categories. Raw labels are kept verbatim as
/// aggregation keys; this enum backs validation, display labels, and the
/// per-category advice tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Transport,
    Housing,
    Bills,
    Entertainment,
    Health,
    Education,
    Shopping,
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Food,
        Category::Transport,
        Category::Housing,
        Category::Bills,
        Category::Entertainment,
        Category::Health,
        Category::Education,
        Category::Shopping,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Housing => "housing",
            Category::Bills => "bills",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::Education => "education",
            Category::Shopping => "shopping",
            Category::Other => "other",
        }
    }

    pub fn from_label(s: &str) -> Option<Category> {
        let s = s.trim().to_lowercase();
        Category::ALL.into_iter().find(|c| c.label() == s)
    }

    /// Display bucket for an arbitrary label: unknown categories map to
    /// `Other` instead of failing.
    pub fn from_label_lossy(s: &str) -> Category {
        Category::from_label(s).unwrap_or(Category::Other)
    }
}
