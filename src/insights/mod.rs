// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analysis;
pub mod catalog;
pub mod dashboard;
pub mod projection;
pub mod suggestions;
pub mod types;

use rust_decimal::Decimal;
use thiserror::Error;

/// Domain preconditions the engine enforces before computing anything.
/// Everything downstream degrades gracefully (empty windows, unknown
/// categories, missing history) instead of erroring.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("user id must not be empty")]
    EmptyUserId,
    #[error("investment amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
}
