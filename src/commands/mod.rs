// Copyright (c) 2025 Spendscope.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod catalog;
pub mod categories;
pub mod doctor;
pub mod expenses;
pub mod exporter;
pub mod importer;
pub mod insights;
pub mod settings;
pub mod tips;
