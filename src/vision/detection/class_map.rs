// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Label id to class name mapping

use std::collections::HashMap;

/// Name used for label ids missing from the map
pub const UNKNOWN_CLASS: &str = "unknown";

/// Immutable mapping from label id to human-readable class name
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMap {
    names: HashMap<i64, String>,
}

impl Default for ClassMap {
    /// Background plus the single fine-tuned class
    fn default() -> Self {
        Self::from_pairs([(0, "background"), (1, "gun")])
    }
}

impl ClassMap {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        Self {
            names: pairs
                .into_iter()
                .map(|(id, name)| (id, name.into()))
                .collect(),
        }
    }

    /// Class name for a label id, or `"unknown"`
    pub fn name(&self, label: i64) -> &str {
        self.names
            .get(&label)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CLASS)
    }
}
