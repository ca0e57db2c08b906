use ledgerlens_core::TransactionRecord;
use serde::{Deserialize, Serialize};

use crate::parser::ParseError;

/// One substitution rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Correction {
    pub from: String,
    pub to: String,
}

/// Ordered OCR correction tables for one statement layout.
///
/// `replacements` are global substring substitutions applied in table
/// order; `full_line` rules fire only when the whole corrected
/// description equals `from` (used to restore a significant leading
/// space the OCR strips). Order is part of the configuration: rules are
/// sequences, never maps.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CorrectionSet {
    pub replacements: Vec<Correction>,
    pub full_line: Vec<Correction>,
}

impl CorrectionSet {
    pub fn from_toml(content: &str) -> Result<Self, ParseError> {
        toml::from_str(content).map_err(|e| ParseError::Profile(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty() && self.full_line.is_empty()
    }

    /// Correct a single description.
    pub fn correct(&self, description: &str) -> String {
        let mut desc = description.to_string();
        for rule in &self.replacements {
            if desc.contains(&rule.from) {
                desc = desc.replace(&rule.from, &rule.to);
            }
        }
        for rule in &self.full_line {
            if desc == rule.from {
                desc = rule.to.clone();
                break;
            }
        }
        desc
    }

    /// Correct every sealed record's description in place. Only the
    /// description is ever touched.
    pub fn apply_all(&self, records: &mut [TransactionRecord]) {
        if self.is_empty() {
            return;
        }
        for rec in records.iter_mut() {
            rec.description = self.correct(&rec.description);
        }
    }
}
