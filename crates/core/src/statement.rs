use serde::{Deserialize, Serialize};

use crate::record::{TransactionRecord, DEFAULT_COLUMNS};

/// Output shared by every parsing strategy: an ordered record sequence
/// plus the column list it should be projected through. The OCR text
/// path always uses [`DEFAULT_COLUMNS`]; the vision path may carry a
/// detected column list instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedStatement {
    pub columns: Vec<String>,
    pub records: Vec<TransactionRecord>,
}

impl ParsedStatement {
    pub fn with_default_columns(records: Vec<TransactionRecord>) -> Self {
        Self {
            columns: DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
