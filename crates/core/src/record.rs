use serde::{Deserialize, Serialize};

/// Column order of the supported statement layout, matching the
/// reference CSV header exactly.
pub const DEFAULT_COLUMNS: [&str; 6] = [
    "Date Posted",
    "Value Date",
    "Cheque Number",
    "Description",
    "Amount",
    "Balance",
];

/// Sentinel placed in `value_date` on the opening-balance row.
pub const BROUGHT_FORWARD: &str = "B/F Balance";

/// One row of the transaction table.
///
/// All fields hold the statement's text verbatim: dates stay in their
/// "15 MAY" form and amounts keep thousands separators and the trailing
/// `DR` debit marker ("7,010.00DR"). Credits carry no suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date_posted: String,
    pub value_date: String,
    /// Always empty in the supported layout; kept for column parity
    /// with statements that do carry cheque numbers.
    pub cheque_number: String,
    pub description: String,
    /// Empty only on the B/F Balance row.
    pub amount: String,
    pub balance: String,
}

impl TransactionRecord {
    /// The opening-balance row carries no amount and no description.
    pub fn is_opening_balance(&self) -> bool {
        self.value_date == BROUGHT_FORWARD
    }

    /// Project a field by its canonical column name. Unknown columns
    /// yield `None` so callers can decide between skipping and erroring.
    pub fn field(&self, column: &str) -> Option<&str> {
        match column {
            "Date Posted" => Some(&self.date_posted),
            "Value Date" => Some(&self.value_date),
            "Cheque Number" => Some(&self.cheque_number),
            "Description" => Some(&self.description),
            "Amount" => Some(&self.amount),
            "Balance" => Some(&self.balance),
            _ => None,
        }
    }

    /// Set a field by its canonical column name. Returns false for an
    /// unrecognized column, leaving the record untouched.
    pub fn set_field(&mut self, column: &str, value: String) -> bool {
        match column {
            "Date Posted" => self.date_posted = value,
            "Value Date" => self.value_date = value,
            "Cheque Number" => self.cheque_number = value,
            "Description" => self.description = value,
            "Amount" => self.amount = value,
            "Balance" => self.balance = value,
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_projection_covers_default_columns() {
        let rec = TransactionRecord {
            date_posted: "15 MAY".into(),
            value_date: "15 MAY".into(),
            cheque_number: String::new(),
            description: "PAYMENT FROM CLIENT A".into(),
            amount: "1,000.00".into(),
            balance: "10,053.38".into(),
        };
        let projected: Vec<&str> = DEFAULT_COLUMNS
            .iter()
            .map(|c| rec.field(c).unwrap())
            .collect();
        assert_eq!(
            projected,
            vec!["15 MAY", "15 MAY", "", "PAYMENT FROM CLIENT A", "1,000.00", "10,053.38"]
        );
    }

    #[test]
    fn field_unknown_column_is_none() {
        let rec = TransactionRecord::default();
        assert_eq!(rec.field("Memo"), None);
    }

    #[test]
    fn set_field_round_trips() {
        let mut rec = TransactionRecord::default();
        assert!(rec.set_field("Balance", "9,053.38".into()));
        assert_eq!(rec.balance, "9,053.38");
        assert!(!rec.set_field("Memo", "x".into()));
    }

    #[test]
    fn opening_balance_detection() {
        let rec = TransactionRecord {
            date_posted: "01 MAY".into(),
            value_date: BROUGHT_FORWARD.into(),
            balance: "9,053.38".into(),
            ..Default::default()
        };
        assert!(rec.is_opening_balance());
        assert!(!TransactionRecord::default().is_opening_balance());
    }
}
