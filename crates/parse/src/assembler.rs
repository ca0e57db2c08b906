use ledgerlens_core::{TransactionRecord, BROUGHT_FORWARD};
use regex::Regex;

use crate::amounts::split_amounts;
use crate::classify::{classify_line, LineKind};

/// Stateful accumulator turning the isolated line sequence into sealed
/// records. Two states: no open record, or one record collecting
/// continuation text until the next date-leading line seals it.
pub struct RecordAssembler<'re> {
    date_re: &'re Regex,
    value_date_re: &'re Regex,
    current: Option<TransactionRecord>,
    sealed: Vec<TransactionRecord>,
}

impl<'re> RecordAssembler<'re> {
    /// `date_re` decides start-of-record (`\s+` separator before the
    /// remainder); `value_date_re` rescans the remainder for a second
    /// date token and tolerates a missing separator (`\s*`).
    pub fn new(date_re: &'re Regex, value_date_re: &'re Regex) -> Self {
        Self {
            date_re,
            value_date_re,
            current: None,
            sealed: Vec::new(),
        }
    }

    pub fn push_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        match classify_line(self.date_re, line) {
            LineKind::Start { date_posted, rest } => {
                if let Some(done) = self.current.take() {
                    self.sealed.push(done);
                }
                self.current = Some(self.open_record(date_posted, rest));
            }
            LineKind::Continuation { text } => match self.current.as_mut() {
                Some(rec) => {
                    if rec.description.is_empty() {
                        rec.description = text.to_string();
                    } else {
                        rec.description.push(' ');
                        rec.description.push_str(text);
                    }
                }
                // A continuation with no open record means the section
                // isolator let noise through; drop it rather than abort.
                None => tracing::debug!(line = text, "orphan continuation line dropped"),
            },
        }
    }

    /// Seal any open record and return the ordered output sequence.
    pub fn finish(mut self) -> Vec<TransactionRecord> {
        if let Some(done) = self.current.take() {
            self.sealed.push(done);
        }
        self.sealed
    }

    fn open_record(&self, date_posted: &str, rest: &str) -> TransactionRecord {
        // Opening-balance row: no amount, no description, balance from
        // the single-token branch of the splitter.
        if rest.contains(BROUGHT_FORWARD) {
            let split = split_amounts(rest);
            return TransactionRecord {
                date_posted: date_posted.to_string(),
                value_date: BROUGHT_FORWARD.to_string(),
                balance: split.balance,
                ..Default::default()
            };
        }

        let (value_date, remainder) = match self.value_date_re.captures(rest) {
            Some(caps) => (
                caps.get(1).map_or("", |m| m.as_str()).to_string(),
                caps.get(2).map_or("", |m| m.as_str()).trim(),
            ),
            None => (String::new(), rest),
        };

        let split = split_amounts(remainder);
        TransactionRecord {
            date_posted: date_posted.to_string(),
            value_date,
            cheque_number: String::new(),
            description: split.description,
            amount: split.amount,
            balance: split.balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regexes() -> (Regex, Regex) {
        (
            Regex::new(r"^(\d{1,2}\s+MAY)\s+(.*)$").unwrap(),
            Regex::new(r"^(\d{1,2}\s+MAY)\s*(.*)$").unwrap(),
        )
    }

    fn assemble(lines: &[&str]) -> Vec<TransactionRecord> {
        let (date_re, value_date_re) = regexes();
        let mut asm = RecordAssembler::new(&date_re, &value_date_re);
        for line in lines {
            asm.push_line(line);
        }
        asm.finish()
    }

    #[test]
    fn record_with_continuation_line() {
        let recs = assemble(&[
            "15 MAY 15 MAY PAYMENT FROM CLIENT A 1,000.00 10,053.38",
            "continued note",
        ]);
        assert_eq!(recs.len(), 1);
        let r = &recs[0];
        assert_eq!(r.date_posted, "15 MAY");
        assert_eq!(r.value_date, "15 MAY");
        assert_eq!(r.cheque_number, "");
        assert_eq!(r.description, "PAYMENT FROM CLIENT A continued note");
        assert_eq!(r.amount, "1,000.00");
        assert_eq!(r.balance, "10,053.38");
    }

    #[test]
    fn brought_forward_row() {
        let recs = assemble(&["01 MAY B/F Balance 9,053.38"]);
        assert_eq!(recs.len(), 1);
        let r = &recs[0];
        assert_eq!(r.date_posted, "01 MAY");
        assert_eq!(r.value_date, "B/F Balance");
        assert_eq!(r.description, "");
        assert_eq!(r.amount, "");
        assert_eq!(r.balance, "9,053.38");
        assert!(r.is_opening_balance());
    }

    #[test]
    fn next_start_line_seals_previous_record() {
        let recs = assemble(&[
            "15 MAY 15 MAY FIRST 1.00 2.00",
            "wrapped",
            "16 MAY 16 MAY SECOND 3.00 4.00",
        ]);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].description, "FIRST wrapped");
        assert_eq!(recs[1].description, "SECOND");
    }

    #[test]
    fn output_preserves_input_order() {
        let recs = assemble(&[
            "01 MAY B/F Balance 9,053.38",
            "15 MAY 15 MAY A 1.00 2.00",
            "27 MAY 27 MAY B 3.00 4.00",
        ]);
        let dates: Vec<&str> = recs.iter().map(|r| r.date_posted.as_str()).collect();
        assert_eq!(dates, vec!["01 MAY", "15 MAY", "27 MAY"]);
    }

    #[test]
    fn missing_value_date_treats_remainder_as_description() {
        let recs = assemble(&["15 MAY DEPOSIT 200.00 1,200.00"]);
        assert_eq!(recs[0].value_date, "");
        assert_eq!(recs[0].description, "DEPOSIT");
        assert_eq!(recs[0].amount, "200.00");
    }

    #[test]
    fn orphan_continuation_is_ignored() {
        let recs = assemble(&["stray noise", "15 MAY 15 MAY OK 1.00 2.00"]);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].description, "OK");
    }

    #[test]
    fn malformed_remainder_degrades_to_empty_fields() {
        let recs = assemble(&["15 MAY ???"]);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].date_posted, "15 MAY");
        assert_eq!(recs[0].description, "???");
        assert_eq!(recs[0].amount, "");
        assert_eq!(recs[0].balance, "");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let recs = assemble(&["", "15 MAY 15 MAY A 1.00 2.00", "   "]);
        assert_eq!(recs.len(), 1);
    }
}
