use std::io::{Read, Write};

use ledgerlens_core::{ParsedStatement, TransactionRecord};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV output was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serialize a statement as delimited text: header row from the
/// statement's column list, one record per line, fields projected by
/// column name (unknown columns yield empty fields).
///
/// Quoting is minimal — only fields containing the delimiter, quote, or
/// a line break get quoted — and records end with CRLF. Both choices
/// match the reference files this output is diffed against.
pub fn write_statement<W: Write>(
    statement: &ParsedStatement,
    writer: W,
) -> Result<(), ExportError> {
    let mut w = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    w.write_record(&statement.columns)?;
    for rec in &statement.records {
        w.write_record(
            statement
                .columns
                .iter()
                .map(|col| rec.field(col).unwrap_or("")),
        )?;
    }
    w.flush()?;
    Ok(())
}

/// Serialize to an in-memory string, for validation and tests.
pub fn statement_to_csv(statement: &ParsedStatement) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_statement(statement, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Re-parse delimited output produced by [`write_statement`]. The
/// header row becomes the column list; each data row is projected back
/// into a record through the same canonical column names.
pub fn read_statement<R: Read>(reader: R) -> Result<ParsedStatement, ExportError> {
    let mut r = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let columns: Vec<String> = r.headers()?.iter().map(|h| h.to_string()).collect();

    let mut records = Vec::new();
    for row in r.records() {
        let row = row?;
        let mut rec = TransactionRecord::default();
        for (i, col) in columns.iter().enumerate() {
            if let Some(value) = row.get(i) {
                rec.set_field(col, value.to_string());
            }
        }
        records.push(rec);
    }

    Ok(ParsedStatement { columns, records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerlens_core::BROUGHT_FORWARD;

    fn sample() -> ParsedStatement {
        ParsedStatement::with_default_columns(vec![
            TransactionRecord {
                date_posted: "01 MAY".into(),
                value_date: BROUGHT_FORWARD.into(),
                balance: "9,053.38".into(),
                ..Default::default()
            },
            TransactionRecord {
                date_posted: "15 MAY".into(),
                value_date: "15 MAY".into(),
                cheque_number: String::new(),
                description: "PAYMENT FROM CLIENT A".into(),
                amount: "1,000.00".into(),
                balance: "10,053.38".into(),
            },
        ])
    }

    #[test]
    fn byte_exact_output_for_known_statement() {
        let out = statement_to_csv(&sample()).unwrap();
        assert_eq!(
            out,
            "Date Posted,Value Date,Cheque Number,Description,Amount,Balance\r\n\
             01 MAY,B/F Balance,,,,\"9,053.38\"\r\n\
             15 MAY,15 MAY,,PAYMENT FROM CLIENT A,\"1,000.00\",\"10,053.38\"\r\n"
        );
    }

    #[test]
    fn only_comma_bearing_fields_are_quoted() {
        let out = statement_to_csv(&sample()).unwrap();
        assert!(out.contains("\"1,000.00\""));
        assert!(out.contains("15 MAY,15 MAY"));
        assert!(!out.contains("\"15 MAY\""));
    }

    #[test]
    fn round_trip_reconstructs_field_values() {
        let original = sample();
        let csv = statement_to_csv(&original).unwrap();
        let reparsed = read_statement(csv.as_bytes()).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let file = std::fs::File::create(&path).unwrap();
        write_statement(&sample(), file).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Date Posted,"));
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn header_only_when_no_records() {
        let st = ParsedStatement::with_default_columns(vec![]);
        let out = statement_to_csv(&st).unwrap();
        assert_eq!(
            out,
            "Date Posted,Value Date,Cheque Number,Description,Amount,Balance\r\n"
        );
    }
}
