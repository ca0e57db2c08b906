use ledgerlens_core::{ParsedStatement, TransactionRecord, DEFAULT_COLUMNS};
use serde_json::Value;

use crate::parser::{DocumentParser, ParseError};

/// The vision-model strategy: the model has already read the table, so
/// section isolation, line stitching, and corrections are all skipped.
/// Input is either `{"columns": [...], "transactions": [{...}]}` or the
/// bare row array most models return; row objects map column names to
/// field values.
#[derive(Debug, Default)]
pub struct VisionJsonParser;

impl VisionJsonParser {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentParser for VisionJsonParser {
    fn parse_document(&self, raw: &str) -> Result<ParsedStatement, ParseError> {
        let value: Value = serde_json::from_str(raw.trim())?;

        let (columns, rows) = match value {
            Value::Array(rows) => (None, rows),
            Value::Object(mut obj) => {
                let columns = match obj.remove("columns") {
                    Some(v) => Some(
                        serde_json::from_value::<Vec<String>>(v)
                            .map_err(|e| ParseError::Payload(format!("bad 'columns': {e}")))?,
                    ),
                    None => None,
                };
                let rows = match obj.remove("transactions") {
                    Some(Value::Array(rows)) => rows,
                    Some(_) => {
                        return Err(ParseError::Payload("'transactions' is not an array".into()))
                    }
                    None => return Err(ParseError::Payload("missing 'transactions' key".into())),
                };
                (columns, rows)
            }
            _ => return Err(ParseError::Payload("expected a JSON object or array".into())),
        };

        let columns = columns
            .unwrap_or_else(|| DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect());

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let Value::Object(map) = row else {
                return Err(ParseError::Payload("transaction row is not an object".into()));
            };
            let mut rec = TransactionRecord::default();
            for col in &columns {
                if let Some(v) = map.get(col.as_str()) {
                    if !rec.set_field(col, value_to_field(v)) {
                        tracing::debug!(column = %col, "unmapped column in vision payload");
                    }
                }
            }
            records.push(rec);
        }

        tracing::info!(records = records.len(), "parsed statement from vision payload");
        Ok(ParsedStatement { columns, records })
    }
}

fn value_to_field(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
