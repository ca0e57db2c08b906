use ledgerlens_core::{ParsedStatement, TransactionRecord};
use regex::Regex;
use thiserror::Error;

use crate::assembler::RecordAssembler;
use crate::profile::LayoutProfile;
use crate::section::isolate_section;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("statement layout not recognized: start marker '{0}' not found")]
    LayoutNotRecognized(String),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("vision payload error: {0}")]
    Payload(String),
    #[error("invalid layout profile: {0}")]
    Profile(String),
}

/// One parsing strategy: raw document payload in, ordered record
/// sequence out. The OCR text path and the vision JSON path are
/// interchangeable implementations; callers pick one, nothing branches
/// on input shape inside a strategy.
pub trait DocumentParser {
    fn parse_document(&self, raw: &str) -> Result<ParsedStatement, ParseError>;
}

/// The OCR text strategy: isolate the table section, assemble
/// multi-line records, then run the profile's correction tables.
pub struct OcrTextParser {
    profile: LayoutProfile,
    date_re: Regex,
    value_date_re: Regex,
}

impl OcrTextParser {
    pub fn new(profile: LayoutProfile) -> Result<Self, ParseError> {
        let token = profile.month_token.trim();
        if token.is_empty() {
            return Err(ParseError::Profile("month_token must not be empty".into()));
        }
        let token = regex::escape(token);
        let date_re = Regex::new(&format!(r"^(\d{{1,2}}\s+{token})\s+(.*)$"))
            .map_err(|e| ParseError::Profile(e.to_string()))?;
        // The value-date rescan tolerates a missing separator so a bare
        // "15 MAY" remainder still yields an empty description.
        let value_date_re = Regex::new(&format!(r"^(\d{{1,2}}\s+{token})\s*(.*)$"))
            .map_err(|e| ParseError::Profile(e.to_string()))?;
        Ok(Self { profile, date_re, value_date_re })
    }

    pub fn profile(&self) -> &LayoutProfile {
        &self.profile
    }

    /// Parse lines that are already isolated to the table body.
    /// Corrections are still applied.
    pub fn parse_lines<'a, I>(&self, lines: I) -> Vec<TransactionRecord>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut asm = RecordAssembler::new(&self.date_re, &self.value_date_re);
        for line in lines {
            asm.push_line(line);
        }
        let mut records = asm.finish();
        self.profile.corrections.apply_all(&mut records);
        records
    }
}

impl DocumentParser for OcrTextParser {
    fn parse_document(&self, raw: &str) -> Result<ParsedStatement, ParseError> {
        let section = isolate_section(&self.profile.markers, raw)?;
        let records = self.parse_lines(section);
        tracing::info!(
            profile = %self.profile.name,
            records = records.len(),
            "parsed statement from OCR text"
        );
        Ok(ParsedStatement::with_default_columns(records))
    }
}
