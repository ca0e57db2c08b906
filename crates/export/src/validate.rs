use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One differing line between produced and reference output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiff {
    /// 1-based line number.
    pub line: usize,
    pub produced: String,
    pub reference: String,
}

/// Outcome of a produced-vs-reference comparison. A mismatch is a
/// reportable observation, never an error: extraction output stands
/// regardless.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub produced_lines: usize,
    pub reference_lines: usize,
    pub diffs: Vec<LineDiff>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.produced_lines == self.reference_lines && self.diffs.is_empty()
    }
}

/// Byte-for-byte, line-for-line comparison. Lines keep their
/// terminators, so a CRLF/LF disagreement or a missing trailing newline
/// counts as a difference; extra lines on either side show up as diffs
/// against an empty string.
pub fn compare_lines(produced: &str, reference: &str) -> ValidationReport {
    let out: Vec<&str> = produced.split_inclusive('\n').collect();
    let reference_split: Vec<&str> = reference.split_inclusive('\n').collect();

    let mut report = ValidationReport {
        produced_lines: out.len(),
        reference_lines: reference_split.len(),
        diffs: Vec::new(),
    };

    let max = out.len().max(reference_split.len());
    for i in 0..max {
        let p = out.get(i).copied().unwrap_or("");
        let r = reference_split.get(i).copied().unwrap_or("");
        if p != r {
            report.diffs.push(LineDiff {
                line: i + 1,
                produced: p.trim_end_matches(['\r', '\n']).to_string(),
                reference: r.trim_end_matches(['\r', '\n']).to_string(),
            });
        }
    }

    if report.passed() {
        tracing::info!("validation passed: output matches reference exactly");
    } else {
        tracing::warn!(
            diffs = report.diffs.len(),
            produced = report.produced_lines,
            reference = report.reference_lines,
            "validation mismatch"
        );
    }

    report
}

pub fn validate_files(produced: &Path, reference: &Path) -> Result<ValidationReport, ValidateError> {
    let out = std::fs::read_to_string(produced)?;
    let re = std::fs::read_to_string(reference)?;
    Ok(compare_lines(&out, &re))
}
