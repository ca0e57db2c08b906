use crate::parser::ParseError;
use crate::profile::SectionMarkers;

/// Trim raw OCR text down to the transaction table body.
///
/// The body is the contiguous run of lines after the first line
/// containing the start marker, up to (not including) the first later
/// line containing any footer marker. Blank lines are dropped; relative
/// order is preserved.
///
/// A missing start marker means the document is not in the expected
/// layout at all, which is distinct from a table that merely contains
/// zero transactions.
pub fn isolate_section<'a>(
    markers: &SectionMarkers,
    raw_text: &'a str,
) -> Result<Vec<&'a str>, ParseError> {
    let lines: Vec<&str> = raw_text.trim().lines().collect();

    let mut start = None;
    let mut end = lines.len();

    for (i, line) in lines.iter().enumerate() {
        match start {
            None => {
                if line.contains(&markers.start) {
                    start = Some(i + 1);
                }
            }
            Some(_) => {
                if markers.footers.iter().any(|f| line.contains(f.as_str())) {
                    end = i;
                    break;
                }
            }
        }
    }

    let start = start.ok_or_else(|| ParseError::LayoutNotRecognized(markers.start.clone()))?;

    let section: Vec<&str> = lines[start..end]
        .iter()
        .copied()
        .filter(|l| !l.trim().is_empty())
        .collect();

    tracing::debug!(lines = section.len(), "isolated transaction section");
    Ok(section)
}
