use serde::{Deserialize, Serialize};

use crate::corrections::CorrectionSet;
use crate::parser::ParseError;

/// Marker phrases that bound the transaction table inside raw OCR text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SectionMarkers {
    /// The table body starts on the line after the first line
    /// containing this phrase.
    pub start: String,
    /// The table body ends before the first later line containing any
    /// of these phrases; absent footers mean the body runs to EOF.
    pub footers: Vec<String>,
}

impl Default for SectionMarkers {
    fn default() -> Self {
        Self {
            start: "Balance Carried Forward".to_string(),
            footers: vec!["We find ways".to_string(), "Please review".to_string()],
        }
    }
}

/// Everything layout-specific about one bank's statement, loadable from
/// a TOML profile so new layouts need data changes only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutProfile {
    pub name: String,
    /// The fixed month abbreviation of the statement period. Date
    /// columns match `^\d{1,2} <month_token>`.
    pub month_token: String,
    pub markers: SectionMarkers,
    pub corrections: CorrectionSet,
}

impl Default for LayoutProfile {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            month_token: "MAY".to_string(),
            markers: SectionMarkers::default(),
            corrections: CorrectionSet::default(),
        }
    }
}

impl LayoutProfile {
    pub fn from_toml(content: &str) -> Result<Self, ParseError> {
        toml::from_str(content).map_err(|e| ParseError::Profile(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_markers_match_supported_layout() {
        let m = SectionMarkers::default();
        assert_eq!(m.start, "Balance Carried Forward");
        assert_eq!(m.footers, vec!["We find ways", "Please review"]);
    }

    #[test]
    fn profile_from_toml() {
        let toml = r#"
            name = "bdo"
            month_token = "MAY"

            [markers]
            start = "Balance Carried Forward"
            footers = ["We find ways", "Please review"]

            [[corrections.replacements]]
            from = "IBITW"
            to = "IBTW"
        "#;
        let p = LayoutProfile::from_toml(toml).unwrap();
        assert_eq!(p.name, "bdo");
        assert_eq!(p.corrections.replacements.len(), 1);
        assert_eq!(p.corrections.replacements[0].from, "IBITW");
    }

    #[test]
    fn profile_from_toml_defaults_missing_sections() {
        let p = LayoutProfile::from_toml("name = \"minimal\"").unwrap();
        assert_eq!(p.month_token, "MAY");
        assert!(p.corrections.replacements.is_empty());
    }

    #[test]
    fn profile_from_bad_toml_is_error() {
        assert!(matches!(
            LayoutProfile::from_toml("name = ["),
            Err(ParseError::Profile(_))
        ));
    }
}
