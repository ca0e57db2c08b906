use regex::Regex;

/// Classification of one non-blank OCR line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// The line opens a new record: it leads with a `Date Posted`
    /// token; `rest` is everything after it.
    Start { date_posted: &'a str, rest: &'a str },
    /// A wrapped continuation of the previous record's description.
    Continuation { text: &'a str },
}

/// Pure classifier: a line starts a record iff it matches `date_re`
/// (`^(\d{1,2}\s+<MONTH>)\s+(.*)` for the layout's month token).
/// Everything else is a continuation.
pub fn classify_line<'a>(date_re: &Regex, line: &'a str) -> LineKind<'a> {
    let line = line.trim();
    match date_re.captures(line) {
        Some(caps) => {
            let date_posted = caps.get(1).map_or("", |m| m.as_str());
            let rest = caps.get(2).map_or("", |m| m.as_str()).trim();
            LineKind::Start { date_posted, rest }
        }
        None => LineKind::Continuation { text: line },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date_re() -> Regex {
        Regex::new(r"^(\d{1,2}\s+MAY)\s+(.*)$").unwrap()
    }

    #[test]
    fn date_leading_line_is_start() {
        let re = date_re();
        assert_eq!(
            classify_line(&re, "15 MAY 15 MAY PAYMENT 1,000.00 10,053.38"),
            LineKind::Start {
                date_posted: "15 MAY",
                rest: "15 MAY PAYMENT 1,000.00 10,053.38",
            }
        );
    }

    #[test]
    fn single_digit_day_is_start() {
        let re = date_re();
        assert!(matches!(
            classify_line(&re, "1 MAY something"),
            LineKind::Start { date_posted: "1 MAY", .. }
        ));
    }

    #[test]
    fn wrapped_text_is_continuation() {
        let re = date_re();
        assert_eq!(
            classify_line(&re, "  BN-20240527-1344432  "),
            LineKind::Continuation { text: "BN-20240527-1344432" }
        );
    }

    #[test]
    fn wrong_month_token_is_continuation() {
        let re = date_re();
        assert!(matches!(
            classify_line(&re, "15 JUN PAYMENT 1.00 2.00"),
            LineKind::Continuation { .. }
        ));
    }

    #[test]
    fn date_mid_line_is_continuation() {
        let re = date_re();
        assert!(matches!(
            classify_line(&re, "POSTED 15 MAY PAYMENT"),
            LineKind::Continuation { .. }
        ));
    }
}
