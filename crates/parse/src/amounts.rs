use std::sync::OnceLock;

use regex::Regex;

/// Monetary token: comma-grouped digits, a decimal point, exactly two
/// fractional digits, and an optional trailing `DR` debit marker.
/// Examples: `4,138.39`, `7,010.00DR`.
fn re_amount() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| Regex::new(r"([\d,]+\.\d{2}(?:DR)?)").expect("invalid regex"))
}

/// Result of splitting the trailing monetary tokens off a fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmountSplit {
    pub description: String,
    pub amount: String,
    pub balance: String,
}

/// Partition a text fragment into (description, amount, balance).
///
/// With two or more monetary tokens, the last two are amount and
/// balance; with exactly one, it is the balance (the B/F row shape);
/// with none, the whole trimmed fragment is description.
///
/// Extracted tokens are removed from the fragment rightmost occurrence
/// first, so identical amount and balance strings each consume their
/// own occurrence. Known limitation: with three or more identical
/// tokens in one fragment, only the final two occurrences are removed;
/// the earlier ones stay in the description.
pub fn split_amounts(text: &str) -> AmountSplit {
    let tokens: Vec<&str> = re_amount().find_iter(text).map(|m| m.as_str()).collect();

    match tokens.len() {
        0 => AmountSplit {
            description: text.trim().to_string(),
            ..Default::default()
        },
        1 => {
            let balance = tokens[0];
            AmountSplit {
                description: remove_rightmost(text.to_string(), &[balance]),
                amount: String::new(),
                balance: balance.to_string(),
            }
        }
        n => {
            let amount = tokens[n - 2];
            let balance = tokens[n - 1];
            AmountSplit {
                description: remove_rightmost(text.to_string(), &[amount, balance]),
                amount: amount.to_string(),
                balance: balance.to_string(),
            }
        }
    }
}

fn remove_rightmost(mut text: String, tokens: &[&str]) -> String {
    for tok in tokens {
        if let Some(idx) = text.rfind(tok) {
            text.replace_range(idx..idx + tok.len(), "");
        }
    }
    text.trim().to_string()
}
