//! Salary text parsing
//!
//! Recovers a numeric range, pay cadence and currency from free-form snippets
//! such as `"$140,000 - $170,000 a year"` or `"£20 an hour"`.

use crate::record::{Cadence, SalaryRange};
use regex::Regex;
use std::sync::OnceLock;

/// Currency markers checked in order; the first one contained in the text wins.
///
/// Prefixed dollar forms come before the bare `$` so they can match at all.
const CURRENCY_MARKERS: &[(&str, &str)] = &[
    ("CA$", "CAD"),
    ("C$", "CAD"),
    ("AU$", "AUD"),
    ("A$", "AUD"),
    ("$", "USD"),
    ("£", "GBP"),
    ("€", "EUR"),
    ("₹", "INR"),
    ("PKR", "PKR"),
];

/// Cadence phrases checked in order against the lowercased text
const CADENCE_PHRASES: &[(&str, Cadence)] = &[
    ("per year", Cadence::Yearly),
    ("a year", Cadence::Yearly),
    ("year", Cadence::Yearly),
    ("per month", Cadence::Monthly),
    ("a month", Cadence::Monthly),
    ("month", Cadence::Monthly),
    ("per hour", Cadence::Hourly),
    ("an hour", Cadence::Hourly),
    ("hour", Cadence::Hourly),
    ("per day", Cadence::Daily),
    ("a day", Cadence::Daily),
    ("day", Cadence::Daily),
];

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"[0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]+)?").expect("number pattern is valid")
    })
}

fn currency_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b([A-Z]{3})\b").expect("currency pattern is valid"))
}

/// Parses a salary snippet into a [`SalaryRange`]
///
/// # Rules
///
/// - No digit anywhere in the text → `None`
/// - Currency: first marker from a fixed table, else the first standalone
///   three-letter uppercase word, else absent
/// - Numbers: thousands-grouped decimals (`140,000`, `62.50`); grouping commas
///   are stripped. A number must not start right after another digit.
/// - Cadence: first phrase from a fixed priority list found in the lowercased text
/// - Range: min and max of the numbers found; one number gives `min == max`
///
/// # Example
///
/// ```
/// use job_harvest::extract::parse_salary_text;
/// use job_harvest::record::Cadence;
///
/// let range = parse_salary_text("$140,000 - $170,000 a year").unwrap();
/// assert_eq!(range.min, 140000.0);
/// assert_eq!(range.max, 170000.0);
/// assert_eq!(range.cadence, Some(Cadence::Yearly));
/// assert_eq!(range.currency.as_deref(), Some("USD"));
/// ```
pub fn parse_salary_text(text: &str) -> Option<SalaryRange> {
    if !text.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let currency = detect_currency(text);
    let values = extract_numbers(text);
    let cadence = detect_cadence(text);

    SalaryRange::from_values(&values, cadence, currency)
}

/// Detects the currency code of a salary string
pub fn detect_currency(text: &str) -> Option<String> {
    CURRENCY_MARKERS
        .iter()
        .find(|(marker, _)| text.contains(marker))
        .map(|(_, code)| code.to_string())
        .or_else(|| {
            currency_code_pattern()
                .captures(text)
                .map(|caps| caps[1].to_string())
        })
}

/// Detects the pay cadence of a salary string
pub fn detect_cadence(text: &str) -> Option<Cadence> {
    let lowered = text.to_lowercase();
    CADENCE_PHRASES
        .iter()
        .find(|(phrase, _)| lowered.contains(phrase))
        .map(|(_, cadence)| *cadence)
}

/// Extracts every grouped decimal number from the text, in order
fn extract_numbers(text: &str) -> Vec<f64> {
    let pattern = number_pattern();
    let mut values = Vec::new();
    let mut pos = 0;

    while let Some(m) = pattern.find_at(text, pos) {
        let preceded_by_digit = text[..m.start()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_digit());

        if preceded_by_digit {
            // Retry one character later, the match start is always an ASCII digit
            pos = m.start() + 1;
            continue;
        }

        if let Ok(value) = m.as_str().replace(',', "").parse::<f64>() {
            values.push(value);
        }
        pos = m.end();
    }

    values
}
